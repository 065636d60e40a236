//! Observation hooks around instruction execution.
//!
//! Layers see the CPU right before and right after every instruction, together
//! with a read-only view of the CPU bus. They cannot change emulated state.

use std::{
    any::{Any, TypeId},
    fmt::Debug,
};

use crate::{bus::Bus, cpu::Cpu};

pub mod trace;

pub use trace::{TraceLine, TraceRecorder};

pub trait Interceptor: Any + Send + Debug + 'static {
    /// Called before the instruction at `cpu.pc()` executes.
    fn debug(&mut self, cpu: &Cpu, bus: &dyn Bus);

    /// Called once the instruction has executed.
    fn after(&mut self, _cpu: &Cpu, _bus: &dyn Bus) {}
}

/// Type-keyed stack of interceptor layers, at most one per concrete type.
#[derive(Debug, Default)]
pub struct EmuInterceptor {
    layers: Vec<(TypeId, Box<dyn Interceptor>)>,
}

impl EmuInterceptor {
    /// Create an empty interceptor stack.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a new interceptor to the end of the stack. A layer of the same type
    /// is replaced in place and returned.
    pub fn add<I>(&mut self, interceptor: I) -> Option<Box<dyn Interceptor>>
    where
        I: Interceptor,
    {
        let id = TypeId::of::<I>();
        let layer: Box<dyn Interceptor> = Box::new(interceptor);
        match self.layers.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, layer)),
            None => {
                self.layers.push((id, layer));
                None
            }
        }
    }

    pub fn remove<I>(&mut self) -> Option<Box<dyn Interceptor>>
    where
        I: Interceptor,
    {
        let id = TypeId::of::<I>();
        let index = self.layers.iter().position(|(key, _)| *key == id)?;
        Some(self.layers.remove(index).1)
    }

    /// Remove all interceptors from the stack.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Number of interceptors currently in the stack.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if there are no interceptors in the stack.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer<T: Interceptor>(&self) -> Option<&T> {
        let id = TypeId::of::<T>();
        let (_, layer) = self.layers.iter().find(|(key, _)| *key == id)?;
        (layer.as_ref() as &dyn Any).downcast_ref::<T>()
    }

    pub fn layer_mut<T: Interceptor>(&mut self) -> Option<&mut T> {
        let id = TypeId::of::<T>();
        let (_, layer) = self.layers.iter_mut().find(|(key, _)| *key == id)?;
        (layer.as_mut() as &mut dyn Any).downcast_mut::<T>()
    }
}

impl Interceptor for EmuInterceptor {
    fn debug(&mut self, cpu: &Cpu, bus: &dyn Bus) {
        for (_, interceptor) in &mut self.layers {
            interceptor.debug(cpu, bus);
        }
    }

    fn after(&mut self, cpu: &Cpu, bus: &dyn Bus) {
        for (_, interceptor) in &mut self.layers {
            interceptor.after(cpu, bus);
        }
    }
}
