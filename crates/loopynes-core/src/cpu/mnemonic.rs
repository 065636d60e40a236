use std::fmt::Display;

use crate::cpu::lookup::Handler;

pub mod arith;
pub mod bra;
pub mod ctrl;
pub mod flags;
pub mod inc;
pub mod kil;
pub mod load;
pub mod logic;
pub mod nop;
pub mod shift;
pub mod stack;
pub mod trans;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    //Load/Store
    LAS,
    LAX,
    LDA,
    LDX,
    LDY,
    LXA,
    SAX,
    SHA,
    SHX,
    SHY,
    STA,
    STX,
    STY,
    //Transfer
    SHS,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    //Stack
    PHA,
    PHP,
    PLA,
    PLP,
    //Shift
    ASL,
    LSR,
    ROL,
    ROR,
    //Logic
    AND,
    BIT,
    EOR,
    ORA,
    //Arithmetic
    ADC,
    ANC,
    ARR,
    ASR,
    CMP,
    CPX,
    CPY,
    DCP,
    ISC,
    RLA,
    RRA,
    SBC,
    SBX,
    SLO,
    SRE,
    XAA,
    //Arithmetic: Inc/Dec
    DEC,
    DEX,
    DEY,
    INC,
    INX,
    INY,
    //Control Flow
    BRK,
    JMP,
    JSR,
    RTI,
    RTS,
    //Control Flow: Branch
    BCC,
    BCS,
    BEQ,
    BMI,
    BNE,
    BPL,
    BVC,
    BVS,
    //Flags
    CLC,
    CLD,
    CLI,
    CLV,
    SEC,
    SED,
    SEI,
    //KIL
    JAM,
    //NOP
    NOP,
}

impl Mnemonic {
    pub(crate) const fn handler(self) -> Handler {
        match self {
            // ===============================
            // Load / Store Instructions
            // ===============================
            Mnemonic::LAS => Self::las,
            Mnemonic::LAX => Self::lax,
            Mnemonic::LDA => Self::lda,
            Mnemonic::LDX => Self::ldx,
            Mnemonic::LDY => Self::ldy,
            Mnemonic::LXA => Self::lxa,
            Mnemonic::SAX => Self::sax,
            Mnemonic::SHA => Self::sha,
            Mnemonic::SHX => Self::shx,
            Mnemonic::SHY => Self::shy,
            Mnemonic::STA => Self::sta,
            Mnemonic::STX => Self::stx,
            Mnemonic::STY => Self::sty,

            // ===============================
            // Transfer Instructions
            // ===============================
            Mnemonic::SHS => Self::shs,
            Mnemonic::TAX => Self::tax,
            Mnemonic::TAY => Self::tay,
            Mnemonic::TSX => Self::tsx,
            Mnemonic::TXA => Self::txa,
            Mnemonic::TXS => Self::txs,
            Mnemonic::TYA => Self::tya,

            // ===============================
            // Stack Instructions
            // ===============================
            Mnemonic::PHA => Self::pha,
            Mnemonic::PHP => Self::php,
            Mnemonic::PLA => Self::pla,
            Mnemonic::PLP => Self::plp,

            // ===============================
            // Shift Instructions
            // ===============================
            Mnemonic::ASL => Self::asl,
            Mnemonic::LSR => Self::lsr,
            Mnemonic::ROL => Self::rol,
            Mnemonic::ROR => Self::ror,

            // ===============================
            // Logic Instructions
            // ===============================
            Mnemonic::AND => Self::and,
            Mnemonic::BIT => Self::bit,
            Mnemonic::EOR => Self::eor,
            Mnemonic::ORA => Self::ora,

            // ===============================
            // Arithmetic Instructions
            // ===============================
            Mnemonic::ADC => Self::adc,
            Mnemonic::ANC => Self::anc,
            Mnemonic::ARR => Self::arr,
            Mnemonic::ASR => Self::asr,
            Mnemonic::CMP => Self::cmp,
            Mnemonic::CPX => Self::cpx,
            Mnemonic::CPY => Self::cpy,
            Mnemonic::DCP => Self::dcp,
            Mnemonic::ISC => Self::isc,
            Mnemonic::RLA => Self::rla,
            Mnemonic::RRA => Self::rra,
            Mnemonic::SBC => Self::sbc,
            Mnemonic::SBX => Self::sbx,
            Mnemonic::SLO => Self::slo,
            Mnemonic::SRE => Self::sre,
            Mnemonic::XAA => Self::xaa,

            // ===============================
            // Increment / Decrement
            // ===============================
            Mnemonic::DEC => Self::dec,
            Mnemonic::DEX => Self::dex,
            Mnemonic::DEY => Self::dey,
            Mnemonic::INC => Self::inc,
            Mnemonic::INX => Self::inx,
            Mnemonic::INY => Self::iny,

            // ===============================
            // Control Flow
            // ===============================
            Mnemonic::BRK => Self::brk,
            Mnemonic::JMP => Self::jmp,
            Mnemonic::JSR => Self::jsr,
            Mnemonic::RTI => Self::rti,
            Mnemonic::RTS => Self::rts,

            // ===============================
            // Branch Instructions
            // ===============================
            Mnemonic::BCC => Self::bcc,
            Mnemonic::BCS => Self::bcs,
            Mnemonic::BEQ => Self::beq,
            Mnemonic::BMI => Self::bmi,
            Mnemonic::BNE => Self::bne,
            Mnemonic::BPL => Self::bpl,
            Mnemonic::BVC => Self::bvc,
            Mnemonic::BVS => Self::bvs,

            // ===============================
            // Flag Control
            // ===============================
            Mnemonic::CLC => Self::clc,
            Mnemonic::CLD => Self::cld,
            Mnemonic::CLI => Self::cli,
            Mnemonic::CLV => Self::clv,
            Mnemonic::SEC => Self::sec,
            Mnemonic::SED => Self::sed,
            Mnemonic::SEI => Self::sei,

            // ===============================
            // Other
            // ===============================
            Mnemonic::JAM => Self::jam,
            Mnemonic::NOP => Self::nop,
        }
    }

    /// Whether this mnemonic only exists as an undocumented NMOS opcode.
    pub const fn is_undocumented(self) -> bool {
        matches!(
            self,
            Mnemonic::LAS
                | Mnemonic::LAX
                | Mnemonic::LXA
                | Mnemonic::SAX
                | Mnemonic::SHA
                | Mnemonic::SHX
                | Mnemonic::SHY
                | Mnemonic::SHS
                | Mnemonic::ANC
                | Mnemonic::ARR
                | Mnemonic::ASR
                | Mnemonic::DCP
                | Mnemonic::ISC
                | Mnemonic::RLA
                | Mnemonic::RRA
                | Mnemonic::SBX
                | Mnemonic::SLO
                | Mnemonic::SRE
                | Mnemonic::XAA
                | Mnemonic::JAM
        )
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
