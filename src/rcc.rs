//! Peripheral clock gating.
use crate::register_file::RegisterFile;
use crate::regs::{Register, RCC_AHB1ENR_GPIOGEN};

/// One enable bit in an RCC clock enable register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockGate {
    pub register: Register,
    pub mask: u32,
}

/// GPIOG clock on AHB1.
pub const GPIOG: ClockGate = ClockGate {
    register: Register::RccAhb1enr,
    mask: RCC_AHB1ENR_GPIOGEN,
};

/// Sets the enable bit, leaving the other bits of the register as they are.
///
/// The register is read back once after the write so the enable has reached
/// RCC before the peripheral is touched.
pub fn enable<R: RegisterFile>(regs: &mut R, gate: ClockGate) {
    regs.modify(gate.register, |v| v | gate.mask);
    // dummy read, the value is not needed
    let _ = regs.read(gate.register);
    debug!("clock gate {:#x} enabled", gate.mask);
}

pub fn is_enabled<R: RegisterFile>(regs: &R, gate: ClockGate) -> bool {
    regs.read(gate.register) & gate.mask == gate.mask
}
