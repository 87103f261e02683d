//! [`RegisterFile`] bound to the real peripherals.
//!
//! Every access is a volatile load or store through `stm32-metapac`, so each
//! read sees the current hardware state and each write lands immediately.
use core::sync::atomic::{AtomicBool, Ordering};

use stm32_metapac::{gpio, rcc, GPIOG, RCC};

use crate::register_file::RegisterFile;
use crate::regs::Register;

static TAKEN: AtomicBool = AtomicBool::new(false);

pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Returns the register file once, `None` on later calls.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(unsafe { Self::steal() })
    }

    /// # Safety
    /// The caller must make sure no other owner writes the same registers.
    pub unsafe fn steal() -> Self {
        TAKEN.store(true, Ordering::Release);
        debug_assert_eq!(RCC.ahb1enr().as_ptr() as u32, Register::RccAhb1enr.address());
        debug_assert_eq!(GPIOG.moder().as_ptr() as u32, Register::GpiogModer.address());
        debug_assert_eq!(GPIOG.odr().as_ptr() as u32, Register::GpiogOdr.address());
        Mmio { _private: () }
    }
}

impl RegisterFile for Mmio {
    fn read(&self, reg: Register) -> u32 {
        match reg {
            Register::RccAhb1enr => RCC.ahb1enr().read().0,
            Register::GpiogModer => GPIOG.moder().read().0,
            Register::GpiogOdr => GPIOG.odr().read().0,
        }
    }

    fn write(&mut self, reg: Register, value: u32) {
        match reg {
            Register::RccAhb1enr => RCC.ahb1enr().write_value(rcc::regs::Ahb1enr(value)),
            Register::GpiogModer => GPIOG.moder().write_value(gpio::regs::Moder(value)),
            Register::GpiogOdr => GPIOG.odr().write_value(gpio::regs::Odr(value)),
        }
    }
}
