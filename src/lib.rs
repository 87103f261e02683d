#![cfg_attr(not(test), no_std)]

// Pure modules (available everywhere)
#[macro_use]
mod fmt;
pub mod blinky;
pub mod delay;
pub mod error;
pub mod gpio;
pub mod rcc;
pub mod register_file;
pub mod regs;

// Hardware modules (available only on ARM)
#[cfg(target_arch = "arm")]
pub mod dwt;
#[cfg(target_arch = "arm")]
pub mod mmio;

pub use error::Error;
pub use register_file::RegisterFile;
