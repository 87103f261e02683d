//! Access to 32-bit peripheral registers.
//!
//! Everything above this module talks to a [`RegisterFile`]. On the board it
//! is [`crate::mmio::Mmio`], on the host it is [`SimRegisters`].

use heapless::{LinearMap, Vec};

use crate::regs::Register;

/// Word-wide access to the registers of [`Register`].
///
/// Every call touches the register exactly once; implementations must not
/// cache values.
pub trait RegisterFile {
    fn read(&self, reg: Register) -> u32;

    fn write(&mut self, reg: Register, value: u32);

    /// Read-modify-write: one read, then one write of `f(old)`.
    fn modify<F: FnOnce(u32) -> u32>(&mut self, reg: Register, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}

impl<T: RegisterFile + ?Sized> RegisterFile for &mut T {
    fn read(&self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u32) {
        (**self).write(reg, value)
    }
}

/// One recorded write of [`SimRegisters`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Write {
    pub reg: Register,
    pub value: u32,
}

const CELLS: usize = 8;
const LOG_DEPTH: usize = 32;

/// In-memory stand-in for the peripheral address space.
///
/// Cells are keyed by physical address; a cell that was never written reads
/// as zero. The first writes are kept in order for inspection, later ones
/// are only counted.
#[derive(Clone, Debug, Default)]
pub struct SimRegisters {
    cells: LinearMap<u32, u32, CELLS>,
    log: Vec<Write, LOG_DEPTH>,
    writes: usize,
}

impl SimRegisters {
    /// All registers read as zero.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Preloads `reg` with `value` without recording a write.
    pub fn with(mut self, reg: Register, value: u32) -> Self {
        self.store(reg.address(), value);
        self
    }

    /// Raw value at a physical address.
    pub fn peek(&self, address: u32) -> u32 {
        self.cells.get(&address).copied().unwrap_or(0)
    }

    /// Writes in the order they happened, up to the log depth.
    pub fn writes(&self) -> &[Write] {
        &self.log
    }

    /// Number of writes, including the ones past the log depth.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn store(&mut self, address: u32, value: u32) {
        // one cell per `Register`, the map never fills up
        if self.cells.insert(address, value).is_err() {
            warn!("sim register map full, dropped write to {:#x}", address);
        }
    }
}

impl RegisterFile for SimRegisters {
    fn read(&self, reg: Register) -> u32 {
        self.peek(reg.address())
    }

    fn write(&mut self, reg: Register, value: u32) {
        self.store(reg.address(), value);
        self.writes += 1;
        let _ = self.log.push(Write { reg, value });
    }
}
