//! [`TimeSource`] backed by the DWT cycle counter.
use cortex_m::peripheral::DWT;

use crate::delay::TimeSource;

pub struct CycleCounter {
    clock_hz: u32,
}

impl CycleCounter {
    /// Turns on trace and the cycle counter and resets it.
    ///
    /// # Safety
    /// Steals the core peripherals; nothing else may reconfigure DCB or DWT.
    pub unsafe fn enable(clock_hz: u32) -> Self {
        let mut p = cortex_m::Peripherals::steal();
        p.DCB.enable_trace();
        p.DWT.enable_cycle_counter();
        p.DWT.set_cycle_count(0);
        info!("cycle counter enabled at {} Hz", clock_hz);
        CycleCounter { clock_hz }
    }

    /// Spins until `cycles` core cycles have passed. Wraps correctly as long
    /// as `cycles` is below 2^32.
    pub fn delay_cycles(&self, cycles: u32) {
        let start = DWT::cycle_count();
        while DWT::cycle_count().wrapping_sub(start) < cycles {}
    }
}

impl TimeSource for CycleCounter {
    fn delay_s(&mut self, seconds: u32) {
        for _ in 0..seconds {
            self.delay_cycles(self.clock_hz);
        }
    }
}
