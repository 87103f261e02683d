//! Blocking delays.
//!
//! [`TimeSource`] is the seam the control loop waits through. [`BusyLoop`]
//! burns a calibrated number of no-op iterations and needs no timer or
//! interrupt. Its accuracy depends on the real core clock, the optimization
//! level and pipeline effects, none of which are measured.

use crate::error::Error;

/// Core clock assumed by the default calibration (HSI after reset).
pub const DEFAULT_CLOCK_HZ: u32 = 16_000_000;
/// Cycles one loop iteration is assumed to take.
pub const DEFAULT_CYCLES_PER_ITERATION: u32 = 13;

/// Something that can block for a number of seconds.
pub trait TimeSource {
    /// Blocks for about `seconds` seconds. Runs to completion, no cancellation.
    fn delay_s(&mut self, seconds: u32);
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn delay_s(&mut self, seconds: u32) {
        (**self).delay_s(seconds)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    clock_hz: u32,
    cycles_per_iteration: u32,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            clock_hz: DEFAULT_CLOCK_HZ,
            cycles_per_iteration: DEFAULT_CYCLES_PER_ITERATION,
        }
    }
}

impl Calibration {
    pub const fn new(clock_hz: u32, cycles_per_iteration: u32) -> Result<Self, Error> {
        if cycles_per_iteration == 0 {
            return Err(Error::ZeroCyclesPerIteration);
        }
        if clock_hz < cycles_per_iteration {
            return Err(Error::ClockBelowLoopCost {
                clock_hz,
                cycles: cycles_per_iteration,
            });
        }
        Ok(Calibration {
            clock_hz,
            cycles_per_iteration,
        })
    }

    pub const fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    pub const fn cycles_per_iteration(&self) -> u32 {
        self.cycles_per_iteration
    }

    /// Always at least 1.
    pub const fn iterations_per_second(&self) -> u32 {
        self.clock_hz / self.cycles_per_iteration
    }

    /// `seconds * iterations_per_second()`. A count that does not fit the
    /// 32-bit loop counter is reported instead of wrapping.
    pub fn iterations(&self, seconds: u32) -> Result<u32, Error> {
        seconds
            .checked_mul(self.iterations_per_second())
            .ok_or(Error::DelayOverflow { seconds })
    }
}

/// Runs `step` exactly `iterations` times, returns the count.
#[inline(always)]
pub fn spin<F: FnMut()>(iterations: u32, mut step: F) -> u32 {
    let mut i = 0;
    while i < iterations {
        step();
        i += 1;
    }
    i
}

#[inline(always)]
fn nop() {
    #[cfg(target_arch = "arm")]
    cortex_m::asm::nop();
    #[cfg(not(target_arch = "arm"))]
    core::hint::spin_loop();
}

/// Calibrated no-op loop.
///
/// A delay whose count overflows the counter is split into one-second passes
/// of [`Calibration::iterations_per_second`] iterations.
#[derive(Copy, Clone, Debug, Default)]
pub struct BusyLoop {
    calibration: Calibration,
}

impl BusyLoop {
    pub fn new(calibration: Calibration) -> Self {
        debug!(
            "busy loop: {} Hz, {} cycles per iteration, {} iterations per second",
            calibration.clock_hz(),
            calibration.cycles_per_iteration(),
            calibration.iterations_per_second()
        );
        BusyLoop { calibration }
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Burns the loop for `seconds`, returns the number of iterations run.
    pub fn burn(&self, seconds: u32) -> u64 {
        match self.calibration.iterations(seconds) {
            Ok(count) => spin(count, nop) as u64,
            Err(_) => {
                warn!("{} s delay overflows the loop counter, running it per second", seconds);
                let per_second = self.calibration.iterations_per_second();
                (0..seconds).map(|_| spin(per_second, nop) as u64).sum()
            }
        }
    }
}

impl TimeSource for BusyLoop {
    fn delay_s(&mut self, seconds: u32) {
        self.burn(seconds);
    }
}

/// Returns immediately and remembers what it was asked to wait.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Recorder {
    pub calls: u32,
    pub total_s: u64,
    pub last_s: Option<u32>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for Recorder {
    fn delay_s(&mut self, seconds: u32) {
        self.calls += 1;
        self.total_s += seconds as u64;
        self.last_s = Some(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calibration() {
        let cal = Calibration::default();
        assert_eq!(cal.clock_hz(), 16_000_000);
        assert_eq!(cal.cycles_per_iteration(), 13);
        assert_eq!(cal.iterations_per_second(), 1_230_769);
        assert_eq!(cal.iterations(1), Ok(1_230_769));
        assert_eq!(cal.iterations(13), Ok(15_999_997));
    }

    #[test]
    fn zero_seconds_is_zero_iterations() {
        let cal = Calibration::default();
        assert_eq!(cal.iterations(0), Ok(0));
        assert_eq!(BusyLoop::new(cal).burn(0), 0);

        let mut steps = 0;
        assert_eq!(spin(0, || steps += 1), 0);
        assert_eq!(steps, 0);
    }

    #[test]
    fn spin_runs_step_exactly() {
        let mut steps = 0u32;
        assert_eq!(spin(1000, || steps += 1), 1000);
        assert_eq!(steps, 1000);
    }

    #[test]
    fn iterations_strictly_increase() {
        let cal = Calibration::default();
        let samples = [0, 1, 2, 3, 10, 13, 59, 60, 100, 268, 269, 270, 1000, 3488, 3489];
        for pair in samples.windows(2) {
            let a = cal.iterations(pair[0]).unwrap();
            let b = cal.iterations(pair[1]).unwrap();
            assert!(a < b, "{} s -> {}, {} s -> {}", pair[0], a, pair[1], b);
        }

        // slowest accepted calibration still advances one iteration per second
        let slow = Calibration::new(7, 7).unwrap();
        assert_eq!(slow.iterations(1), Ok(1));
        assert_eq!(slow.iterations(2), Ok(2));
    }

    #[test]
    fn busy_loop_runs_the_computed_count() {
        // 76 iterations per second keeps the host loop short
        let cal = Calibration::new(1_000, 13).unwrap();
        let busy = BusyLoop::new(cal);
        for seconds in [0, 1, 2, 13, 100, 1000] {
            assert_eq!(busy.burn(seconds), cal.iterations(seconds).unwrap() as u64);
        }
        assert_eq!(busy.burn(13), 13 * 76);
    }

    #[test]
    fn overflow_is_reported() {
        let cal = Calibration::default();
        // u32::MAX / 1_230_769
        assert_eq!(cal.iterations(3489), Ok(4_294_153_041));
        assert_eq!(cal.iterations(3490), Err(Error::DelayOverflow { seconds: 3490 }));
        assert_eq!(
            cal.iterations(u32::MAX),
            Err(Error::DelayOverflow { seconds: u32::MAX })
        );
    }

    #[test]
    fn invalid_calibration() {
        assert_eq!(Calibration::new(16_000_000, 0), Err(Error::ZeroCyclesPerIteration));
        assert_eq!(
            Calibration::new(4, 13),
            Err(Error::ClockBelowLoopCost {
                clock_hz: 4,
                cycles: 13
            })
        );
        assert!(Calibration::new(168_000_000, 4).is_ok());
    }

    #[test]
    fn recorder_tracks_requests() {
        let mut rec = Recorder::new();
        rec.delay_s(1);
        rec.delay_s(0);
        rec.delay_s(5);
        assert_eq!(rec.calls, 3);
        assert_eq!(rec.total_s, 6);
        assert_eq!(rec.last_s, Some(5));
    }
}
