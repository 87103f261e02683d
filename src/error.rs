use core::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A busy loop iteration cannot take zero cycles.
    ZeroCyclesPerIteration,
    /// One second would be less than one loop iteration.
    ClockBelowLoopCost { clock_hz: u32, cycles: u32 },
    /// The iteration count for this delay does not fit the 32-bit loop counter.
    DelayOverflow { seconds: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCyclesPerIteration => write!(f, "cycles per iteration must be non-zero"),
            Error::ClockBelowLoopCost { clock_hz, cycles } => write!(
                f,
                "clock of {clock_hz} Hz is slower than one {cycles}-cycle iteration per second"
            ),
            Error::DelayOverflow { seconds } => {
                write!(f, "a {seconds} s delay overflows the iteration counter")
            }
        }
    }
}
