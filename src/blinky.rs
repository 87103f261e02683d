//! The LED control loop: enable the port clock and configure the pins once,
//! then flip both LEDs and wait, forever.
//!
//! `step` is one pass of the loop so a test can drive it; `run` is the
//! never-returning loop used on the board.

use crate::delay::TimeSource;
use crate::gpio::{PinGroup, PG13, PG14};
use crate::rcc::{self, ClockGate};
use crate::register_file::RegisterFile;
use crate::regs::Mode;

/// Wiring and cadence, fixed at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// clock gate of the port the LEDs are on
    pub clock: ClockGate,
    pub leds: PinGroup<2>,
    /// wait after each toggle
    pub period_s: u32,
}

impl Config {
    /// PG13 (green) and PG14 (red), one second per toggle.
    pub const DEFAULT: Config = Config {
        clock: rcc::GPIOG,
        leds: PinGroup::new([PG13, PG14]),
        period_s: 1,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Hardware not configured yet.
    Init,
    Toggle,
}

pub struct Blinky<R, T> {
    regs: R,
    time: T,
    config: Config,
    state: State,
    toggles: u32,
}

impl<R: RegisterFile, T: TimeSource> Blinky<R, T> {
    pub fn new(regs: R, time: T, config: Config) -> Self {
        Blinky {
            regs,
            time,
            config,
            state: State::Init,
            toggles: 0,
        }
    }

    /// Enables the port clock and switches the LED pins to output. Only the
    /// first call does anything.
    pub fn init(&mut self) {
        if self.state != State::Init {
            return;
        }
        rcc::enable(&mut self.regs, self.config.clock);
        self.config.leds.setup(&mut self.regs, Mode::Output);
        self.state = State::Toggle;
        info!("leds configured as outputs, mask {:#x}", self.config.leds.mask());
    }

    /// Flips every LED with one XOR into ODR.
    pub fn toggle(&mut self) {
        self.init();
        let odr = self.config.leds.toggle(&mut self.regs);
        self.toggles = self.toggles.wrapping_add(1);
        trace!("toggle {}: odr = {:#x}", self.toggles, odr);
    }

    /// One pass of the loop: toggle, then wait `period_s`.
    pub fn step(&mut self) {
        self.toggle();
        self.time.delay_s(self.config.period_s);
    }

    pub fn run(mut self) -> ! {
        self.init();
        info!("blinking every {} s", self.config.period_s);
        loop {
            self.step();
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Toggles so far, wraps at `u32::MAX`.
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn time_source(&self) -> &T {
        &self.time
    }

    pub fn into_parts(self) -> (R, T) {
        (self.regs, self.time)
    }
}
