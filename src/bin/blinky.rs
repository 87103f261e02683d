#![no_std]
#![no_main]

use core::panic::PanicInfo;

use cortex_m_rt::entry;
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use f4_blinky::blinky::{Blinky, Config};
use f4_blinky::mmio::Mmio;

#[cfg(not(feature = "cycle-counter"))]
fn time_source() -> f4_blinky::delay::BusyLoop {
    f4_blinky::delay::BusyLoop::new(f4_blinky::delay::Calibration::default())
}

#[cfg(feature = "cycle-counter")]
fn time_source() -> f4_blinky::dwt::CycleCounter {
    // nothing else in this firmware uses DCB or DWT
    unsafe { f4_blinky::dwt::CycleCounter::enable(f4_blinky::delay::DEFAULT_CLOCK_HZ) }
}

#[entry]
fn main() -> ! {
    let Some(regs) = Mmio::take() else {
        panic!("register file already taken");
    };
    #[cfg(feature = "defmt")]
    defmt::info!("blinky start");
    Blinky::new(regs, time_source(), Config::default()).run()
}

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("panic: {}", defmt::Display2Format(_info));
    loop {}
}
