//! GPIO port and pin helpers on top of [`RegisterFile`].
//!
//! Mode changes clear the 2-bit field before writing the new encoding, so a
//! pin left in alternate or analog mode still ends up in the requested mode
//! and neighbouring pins keep theirs. Output changes are read-modify-write on
//! ODR, toggles are XOR.

use crate::register_file::RegisterFile;
use crate::regs::{mode_field, mode_field_mask, odr_mask, Mode, Register, PINS_PER_PORT};

macro_rules! define_gpio_pin {
    ($($name:ident: $port:ident, $pin:expr),*) => {
        $(
            pub const $name: Pin = Pin::new($port, $pin);
        )*
    };
}

/// The registers of one GPIO port.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Port {
    moder: Register,
    odr: Register,
}

impl Port {
    pub const fn same_port(a: Port, b: Port) -> bool {
        a.moder as u8 == b.moder as u8 && a.odr as u8 == b.odr as u8
    }
}

pub const GPIOG: Port = Port {
    moder: Register::GpiogModer,
    odr: Register::GpiogOdr,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin {
    port: Port,
    index: u8,
}

define_gpio_pin!(PG13: GPIOG, 13, PG14: GPIOG, 14);

impl Pin {
    /// Fails to compile when used in a const with `index >= 16`.
    pub const fn new(port: Port, index: u8) -> Self {
        assert!(index < PINS_PER_PORT, "GPIO pin index out of range");
        Pin { port, index }
    }

    pub const fn index(&self) -> u8 {
        self.index
    }

    pub const fn port(&self) -> Port {
        self.port
    }

    /// ODR bit of this pin.
    pub const fn mask(&self) -> u32 {
        odr_mask(self.index)
    }

    pub fn setup<R: RegisterFile>(&self, regs: &mut R, mode: Mode) {
        let clear = mode_field_mask(self.index);
        let set = mode_field(self.index, mode);
        regs.modify(self.port.moder, |v| (v & !clear) | set);
    }

    pub fn mode<R: RegisterFile>(&self, regs: &R) -> Mode {
        Mode::from_bits(regs.read(self.port.moder) >> (self.index as u32 * 2))
    }

    pub fn toggle<R: RegisterFile>(&self, regs: &mut R) {
        regs.modify(self.port.odr, |v| v ^ self.mask());
    }

    pub fn is_set_high<R: RegisterFile>(&self, regs: &R) -> bool {
        regs.read(self.port.odr) & self.mask() != 0
    }
}

/// Pins of one port that are configured and toggled together, one register
/// write per operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinGroup<const N: usize> {
    port: Port,
    pins: [Pin; N],
}

impl<const N: usize> PinGroup<N> {
    /// Panics (at compile time in a const) if the pins are not on the same port.
    pub const fn new(pins: [Pin; N]) -> Self {
        assert!(N > 0, "empty pin group");
        let port = pins[0].port;
        let mut i = 1;
        while i < N {
            assert!(
                Port::same_port(pins[i].port, port),
                "pins of a group must share a port"
            );
            i += 1;
        }
        PinGroup { port, pins }
    }

    pub fn pins(&self) -> &[Pin; N] {
        &self.pins
    }

    /// ODR bits of all pins.
    pub fn mask(&self) -> u32 {
        self.pins.iter().fold(0, |m, p| m | p.mask())
    }

    fn mode_masks(&self, mode: Mode) -> (u32, u32) {
        self.pins.iter().fold((0, 0), |(clear, set), p| {
            (clear | mode_field_mask(p.index), set | mode_field(p.index, mode))
        })
    }

    pub fn setup<R: RegisterFile>(&self, regs: &mut R, mode: Mode) {
        let (clear, set) = self.mode_masks(mode);
        regs.modify(self.port.moder, |v| (v & !clear) | set);
    }

    /// Flips every pin of the group, returns the new ODR value.
    pub fn toggle<R: RegisterFile>(&self, regs: &mut R) -> u32 {
        let mask = self.mask();
        let mut odr = 0;
        regs.modify(self.port.odr, |v| {
            odr = v ^ mask;
            odr
        });
        odr
    }
}
