//! Register map of the STM32F429 subset driven by this crate.
//!
//! Only the registers the LEDs need are described: the AHB1 clock enable
//! register of RCC, and the mode and output data registers of GPIOG.

/// Base address of the AHB1 peripheral bus.
pub const AHB1PERIPH_BASE: u32 = 0x4002_0000;
/// Base address of RCC (Reset and Clock Control).
pub const RCC_BASE: u32 = AHB1PERIPH_BASE + 0x3800;
/// Base address of GPIO port G.
pub const GPIOG_BASE: u32 = AHB1PERIPH_BASE + 0x1800;

pub const RCC_AHB1ENR_OFFSET: u32 = 0x30;
pub const GPIO_MODER_OFFSET: u32 = 0x00;
pub const GPIO_ODR_OFFSET: u32 = 0x14;

/// RCC AHB1 peripheral clock enable register.
pub const RCC_AHB1ENR: u32 = RCC_BASE + RCC_AHB1ENR_OFFSET;
/// GPIOG mode register.
pub const GPIOG_MODER: u32 = GPIOG_BASE + GPIO_MODER_OFFSET;
/// GPIOG output data register.
pub const GPIOG_ODR: u32 = GPIOG_BASE + GPIO_ODR_OFFSET;

/// Bit 6 of RCC_AHB1ENR, clock enable for GPIOG.
pub const RCC_AHB1ENR_GPIOGEN: u32 = 1 << 6;

/// Output encoding (`01`) of the mode field of pin 13.
pub const GPIO_MODER_MODER13: u32 = mode_field(13, Mode::Output);
/// Output encoding (`01`) of the mode field of pin 14.
pub const GPIO_MODER_MODER14: u32 = mode_field(14, Mode::Output);

pub const GPIO_ODR_ODR_13: u32 = odr_mask(13);
pub const GPIO_ODR_ODR_14: u32 = odr_mask(14);

/// Number of pins on one GPIO port.
pub const PINS_PER_PORT: u8 = 16;

/// The 32-bit registers this crate reads and writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    RccAhb1enr,
    GpiogModer,
    GpiogOdr,
}

impl Register {
    pub const ALL: [Register; 3] = [Register::RccAhb1enr, Register::GpiogModer, Register::GpiogOdr];

    /// Physical address of the register.
    pub const fn address(self) -> u32 {
        match self {
            Register::RccAhb1enr => RCC_AHB1ENR,
            Register::GpiogModer => GPIOG_MODER,
            Register::GpiogOdr => GPIOG_ODR,
        }
    }

    pub const fn from_address(address: u32) -> Option<Register> {
        match address {
            RCC_AHB1ENR => Some(Register::RccAhb1enr),
            GPIOG_MODER => Some(Register::GpiogModer),
            GPIOG_ODR => Some(Register::GpiogOdr),
            _ => None,
        }
    }
}

/// Pin mode, the 2-bit field of MODER.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Input = 0b00,
    Output = 0b01,
    Alternate = 0b10,
    Analog = 0b11,
}

impl Mode {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Mode {
        match bits & 0b11 {
            0b00 => Mode::Input,
            0b01 => Mode::Output,
            0b10 => Mode::Alternate,
            _ => Mode::Analog,
        }
    }
}

/// Both bits of the mode field of `pin`.
pub const fn mode_field_mask(pin: u8) -> u32 {
    0b11 << (pin as u32 * 2)
}

/// `mode` shifted into the field of `pin`.
pub const fn mode_field(pin: u8, mode: Mode) -> u32 {
    mode.bits() << (pin as u32 * 2)
}

pub const fn odr_mask(pin: u8) -> u32 {
    1 << pin as u32
}
