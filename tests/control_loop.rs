use f4_blinky::blinky::{Blinky, Config, State};
use f4_blinky::delay::{Recorder, TimeSource};
use f4_blinky::gpio::{PG13, PG14};
use f4_blinky::register_file::SimRegisters;
use f4_blinky::regs::{
    mode_field_mask, Mode, Register, GPIO_MODER_MODER13, GPIO_MODER_MODER14, GPIO_ODR_ODR_13,
    GPIO_ODR_ODR_14, RCC_AHB1ENR_GPIOGEN,
};
use f4_blinky::RegisterFile;

const LED_MASK: u32 = GPIO_ODR_ODR_13 | GPIO_ODR_ODR_14;
const LED_MODE_FIELDS: u32 = (0b11 << 26) | (0b11 << 28);

/// Counts waits and checks that each one happens after a toggle.
struct CheckedDelay {
    waits: u32,
}

impl TimeSource for CheckedDelay {
    fn delay_s(&mut self, seconds: u32) {
        assert_eq!(seconds, 1);
        self.waits += 1;
    }
}

#[test]
fn init_then_one_toggle_from_zeroed_registers() {
    let mut b = Blinky::new(SimRegisters::zeroed(), Recorder::new(), Config::default());
    b.init();
    b.toggle();

    let regs = b.registers();
    assert_eq!(regs.read(Register::RccAhb1enr), RCC_AHB1ENR_GPIOGEN);
    assert_eq!(
        regs.read(Register::GpiogModer),
        GPIO_MODER_MODER13 | GPIO_MODER_MODER14
    );
    assert_eq!(regs.read(Register::GpiogOdr), LED_MASK);
    assert_eq!(PG13.mode(regs), Mode::Output);
    assert_eq!(PG14.mode(regs), Mode::Output);
    assert!(PG13.is_set_high(regs));
    assert!(PG14.is_set_high(regs));
    // one write per register, nothing else in the address space
    assert_eq!(regs.write_count(), 3);
    assert_eq!(regs.peek(0x4002_1804), 0);
    assert_eq!(regs.peek(0x4002_1818), 0);
    assert_eq!(b.time_source().calls, 0);
}

#[test]
fn init_preserves_unrelated_bits() {
    let ahb1enr = 0x0010_0000 | 0b1011; // CCMDATARAMEN at reset, GPIOA/B/D on
    let moder = 0xA5A5_5A5A | (0b11 << 26) | (0b10 << 28);
    let odr = 0x8001;
    let regs = SimRegisters::zeroed()
        .with(Register::RccAhb1enr, ahb1enr)
        .with(Register::GpiogModer, moder)
        .with(Register::GpiogOdr, odr);

    let mut b = Blinky::new(regs, Recorder::new(), Config::default());
    b.init();
    let regs = b.registers();

    assert_eq!(regs.read(Register::RccAhb1enr), ahb1enr | RCC_AHB1ENR_GPIOGEN);
    let after = regs.read(Register::GpiogModer);
    assert_eq!(after & !LED_MODE_FIELDS, moder & !LED_MODE_FIELDS);
    assert_eq!(after & LED_MODE_FIELDS, GPIO_MODER_MODER13 | GPIO_MODER_MODER14);
    assert_eq!(after & mode_field_mask(13), GPIO_MODER_MODER13);
    assert_eq!(regs.read(Register::GpiogOdr), odr);
}

#[test]
fn leds_alternate_and_other_outputs_stay() {
    let odr = 0x0000_9F0F;
    let regs = SimRegisters::zeroed().with(Register::GpiogOdr, odr);
    let mut b = Blinky::new(regs, CheckedDelay { waits: 0 }, Config::default());

    for n in 1..=10u32 {
        b.step();
        let now = b.registers().read(Register::GpiogOdr);
        assert_eq!(now & !LED_MASK, odr & !LED_MASK);
        let expected = if n % 2 == 1 { !odr & LED_MASK } else { odr & LED_MASK };
        assert_eq!(now & LED_MASK, expected, "after {n} toggles");
    }

    assert_eq!(b.state(), State::Toggle);
    assert_eq!(b.toggles(), 10);
    assert_eq!(b.time_source().waits, 10);
}

#[test]
fn double_toggle_is_identity() {
    for start in [0u32, LED_MASK, GPIO_ODR_ODR_13, 0xFFFF_9FFF, 0x0BAD_F00D] {
        let regs = SimRegisters::zeroed().with(Register::GpiogOdr, start);
        let mut b = Blinky::new(regs, Recorder::new(), Config::default());
        b.init();
        b.toggle();
        b.toggle();
        assert_eq!(b.registers().read(Register::GpiogOdr), start);
    }
}

#[test]
fn borrowed_register_file_and_time_source() {
    let mut regs = SimRegisters::zeroed();
    let mut time = Recorder::new();
    {
        let mut b = Blinky::new(&mut regs, &mut time, Config::default());
        b.step();
        b.step();
        b.step();
    }
    assert_eq!(regs.read(Register::GpiogOdr), LED_MASK);
    assert_eq!(time.calls, 3);
    assert_eq!(time.total_s, 3);
}
