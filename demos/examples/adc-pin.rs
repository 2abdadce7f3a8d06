// Samples PA1 and PC5 once per second.

#![no_std]
#![no_main]

use defmt_rtt as _; // global logger
use panic_probe as _; // panic handler
use stm32f4_adc_hal::{
    self as hal,
    adc::{Adc, Ts},
    cortex_m::delay::Delay,
    gpio::{pins, Analog, PortA, PortC},
    pac,
    rcc::SystemClock,
    util::new_delay,
};

// HSE 8 MHz, PLL to 168 MHz, APB2 divided by 2
struct Clocks;

impl SystemClock for Clocks {
    const SYSCLK: u32 = 168_000_000;
    const APB2: u32 = 84_000_000;
}

#[hal::cortex_m_rt::entry]
fn main() -> ! {
    let dp: pac::Peripherals = defmt::unwrap!(pac::Peripherals::take());
    let cp: pac::CorePeripherals = defmt::unwrap!(pac::CorePeripherals::take());

    // the clock tree is expected to be configured by the bootloader
    let mut delay: Delay = new_delay::<Clocks>(cp.SYST);

    let gpioa: PortA = PortA::split(dp.GPIOA, &dp.RCC);
    let gpioc: PortC = PortC::split(dp.GPIOC, &dp.RCC);
    let a1: Analog<pins::A1> = Analog::new(gpioa.a1);
    let c5: Analog<pins::C5> = Analog::new(gpioc.c5);

    let mut adc: Adc<pac::ADC1> = Adc::new::<Clocks>(dp.ADC1, &dp.RCC);
    defmt::info!("ADC clock {} Hz", adc.clock_hz(Clocks::APB2));

    // each read selects its pin and keeps this sample time
    for ch in [
        Adc::<pac::ADC1>::pin_channel::<pins::A1>(),
        Adc::<pac::ADC1>::pin_channel::<pins::C5>(),
    ] {
        defmt::unwrap!(adc.set_sample_time(ch, Ts::Cyc84));
    }

    loop {
        let pa1: u16 = adc.pin(&a1);
        let pc5: u16 = adc.pin(&c5);
        defmt::info!("PA1 {} PC5 {}", pa1, pc5);
        delay.delay_ms(1000);
    }
}
