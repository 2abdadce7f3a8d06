#![no_std]
#![no_main]

use defmt_rtt as _; // global logger
use panic_probe as _; // panic handler
use stm32f4_adc_hal::{
    self as hal,
    adc::{Adc, Ch, Ts},
    pac,
    rcc::Hsi16,
};

#[hal::cortex_m_rt::entry]
fn main() -> ! {
    let dp: pac::Peripherals = defmt::unwrap!(pac::Peripherals::take());

    let mut adc: Adc<pac::ADC1> = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    adc.enable_vbat();
    defmt::unwrap!(adc.set_sample_time(Ch::Vbat, Ts::Cyc480));
    let sample: u16 = adc.vbat();
    adc.disable_vbat();
    defmt::info!("VBAT/2 {}", sample);

    loop {
        hal::cortex_m::asm::bkpt();
    }
}
