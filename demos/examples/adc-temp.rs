// Prints the STM32F407 junction temperature over RTT.

#![no_std]
#![no_main]

use defmt_rtt as _; // global logger
use panic_probe as _; // panic handler
use stm32f4_adc_hal::{
    self as hal,
    adc::{self, Adc, Ch, Ts},
    cortex_m::delay::Delay,
    pac,
    rcc::Hsi16,
    util::new_delay,
};

#[hal::cortex_m_rt::entry]
fn main() -> ! {
    let dp: pac::Peripherals = defmt::unwrap!(pac::Peripherals::take());
    let cp: pac::CorePeripherals = defmt::unwrap!(pac::CorePeripherals::take());

    let mut delay: Delay = new_delay::<Hsi16>(cp.SYST);

    let mut adc: Adc<pac::ADC1> = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    adc.enable_tsvref();
    delay.delay_us(10);
    defmt::unwrap!(adc.set_sample_time(Ch::Vref, Ts::MAX));

    loop {
        let vdda_mv: u32 = 3300 * u32::from(adc::vref_cal()) / u32::from(adc.vref());
        let sense_mv: u32 = u32::from(adc.temperature()) * vdda_mv / u32::from(adc::MAX_SAMPLE);
        // V25 = 760 mV, 2.5 mV/°C
        let temp: i32 = (sense_mv as i32 - 760) * 2 / 5 + 25;
        defmt::info!("Temperature: {} °C (VDDA {} mV)", temp, vdda_mv);
        delay.delay_ms(1000);
    }
}
