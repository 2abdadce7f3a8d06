// Converts V_REFINT continuously and prints every 100000th result from the
// end of conversion interrupt.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU32, Ordering::Relaxed};
use defmt_rtt as _; // global logger
use panic_probe as _; // panic handler
use stm32f4_adc_hal::{
    self as hal,
    adc::{Adc, Ch, Interrupt, InterruptFlag, Ts},
    pac::{self, interrupt},
    rcc::Hsi16,
};

static COUNT: AtomicU32 = AtomicU32::new(0);

#[hal::cortex_m_rt::entry]
fn main() -> ! {
    let dp: pac::Peripherals = defmt::unwrap!(pac::Peripherals::take());
    let mut cp: pac::CorePeripherals = defmt::unwrap!(pac::CorePeripherals::take());

    let mut adc: Adc<pac::ADC1> = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    adc.enable_tsvref();
    defmt::unwrap!(adc.set_channel(Ch::Vref, Ts::Cyc480));
    adc.enable_free_running_mode();
    adc.enable_interrupt(Interrupt::END_OF_REGULAR_CONVERSION);

    unsafe { Adc::<pac::ADC1>::enable_interrupt_vector(&mut cp.NVIC, 1, true) };
    adc.start_conversion();

    loop {
        hal::cortex_m::asm::wfi();
    }
}

#[interrupt]
#[allow(non_snake_case)]
fn ADC() {
    let mut adc: Adc<pac::ADC1> = unsafe { Adc::steal() };
    let flags: InterruptFlag = adc.interrupt_flags();
    if flags.contains(InterruptFlag::END_OF_REGULAR_CONVERSION) {
        // reading the data register clears EOC
        let sample: u16 = adc.conversion_result();
        if COUNT.fetch_add(1, Relaxed) % 100_000 == 0 {
            defmt::info!("VREFINT {}", sample);
        }
    }
    if flags.contains(InterruptFlag::OVERRUN) {
        defmt::warn!("overrun");
        adc.acknowledge_interrupt_flags(InterruptFlag::OVERRUN);
    }
}
