#![no_std]
#![no_main]

use defmt::unwrap;
use defmt_rtt as _; // global logger
use embedded_hal::adc::OneShot;
use panic_probe as _;
use stm32f4_adc_hal::{
    adc::{self, Adc, Ch, Ts},
    gpio::{pins, Analog, PortC},
    pac,
    rcc::Hsi16,
};

const MODE_ANALOG: u32 = 0b11;

fn gpioc_mode(n: u32) -> u32 {
    let gpioc = unsafe { &*pac::GPIOC::ptr() };
    (gpioc.moder.read().bits() >> (n * 2)) & 0b11
}

#[defmt_test::tests]
mod tests {
    use super::*;

    struct TestArgs {
        adc: Adc<pac::ADC1>,
        c0: Option<pins::C0>,
        c1: Option<Analog<pins::C1>>,
    }

    #[init]
    fn init() -> TestArgs {
        let dp: pac::Peripherals = unwrap!(pac::Peripherals::take());

        let gpioc: PortC = PortC::split(dp.GPIOC, &dp.RCC);
        let adc: Adc<pac::ADC1> = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);

        TestArgs {
            adc,
            c0: Some(gpioc.c0),
            c1: Some(Analog::new(gpioc.c1)),
        }
    }

    #[test]
    fn analog_mode(ta: &mut TestArgs) {
        defmt::assert_ne!(gpioc_mode(0), MODE_ANALOG);
        defmt::assert_eq!(gpioc_mode(1), MODE_ANALOG);

        let c0: Analog<pins::C0> = Analog::new(unwrap!(ta.c0.take()));
        defmt::assert_eq!(gpioc_mode(0), MODE_ANALOG);
        defmt::assert_eq!(gpioc_mode(1), MODE_ANALOG);
        defmt::assert_ne!(gpioc_mode(2), MODE_ANALOG);

        ta.c0 = Some(c0.free());
    }

    #[test]
    fn pin_channel(_ta: &mut TestArgs) {
        defmt::assert_eq!(Adc::<pac::ADC1>::pin_channel::<pins::C0>(), Ch::In10);
        defmt::assert_eq!(Adc::<pac::ADC1>::pin_channel::<pins::C1>(), Ch::In11);
        defmt::assert_eq!(Analog::<pins::C1>::adc_ch::<pac::ADC1>(), Ch::In11);
    }

    #[test]
    fn pin(ta: &mut TestArgs) {
        let c1: &Analog<pins::C1> = unwrap!(ta.c1.as_ref());
        ta.adc.set_pin_channel::<pins::C1>(Ts::Cyc144);
        defmt::assert_eq!(ta.adc.sample_time(Ch::In11), Ts::Cyc144);

        let sample: u16 = ta.adc.pin(c1);
        defmt::info!("PC1: {}", sample);
        defmt::assert!(sample <= adc::MAX_SAMPLE);
        defmt::assert_eq!(unwrap!(ta.adc.channel()), Ch::In11);
    }

    #[test]
    fn one_shot(ta: &mut TestArgs) {
        let c1: &mut Analog<pins::C1> = unwrap!(ta.c1.as_mut());
        let sample: u16 = match ta.adc.read(c1) {
            Ok(sample) => sample,
            Err(_) => defmt::panic!("blocking read failed"),
        };
        defmt::info!("PC1: {}", sample);
        defmt::assert!(sample <= adc::MAX_SAMPLE);
    }
}
