#![no_std]
#![no_main]

use core::sync::atomic::{compiler_fence, Ordering::SeqCst};
use defmt::unwrap;
use defmt_rtt as _; // global logger
use panic_probe as _;
use stm32f4_adc_hal::{
    adc::{self, Adc, Align, Ch, Error, InterruptFlag, Prescaler, Ts},
    cortex_m::delay::Delay,
    pac::{self, DWT},
    rcc::{Hsi16, SystemClock},
    util::new_delay,
};

const ADC_FREQ: u32 = 8_000_000;
const FREQ: u32 = Hsi16::SYSCLK;
const FREQ_RATIO: u32 = FREQ / ADC_FREQ;
const CYC_PER_US: u32 = FREQ / 1000 / 1000;

// WARNING will wrap-around eventually, use this for relative timing only
defmt::timestamp!("{=u32:us}", DWT::cycle_count() / CYC_PER_US);

/// V<sub>DDA</sub> in millivolts from a V<sub>REFINT</sub> sample.
fn vdda_mv(vref: u16) -> u32 {
    3300 * u32::from(adc::vref_cal()) / u32::from(vref)
}

fn wait_stab(delay: &mut Delay) {
    delay.delay_us(adc::T_STAB.as_micros() as u32);
}

/// Cycles from the software start to the end of conversion.
fn conversion_cycles(adc: &mut Adc<pac::ADC1>) -> u32 {
    adc.start_conversion();
    let start: u32 = DWT::cycle_count();
    while !adc.is_conversion_finished() {}
    let end: u32 = DWT::cycle_count();
    compiler_fence(SeqCst);
    end - start
}

#[defmt_test::tests]
mod tests {
    use super::*;

    struct TestArgs {
        adc: Adc<pac::ADC1>,
        delay: Delay,
    }

    #[init]
    fn init() -> TestArgs {
        let dp: pac::Peripherals = unwrap!(pac::Peripherals::take());
        let mut cp: pac::CorePeripherals = unwrap!(pac::CorePeripherals::take());

        unsafe { Adc::<pac::ADC1>::pulse_reset(&dp.RCC) };
        let adc: Adc<pac::ADC1> = Adc::initialize::<Hsi16, ADC_FREQ, 0>(dp.ADC1, &dp.RCC);
        defmt::assert_eq!(adc.prescaler(), Prescaler::Div2);
        defmt::assert_eq!(adc.clock_hz(Hsi16::APB2), ADC_FREQ);

        let mut delay: Delay = new_delay::<Hsi16>(cp.SYST);
        wait_stab(&mut delay);

        cp.DCB.enable_trace();
        cp.DWT.enable_cycle_counter();
        cp.DWT.set_cycle_count(0);

        TestArgs { adc, delay }
    }

    #[test]
    fn enable(ta: &mut TestArgs) {
        defmt::assert!(ta.adc.is_enabled());

        // enable -> disable and disable -> disable
        for _ in 0..2 {
            ta.adc.disable();
            defmt::assert!(!ta.adc.is_enabled());
        }

        // disable -> enable and enable -> enable
        for _ in 0..2 {
            ta.adc.enable();
            defmt::assert!(ta.adc.is_enabled());
        }
        wait_stab(&mut ta.delay);
    }

    #[test]
    fn tsvref_enable(ta: &mut TestArgs) {
        defmt::assert!(!ta.adc.is_tsvref_enabled());

        // test disable -> enable and enable -> enable
        for _ in 0..2 {
            ta.adc.enable_tsvref();
            defmt::assert!(ta.adc.is_tsvref_enabled());
        }

        // test enable -> disable and disable -> disable
        for _ in 0..2 {
            ta.adc.disable_tsvref();
            defmt::assert!(!ta.adc.is_tsvref_enabled());
        }
    }

    #[test]
    fn vbat_enable(ta: &mut TestArgs) {
        defmt::assert!(!ta.adc.is_vbat_enabled());

        // test disable -> enable and enable -> enable
        for _ in 0..2 {
            ta.adc.enable_vbat();
            defmt::assert!(ta.adc.is_vbat_enabled());
        }

        // test enable -> disable and disable -> disable
        for _ in 0..2 {
            ta.adc.disable_vbat();
            defmt::assert!(!ta.adc.is_vbat_enabled());
        }
    }

    #[test]
    fn vref(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        ta.delay.delay_us(10);
        unwrap!(ta.adc.set_sample_time(Ch::Vref, Ts::MAX));

        let vref: u16 = ta.adc.vref();
        let vref_cal: u16 = adc::vref_cal();
        let vdda: u32 = vdda_mv(vref);
        defmt::info!("vref: {} vref_cal: {} VDDA: {} mV", vref, vref_cal, vdda);

        defmt::assert!(vref <= adc::MAX_SAMPLE);
        defmt::assert!(vdda > 1_800);
        defmt::assert!(vdda < 3_600);
    }

    #[test]
    fn temperature(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        ta.delay.delay_us(10);
        unwrap!(ta.adc.set_sample_time(Ch::Vref, Ts::MAX));
        let vdda: u32 = vdda_mv(ta.adc.vref());

        let sample: u16 = ta.adc.temperature();
        defmt::assert_eq!(ta.adc.sample_time(Ch::TEMPERATURE), Ts::MAX);

        // DS8626 table 69: V25 = 0.76 V, avg slope 2.5 mV/°C
        let sense_mv: i32 = (u32::from(sample) * vdda / u32::from(adc::MAX_SAMPLE)) as i32;
        let temp: i32 = (sense_mv - 760) * 2 / 5 + 25;
        defmt::info!("temperature: {} °C (raw {})", temp, sample);

        defmt::assert!(temp > 0);
        defmt::assert!(temp < 70);
    }

    #[test]
    fn vbat(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        unwrap!(ta.adc.set_sample_time(Ch::Vref, Ts::MAX));
        let vdda: u32 = vdda_mv(ta.adc.vref());

        ta.adc.enable_vbat();
        unwrap!(ta.adc.set_sample_time(Ch::Vbat, Ts::MAX));
        let sample: u16 = ta.adc.vbat();
        ta.adc.disable_vbat();

        // STM32F40x bridge divides VBAT by 2
        let vbat_mv: u32 = 2 * u32::from(sample) * vdda / u32::from(adc::MAX_SAMPLE);
        defmt::info!("VBAT: {} mV (raw {})", vbat_mv, sample);

        defmt::assert!(vbat_mv > 1_650);
        defmt::assert!(vbat_mv < 3_600);
    }

    #[test]
    fn read_channel(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        unwrap!(ta.adc.set_sample_time(Ch::Vref, Ts::Cyc144));

        let sample: u16 = unwrap!(ta.adc.read_channel(Ch::Vref));
        defmt::assert!(sample > 0);
        defmt::assert!(sample <= adc::MAX_SAMPLE);
        defmt::assert_eq!(unwrap!(ta.adc.channel()), Ch::Vref);
        defmt::assert_eq!(ta.adc.sample_time(Ch::Vref), Ts::Cyc144);

        defmt::assert_eq!(ta.adc.read_channel(19), Err(Error::InvalidChannel(19)));
        defmt::assert_eq!(unwrap!(ta.adc.channel()), Ch::Vref);
    }

    #[test]
    fn read_channel_timeout(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        unwrap!(ta.adc.set_sample_time(Ch::Vref, Ts::MAX));

        defmt::assert_eq!(
            ta.adc.read_channel_timeout(Ch::Vref, 0),
            Err(Error::Timeout)
        );

        // the conversion continues, the next one acknowledges the stale flag
        let sample: u16 = unwrap!(ta.adc.read_channel_timeout(Ch::Vref, 10_000));
        defmt::assert!(sample <= adc::MAX_SAMPLE);
    }

    #[test]
    fn sample_time_cycles(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();

        unwrap!(ta.adc.set_channel(Ch::Vref, Ts::MIN));
        let short: u32 = conversion_cycles(&mut ta.adc);
        unwrap!(ta.adc.set_channel(Ch::Vref, Ts::MAX));
        let long: u32 = conversion_cycles(&mut ta.adc);

        defmt::info!(
            "Conversion cycles: {} CPU {} ADC with {}, {} CPU {} ADC with {}",
            short,
            short / FREQ_RATIO,
            Ts::MIN,
            long,
            long / FREQ_RATIO,
            Ts::MAX
        );

        let expected: u32 =
            u32::from(Ts::MAX.conversion_cycles() - Ts::MIN.conversion_cycles()) * FREQ_RATIO;
        defmt::assert!(long > short);
        defmt::assert!(long - short + 2 * FREQ_RATIO >= expected);
    }

    #[test]
    fn alignment(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        unwrap!(ta.adc.set_channel(Ch::Vref, Ts::MAX));

        ta.adc.set_left_adjust_result();
        defmt::assert_eq!(ta.adc.alignment(), Align::Left);
        let left: u16 = ta.adc.vref();
        defmt::assert_eq!(ta.adc.data() & 0xF, 0);
        defmt::assert_eq!(ta.adc.data() >> 4, left);

        ta.adc.set_right_adjust_result();
        defmt::assert_eq!(ta.adc.alignment(), Align::Right);
        let right: u16 = ta.adc.vref();

        let delta: i32 = (i32::from(left) - i32::from(right)).abs();
        defmt::info!("left: {} right: {} Δ {}", left, right, delta);
        defmt::assert!(delta < 25);
    }

    #[test]
    fn sequence(ta: &mut TestArgs) {
        unwrap!(ta.adc.set_channel(Ch::Vref, Ts::Cyc84));
        defmt::assert_eq!(ta.adc.sequence_len(), 1);
        unwrap!(ta.adc.add_channel(Ch::Vts, Ts::Cyc84));
        defmt::assert_eq!(ta.adc.sequence_len(), 2);

        for _ in 2..16 {
            unwrap!(ta.adc.add_channel(Ch::In0, Ts::Cyc3));
        }
        defmt::assert_eq!(ta.adc.sequence_len(), 16);
        defmt::assert_eq!(
            ta.adc.add_channel(Ch::In1, Ts::Cyc3),
            Err(Error::SequenceFull)
        );

        unwrap!(ta.adc.set_channel(Ch::Vref, Ts::Cyc84));
        defmt::assert_eq!(ta.adc.sequence_len(), 1);
    }

    #[test]
    fn interrupt_flags(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        unwrap!(ta.adc.set_channel(Ch::Vref, Ts::Cyc3));
        ta.adc.start_conversion();
        while !ta.adc.is_conversion_finished() {}

        defmt::assert!(ta
            .adc
            .interrupt_flags()
            .contains(InterruptFlag::END_OF_REGULAR_CONVERSION));
        ta.adc
            .acknowledge_interrupt_flags(InterruptFlag::END_OF_REGULAR_CONVERSION);
        defmt::assert!(!ta.adc.is_conversion_finished());

        // reading the data register also clears EOC
        ta.adc.start_conversion();
        while !ta.adc.is_conversion_finished() {}
        let _: u16 = ta.adc.data();
        defmt::assert!(!ta.adc.is_conversion_finished());
    }

    #[test]
    fn free_running(ta: &mut TestArgs) {
        ta.adc.enable_tsvref();
        unwrap!(ta.adc.set_channel(Ch::Vref, Ts::Cyc480));
        ta.adc.enable_free_running_mode();
        defmt::assert!(ta.adc.is_free_running());

        ta.adc.start_conversion();
        for _ in 0..4 {
            while !ta.adc.is_conversion_finished() {}
            let sample: u16 = ta.adc.conversion_result();
            defmt::assert!(sample <= adc::MAX_SAMPLE);
        }

        ta.adc.disable_free_running_mode();
        defmt::assert!(!ta.adc.is_free_running());
        // let the last conversion finish
        ta.delay.delay_us(100);
        ta.adc
            .acknowledge_interrupt_flags(InterruptFlag::ALL);
    }
}
