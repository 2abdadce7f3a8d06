//! Analog to digital converter
//!
//! Quickstart:
//!
//! * [`Adc::new`] Power on a converter
//! * [`Adc::read_channel`] Sample a channel by number
//! * [`Adc::pin`] Sample an analog pin
//! * [`Adc::temperature`] Sample the junction temperature
//!
//! # Concurrency
//!
//! The driver keeps no state of its own, every query reads the live
//! registers. Ownership of the `pac::ADCx` token is the only guard against
//! concurrent use of a converter. The clock prescaler and the internal
//! channel switches live in the common register block that all converters
//! share; callers that drive several converters from different execution
//! contexts must serialize those calls themselves.

pub mod clock;
pub mod irq;

pub use clock::{Prescaler, Supply};
pub use irq::{Interrupt, InterruptFlag};

use crate::{
    gpio::{self, sealed::AdcCh},
    pac,
    rcc::SystemClock,
    Sealed,
};
use core::{marker::PhantomData, ops::Deref, ptr::read_volatile, time::Duration};

/// Number of bits in a conversion result.
pub const RESOLUTION_BITS: u8 = 12;

/// Largest conversion result.
///
/// # Example
///
/// ```
/// use stm32f4_adc_hal::adc::MAX_SAMPLE;
///
/// assert_eq!(MAX_SAMPLE, 4095);
/// ```
pub const MAX_SAMPLE: u16 = (1 << RESOLUTION_BITS) - 1;

/// ADC clock frequency targeted by [`Adc::new`].
pub const DEFAULT_FREQUENCY_HZ: u32 = 10_000_000;

/// Tolerance on [`DEFAULT_FREQUENCY_HZ`] accepted by [`Adc::new`].
pub const DEFAULT_TOLERANCE_PCT: u8 = 10;

/// t<sub>STAB</sub> power-up time
///
/// Delay between setting `ADON` and the first accurate conversion.
///
/// Value from DS8626 Rev 9 table 67 "ADC characteristics"
pub const T_STAB: Duration = Duration::from_micros(3);

/// t<sub>S_temp</sub> temperature sensor minimum sampling time
///
/// Value from DS8626 Rev 9 table 69 "Temperature sensor characteristics"
pub const TS_MIN_SAMPLE: Duration = Duration::from_micros(10);

/// Internal voltage reference ADC calibration
///
/// This is raw ADC data acquired at 30 °C, V<sub>DDA</sub> = 3.3 V.
pub fn vref_cal() -> u16 {
    // DS8626 rev 9 table 74
    unsafe { read_volatile(0x1FFF_7A2A as *const u16) }
}

// rc_w0 flags of ADC_SR, RM0090 rev 19 section 13.13.1
const SR_FLAGS: u32 = 0b11_1111;

const MAX_SEQUENCE_LEN: u8 = 16;

macro_rules! smp_fields {
    ($($ch:ident => $reg:ident.$field:ident,)+) => {
        // SMPx writers are only safe on some devices
        #[allow(unused_unsafe)]
        fn write_smp(adc: &pac::adc1::RegisterBlock, ch: Ch, ts: Ts) {
            let ts: u8 = ts.into();
            match ch {
                $(Ch::$ch => adc.$reg.modify(|_, w| unsafe { w.$field().bits(ts) }),)+
            }
        }

        fn read_smp(adc: &pac::adc1::RegisterBlock, ch: Ch) -> Ts {
            let bits: u8 = match ch {
                $(Ch::$ch => adc.$reg.read().$field().bits(),)+
            };
            Ts::from_bits(bits)
        }
    };
}

smp_fields! {
    In0 => smpr2.smp0,
    In1 => smpr2.smp1,
    In2 => smpr2.smp2,
    In3 => smpr2.smp3,
    In4 => smpr2.smp4,
    In5 => smpr2.smp5,
    In6 => smpr2.smp6,
    In7 => smpr2.smp7,
    In8 => smpr2.smp8,
    In9 => smpr2.smp9,
    In10 => smpr1.smp10,
    In11 => smpr1.smp11,
    In12 => smpr1.smp12,
    In13 => smpr1.smp13,
    In14 => smpr1.smp14,
    In15 => smpr1.smp15,
    Vts => smpr1.smp16,
    Vref => smpr1.smp17,
    Vbat => smpr1.smp18,
}

macro_rules! sq_fields {
    ($($slot:literal => $reg:ident.$field:ident,)+ _ => $last_reg:ident.$last_field:ident,) => {
        fn write_sq(adc: &pac::adc1::RegisterBlock, slot: u8, ch: Ch) {
            let ch: u8 = ch.into();
            match slot {
                $($slot => adc.$reg.modify(|_, w| unsafe { w.$field().bits(ch) }),)+
                _ => adc.$last_reg.modify(|_, w| unsafe { w.$last_field().bits(ch) }),
            }
        }
    };
}

sq_fields! {
    0 => sqr3.sq1,
    1 => sqr3.sq2,
    2 => sqr3.sq3,
    3 => sqr3.sq4,
    4 => sqr3.sq5,
    5 => sqr3.sq6,
    6 => sqr2.sq7,
    7 => sqr2.sq8,
    8 => sqr2.sq9,
    9 => sqr2.sq10,
    10 => sqr2.sq11,
    11 => sqr2.sq12,
    12 => sqr1.sq13,
    13 => sqr1.sq14,
    14 => sqr1.sq15,
    _ => sqr1.sq16,
}

/// ADC errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Channel number is not in `0..=18`.
    InvalidChannel(u8),
    /// The regular sequence already holds 16 conversions.
    SequenceFull,
    /// The conversion did not finish within the allowed number of polls.
    Timeout,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidChannel(ch) => write!(f, "ADC channel {ch} does not exist"),
            Error::SequenceFull => f.write_str("ADC regular sequence is full"),
            Error::Timeout => f.write_str("ADC conversion timed out"),
        }
    }
}

/// ADC sample times
///
/// The total conversion time is the sample time plus 12 ADC clock cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Ts {
    /// 3 ADC clock cycles
    Cyc3 = 0b000,
    /// 15 ADC clock cycles
    Cyc15 = 0b001,
    /// 28 ADC clock cycles
    Cyc28 = 0b010,
    /// 56 ADC clock cycles
    Cyc56 = 0b011,
    /// 84 ADC clock cycles
    Cyc84 = 0b100,
    /// 112 ADC clock cycles
    Cyc112 = 0b101,
    /// 144 ADC clock cycles
    Cyc144 = 0b110,
    /// 480 ADC clock cycles
    Cyc480 = 0b111,
}

impl Default for Ts {
    /// Reset value of the sample time.
    fn default() -> Self {
        Ts::Cyc3
    }
}

impl Ts {
    /// Maximum sample time, 480 ADC clock cycles.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Ts;
    ///
    /// assert_eq!(Ts::MAX, Ts::Cyc480);
    /// ```
    pub const MAX: Self = Self::Cyc480;

    /// Minimum sample time, 3 ADC clock cycles.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Ts;
    ///
    /// assert_eq!(Ts::MIN, Ts::Cyc3);
    /// ```
    pub const MIN: Self = Self::Cyc3;

    /// Fixed successive approximation cycles added to every sample time.
    pub const CONVERSION_OVERHEAD: u16 = 12;

    const fn from_bits(bits: u8) -> Ts {
        match bits & 0b111 {
            0b000 => Ts::Cyc3,
            0b001 => Ts::Cyc15,
            0b010 => Ts::Cyc28,
            0b011 => Ts::Cyc56,
            0b100 => Ts::Cyc84,
            0b101 => Ts::Cyc112,
            0b110 => Ts::Cyc144,
            _ => Ts::Cyc480,
        }
    }

    /// Number of sampling cycles.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Ts;
    ///
    /// assert_eq!(Ts::Cyc3.cycles(), 3);
    /// assert_eq!(Ts::Cyc15.cycles(), 15);
    /// assert_eq!(Ts::Cyc28.cycles(), 28);
    /// assert_eq!(Ts::Cyc56.cycles(), 56);
    /// assert_eq!(Ts::Cyc84.cycles(), 84);
    /// assert_eq!(Ts::Cyc112.cycles(), 112);
    /// assert_eq!(Ts::Cyc144.cycles(), 144);
    /// assert_eq!(Ts::Cyc480.cycles(), 480);
    /// ```
    pub const fn cycles(&self) -> u16 {
        match self {
            Ts::Cyc3 => 3,
            Ts::Cyc15 => 15,
            Ts::Cyc28 => 28,
            Ts::Cyc56 => 56,
            Ts::Cyc84 => 84,
            Ts::Cyc112 => 112,
            Ts::Cyc144 => 144,
            Ts::Cyc480 => 480,
        }
    }

    /// Number of ADC clock cycles for a complete conversion.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Ts;
    ///
    /// assert_eq!(Ts::Cyc3.conversion_cycles(), 15);
    /// assert_eq!(Ts::Cyc480.conversion_cycles(), 492);
    /// ```
    pub const fn conversion_cycles(&self) -> u16 {
        self.cycles() + Self::CONVERSION_OVERHEAD
    }

    /// Get the sampling cycles as a duration.
    ///
    /// Fractional nano-seconds are rounded towards zero.
    ///
    /// You can get the ADC frequency with [`Adc::clock_hz`].
    ///
    /// # Panics
    ///
    /// * `hz` is zero
    ///
    /// # Example
    ///
    /// Assuming the ADC clock frequency is 36 MHz.
    ///
    /// ```
    /// use core::time::Duration;
    /// use stm32f4_adc_hal::adc::Ts;
    ///
    /// const FREQ: u32 = 36_000_000;
    ///
    /// assert_eq!(Ts::Cyc3.as_duration(FREQ), Duration::from_nanos(83));
    /// assert_eq!(Ts::Cyc15.as_duration(FREQ), Duration::from_nanos(416));
    /// assert_eq!(Ts::Cyc28.as_duration(FREQ), Duration::from_nanos(777));
    /// assert_eq!(Ts::Cyc56.as_duration(FREQ), Duration::from_nanos(1_555));
    /// assert_eq!(Ts::Cyc84.as_duration(FREQ), Duration::from_nanos(2_333));
    /// assert_eq!(Ts::Cyc112.as_duration(FREQ), Duration::from_nanos(3_111));
    /// assert_eq!(Ts::Cyc144.as_duration(FREQ), Duration::from_nanos(4_000));
    /// assert_eq!(Ts::Cyc480.as_duration(FREQ), Duration::from_nanos(13_333));
    /// ```
    pub const fn as_duration(&self, hz: u32) -> Duration {
        let numer: u64 = (self.cycles() as u64).saturating_mul(1_000_000_000);
        Duration::from_nanos(numer / (hz as u64))
    }
}

impl From<Ts> for u8 {
    fn from(ts: Ts) -> Self {
        ts as u8
    }
}

impl From<Ts> for u32 {
    fn from(ts: Ts) -> Self {
        ts as u32
    }
}

/// ADC channels
///
/// The pins connected to each input depend on the converter, see the
/// `ADCx_CH` constants on the types in [`gpio::pins`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Ch {
    /// ADC input 0.
    In0 = 0,
    /// ADC input 1.
    In1 = 1,
    /// ADC input 2.
    In2 = 2,
    /// ADC input 3.
    In3 = 3,
    /// ADC input 4.
    In4 = 4,
    /// ADC input 5.
    In5 = 5,
    /// ADC input 6.
    In6 = 6,
    /// ADC input 7.
    In7 = 7,
    /// ADC input 8.
    In8 = 8,
    /// ADC input 9.
    In9 = 9,
    /// ADC input 10.
    In10 = 10,
    /// ADC input 11.
    In11 = 11,
    /// ADC input 12.
    In12 = 12,
    /// ADC input 13.
    In13 = 13,
    /// ADC input 14.
    In14 = 14,
    /// ADC input 15.
    In15 = 15,
    /// Junction temperature sensor on STM32F40x and STM32F41x, ADC1 only.
    ///
    /// Requires [`Adc::enable_tsvref`].
    Vts = 16,
    /// Internal voltage reference, ADC1 only.
    ///
    /// Requires [`Adc::enable_tsvref`].
    Vref = 17,
    /// Internal V<sub>BAT</sub>/2 divider, ADC1 only.
    ///
    /// Requires [`Adc::enable_vbat`].
    Vbat = 18,
}

impl Ch {
    /// Channel of the junction temperature sensor.
    ///
    /// Every device except the STM32F405 and STM32F407 connects the sensor to
    /// channel 18, shared with [`Ch::Vbat`]. On those devices V<sub>BAT</sub>
    /// takes precedence when both switches are on.
    #[cfg(any(feature = "stm32f405", feature = "stm32f407"))]
    pub const TEMPERATURE: Ch = Ch::Vts;

    /// Channel of the junction temperature sensor.
    ///
    /// Every device except the STM32F405 and STM32F407 connects the sensor to
    /// channel 18, shared with [`Ch::Vbat`]. On those devices V<sub>BAT</sub>
    /// takes precedence when both switches are on.
    #[cfg(not(any(feature = "stm32f405", feature = "stm32f407")))]
    pub const TEMPERATURE: Ch = Ch::Vbat;

    /// Returns `true` if the channel is an internal source.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Ch;
    ///
    /// assert!(!Ch::In15.is_internal());
    /// assert!(Ch::Vts.is_internal());
    /// assert!(Ch::Vbat.is_internal());
    /// ```
    pub const fn is_internal(self) -> bool {
        self as u8 >= Ch::Vts as u8
    }
}

impl TryFrom<u8> for Ch {
    type Error = Error;

    /// Validate a raw channel number.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::{Ch, Error};
    ///
    /// assert_eq!(Ch::try_from(0), Ok(Ch::In0));
    /// assert_eq!(Ch::try_from(17), Ok(Ch::Vref));
    /// assert_eq!(Ch::try_from(19), Err(Error::InvalidChannel(19)));
    /// ```
    fn try_from(ch: u8) -> Result<Self, Self::Error> {
        Ok(match ch {
            0 => Ch::In0,
            1 => Ch::In1,
            2 => Ch::In2,
            3 => Ch::In3,
            4 => Ch::In4,
            5 => Ch::In5,
            6 => Ch::In6,
            7 => Ch::In7,
            8 => Ch::In8,
            9 => Ch::In9,
            10 => Ch::In10,
            11 => Ch::In11,
            12 => Ch::In12,
            13 => Ch::In13,
            14 => Ch::In14,
            15 => Ch::In15,
            16 => Ch::Vts,
            17 => Ch::Vref,
            18 => Ch::Vbat,
            _ => return Err(Error::InvalidChannel(ch)),
        })
    }
}

impl From<Ch> for u8 {
    fn from(ch: Ch) -> Self {
        ch as u8
    }
}

impl From<Ch> for u32 {
    fn from(ch: Ch) -> Self {
        ch as u32
    }
}

fn validate(ch: u8) -> Result<Ch, Error> {
    Ch::try_from(ch).inspect_err(|_| {
        warn!("rejected ADC channel {}", ch);
    })
}

/// Result data alignment.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// 12-bit result in bits 11:0, reset value.
    #[default]
    Right,
    /// 12-bit result in bits 15:4.
    Left,
}

/// External trigger edge for regular conversions, `EXTEN`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TriggerPolarity {
    /// Trigger detection disabled, conversions only start from software.
    #[default]
    NoTriggerDetection = 0b00,
    /// Trigger on the rising edge.
    RisingEdge = 0b01,
    /// Trigger on the falling edge.
    FallingEdge = 0b10,
    /// Trigger on both edges.
    RisingAndFallingEdge = 0b11,
}

impl TriggerPolarity {
    const fn from_bits(bits: u8) -> TriggerPolarity {
        match bits & 0b11 {
            0b00 => TriggerPolarity::NoTriggerDetection,
            0b01 => TriggerPolarity::RisingEdge,
            0b10 => TriggerPolarity::FallingEdge,
            _ => TriggerPolarity::RisingAndFallingEdge,
        }
    }
}

/// External trigger source for regular conversions, `EXTSEL`.
///
/// RM0090 rev 19 table 69 "External trigger for regular channels".
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TriggerEvent {
    /// Timer 1 CC1
    #[default]
    Event0 = 0x0,
    /// Timer 1 CC2
    Event1 = 0x1,
    /// Timer 1 CC3
    Event2 = 0x2,
    /// Timer 2 CC2
    Event3 = 0x3,
    /// Timer 2 CC3
    Event4 = 0x4,
    /// Timer 2 CC4
    Event5 = 0x5,
    /// Timer 2 TRGO
    Event6 = 0x6,
    /// Timer 3 CC1
    Event7 = 0x7,
    /// Timer 3 TRGO
    Event8 = 0x8,
    /// Timer 4 CC4
    Event9 = 0x9,
    /// Timer 5 CC1
    Event10 = 0xA,
    /// Timer 5 CC2
    Event11 = 0xB,
    /// Timer 5 CC3
    Event12 = 0xC,
    /// Timer 8 CC1
    Event13 = 0xD,
    /// Timer 8 TRGO
    Event14 = 0xE,
    /// EXTI line 11
    Event15 = 0xF,
}

impl TriggerEvent {
    const fn from_bits(bits: u8) -> TriggerEvent {
        match bits & 0xF {
            0x0 => TriggerEvent::Event0,
            0x1 => TriggerEvent::Event1,
            0x2 => TriggerEvent::Event2,
            0x3 => TriggerEvent::Event3,
            0x4 => TriggerEvent::Event4,
            0x5 => TriggerEvent::Event5,
            0x6 => TriggerEvent::Event6,
            0x7 => TriggerEvent::Event7,
            0x8 => TriggerEvent::Event8,
            0x9 => TriggerEvent::Event9,
            0xA => TriggerEvent::Event10,
            0xB => TriggerEvent::Event11,
            0xC => TriggerEvent::Event12,
            0xD => TriggerEvent::Event13,
            0xE => TriggerEvent::Event14,
            _ => TriggerEvent::Event15,
        }
    }
}

/// ADC peripherals that can be driven by [`Adc`].
///
/// This trait is sealed, it is implemented for `pac::ADC1`, and for
/// `pac::ADC2` and `pac::ADC3` on devices that have them.
pub trait Instance: Deref<Target = pac::adc1::RegisterBlock> + Sealed {
    #[doc(hidden)]
    fn set_clock(rcc: &pac::rcc::RegisterBlock, enable: bool);

    /// Registers shared by all converters.
    fn common(&self) -> &pac::adc_common::RegisterBlock;

    /// Steal the peripheral token.
    ///
    /// # Safety
    ///
    /// Singleton checks are bypassed with this method.
    unsafe fn steal() -> Self;
}

macro_rules! impl_instance {
    ($adc:ident, $en:ident) => {
        impl Sealed for pac::$adc {}

        impl Instance for pac::$adc {
            #[inline]
            fn set_clock(rcc: &pac::rcc::RegisterBlock, enable: bool) {
                rcc.apb2enr.modify(|_, w| w.$en().bit(enable));
                rcc.apb2enr.read(); // delay after an RCC peripheral clock enabling
            }

            #[inline(always)]
            fn common(&self) -> &pac::adc_common::RegisterBlock {
                unsafe { &*pac::ADC_COMMON::ptr() }
            }

            #[inline]
            unsafe fn steal() -> Self {
                unsafe { pac::Peripherals::steal() }.$adc
            }
        }
    };
}

impl_instance!(ADC1, adc1en);
#[cfg(feature = "adc2")]
impl_instance!(ADC2, adc2en);
#[cfg(feature = "adc3")]
impl_instance!(ADC3, adc3en);

// Prescaler chosen at build time for a clock tree, frequency and tolerance.
struct ClockConfig<C, const HZ: u32, const TOL_PCT: u8>(PhantomData<C>);

impl<C: SystemClock, const HZ: u32, const TOL_PCT: u8> ClockConfig<C, HZ, TOL_PCT> {
    const PRESCALER: Prescaler = match Prescaler::select(
        C::APB2,
        HZ,
        TOL_PCT,
        C::VDDA.max_adc_clock_hz(),
    ) {
        Some(prescaler) => prescaler,
        None => panic!("no ADC prescaler reaches the requested frequency within tolerance"),
    };
}

/// Analog to digital converter driver.
#[derive(Debug)]
pub struct Adc<ADC> {
    adc: ADC,
}

impl<ADC: Instance> Adc<ADC> {
    /// Create a new ADC driver with a 10 MHz ± 10 % ADC clock.
    ///
    /// See [`initialize`](Self::initialize).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{adc::Adc, pac, rcc::SystemClock};
    ///
    /// struct Clocks;
    ///
    /// impl SystemClock for Clocks {
    ///     const SYSCLK: u32 = 168_000_000;
    ///     const APB2: u32 = 84_000_000;
    /// }
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let adc = Adc::new::<Clocks>(dp.ADC1, &dp.RCC);
    /// ```
    #[inline]
    pub fn new<C: SystemClock>(adc: ADC, rcc: &pac::rcc::RegisterBlock) -> Self {
        Self::initialize::<C, DEFAULT_FREQUENCY_HZ, DEFAULT_TOLERANCE_PCT>(adc, rcc)
    }

    /// Create a new ADC driver and power on the converter.
    ///
    /// This enables the converter clock, programs the smallest prescaler that
    /// brings the APB2 clock of `C` within `TOL_PCT` percent of `HZ` without
    /// exceeding the limit of the analog supply range, and sets `ADON`.
    ///
    /// The prescaler is shared by all converters, initializing a second
    /// converter with a different target reprograms it for both.
    ///
    /// The peripheral is **not** reset, the reset line is shared as well.
    /// Use [`pulse_reset`](Self::pulse_reset) before if determinism is
    /// required.
    ///
    /// Wait [`T_STAB`] before starting the first conversion.
    ///
    /// # Example
    ///
    /// The 16 MHz reset clock tree only reaches 8 MHz.
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{adc::Adc, pac, rcc::Hsi16};
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    /// ```
    ///
    /// A frequency that no prescaler can produce is rejected at build time.
    ///
    /// ```compile_fail
    /// use stm32f4_adc_hal::{adc::Adc, pac, rcc::SystemClock};
    ///
    /// struct Clocks;
    ///
    /// impl SystemClock for Clocks {
    ///     const SYSCLK: u32 = 168_000_000;
    ///     const APB2: u32 = 84_000_000;
    /// }
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let adc = Adc::initialize::<Clocks, 100_000_000, 1>(dp.ADC1, &dp.RCC);
    /// ```
    pub fn initialize<C: SystemClock, const HZ: u32, const TOL_PCT: u8>(
        adc: ADC,
        rcc: &pac::rcc::RegisterBlock,
    ) -> Self {
        let prescaler: Prescaler = ClockConfig::<C, HZ, TOL_PCT>::PRESCALER;
        Self::enable_clock(rcc);
        let mut adc: Self = Self { adc };
        adc.set_prescaler(prescaler);
        adc.enable();
        trace!(
            "ADC prescaler {} for {} Hz",
            prescaler,
            C::APB2 / prescaler.divisor()
        );
        adc
    }

    /// Create a new ADC driver from an ADC peripheral without initialization.
    ///
    /// # Safety
    ///
    /// 1. Enable the ADC peripheral clock before using the ADC.
    /// 2. Program the prescaler through another converter, or accept the
    ///    reset value of PCLK2/2.
    #[inline]
    pub const unsafe fn new_no_init(adc: ADC) -> Self {
        Self { adc }
    }

    /// Free the ADC peripheral from the driver.
    ///
    /// The converter is left powered on.
    #[inline]
    pub fn free(self) -> ADC {
        self.adc
    }

    /// Steal the ADC peripheral from whatever is currently using it.
    ///
    /// This will **not** initialize the ADC (unlike [`new`](Self::new)).
    ///
    /// # Safety
    ///
    /// 1. Ensure that the code stealing the ADC has exclusive access to the
    ///    peripheral. Singleton checks are bypassed with this method.
    /// 2. Enable the ADC peripheral clock before using the ADC.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{adc::Adc, pac};
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// Adc::<pac::ADC1>::enable_clock(&dp.RCC);
    ///
    /// let mut adc: Adc<pac::ADC1> = unsafe { Adc::steal() };
    /// ```
    #[inline]
    pub unsafe fn steal() -> Self {
        Self {
            adc: unsafe { ADC::steal() },
        }
    }

    /// Enable the ADC clock.
    ///
    /// [`new`](Self::new) will enable clocks for you.
    #[inline]
    pub fn enable_clock(rcc: &pac::rcc::RegisterBlock) {
        ADC::set_clock(rcc, true)
    }

    /// Disable the ADC clock.
    ///
    /// # Safety
    ///
    /// 1. Ensure nothing is using the ADC before disabling the clock.
    /// 2. You are responsible for re-enabling the clock before using the ADC.
    #[inline]
    pub unsafe fn disable_clock(rcc: &pac::rcc::RegisterBlock) {
        ADC::set_clock(rcc, false)
    }

    /// Pulse the ADC reset.
    ///
    /// There is a single reset line for all converters and the common
    /// registers.
    ///
    /// # Safety
    ///
    /// 1. Ensure no converter is in use before calling this function.
    /// 2. You are responsible for setting up every converter after a reset.
    #[inline]
    pub unsafe fn pulse_reset(rcc: &pac::rcc::RegisterBlock) {
        rcc.apb2rstr.modify(|_, w| w.adcrst().set_bit());
        rcc.apb2rstr.modify(|_, w| w.adcrst().clear_bit());
    }

    /// Get the programmed ADC clock prescaler.
    #[inline]
    pub fn prescaler(&self) -> Prescaler {
        let adcpre: u8 = self.adc.common().ccr.read().adcpre().bits();
        Prescaler::from_bits(u32::from(adcpre))
    }

    fn set_prescaler(&mut self, prescaler: Prescaler) {
        self.adc
            .common()
            .ccr
            .modify(|_, w| w.adcpre().bits(prescaler as u8))
    }

    /// Calculate the ADC clock frequency in hertz from the APB2 frequency.
    ///
    /// Fractional frequencies will be rounded towards zero.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{adc::Adc, pac, rcc::{Hsi16, SystemClock}};
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    /// assert_eq!(adc.clock_hz(Hsi16::APB2), 8_000_000);
    /// ```
    #[inline]
    pub fn clock_hz(&self, pclk2_hz: u32) -> u32 {
        pclk2_hz / self.prescaler().divisor()
    }

    /// Route the ADC interrupt through the NVIC, or mask it.
    ///
    /// `priority` is the group priority, only the upper
    /// [`NVIC_PRIO_BITS`](crate::pac::NVIC_PRIO_BITS) are implemented.
    ///
    /// All converters share one interrupt line.
    ///
    /// # Safety
    ///
    /// Unmasking can break mask-based critical sections, and changing the
    /// priority can break priority-based critical sections.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{adc::Adc, pac};
    ///
    /// let mut cp = pac::CorePeripherals::take().unwrap();
    /// unsafe { Adc::<pac::ADC1>::enable_interrupt_vector(&mut cp.NVIC, 3, true) };
    /// ```
    pub unsafe fn enable_interrupt_vector(nvic: &mut pac::NVIC, priority: u8, enable: bool) {
        if enable {
            debug_assert!(u32::from(priority) < (1 << pac::NVIC_PRIO_BITS));
            unsafe {
                nvic.set_priority(pac::Interrupt::ADC, priority << (8 - pac::NVIC_PRIO_BITS));
                Self::unmask_irq();
            }
        } else {
            Self::mask_irq();
        }
    }

    /// Unmask the ADC IRQ in the NVIC.
    ///
    /// # Safety
    ///
    /// This can break mask-based critical sections.
    #[inline]
    pub unsafe fn unmask_irq() {
        unsafe { pac::NVIC::unmask(pac::Interrupt::ADC) }
    }

    /// Mask the ADC IRQ in the NVIC.
    #[inline]
    pub fn mask_irq() {
        pac::NVIC::mask(pac::Interrupt::ADC)
    }

    /// Power on the converter, `ADON`.
    ///
    /// Wait [`T_STAB`] before starting a conversion.
    #[inline]
    pub fn enable(&mut self) {
        self.adc.cr2.modify(|_, w| w.adon().set_bit())
    }

    /// Power off the converter.
    ///
    /// This also stops any conversion in progress.
    #[inline]
    pub fn disable(&mut self) {
        self.adc.cr2.modify(|_, w| w.adon().clear_bit())
    }

    /// Returns `true` if the converter is powered on.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.adc.cr2.read().adon().bit_is_set()
    }

    fn write_sample_time(&mut self, ch: Ch, ts: Ts) {
        write_smp(&self.adc, ch, ts)
    }

    fn select(&mut self, ch: Ch, ts: Ts) {
        self.write_sample_time(ch, ts);
        self.adc.sqr1.reset();
        self.adc.sqr2.reset();
        self.adc.sqr3.reset();
        write_sq(&self.adc, 0, ch);
    }

    /// Select a single channel for conversion.
    ///
    /// The regular sequence is reduced to this one channel and its sample
    /// time is set to `ts`.
    ///
    /// Changing the channel while a conversion is in progress aborts that
    /// conversion, the converter restarts on the new channel.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChannel`] if `ch` is greater than 18. No register is
    /// written in that case.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, Ch, Ts},
    ///     pac,
    ///     rcc::Hsi16,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    ///
    /// adc.set_channel(Ch::In3, Ts::Cyc84)?;
    /// adc.set_channel(11, Ts::Cyc84)?;
    /// assert!(adc.set_channel(42, Ts::Cyc84).is_err());
    /// # Ok::<(), stm32f4_adc_hal::adc::Error>(())
    /// ```
    pub fn set_channel(&mut self, ch: impl Into<u8>, ts: Ts) -> Result<(), Error> {
        let ch: Ch = validate(ch.into())?;
        self.select(ch, ts);
        Ok(())
    }

    /// Get the first channel of the regular sequence.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChannel`] if the register holds a channel number
    /// that does not exist, which only happens if it was written outside of
    /// this driver.
    pub fn channel(&self) -> Result<Ch, Error> {
        Ch::try_from(self.adc.sqr3.read().sq1().bits())
    }

    /// Append a channel to the regular sequence.
    ///
    /// [`set_channel`](Self::set_channel) starts a new sequence, each call
    /// to this method adds one conversion after it. The sequence is only
    /// converted as a whole with [scan mode](Self::enable_scan_mode).
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidChannel`] if `ch` is greater than 18.
    /// * [`Error::SequenceFull`] if the sequence already holds 16
    ///   conversions.
    ///
    /// No register is written on error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, Ch, Ts},
    ///     pac,
    ///     rcc::Hsi16,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    ///
    /// adc.set_channel(Ch::In0, Ts::Cyc56)?;
    /// adc.add_channel(Ch::In1, Ts::Cyc56)?;
    /// adc.add_channel(Ch::In4, Ts::Cyc56)?;
    /// adc.enable_scan_mode();
    /// assert_eq!(adc.sequence_len(), 3);
    /// # Ok::<(), stm32f4_adc_hal::adc::Error>(())
    /// ```
    pub fn add_channel(&mut self, ch: impl Into<u8>, ts: Ts) -> Result<(), Error> {
        let ch: Ch = validate(ch.into())?;
        let slot: u8 = self.sequence_len();
        if slot >= MAX_SEQUENCE_LEN {
            warn!("ADC regular sequence is full, dropping {}", ch);
            return Err(Error::SequenceFull);
        }
        self.write_sample_time(ch, ts);
        write_sq(&self.adc, slot, ch);
        self.adc.sqr1.modify(|_, w| w.l().bits(slot));
        Ok(())
    }

    /// Number of conversions in the regular sequence, `1..=16`.
    #[inline]
    #[must_use]
    pub fn sequence_len(&self) -> u8 {
        self.adc.sqr1.read().l().bits() + 1
    }

    /// Set the sample time of a channel without changing the sequence.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChannel`] if `ch` is greater than 18.
    pub fn set_sample_time(&mut self, ch: impl Into<u8>, ts: Ts) -> Result<(), Error> {
        let ch: Ch = validate(ch.into())?;
        self.write_sample_time(ch, ts);
        Ok(())
    }

    /// Get the sample time of a channel.
    pub fn sample_time(&self, ch: Ch) -> Ts {
        read_smp(&self.adc, ch)
    }

    /// Channel of a pin on this converter.
    ///
    /// A pin that is not connected to this converter does not compile.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, Ch},
    ///     gpio::pins,
    ///     pac,
    /// };
    ///
    /// const CH: Ch = Adc::<pac::ADC1>::pin_channel::<pins::B0>();
    /// assert_eq!(CH, Ch::In8);
    /// ```
    #[inline]
    pub const fn pin_channel<P: AdcCh<ADC>>() -> Ch {
        P::ADC_CH
    }

    /// Select the channel of a pin for conversion.
    ///
    /// Same as [`set_channel`](Self::set_channel), the channel number
    /// is valid by construction.
    #[inline]
    pub fn set_pin_channel<P: AdcCh<ADC>>(&mut self, ts: Ts) {
        self.select(P::ADC_CH, ts)
    }

    /// Start a conversion of the regular sequence.
    ///
    /// Stale end of conversion and overrun flags are acknowledged first so
    /// that [`is_conversion_finished`](Self::is_conversion_finished) only
    /// reports this conversion.
    ///
    /// A channel must have been selected with
    /// [`set_channel`](Self::set_channel) or one of its variants.
    ///
    /// # Panics
    ///
    /// * (debug) the converter is powered off
    #[inline]
    pub fn start_conversion(&mut self) {
        debug_assert!(self.is_enabled());
        self.acknowledge_interrupt_flags(
            InterruptFlag::END_OF_REGULAR_CONVERSION | InterruptFlag::OVERRUN,
        );
        self.adc.cr2.modify(|_, w| w.swstart().set_bit())
    }

    /// Returns `true` if a regular conversion has finished, `EOC`.
    ///
    /// Reading the data register clears the flag.
    #[inline]
    #[must_use]
    pub fn is_conversion_finished(&self) -> bool {
        self.adc.sr.read().eoc().bit_is_set()
    }

    /// Raw content of the data register.
    ///
    /// The position of the 12 result bits depends on the
    /// [alignment](Self::alignment).
    #[inline]
    pub fn data(&self) -> u16 {
        self.adc.dr.read().bits() as u16
    }

    /// Conversion result, right justified.
    ///
    /// The result is always in `0..=`[`MAX_SAMPLE`], whatever the alignment.
    #[inline]
    pub fn conversion_result(&self) -> u16 {
        let data: u16 = self.data();
        match self.alignment() {
            Align::Right => data & MAX_SAMPLE,
            Align::Left => data >> (16 - RESOLUTION_BITS),
        }
    }

    fn convert(&mut self, ch: Ch) -> u16 {
        let ts: Ts = self.sample_time(ch);
        self.select(ch, ts);
        self.start_conversion();
        while !self.is_conversion_finished() {}
        self.conversion_result()
    }

    /// Convert one channel and return the 12-bit right justified result.
    ///
    /// The channel keeps its current sample time.
    ///
    /// This busy-waits until the end of conversion, the hardware provides
    /// no timeout. See [`read_channel_timeout`](Self::read_channel_timeout)
    /// for a bounded variant.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChannel`] if `ch` is greater than 18.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, Ch},
    ///     pac,
    ///     rcc::Hsi16,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    ///
    /// let sample: u16 = adc.read_channel(Ch::In2)?;
    /// # Ok::<(), stm32f4_adc_hal::adc::Error>(())
    /// ```
    pub fn read_channel(&mut self, ch: impl Into<u8>) -> Result<u16, Error> {
        let ch: Ch = validate(ch.into())?;
        Ok(self.convert(ch))
    }

    /// Convert one channel, polling the end of conversion flag at most
    /// `polls` times.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidChannel`] if `ch` is greater than 18.
    /// * [`Error::Timeout`] if the conversion did not finish. The
    ///   conversion is not aborted.
    pub fn read_channel_timeout(&mut self, ch: impl Into<u8>, polls: u32) -> Result<u16, Error> {
        let ch: Ch = validate(ch.into())?;
        let ts: Ts = self.sample_time(ch);
        self.select(ch, ts);
        self.start_conversion();
        for _ in 0..polls {
            if self.is_conversion_finished() {
                return Ok(self.conversion_result());
            }
        }
        error!("ADC conversion of {} timed out", ch);
        Err(Error::Timeout)
    }

    /// Sample an analog pin.
    ///
    /// The pin channel keeps its current sample time.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, Ts},
    ///     gpio::{pins, Analog, PortA},
    ///     pac,
    ///     rcc::Hsi16,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &dp.RCC);
    /// let a1: Analog<pins::A1> = Analog::new(gpioa.a1);
    ///
    /// let mut adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    /// adc.set_pin_channel::<pins::A1>(Ts::Cyc144);
    /// let sample: u16 = adc.pin(&a1);
    /// ```
    pub fn pin<P: AdcCh<ADC>>(&mut self, _pin: &gpio::Analog<P>) -> u16 {
        self.convert(P::ADC_CH)
    }

    /// Enable continuous conversion, `CONT`.
    #[inline]
    pub fn enable_free_running_mode(&mut self) {
        self.adc.cr2.modify(|_, w| w.cont().set_bit())
    }

    /// Disable continuous conversion.
    #[inline]
    pub fn disable_free_running_mode(&mut self) {
        self.adc.cr2.modify(|_, w| w.cont().clear_bit())
    }

    /// Returns `true` if continuous conversion is enabled.
    #[inline]
    #[must_use]
    pub fn is_free_running(&self) -> bool {
        self.adc.cr2.read().cont().bit_is_set()
    }

    /// Convert every channel of the regular sequence, `SCAN`.
    #[inline]
    pub fn enable_scan_mode(&mut self) {
        self.adc.cr1.modify(|_, w| w.scan().set_bit())
    }

    /// Convert only the first channel of the regular sequence.
    #[inline]
    pub fn disable_scan_mode(&mut self) {
        self.adc.cr1.modify(|_, w| w.scan().clear_bit())
    }

    /// Returns `true` if scan mode is enabled.
    #[inline]
    #[must_use]
    pub fn is_scan_mode_enabled(&self) -> bool {
        self.adc.cr1.read().scan().bit_is_set()
    }

    /// Left align results in the data register, `ALIGN`.
    #[inline]
    pub fn set_left_adjust_result(&mut self) {
        self.adc.cr2.modify(|_, w| w.align().set_bit())
    }

    /// Right align results in the data register.
    #[inline]
    pub fn set_right_adjust_result(&mut self) {
        self.adc.cr2.modify(|_, w| w.align().clear_bit())
    }

    /// Result alignment in the data register.
    #[inline]
    pub fn alignment(&self) -> Align {
        if self.adc.cr2.read().align().bit_is_set() {
            Align::Left
        } else {
            Align::Right
        }
    }

    /// Connect the temperature sensor and the internal voltage reference,
    /// `TSVREFE`.
    ///
    /// This switch is shared by all converters. Converting [`Ch::Vts`] or
    /// [`Ch::Vref`] with the switch off returns meaningless data.
    #[inline]
    pub fn enable_tsvref(&mut self) {
        self.adc.common().ccr.modify(|_, w| w.tsvrefe().set_bit())
    }

    /// Disconnect the temperature sensor and the internal voltage reference.
    #[inline]
    pub fn disable_tsvref(&mut self) {
        self.adc.common().ccr.modify(|_, w| w.tsvrefe().clear_bit())
    }

    /// Returns `true` if the temperature sensor and the internal voltage
    /// reference are connected.
    #[inline]
    #[must_use]
    pub fn is_tsvref_enabled(&self) -> bool {
        self.adc.common().ccr.read().tsvrefe().bit_is_set()
    }

    /// Connect the V<sub>BAT</sub>/2 divider, `VBATE`.
    ///
    /// The divider draws current from the battery, disable it between
    /// conversions.
    #[inline]
    pub fn enable_vbat(&mut self) {
        self.adc.common().ccr.modify(|_, w| w.vbate().set_bit())
    }

    /// Disconnect the V<sub>BAT</sub>/2 divider.
    #[inline]
    pub fn disable_vbat(&mut self) {
        self.adc.common().ccr.modify(|_, w| w.vbate().clear_bit())
    }

    /// Returns `true` if the V<sub>BAT</sub>/2 divider is connected.
    #[inline]
    #[must_use]
    pub fn is_vbat_enabled(&self) -> bool {
        self.adc.common().ccr.read().vbate().bit_is_set()
    }

    /// Enable interrupts in `ADC_CR1`.
    ///
    /// Bits not in `irq` are left unchanged.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, Interrupt},
    ///     pac,
    ///     rcc::Hsi16,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    /// adc.enable_interrupt(Interrupt::END_OF_REGULAR_CONVERSION | Interrupt::OVERRUN);
    /// ```
    #[inline]
    pub fn enable_interrupt(&mut self, irq: Interrupt) {
        self.adc
            .cr1
            .modify(|r, w| unsafe { w.bits(r.bits() | irq.bits()) })
    }

    /// Disable interrupts in `ADC_CR1`.
    ///
    /// Bits not in `irq` are left unchanged.
    #[inline]
    pub fn disable_interrupt(&mut self, irq: Interrupt) {
        self.adc
            .cr1
            .modify(|r, w| unsafe { w.bits(r.bits() & !irq.bits()) })
    }

    /// Enabled interrupts.
    #[inline]
    pub fn interrupts(&self) -> Interrupt {
        Interrupt::from_bits_truncate(self.adc.cr1.read().bits())
    }

    /// Pending status flags.
    #[inline]
    pub fn interrupt_flags(&self) -> InterruptFlag {
        InterruptFlag::from_bits_truncate(self.adc.sr.read().bits())
    }

    /// Clear the status flags in `flags`.
    ///
    /// The flags are cleared by writing zero, every other flag is written
    /// with one which leaves it unchanged. A flag raised by the hardware
    /// while this runs is not lost.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, InterruptFlag},
    ///     pac,
    /// };
    ///
    /// // inside the ADC interrupt handler
    /// let mut adc: Adc<pac::ADC1> = unsafe { Adc::steal() };
    /// let flags: InterruptFlag = adc.interrupt_flags();
    /// adc.acknowledge_interrupt_flags(flags);
    /// ```
    #[inline]
    pub fn acknowledge_interrupt_flags(&mut self, flags: InterruptFlag) {
        self.adc
            .sr
            .write(|w| unsafe { w.bits(SR_FLAGS & !flags.bits()) })
    }

    /// Select the external trigger of regular conversions.
    ///
    /// [`TriggerPolarity::NoTriggerDetection`] disables external triggers,
    /// `event` is still written but has no effect.
    ///
    /// # Example
    ///
    /// Convert on every timer 3 update.
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{Adc, TriggerEvent, TriggerPolarity},
    ///     pac,
    ///     rcc::Hsi16,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    /// adc.enable_regular_conversion_external_trigger(
    ///     TriggerPolarity::RisingEdge,
    ///     TriggerEvent::Event8,
    /// );
    /// ```
    #[allow(unused_unsafe)]
    pub fn enable_regular_conversion_external_trigger(
        &mut self,
        polarity: TriggerPolarity,
        event: TriggerEvent,
    ) {
        self.adc.cr2.modify(|_, w| unsafe {
            w.exten().bits(polarity as u8).extsel().bits(event as u8)
        })
    }

    /// Programmed external trigger of regular conversions.
    pub fn regular_conversion_external_trigger(&self) -> (TriggerPolarity, TriggerEvent) {
        let cr2 = self.adc.cr2.read();
        (
            TriggerPolarity::from_bits(cr2.exten().bits()),
            TriggerEvent::from_bits(cr2.extsel().bits()),
        )
    }

    /// Request a DMA transfer after each regular conversion, `DMA`.
    #[inline]
    pub fn enable_dma_mode(&mut self) {
        self.adc.cr2.modify(|_, w| w.dma().set_bit())
    }

    /// Disable DMA requests.
    #[inline]
    pub fn disable_dma_mode(&mut self) {
        self.adc.cr2.modify(|_, w| w.dma().clear_bit())
    }

    /// Returns `true` if DMA mode is enabled.
    #[inline]
    #[must_use]
    pub fn is_dma_mode_enabled(&self) -> bool {
        self.adc.cr2.read().dma().bit_is_set()
    }

    /// Keep issuing DMA requests after the last transfer of the DMA
    /// controller, `DDS`.
    ///
    /// Required for circular DMA transfers.
    #[inline]
    pub fn enable_dma_requests(&mut self) {
        self.adc.cr2.modify(|_, w| w.dds().set_bit())
    }

    /// Stop DMA requests after the last transfer of the DMA controller.
    #[inline]
    pub fn disable_dma_requests(&mut self) {
        self.adc.cr2.modify(|_, w| w.dds().clear_bit())
    }

    /// Returns `true` if DMA requests continue after the last transfer.
    #[inline]
    #[must_use]
    pub fn is_dma_requests_enabled(&self) -> bool {
        self.adc.cr2.read().dds().bit_is_set()
    }

    /// Address of the data register, the peripheral address for a DMA
    /// stream.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{adc::Adc, pac, rcc::Hsi16};
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    /// assert_eq!(adc.data_register_address(), 0x4001_204C);
    /// ```
    #[inline]
    pub fn data_register_address(&self) -> u32 {
        &self.adc.dr as *const _ as usize as u32
    }
}

impl Adc<pac::ADC1> {
    /// Sample the junction temperature.
    ///
    /// The sensor channel is converted with the maximum sample time to meet
    /// [`TS_MIN_SAMPLE`] at any ADC clock frequency.
    ///
    /// # Panics
    ///
    /// * (debug) the sensor is not connected, see [`enable_tsvref`]
    /// * (debug) the sensor shares its channel with V<sub>BAT</sub> and
    ///   [`enable_vbat`] is on
    ///
    /// [`enable_tsvref`]: Self::enable_tsvref
    /// [`enable_vbat`]: Self::enable_vbat
    pub fn temperature(&mut self) -> u16 {
        debug_assert!(self.is_tsvref_enabled());
        debug_assert!(Ch::TEMPERATURE != Ch::Vbat || !self.is_vbat_enabled());
        self.write_sample_time(Ch::TEMPERATURE, Ts::MAX);
        self.convert(Ch::TEMPERATURE)
    }

    /// Sample the internal voltage reference.
    ///
    /// Compare with [`vref_cal`] to compute V<sub>DDA</sub>.
    ///
    /// # Panics
    ///
    /// * (debug) the reference is not connected, see [`enable_tsvref`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    ///     rcc::Hsi16,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::initialize::<Hsi16, 8_000_000, 0>(dp.ADC1, &dp.RCC);
    /// adc.enable_tsvref();
    ///
    /// let vdda_mv: u32 = 3300 * u32::from(adc::vref_cal()) / u32::from(adc.vref());
    /// ```
    ///
    /// [`enable_tsvref`]: Self::enable_tsvref
    pub fn vref(&mut self) -> u16 {
        debug_assert!(self.is_tsvref_enabled());
        self.convert(Ch::Vref)
    }

    /// Sample V<sub>BAT</sub>/2.
    ///
    /// # Panics
    ///
    /// * (debug) the divider is not connected, see [`enable_vbat`]
    ///
    /// [`enable_vbat`]: Self::enable_vbat
    pub fn vbat(&mut self) -> u16 {
        debug_assert!(self.is_vbat_enabled());
        self.convert(Ch::Vbat)
    }
}

impl<ADC, WORD, PIN> embedded_hal::adc::OneShot<ADC, WORD, PIN> for Adc<ADC>
where
    ADC: Instance,
    WORD: From<u16>,
    PIN: embedded_hal::adc::Channel<ADC, ID = u8>,
{
    type Error = Error;

    /// Blocking conversion, never returns [`nb::Error::WouldBlock`].
    fn read(&mut self, _pin: &mut PIN) -> nb::Result<WORD, Self::Error> {
        self.read_channel(PIN::channel())
            .map(WORD::from)
            .map_err(nb::Error::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAdc {
        regs: Box<pac::adc1::RegisterBlock>,
        common: Box<pac::adc_common::RegisterBlock>,
    }

    impl FakeAdc {
        fn new() -> Self {
            // register blocks are plain `u32` cells, all zeros is the reset
            // value of every ADC register
            Self {
                regs: Box::new(unsafe { core::mem::zeroed() }),
                common: Box::new(unsafe { core::mem::zeroed() }),
            }
        }
    }

    impl Deref for FakeAdc {
        type Target = pac::adc1::RegisterBlock;

        fn deref(&self) -> &Self::Target {
            &self.regs
        }
    }

    impl Sealed for FakeAdc {}

    impl Instance for FakeAdc {
        fn set_clock(rcc: &pac::rcc::RegisterBlock, enable: bool) {
            <pac::ADC1 as Instance>::set_clock(rcc, enable)
        }

        fn common(&self) -> &pac::adc_common::RegisterBlock {
            &self.common
        }

        unsafe fn steal() -> Self {
            FakeAdc::new()
        }
    }

    fn fake() -> Adc<FakeAdc> {
        unsafe { Adc::new_no_init(FakeAdc::new()) }
    }

    fn zeroed_rcc() -> Box<pac::rcc::RegisterBlock> {
        Box::new(unsafe { core::mem::zeroed() })
    }

    // DR is read-only through the PAC, the fake stands in for the hardware
    fn set_data(adc: &Adc<FakeAdc>, data: u32) {
        let dr: *mut u32 = &adc.adc.dr as *const _ as *mut u32;
        unsafe { dr.write_volatile(data) }
    }

    struct Apb2At84MHz;

    impl SystemClock for Apb2At84MHz {
        const SYSCLK: u32 = 168_000_000;
        const APB2: u32 = 84_000_000;
    }

    #[test]
    fn initialize() {
        let rcc = zeroed_rcc();
        let adc = Adc::new::<Apb2At84MHz>(FakeAdc::new(), &rcc);

        assert!(rcc.apb2enr.read().adc1en().bit_is_set());
        assert!(adc.is_enabled());
        // 84 MHz / 8 = 10.5 MHz
        assert_eq!(adc.prescaler(), Prescaler::Div8);
        assert_eq!(adc.clock_hz(Apb2At84MHz::APB2), 10_500_000);
    }

    #[test]
    fn initialize_reset_clocks() {
        let rcc = zeroed_rcc();
        let adc = Adc::initialize::<crate::rcc::Hsi16, 8_000_000, 0>(FakeAdc::new(), &rcc);
        assert_eq!(adc.prescaler(), Prescaler::Div2);
        assert_eq!(adc.clock_hz(crate::rcc::Hsi16::APB2), 8_000_000);
    }

    #[test]
    fn clock_gate_and_reset() {
        let rcc = zeroed_rcc();
        rcc.apb2enr.write(|w| w.usart1en().set_bit());

        Adc::<FakeAdc>::enable_clock(&rcc);
        let apb2enr = rcc.apb2enr.read();
        assert!(apb2enr.adc1en().bit_is_set());
        assert!(apb2enr.usart1en().bit_is_set());

        unsafe { Adc::<FakeAdc>::pulse_reset(&rcc) };
        assert!(rcc.apb2rstr.read().adcrst().bit_is_clear());

        unsafe { Adc::<FakeAdc>::disable_clock(&rcc) };
        let apb2enr = rcc.apb2enr.read();
        assert!(apb2enr.adc1en().bit_is_clear());
        assert!(apb2enr.usart1en().bit_is_set());
    }

    #[test]
    fn prescaler_keeps_common_bits() {
        let mut adc = fake();
        adc.enable_tsvref();
        adc.set_prescaler(Prescaler::Div6);
        assert!(adc.is_tsvref_enabled());
        assert_eq!(adc.prescaler(), Prescaler::Div6);
        // TSVREFE bit 23, ADCPRE bits 17:16
        assert_eq!(adc.adc.common().ccr.read().bits(), (1 << 23) | (0b10 << 16));
    }

    #[test]
    fn enable_disable() {
        let mut adc = fake();
        adc.enable_free_running_mode();
        adc.enable();
        adc.enable();
        assert!(adc.is_enabled());
        adc.disable();
        adc.disable();
        assert!(!adc.is_enabled());
        assert!(adc.is_free_running());
    }

    #[test]
    fn set_channel_round_trip() {
        let mut adc = fake();
        for n in 0..=18u8 {
            adc.set_channel(n, Ts::Cyc3).unwrap();
            assert_eq!(adc.channel(), Ch::try_from(n));
            assert_eq!(adc.sequence_len(), 1);
        }
    }

    #[test]
    fn invalid_channel_keeps_configuration() {
        let mut adc = fake();
        adc.set_channel(Ch::In5, Ts::Cyc84).unwrap();
        adc.add_channel(Ch::In6, Ts::Cyc28).unwrap();
        let sqr: [u32; 3] = [
            adc.adc.sqr1.read().bits(),
            adc.adc.sqr2.read().bits(),
            adc.adc.sqr3.read().bits(),
        ];
        let smpr: [u32; 2] = [adc.adc.smpr1.read().bits(), adc.adc.smpr2.read().bits()];

        for n in [19u8, 31, 255] {
            assert_eq!(adc.set_channel(n, Ts::Cyc480), Err(Error::InvalidChannel(n)));
            assert_eq!(adc.add_channel(n, Ts::Cyc480), Err(Error::InvalidChannel(n)));
            assert_eq!(adc.set_sample_time(n, Ts::Cyc480), Err(Error::InvalidChannel(n)));
        }

        assert_eq!(adc.channel(), Ok(Ch::In5));
        assert_eq!(adc.adc.sqr1.read().bits(), sqr[0]);
        assert_eq!(adc.adc.sqr2.read().bits(), sqr[1]);
        assert_eq!(adc.adc.sqr3.read().bits(), sqr[2]);
        assert_eq!(adc.adc.smpr1.read().bits(), smpr[0]);
        assert_eq!(adc.adc.smpr2.read().bits(), smpr[1]);
    }

    #[test]
    fn corrupt_channel_register() {
        let adc = fake();
        adc.adc.sqr3.write(|w| unsafe { w.bits(0x1F) });
        assert_eq!(adc.channel(), Err(Error::InvalidChannel(31)));
    }

    #[test]
    fn sample_time_fields() {
        let mut adc = fake();
        adc.set_sample_time(Ch::In9, Ts::Cyc480).unwrap();
        adc.set_sample_time(Ch::In10, Ts::Cyc15).unwrap();
        adc.set_sample_time(Ch::Vbat, Ts::Cyc144).unwrap();
        assert_eq!(adc.adc.smpr2.read().bits(), 0b111 << 27);
        assert_eq!(adc.adc.smpr1.read().bits(), 0b001 | (0b110 << 24));

        // narrower sample time must clear the old field
        adc.set_sample_time(Ch::In9, Ts::Cyc15).unwrap();
        assert_eq!(adc.adc.smpr2.read().bits(), 0b001 << 27);

        assert_eq!(adc.sample_time(Ch::In9), Ts::Cyc15);
        assert_eq!(adc.sample_time(Ch::In10), Ts::Cyc15);
        assert_eq!(adc.sample_time(Ch::Vbat), Ts::Cyc144);
        assert_eq!(adc.sample_time(Ch::In0), Ts::Cyc3);
    }

    #[test]
    fn set_channel_resets_sequence() {
        let mut adc = fake();
        adc.set_channel(Ch::In1, Ts::Cyc3).unwrap();
        for ch in 2..9u8 {
            adc.add_channel(ch, Ts::Cyc3).unwrap();
        }
        assert_eq!(adc.sequence_len(), 8);

        adc.set_channel(Ch::In12, Ts::Cyc56).unwrap();
        assert_eq!(adc.sequence_len(), 1);
        assert_eq!(adc.adc.sqr3.read().bits(), 12);
        assert_eq!(adc.adc.sqr2.read().bits(), 0);
        assert_eq!(adc.adc.sqr1.read().bits(), 0);
        assert_eq!(adc.sample_time(Ch::In12), Ts::Cyc56);
    }

    #[test]
    fn add_channel_fills_sequence() {
        let mut adc = fake();
        adc.set_channel(Ch::In0, Ts::Cyc3).unwrap();
        for n in 1..16u8 {
            adc.add_channel(n, Ts::Cyc3).unwrap();
            assert_eq!(adc.sequence_len(), n + 1);
        }
        assert_eq!(adc.add_channel(Ch::Vref, Ts::Cyc3), Err(Error::SequenceFull));
        assert_eq!(adc.sequence_len(), 16);

        // slot n holds channel n
        let slots = |first: u32, count: u32| -> u32 {
            (0..count).fold(0, |acc, i| acc | ((first + i) << (i * 5)))
        };
        assert_eq!(adc.adc.sqr3.read().bits(), slots(0, 6));
        assert_eq!(adc.adc.sqr2.read().bits(), slots(6, 6));
        assert_eq!(adc.adc.sqr1.read().bits(), slots(12, 4) | (15 << 20));
    }

    #[test]
    fn add_channel_overwrites_stale_slot() {
        let mut adc = fake();
        adc.adc.sqr3.write(|w| unsafe { w.bits(0x1F << 5) });
        adc.add_channel(Ch::In2, Ts::Cyc3).unwrap();
        assert_eq!(adc.adc.sqr3.read().bits(), 2 << 5);
    }

    #[test]
    fn pin_channel() {
        use crate::gpio::pins;

        let mut adc = fake();
        assert_eq!(Adc::<pac::ADC1>::pin_channel::<pins::C3>(), Ch::In13);
        assert_eq!(Adc::<pac::ADC1>::pin_channel::<pins::A6>(), Ch::In6);
        adc.select(Adc::<pac::ADC1>::pin_channel::<pins::B1>(), Ts::Cyc28);
        assert_eq!(adc.channel(), Ok(Ch::In9));
        assert_eq!(adc.sample_time(Ch::In9), Ts::Cyc28);
    }

    #[test]
    fn interrupt_enable_mask() {
        let mut adc = fake();
        adc.enable_scan_mode();
        adc.enable_interrupt(Interrupt::ANALOG_WATCHDOG);
        adc.enable_interrupt(Interrupt::OVERRUN);
        assert_eq!(
            adc.interrupts(),
            Interrupt::ANALOG_WATCHDOG | Interrupt::OVERRUN
        );

        adc.disable_interrupt(Interrupt::ANALOG_WATCHDOG);
        assert_eq!(adc.interrupts(), Interrupt::OVERRUN);
        assert!(adc.is_scan_mode_enabled());
        // SCAN bit 8, OVRIE bit 26
        assert_eq!(adc.adc.cr1.read().bits(), (1 << 8) | (1 << 26));
    }

    #[test]
    fn acknowledge_clears_only_mask() {
        const STRT: u32 = 1 << 4;
        let mut adc = fake();
        adc.adc
            .sr
            .write(|w| unsafe { w.bits(InterruptFlag::ALL.bits() | STRT) });

        adc.acknowledge_interrupt_flags(
            InterruptFlag::END_OF_REGULAR_CONVERSION | InterruptFlag::OVERRUN,
        );
        assert_eq!(
            adc.interrupt_flags(),
            InterruptFlag::ANALOG_WATCHDOG | InterruptFlag::END_OF_INJECTED_CONVERSION
        );
        assert!(adc.adc.sr.read().strt().bit_is_set());

        adc.acknowledge_interrupt_flags(InterruptFlag::ALL);
        assert!(adc.interrupt_flags().is_empty());
        assert!(adc.adc.sr.read().strt().bit_is_set());
    }

    // rc_w0 flags: a zero clears, a one leaves the flag as the hardware set it
    #[test]
    fn acknowledge_writes_ones_outside_mask() {
        let mut adc = fake();

        adc.acknowledge_interrupt_flags(
            InterruptFlag::END_OF_REGULAR_CONVERSION | InterruptFlag::OVERRUN,
        );
        // AWD, JEOC, JSTRT and STRT written as one
        assert_eq!(adc.adc.sr.read().bits(), 0b01_1101);

        adc.adc.sr.reset();
        adc.acknowledge_interrupt_flags(InterruptFlag::ANALOG_WATCHDOG);
        assert_eq!(adc.adc.sr.read().bits(), 0b11_1110);

        adc.acknowledge_interrupt_flags(InterruptFlag::ALL);
        assert_eq!(adc.adc.sr.read().bits(), 0b01_1000);
    }

    #[test]
    fn conversion_result_is_12_bits() {
        let mut adc = fake();
        set_data(&adc, 0xFFFF);

        assert_eq!(adc.alignment(), Align::Right);
        assert_eq!(adc.conversion_result(), MAX_SAMPLE);

        adc.set_left_adjust_result();
        assert_eq!(adc.alignment(), Align::Left);
        assert_eq!(adc.conversion_result(), MAX_SAMPLE);
        assert_eq!(adc.data(), 0xFFFF);
    }

    #[test]
    fn conversion_result_alignment() {
        let mut adc = fake();
        set_data(&adc, 0x0ABC);
        assert_eq!(adc.conversion_result(), 0xABC);

        adc.set_left_adjust_result();
        set_data(&adc, 0xABC0);
        assert_eq!(adc.conversion_result(), 0xABC);

        adc.set_right_adjust_result();
        assert_eq!(adc.alignment(), Align::Right);
    }

    #[test]
    fn start_conversion_acknowledges_stale_flags() {
        let mut adc = fake();
        adc.enable();
        adc.adc
            .sr
            .write(|w| unsafe { w.bits(InterruptFlag::ALL.bits()) });
        adc.start_conversion();

        assert!(!adc.is_conversion_finished());
        assert_eq!(
            adc.interrupt_flags(),
            InterruptFlag::ANALOG_WATCHDOG | InterruptFlag::END_OF_INJECTED_CONVERSION
        );
        let cr2 = adc.adc.cr2.read();
        assert!(cr2.adon().bit_is_set());
        assert!(cr2.swstart().bit_is_set());
    }

    #[test]
    fn read_channel_timeout() {
        let mut adc = fake();
        adc.enable();
        adc.set_sample_time(Ch::In7, Ts::Cyc112).unwrap();
        adc.adc.sr.write(|w| unsafe {
            w.bits((InterruptFlag::END_OF_REGULAR_CONVERSION | InterruptFlag::OVERRUN).bits())
        });

        // nothing converts on the fake, the flag acknowledged at start stays clear
        assert_eq!(adc.read_channel_timeout(Ch::In7, 100), Err(Error::Timeout));
        assert_eq!(adc.channel(), Ok(Ch::In7));
        assert_eq!(adc.sample_time(Ch::In7), Ts::Cyc112);
        assert!(adc.adc.cr2.read().swstart().bit_is_set());
        let sr = adc.adc.sr.read();
        assert!(sr.eoc().bit_is_clear());
        assert!(sr.ovr().bit_is_clear());
    }

    #[test]
    fn sample_time_kept_across_reads() {
        let mut adc = fake();
        adc.enable();
        adc.set_sample_time(Ch::In1, Ts::Cyc84).unwrap();
        adc.set_sample_time(Ch::In15, Ts::Cyc84).unwrap();

        assert_eq!(adc.read_channel_timeout(Ch::In1, 1), Err(Error::Timeout));
        assert_eq!(adc.read_channel_timeout(Ch::In15, 1), Err(Error::Timeout));
        assert_eq!(adc.channel(), Ok(Ch::In15));
        assert_eq!(adc.sample_time(Ch::In1), Ts::Cyc84);
        assert_eq!(adc.sample_time(Ch::In15), Ts::Cyc84);
    }

    #[test]
    fn read_invalid_channel_does_not_start() {
        let mut adc = fake();
        adc.enable();
        assert_eq!(adc.read_channel(19), Err(Error::InvalidChannel(19)));
        assert_eq!(adc.read_channel_timeout(200, 1), Err(Error::InvalidChannel(200)));
        assert!(adc.adc.cr2.read().swstart().bit_is_clear());
        assert!(adc.adc.sr.read().eoc().bit_is_clear());
    }

    #[test]
    fn one_shot_invalid_channel() {
        use embedded_hal::adc::{Channel, OneShot};

        struct Bogus;

        impl Channel<FakeAdc> for Bogus {
            type ID = u8;

            fn channel() -> u8 {
                42
            }
        }

        let mut adc = fake();
        let result: nb::Result<u16, Error> = adc.read(&mut Bogus);
        assert_eq!(result, Err(nb::Error::Other(Error::InvalidChannel(42))));
    }

    #[test]
    fn external_trigger() {
        let mut adc = fake();
        adc.enable();
        assert_eq!(
            adc.regular_conversion_external_trigger(),
            (TriggerPolarity::NoTriggerDetection, TriggerEvent::Event0)
        );

        adc.enable_regular_conversion_external_trigger(
            TriggerPolarity::RisingAndFallingEdge,
            TriggerEvent::Event15,
        );
        // ADON bit 0, EXTEN bits 29:28, EXTSEL bits 27:24
        assert_eq!(adc.adc.cr2.read().bits(), 1 | (0b11 << 28) | (0xF << 24));

        adc.enable_regular_conversion_external_trigger(
            TriggerPolarity::RisingEdge,
            TriggerEvent::Event8,
        );
        assert_eq!(
            adc.regular_conversion_external_trigger(),
            (TriggerPolarity::RisingEdge, TriggerEvent::Event8)
        );
        assert_eq!(adc.adc.cr2.read().bits(), 1 | (0b01 << 28) | (0x8 << 24));

        adc.enable_regular_conversion_external_trigger(
            TriggerPolarity::NoTriggerDetection,
            TriggerEvent::Event3,
        );
        assert_eq!(adc.adc.cr2.read().exten().bits(), 0);
    }

    #[test]
    fn dma_bits_are_independent() {
        let mut adc = fake();
        adc.enable_dma_mode();
        assert!(adc.is_dma_mode_enabled());
        assert!(!adc.is_dma_requests_enabled());

        adc.enable_dma_requests();
        adc.disable_dma_mode();
        assert!(!adc.is_dma_mode_enabled());
        assert!(adc.is_dma_requests_enabled());
        // DDS bit 9
        assert_eq!(adc.adc.cr2.read().bits(), 1 << 9);

        adc.disable_dma_requests();
        assert_eq!(adc.adc.cr2.read().bits(), 0);
    }

    #[test]
    fn conversion_modes() {
        let mut adc = fake();
        adc.enable_scan_mode();
        adc.enable_free_running_mode();
        assert!(adc.is_scan_mode_enabled());
        assert!(adc.is_free_running());
        assert_eq!(adc.adc.cr1.read().bits(), 1 << 8);
        assert_eq!(adc.adc.cr2.read().bits(), 1 << 1);

        adc.disable_scan_mode();
        adc.disable_free_running_mode();
        assert!(!adc.is_scan_mode_enabled());
        assert!(!adc.is_free_running());
    }

    #[test]
    fn internal_channel_switches() {
        let mut adc = fake();
        adc.enable_vbat();
        adc.enable_tsvref();
        // VBATE bit 22, TSVREFE bit 23
        assert_eq!(adc.adc.common().ccr.read().bits(), (1 << 22) | (1 << 23));
        adc.disable_vbat();
        assert!(!adc.is_vbat_enabled());
        assert!(adc.is_tsvref_enabled());
        adc.disable_tsvref();
        assert_eq!(adc.adc.common().ccr.read().bits(), 0);
    }

    #[test]
    #[should_panic]
    fn sample_duration_zero_clock() {
        let hz: u32 = core::hint::black_box(0);
        let _ = Ts::Cyc3.as_duration(hz);
    }

    #[test]
    fn data_register_address() {
        let adc = fake();
        assert_eq!(
            adc.data_register_address(),
            &adc.adc.dr as *const _ as usize as u32
        );

        let dr: usize =
            pac::ADC1::ptr() as usize + core::mem::offset_of!(pac::adc1::RegisterBlock, dr);
        assert_eq!(dr, 0x4001_204C);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            Error::InvalidChannel(19).to_string(),
            "ADC channel 19 does not exist"
        );
        assert_eq!(Error::SequenceFull.to_string(), "ADC regular sequence is full");
        assert_eq!(Error::Timeout.to_string(), "ADC conversion timed out");
    }

    #[test]
    fn temperature_channel() {
        #[cfg(any(feature = "stm32f405", feature = "stm32f407"))]
        assert_eq!(Ch::TEMPERATURE, Ch::Vts);
        #[cfg(not(any(feature = "stm32f405", feature = "stm32f407")))]
        assert_eq!(Ch::TEMPERATURE, Ch::Vbat);
        assert!(Ch::TEMPERATURE.is_internal());
    }
}
