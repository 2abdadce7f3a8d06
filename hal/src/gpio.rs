//! General purpose input-output pins
//!
//! Only the analog function of the pins is modelled. Each pin is a zero-sized
//! type; the ADC channel a pin is wired to is part of the type system through
//! the sealed `AdcCh` trait, so sampling a pin that is not connected to a
//! converter does not compile.
//!
//! ```compile_fail
//! use stm32f4_adc_hal::{adc::Adc, gpio::pins, pac};
//!
//! // PA8 is not an analog input
//! let ch = Adc::<pac::ADC1>::pin_channel::<pins::A8>();
//! ```

use crate::{adc, pac};
use core::ptr::{read_volatile, write_volatile};
use cortex_m::interrupt::CriticalSection;

// RM0090 rev 19 section 8.4.1 GPIOx_MODER
const MODE_ANALOG: u32 = 0b11;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Pin<const BASE: usize, const N: u8> {}

impl<const BASE: usize, const N: u8> Pin<BASE, N> {
    const MODER_R: *const u32 = BASE as *const u32;
    const MODER_W: *mut u32 = BASE as *mut u32;
    const MODER_SHIFT: u32 = (N as u32) * 2;

    pub(crate) const fn new() -> Pin<BASE, N> {
        Pin {}
    }

    #[inline(always)]
    pub(crate) unsafe fn set_analog(&mut self, _cs: &CriticalSection) {
        let mut val: u32 = unsafe { read_volatile(Self::MODER_R) };
        val &= !(0b11 << Self::MODER_SHIFT);
        val |= MODE_ANALOG << Self::MODER_SHIFT;
        unsafe { write_volatile(Self::MODER_W, val) };
    }
}

pub(crate) mod sealed {
    use super::{adc, CriticalSection};

    pub trait PinOps {
        unsafe fn steal() -> Self;
        unsafe fn set_analog(&mut self, cs: &CriticalSection);
    }

    /// Indicate a GPIO pin is wired to an input of the `ADC` converter.
    pub trait AdcCh<ADC> {
        const ADC_CH: adc::Ch;
    }
}

/// GPIO pins
pub mod pins {
    const GPIOA_BASE: usize = 0x4002_0000;
    const GPIOB_BASE: usize = 0x4002_0400;
    const GPIOC_BASE: usize = 0x4002_0800;
    #[cfg(feature = "gpiof")]
    const GPIOF_BASE: usize = 0x4002_1400;

    use super::{CriticalSection, Pin};

    macro_rules! gpio_struct {
        ($name:ident, $base:expr, $n:expr, $doc:expr) => {
            #[doc=$doc]
            #[derive(Debug)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub struct $name {
                pin: Pin<$base, $n>,
            }

            impl $name {
                pub(crate) const fn new() -> Self {
                    $name { pin: Pin::new() }
                }
            }

            impl super::sealed::PinOps for $name {
                #[inline(always)]
                unsafe fn steal() -> Self {
                    Self::new()
                }

                #[inline(always)]
                unsafe fn set_analog(&mut self, cs: &CriticalSection) {
                    unsafe { self.pin.set_analog(cs) }
                }
            }
        };
    }

    macro_rules! gpio_port_pins {
        ($port:ident, $base:expr, $doc:literal) => {
            paste::paste! {
                gpio_struct!([<$port 0>], $base, 0, concat!($doc, " pin 0"));
                gpio_struct!([<$port 1>], $base, 1, concat!($doc, " pin 1"));
                gpio_struct!([<$port 2>], $base, 2, concat!($doc, " pin 2"));
                gpio_struct!([<$port 3>], $base, 3, concat!($doc, " pin 3"));
                gpio_struct!([<$port 4>], $base, 4, concat!($doc, " pin 4"));
                gpio_struct!([<$port 5>], $base, 5, concat!($doc, " pin 5"));
                gpio_struct!([<$port 6>], $base, 6, concat!($doc, " pin 6"));
                gpio_struct!([<$port 7>], $base, 7, concat!($doc, " pin 7"));
                gpio_struct!([<$port 8>], $base, 8, concat!($doc, " pin 8"));
                gpio_struct!([<$port 9>], $base, 9, concat!($doc, " pin 9"));
                gpio_struct!([<$port 10>], $base, 10, concat!($doc, " pin 10"));
                gpio_struct!([<$port 11>], $base, 11, concat!($doc, " pin 11"));
                gpio_struct!([<$port 12>], $base, 12, concat!($doc, " pin 12"));
                gpio_struct!([<$port 13>], $base, 13, concat!($doc, " pin 13"));
                gpio_struct!([<$port 14>], $base, 14, concat!($doc, " pin 14"));
                gpio_struct!([<$port 15>], $base, 15, concat!($doc, " pin 15"));
            }
        };
    }

    gpio_port_pins!(A, GPIOA_BASE, "Port A");
    gpio_port_pins!(B, GPIOB_BASE, "Port B");
    gpio_port_pins!(C, GPIOC_BASE, "Port C");
    #[cfg(feature = "gpiof")]
    gpio_port_pins!(F, GPIOF_BASE, "Port F");

    // keep the trait separate from the pin so that users can read ADC_CH
    // but are unable to implement the sealed trait themselves
    macro_rules! impl_adc_ch {
        ($adc:ident, $pin:ident, $ch:ident) => {
            paste::paste! {
                impl $pin {
                    #[doc = concat!(
                        "Channel of [`", stringify!($adc), "`](crate::pac::", stringify!($adc),
                        ") when this pin is configured as [`Analog`](crate::gpio::Analog)."
                    )]
                    pub const [<$adc _CH>]: $crate::adc::Ch = $crate::adc::Ch::$ch;
                }

                impl $crate::gpio::sealed::AdcCh<$crate::pac::$adc> for $pin {
                    const ADC_CH: $crate::adc::Ch = Self::[<$adc _CH>];
                }
            }
        };
    }

    // ADC1 and ADC2 share the same pins, ADC123_INx and ADC12_INx in the
    // datasheet pinout table
    macro_rules! impl_adc12_ch {
        ($pin:ident, $ch:ident) => {
            impl_adc_ch!(ADC1, $pin, $ch);
            #[cfg(feature = "adc2")]
            impl_adc_ch!(ADC2, $pin, $ch);
        };
    }

    impl_adc12_ch!(A0, In0);
    impl_adc12_ch!(A1, In1);
    impl_adc12_ch!(A2, In2);
    impl_adc12_ch!(A3, In3);
    impl_adc12_ch!(A4, In4);
    impl_adc12_ch!(A5, In5);
    impl_adc12_ch!(A6, In6);
    impl_adc12_ch!(A7, In7);
    impl_adc12_ch!(B0, In8);
    impl_adc12_ch!(B1, In9);
    impl_adc12_ch!(C0, In10);
    impl_adc12_ch!(C1, In11);
    impl_adc12_ch!(C2, In12);
    impl_adc12_ch!(C3, In13);
    impl_adc12_ch!(C4, In14);
    impl_adc12_ch!(C5, In15);

    // ADC3_INx, port F only on the larger packages
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, A0, In0);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, A1, In1);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, A2, In2);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, A3, In3);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F6, In4);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F7, In5);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F8, In6);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F9, In7);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F10, In8);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F3, In9);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, C0, In10);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, C1, In11);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, C2, In12);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, C3, In13);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F4, In14);
    #[cfg(feature = "adc3")]
    impl_adc_ch!(ADC3, F5, In15);
}

macro_rules! gpio_port {
    ($port:ident, $pac:ident, $upper:ident, $lower:ident, $letter:literal) => {
        paste::paste! {
            #[doc = concat!("Port ", $letter, " GPIOs")]
            #[derive(Debug)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            #[allow(missing_docs)]
            pub struct $port {
                pub [<$lower 0>]: pins::[<$upper 0>],
                pub [<$lower 1>]: pins::[<$upper 1>],
                pub [<$lower 2>]: pins::[<$upper 2>],
                pub [<$lower 3>]: pins::[<$upper 3>],
                pub [<$lower 4>]: pins::[<$upper 4>],
                pub [<$lower 5>]: pins::[<$upper 5>],
                pub [<$lower 6>]: pins::[<$upper 6>],
                pub [<$lower 7>]: pins::[<$upper 7>],
                pub [<$lower 8>]: pins::[<$upper 8>],
                pub [<$lower 9>]: pins::[<$upper 9>],
                pub [<$lower 10>]: pins::[<$upper 10>],
                pub [<$lower 11>]: pins::[<$upper 11>],
                pub [<$lower 12>]: pins::[<$upper 12>],
                pub [<$lower 13>]: pins::[<$upper 13>],
                pub [<$lower 14>]: pins::[<$upper 14>],
                pub [<$lower 15>]: pins::[<$upper 15>],
            }

            impl $port {
                const GPIOS: $port = $port {
                    [<$lower 0>]: pins::[<$upper 0>]::new(),
                    [<$lower 1>]: pins::[<$upper 1>]::new(),
                    [<$lower 2>]: pins::[<$upper 2>]::new(),
                    [<$lower 3>]: pins::[<$upper 3>]::new(),
                    [<$lower 4>]: pins::[<$upper 4>]::new(),
                    [<$lower 5>]: pins::[<$upper 5>]::new(),
                    [<$lower 6>]: pins::[<$upper 6>]::new(),
                    [<$lower 7>]: pins::[<$upper 7>]::new(),
                    [<$lower 8>]: pins::[<$upper 8>]::new(),
                    [<$lower 9>]: pins::[<$upper 9>]::new(),
                    [<$lower 10>]: pins::[<$upper 10>]::new(),
                    [<$lower 11>]: pins::[<$upper 11>]::new(),
                    [<$lower 12>]: pins::[<$upper 12>]::new(),
                    [<$lower 13>]: pins::[<$upper 13>]::new(),
                    [<$lower 14>]: pins::[<$upper 14>]::new(),
                    [<$lower 15>]: pins::[<$upper 15>]::new(),
                };

                #[doc = concat!("Reset GPIO port ", $letter, " and split the port into individual pins.")]
                ///
                /// This will enable clocks and reset the GPIO port.
                ///
                /// # Example
                ///
                /// ```no_run
                /// use stm32f4_adc_hal::{
                ///     gpio::{pins, PortA},
                ///     pac,
                /// };
                ///
                /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
                ///
                /// let gpioa: PortA = PortA::split(dp.GPIOA, &dp.RCC);
                /// let a0: pins::A0 = gpioa.a0;
                /// ```
                #[allow(unused_variables)]
                pub fn split(gpio: pac::$pac, rcc: &pac::rcc::RegisterBlock) -> Self {
                    Self::enable_clock(rcc);
                    rcc.ahb1rstr.modify(|_, w| w.[<gpio $lower rst>]().set_bit());
                    rcc.ahb1rstr.modify(|_, w| w.[<gpio $lower rst>]().clear_bit());
                    Self::GPIOS
                }

                #[doc = concat!("Steal the port ", $letter, " GPIOs from whatever is currently using them.")]
                ///
                /// This will **not** initialize the GPIOs (unlike `split`).
                ///
                /// # Safety
                ///
                /// This will create new GPIOs, bypassing the singleton checks
                /// that normally occur. You are responsible for ensuring that
                /// the driver has exclusive access to the GPIOs, and that the
                /// port clock is enabled.
                pub unsafe fn steal() -> Self {
                    Self::GPIOS
                }

                #[doc = concat!("Enable the GPIO", $letter, " clock.")]
                pub fn enable_clock(rcc: &pac::rcc::RegisterBlock) {
                    rcc.ahb1enr.modify(|_, w| w.[<gpio $lower en>]().set_bit());
                    rcc.ahb1enr.read(); // delay after an RCC peripheral clock enabling
                }
            }
        }
    };
}

gpio_port!(PortA, GPIOA, A, a, "A");
gpio_port!(PortB, GPIOB, B, b, "B");
gpio_port!(PortC, GPIOC, C, c, "C");
#[cfg(feature = "gpiof")]
gpio_port!(PortF, GPIOF, F, f, "F");

/// Analog pin
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Analog<P> {
    pin: P,
}

impl<P> Analog<P>
where
    P: sealed::PinOps,
{
    /// Create a new analog pin from a GPIO.
    ///
    /// The pin mode is changed inside a critical section because the mode
    /// register is shared by every pin of the port.
    ///
    /// # Example
    ///
    /// Configure GPIO A1 as an analog pin (ADC123_IN1).
    ///
    /// ```no_run
    /// use stm32f4_adc_hal::{
    ///     gpio::{pins, Analog, PortA},
    ///     pac,
    /// };
    ///
    /// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &dp.RCC);
    /// let a1: Analog<pins::A1> = Analog::new(gpioa.a1);
    /// ```
    pub fn new(mut pin: P) -> Self {
        cortex_m::interrupt::free(|cs| unsafe {
            pin.set_analog(cs);
        });
        Analog { pin }
    }

    /// Free the GPIO pin.
    ///
    /// The pin is left in analog mode.
    pub fn free(self) -> P {
        self.pin
    }

    /// ADC channel of this pin on the `ADC` converter.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::{adc::Ch, gpio::{pins, Analog}, pac};
    ///
    /// assert_eq!(Analog::<pins::C5>::adc_ch::<pac::ADC1>(), Ch::In15);
    /// ```
    pub const fn adc_ch<ADC>() -> adc::Ch
    where
        P: sealed::AdcCh<ADC>,
    {
        <P as sealed::AdcCh<ADC>>::ADC_CH
    }
}

impl<P> From<P> for Analog<P>
where
    P: sealed::PinOps,
{
    fn from(p: P) -> Self {
        Analog::new(p)
    }
}

impl<P, ADC> embedded_hal::adc::Channel<ADC> for Analog<P>
where
    P: sealed::AdcCh<ADC>,
{
    type ID = u8;

    fn channel() -> u8 {
        P::ADC_CH.into()
    }
}

#[cfg(test)]
mod tests {
    use super::{pins, sealed::AdcCh};
    use crate::{adc::Ch, pac};
    use static_assertions::{assert_impl_all, assert_not_impl_any, const_assert_eq};

    assert_impl_all!(pins::A0: AdcCh<pac::ADC1>);
    assert_impl_all!(pins::C5: AdcCh<pac::ADC1>);
    assert_not_impl_any!(pins::A8: AdcCh<pac::ADC1>);
    assert_not_impl_any!(pins::B2: AdcCh<pac::ADC1>);
    assert_not_impl_any!(pins::C6: AdcCh<pac::ADC1>);

    #[cfg(feature = "adc3")]
    assert_not_impl_any!(pins::A4: AdcCh<pac::ADC3>);
    #[cfg(feature = "adc3")]
    assert_not_impl_any!(pins::B0: AdcCh<pac::ADC3>);

    const_assert_eq!(core::mem::size_of::<pins::A0>(), 0);
    const_assert_eq!(core::mem::size_of::<super::PortC>(), 0);

    #[test]
    fn adc12_pinout() {
        assert_eq!(pins::A0::ADC1_CH, Ch::In0);
        assert_eq!(pins::A7::ADC1_CH, Ch::In7);
        assert_eq!(pins::B0::ADC1_CH, Ch::In8);
        assert_eq!(pins::B1::ADC1_CH, Ch::In9);
        assert_eq!(pins::C0::ADC1_CH, Ch::In10);
        assert_eq!(pins::C5::ADC1_CH, Ch::In15);
    }

    #[test]
    #[cfg(feature = "adc2")]
    fn adc2_matches_adc1() {
        assert_eq!(pins::A3::ADC2_CH, pins::A3::ADC1_CH);
        assert_eq!(pins::C4::ADC2_CH, pins::C4::ADC1_CH);
    }

    #[test]
    #[cfg(feature = "adc3")]
    fn adc3_pinout() {
        assert_eq!(pins::A3::ADC3_CH, Ch::In3);
        assert_eq!(pins::F6::ADC3_CH, Ch::In4);
        assert_eq!(pins::F10::ADC3_CH, Ch::In8);
        assert_eq!(pins::F3::ADC3_CH, Ch::In9);
        assert_eq!(pins::C3::ADC3_CH, Ch::In13);
        assert_eq!(pins::F4::ADC3_CH, Ch::In14);
        assert_eq!(pins::F5::ADC3_CH, Ch::In15);
    }

    #[test]
    fn split_enables_port_clock() {
        let rcc: Box<pac::rcc::RegisterBlock> = Box::new(unsafe { core::mem::zeroed() });
        rcc.ahb1enr.write(|w| w.gpioaen().set_bit());

        let dp: pac::Peripherals = unsafe { pac::Peripherals::steal() };
        let _gpioc: super::PortC = super::PortC::split(dp.GPIOC, &rcc);

        let ahb1enr = rcc.ahb1enr.read();
        assert!(ahb1enr.gpiocen().bit_is_set());
        assert!(ahb1enr.gpioaen().bit_is_set());
        assert!(ahb1enr.gpioben().bit_is_clear());
        assert!(rcc.ahb1rstr.read().gpiocrst().bit_is_clear());
    }

    #[test]
    fn embedded_hal_channel_id() {
        use embedded_hal::adc::Channel;
        assert_eq!(
            <super::Analog<pins::B1> as Channel<pac::ADC1>>::channel(),
            9
        );
    }
}
