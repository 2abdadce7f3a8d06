//! Reset and clocking control
//!
//! The clock tree is configured outside of this crate, before the ADC is
//! initialized. The frequencies it produces are described to the HAL at build
//! time with a [`SystemClock`] implementation, which lets the ADC prescaler be
//! selected and checked by the compiler.

use crate::adc::Supply;

/// Clock tree frequencies, fixed at build time.
///
/// # Example
///
/// A 168 MHz STM32F407 with the APB2 bus divided by 2.
///
/// ```
/// use stm32f4_adc_hal::rcc::SystemClock;
///
/// struct Clocks;
///
/// impl SystemClock for Clocks {
///     const SYSCLK: u32 = 168_000_000;
///     const APB2: u32 = 84_000_000;
/// }
///
/// assert_eq!(Clocks::HCLK, 168_000_000);
/// ```
pub trait SystemClock {
    /// System clock frequency in hertz.
    const SYSCLK: u32;
    /// AHB clock frequency in hertz, also the Cortex-M SysTick clock.
    const HCLK: u32 = Self::SYSCLK;
    /// APB2 peripheral clock frequency in hertz.
    ///
    /// This is the input of the ADC prescaler.
    const APB2: u32 = Self::HCLK;
    /// Analog supply range.
    ///
    /// The maximum ADC clock frequency halves when V<sub>DDA</sub> is below
    /// 2.4 V.
    const VDDA: Supply = Supply::Above2V4;
}

/// Clock tree after reset.
///
/// The 16 MHz HSI drives the system clock, all bus prescalers divide by 1.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsi16;

impl SystemClock for Hsi16 {
    const SYSCLK: u32 = 16_000_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clock_tree() {
        assert_eq!(Hsi16::SYSCLK, 16_000_000);
        assert_eq!(Hsi16::HCLK, 16_000_000);
        assert_eq!(Hsi16::APB2, 16_000_000);
        assert_eq!(Hsi16::VDDA, Supply::Above2V4);
    }

    #[test]
    fn bus_clocks_default_to_sysclk() {
        struct Pll;

        impl SystemClock for Pll {
            const SYSCLK: u32 = 168_000_000;
            const APB2: u32 = 84_000_000;
            const VDDA: Supply = Supply::Below2V4;
        }

        assert_eq!(Pll::HCLK, 168_000_000);
        assert_eq!(Pll::APB2, 84_000_000);
        assert_eq!(Pll::VDDA.max_adc_clock_hz(), 18_000_000);
    }
}
