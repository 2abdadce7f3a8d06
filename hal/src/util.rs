//! Miscellaneous utilities
use crate::{pac, rcc::SystemClock};
use cortex_m::delay::Delay;

/// Create a new [`cortex_m::delay::Delay`] from the build time core clock
/// frequency.
///
/// # Example
///
/// ```no_run
/// use stm32f4_adc_hal::{pac, rcc::Hsi16, util::new_delay};
///
/// let cp = pac::CorePeripherals::take().unwrap();
/// let delay = new_delay::<Hsi16>(cp.SYST);
/// ```
pub fn new_delay<C: SystemClock>(syst: pac::SYST) -> Delay {
    // Delay constructor will set SystClkSource::Core
    Delay::new(syst, C::HCLK)
}
