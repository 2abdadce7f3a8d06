//! ADC clock prescaler selection

/// ADC clock prescaler.
///
/// The prescaler divides the APB2 clock. It lives in the common control
/// register, one value is shared by all converters on the chip.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Prescaler {
    /// PCLK2 divided by 2
    Div2 = 0b00,
    /// PCLK2 divided by 4
    Div4 = 0b01,
    /// PCLK2 divided by 6
    Div6 = 0b10,
    /// PCLK2 divided by 8
    Div8 = 0b11,
}

impl Prescaler {
    /// All prescalers, smallest divisor first.
    pub const ALL: [Prescaler; 4] = [
        Prescaler::Div2,
        Prescaler::Div4,
        Prescaler::Div6,
        Prescaler::Div8,
    ];

    /// Clock divisor.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Prescaler;
    ///
    /// assert_eq!(Prescaler::Div2.divisor(), 2);
    /// assert_eq!(Prescaler::Div4.divisor(), 4);
    /// assert_eq!(Prescaler::Div6.divisor(), 6);
    /// assert_eq!(Prescaler::Div8.divisor(), 8);
    /// ```
    pub const fn divisor(&self) -> u32 {
        match self {
            Prescaler::Div2 => 2,
            Prescaler::Div4 => 4,
            Prescaler::Div6 => 6,
            Prescaler::Div8 => 8,
        }
    }

    /// Create a prescaler from the 2-bit `ADCPRE` field.
    pub(crate) const fn from_bits(bits: u32) -> Prescaler {
        match bits & 0b11 {
            0b00 => Prescaler::Div2,
            0b01 => Prescaler::Div4,
            0b10 => Prescaler::Div6,
            _ => Prescaler::Div8,
        }
    }

    /// Select the smallest prescaler that brings `pclk2_hz` within
    /// `tolerance_pct` percent of `target_hz` without exceeding `max_hz`.
    ///
    /// Returns `None` if no prescaler satisfies both constraints.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Prescaler;
    ///
    /// // 84 MHz APB2, 21 MHz exactly with /4
    /// assert_eq!(
    ///     Prescaler::select(84_000_000, 21_000_000, 0, 36_000_000),
    ///     Some(Prescaler::Div4)
    /// );
    ///
    /// // /2 gives 42 MHz, which is within 10 % of 40 MHz but too fast
    /// assert_eq!(
    ///     Prescaler::select(84_000_000, 40_000_000, 10, 36_000_000),
    ///     None
    /// );
    ///
    /// // 16 MHz HSI, /2 is the only option close to 10 MHz
    /// assert_eq!(Prescaler::select(16_000_000, 10_000_000, 10, 36_000_000), None);
    /// assert_eq!(
    ///     Prescaler::select(16_000_000, 10_000_000, 20, 36_000_000),
    ///     Some(Prescaler::Div2)
    /// );
    /// ```
    pub const fn select(
        pclk2_hz: u32,
        target_hz: u32,
        tolerance_pct: u8,
        max_hz: u32,
    ) -> Option<Prescaler> {
        let mut idx: usize = 0;
        while idx < Self::ALL.len() {
            let prescaler: Prescaler = Self::ALL[idx];
            let hz: u32 = pclk2_hz / prescaler.divisor();
            if hz <= max_hz && within_tolerance(hz, target_hz, tolerance_pct) {
                return Some(prescaler);
            }
            idx += 1;
        }
        None
    }
}

impl From<Prescaler> for u32 {
    fn from(prescaler: Prescaler) -> Self {
        prescaler as u32
    }
}

const fn within_tolerance(hz: u32, target_hz: u32, tolerance_pct: u8) -> bool {
    let delta: u64 = hz.abs_diff(target_hz) as u64;
    delta * 100 <= (target_hz as u64) * (tolerance_pct as u64)
}

/// Analog supply voltage range.
///
/// Datasheet table "ADC characteristics": f<sub>ADC</sub> is limited to
/// 36 MHz with V<sub>DDA</sub> of 2.4 V or more, and 18 MHz below.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Supply {
    /// 2.4 V ≤ V<sub>DDA</sub> ≤ 3.6 V
    Above2V4,
    /// 1.7 V ≤ V<sub>DDA</sub> < 2.4 V
    Below2V4,
}

impl Supply {
    /// Maximum ADC clock frequency for this supply range in hertz.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32f4_adc_hal::adc::Supply;
    ///
    /// assert_eq!(Supply::Above2V4.max_adc_clock_hz(), 36_000_000);
    /// assert_eq!(Supply::Below2V4.max_adc_clock_hz(), 18_000_000);
    /// ```
    pub const fn max_adc_clock_hz(&self) -> u32 {
        match self {
            Supply::Above2V4 => 36_000_000,
            Supply::Below2V4 => 18_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_divisor_wins() {
        // 36 MHz APB2: /2 = 18 MHz and /4 = 9 MHz are both within 100 %
        assert_eq!(
            Prescaler::select(36_000_000, 12_000_000, 100, 36_000_000),
            Some(Prescaler::Div2)
        );
    }

    #[test]
    fn respects_supply_limit() {
        // 84 MHz APB2: /2 = 42 MHz is over both limits, /4 = 21 MHz only over 18 MHz
        assert_eq!(
            Prescaler::select(84_000_000, 21_000_000, 100, 36_000_000),
            Some(Prescaler::Div4)
        );
        assert_eq!(
            Prescaler::select(84_000_000, 21_000_000, 100, 18_000_000),
            Some(Prescaler::Div6)
        );
    }

    #[test]
    fn unsatisfiable() {
        assert_eq!(
            Prescaler::select(100_000_000, 100_000_000, 1, 36_000_000),
            None
        );
        assert_eq!(Prescaler::select(0, 10_000_000, 10, 36_000_000), None);
    }

    #[test]
    fn tolerance_is_inclusive() {
        assert!(within_tolerance(11_000_000, 10_000_000, 10));
        assert!(within_tolerance(9_000_000, 10_000_000, 10));
        assert!(!within_tolerance(11_000_001, 10_000_000, 10));
        assert!(within_tolerance(10_000_000, 10_000_000, 0));
    }

    #[test]
    fn field_bits() {
        for prescaler in Prescaler::ALL {
            assert_eq!(Prescaler::from_bits(u32::from(prescaler)), prescaler);
        }
    }
}
