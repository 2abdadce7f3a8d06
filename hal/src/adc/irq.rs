//! Interrupt enable masks and status flags
//!
//! Used with [`Adc::enable_interrupt`], [`Adc::disable_interrupt`],
//! [`Adc::interrupt_flags`] and [`Adc::acknowledge_interrupt_flags`].
//!
//! # Example
//!
//! ```
//! use stm32f4_adc_hal::adc::irq::Interrupt;
//!
//! let mask = Interrupt::END_OF_REGULAR_CONVERSION | Interrupt::OVERRUN;
//! assert!(mask.contains(Interrupt::OVERRUN));
//! assert!(!mask.contains(Interrupt::ANALOG_WATCHDOG));
//! assert_eq!(mask & !Interrupt::OVERRUN, Interrupt::END_OF_REGULAR_CONVERSION);
//! ```
//!
//! [`Adc::enable_interrupt`]: super::Adc::enable_interrupt
//! [`Adc::disable_interrupt`]: super::Adc::disable_interrupt
//! [`Adc::interrupt_flags`]: super::Adc::interrupt_flags
//! [`Adc::acknowledge_interrupt_flags`]: super::Adc::acknowledge_interrupt_flags

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

macro_rules! bitset {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $flag:ident = $bit:expr,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name(u32);

        impl $name {
            $(
                $(#[$fmeta])*
                pub const $flag: Self = Self(1 << $bit);
            )+

            const MASK: u32 = $((1 << $bit))|+;

            /// No bits set.
            #[inline]
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Every valid bit set.
            #[inline]
            pub const fn all() -> Self {
                Self(Self::MASK)
            }

            /// Register bits.
            #[inline]
            pub const fn bits(&self) -> u32 {
                self.0
            }

            /// Create from register bits, dropping bits that do not
            /// correspond to a flag.
            #[inline]
            pub const fn from_bits_truncate(bits: u32) -> Self {
                Self(bits & Self::MASK)
            }

            /// Returns `true` if no bits are set.
            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.0 == 0
            }

            /// Returns `true` if every bit of `other` is set in `self`.
            #[inline]
            pub const fn contains(&self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Returns `true` if any bit of `other` is set in `self`.
            #[inline]
            pub const fn intersects(&self, other: Self) -> bool {
                self.0 & other.0 != 0
            }
        }

        impl BitOr for $name {
            type Output = Self;

            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            #[inline]
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl BitAndAssign for $name {
            #[inline]
            fn bitand_assign(&mut self, rhs: Self) {
                self.0 &= rhs.0
            }
        }

        impl Not for $name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self {
                Self(!self.0 & Self::MASK)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(set: $name) -> u32 {
                set.0
            }
        }
    };
}

bitset! {
    /// Interrupt enable bits in `ADC_CR1`.
    Interrupt {
        /// End of regular conversion, `EOCIE`
        END_OF_REGULAR_CONVERSION = 5,
        /// Analog watchdog, `AWDIE`
        ANALOG_WATCHDOG = 6,
        /// End of injected conversion, `JEOCIE`
        END_OF_INJECTED_CONVERSION = 7,
        /// Overrun, `OVRIE`
        OVERRUN = 26,
    }
}

bitset! {
    /// Status flags in `ADC_SR`.
    ///
    /// The flags are set by hardware and cleared by software.
    InterruptFlag {
        /// Analog watchdog event, `AWD`
        ANALOG_WATCHDOG = 0,
        /// End of regular conversion, `EOC`
        END_OF_REGULAR_CONVERSION = 1,
        /// End of injected conversion, `JEOC`
        END_OF_INJECTED_CONVERSION = 2,
        /// Overrun, `OVR`
        OVERRUN = 5,
    }
}

impl InterruptFlag {
    /// All status flags.
    pub const ALL: Self = Self::all();
}

impl From<Interrupt> for InterruptFlag {
    /// Status flag raised by the event an interrupt is enabled for.
    fn from(irq: Interrupt) -> Self {
        let mut flags: InterruptFlag = InterruptFlag::empty();
        if irq.contains(Interrupt::ANALOG_WATCHDOG) {
            flags |= InterruptFlag::ANALOG_WATCHDOG;
        }
        if irq.contains(Interrupt::END_OF_REGULAR_CONVERSION) {
            flags |= InterruptFlag::END_OF_REGULAR_CONVERSION;
        }
        if irq.contains(Interrupt::END_OF_INJECTED_CONVERSION) {
            flags |= InterruptFlag::END_OF_INJECTED_CONVERSION;
        }
        if irq.contains(Interrupt::OVERRUN) {
            flags |= InterruptFlag::OVERRUN;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_bits() {
        assert_eq!(Interrupt::all().bits(), (1 << 5) | (1 << 6) | (1 << 7) | (1 << 26));
        assert_eq!(InterruptFlag::ALL.bits(), 0b10_0111);
    }

    #[test]
    fn not_stays_in_mask() {
        assert_eq!(!Interrupt::empty(), Interrupt::all());
        assert_eq!(
            !InterruptFlag::OVERRUN,
            InterruptFlag::ANALOG_WATCHDOG
                | InterruptFlag::END_OF_REGULAR_CONVERSION
                | InterruptFlag::END_OF_INJECTED_CONVERSION
        );
    }

    #[test]
    fn truncate() {
        // JSTRT and STRT are status bits but not interrupt sources
        assert_eq!(
            InterruptFlag::from_bits_truncate(0b01_1010),
            InterruptFlag::END_OF_REGULAR_CONVERSION
        );
        assert!(Interrupt::from_bits_truncate(1 << 8).is_empty());
    }

    #[test]
    fn contains_intersects() {
        let set = Interrupt::ANALOG_WATCHDOG | Interrupt::OVERRUN;
        assert!(set.contains(Interrupt::OVERRUN));
        assert!(!set.contains(Interrupt::OVERRUN | Interrupt::END_OF_INJECTED_CONVERSION));
        assert!(set.intersects(Interrupt::OVERRUN | Interrupt::END_OF_INJECTED_CONVERSION));
        assert!(!set.intersects(Interrupt::END_OF_REGULAR_CONVERSION));
    }

    #[test]
    fn interrupt_to_flag() {
        assert_eq!(InterruptFlag::from(Interrupt::all()), InterruptFlag::ALL);
        assert_eq!(
            InterruptFlag::from(Interrupt::OVERRUN),
            InterruptFlag::OVERRUN
        );
    }
}
