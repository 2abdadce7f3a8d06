//! STM32F4 ADC HAL.
//!
//! Exactly one device feature must be enabled. `stm32f407` is enabled by
//! default, use `default-features = false` to select another device.
#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

#[cfg(any(
    all(feature = "stm32f401", feature = "stm32f405"),
    all(feature = "stm32f401", feature = "stm32f407"),
    all(feature = "stm32f401", feature = "stm32f411"),
    all(feature = "stm32f401", feature = "stm32f427"),
    all(feature = "stm32f401", feature = "stm32f429"),
    all(feature = "stm32f401", feature = "stm32f446"),
    all(feature = "stm32f405", feature = "stm32f407"),
    all(feature = "stm32f405", feature = "stm32f411"),
    all(feature = "stm32f405", feature = "stm32f427"),
    all(feature = "stm32f405", feature = "stm32f429"),
    all(feature = "stm32f405", feature = "stm32f446"),
    all(feature = "stm32f407", feature = "stm32f411"),
    all(feature = "stm32f407", feature = "stm32f427"),
    all(feature = "stm32f407", feature = "stm32f429"),
    all(feature = "stm32f407", feature = "stm32f446"),
    all(feature = "stm32f411", feature = "stm32f427"),
    all(feature = "stm32f411", feature = "stm32f429"),
    all(feature = "stm32f411", feature = "stm32f446"),
    all(feature = "stm32f427", feature = "stm32f429"),
    all(feature = "stm32f427", feature = "stm32f446"),
    all(feature = "stm32f429", feature = "stm32f446"),
))]
compile_error!(
    "Multiple devices selected, did you forget `default-features = false`?"
);

cfg_if::cfg_if! {
    if #[cfg(feature = "stm32f401")] {
        /// Peripheral access crate.
        pub use stm32f4::stm32f401 as pac;
    } else if #[cfg(feature = "stm32f405")] {
        /// Peripheral access crate.
        pub use stm32f4::stm32f405 as pac;
    } else if #[cfg(feature = "stm32f407")] {
        /// Peripheral access crate.
        pub use stm32f4::stm32f407 as pac;
    } else if #[cfg(feature = "stm32f411")] {
        /// Peripheral access crate.
        pub use stm32f4::stm32f411 as pac;
    } else if #[cfg(feature = "stm32f427")] {
        /// Peripheral access crate.
        pub use stm32f4::stm32f427 as pac;
    } else if #[cfg(feature = "stm32f429")] {
        /// Peripheral access crate.
        pub use stm32f4::stm32f429 as pac;
    } else if #[cfg(feature = "stm32f446")] {
        /// Peripheral access crate.
        pub use stm32f4::stm32f446 as pac;
    } else {
        compile_error!(
            "This crate requires one of the following device features enabled:
                stm32f401
                stm32f405
                stm32f407
                stm32f411
                stm32f427
                stm32f429
                stm32f446"
        );
    }
}

mod macros;

pub mod adc;
pub mod gpio;
pub mod rcc;
pub mod util;

pub use cortex_m;
#[cfg(feature = "rt")]
#[cfg_attr(docsrs, doc(cfg(feature = "rt")))]
pub use cortex_m_rt;

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;
