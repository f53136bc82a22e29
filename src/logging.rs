//! Logging abstraction
//!
//! Internal macros that route diagnostics to whichever backend the crate was
//! built with:
//! - `defmt` feature: embedded targets, via `defmt`
//! - `log` feature: hosted targets, via the `log` facade
//! - neither: compiled out
//!
//! Only rejected inputs and lifecycle events are logged. The update path of an
//! accepted sample never logs.

/// Log warning message
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($($arg)*);
    }};
}

/// Log debug message
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($($arg)*);
    }};
}

pub(crate) use log_debug;
pub(crate) use log_warn;
