//! Convenience macros for the firmware project.
#![macro_use]

/// Define and export a specific port module (transparently pulls
/// its namespace to the current one).
///
/// Used mostly to conveniently fit the module declaration and reexport
/// under a single configuration flag.
///
/// # Example
/// ```ignore
/// #[cfg(feature = "pico")]
/// port!(pico: [firmware, pin_configuration,]);
/// // Expands into:
/// pub mod pico {
///     pub mod firmware;
///     pub mod pin_configuration;
/// }
/// pub use self::pico::firmware;
/// pub use self::pico::pin_configuration;
/// ```
#[macro_export]
macro_rules! port {
    ($outer:ident: [$($inner:ident,)+]) => {
        pub mod $outer {
        $(
            pub mod $inner;
        )+
        }
        $(
            pub use self::$outer::$inner;
        )+
    };
}

/// Info-level logging, emitted through `defmt` on the embedded target.
/// Host builds (unit tests, doubles) have no `defmt` global logger
/// linked in, so the call compiles away entirely there.
#[cfg(target_arch = "arm")]
#[macro_export]
macro_rules! fw_info {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}

#[cfg(not(target_arch = "arm"))]
#[macro_export]
macro_rules! fw_info {
    ($($arg:tt)*) => {{}};
}

/// Warn-level counterpart of [`fw_info`].
#[cfg(target_arch = "arm")]
#[macro_export]
macro_rules! fw_warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

#[cfg(not(target_arch = "arm"))]
#[macro_export]
macro_rules! fw_warn {
    ($($arg:tt)*) => {{}};
}
