/// The version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client marker submitted to providers that accept an SDK identifier.
pub(crate) const SDK_IDENTIFIER: &str = concat!("faultline/", env!("CARGO_PKG_VERSION"));
