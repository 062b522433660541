//! Version information

/// The crate version as baked in at compile time
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
