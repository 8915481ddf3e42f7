//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `transitions_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // A tiny probe to validate core crate wiring independently from the
    // app/FFI runtime setup.
    println!("transitions_core ping={}", transitions_core::ping());
    println!("transitions_core version={}", transitions_core::core_version());
}
