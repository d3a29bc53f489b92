//! WebAssembly bindings for segwit address validation.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Checking whether a `bc1...` address is valid
//! - Deriving the scriptPubKey of P2WPKH, P2WSH and P2TR addresses
//! - Reporting why an address was rejected

use wasm_bindgen::prelude::*;

pub mod address;
pub mod state;

// Re-export main types for JS access
pub use address::SegwitAddress;
pub use state::AddressReport;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
