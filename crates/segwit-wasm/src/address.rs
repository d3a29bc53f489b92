//! JavaScript wrapper around [`Bech32Address`].

use segwit_core::Bech32Address;
use wasm_bindgen::prelude::*;

use crate::state::AddressReport;

/// A candidate segwit address, validated lazily.
#[wasm_bindgen]
pub struct SegwitAddress {
    inner: Bech32Address,
}

#[wasm_bindgen]
impl SegwitAddress {
    /// Wrap an address string. Never throws; check `is_valid`.
    #[wasm_bindgen(constructor)]
    pub fn new(address: &str) -> SegwitAddress {
        SegwitAddress {
            inner: Bech32Address::new(address),
        }
    }

    /// Whether the address passes format, checksum and program checks.
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// The scriptPubKey as hex.
    ///
    /// Throws for invalid addresses and for valid ones that are not
    /// P2WPKH, P2WSH or P2TR.
    pub fn script_hex(&self) -> Result<String, JsValue> {
        self.inner
            .script_hex()
            .map_err(|e| js_sys::Error::new(&format!("Cannot derive script: {}", e)).into())
    }

    /// Full validation report as a plain JS object.
    pub fn describe(&self) -> Result<JsValue, JsValue> {
        let report = AddressReport::new(&self.inner);
        if let Some(error) = &report.error {
            console_log(&format!("{}: {}", self.inner, error));
        }
        report.to_js()
    }

    /// Get the script template name ("P2WPKH", "P2WSH", "P2TR"), if any.
    #[wasm_bindgen(getter)]
    pub fn address_type(&self) -> Option<String> {
        self.inner.address_type().map(|t| t.name().to_string())
    }

    /// Get the address as entered.
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> String {
        self.inner.as_str().to_string()
    }
}

/// Validate a segwit address without keeping a handle to it.
#[wasm_bindgen]
pub fn is_valid_address(address: &str) -> bool {
    Bech32Address::new(address).is_valid()
}

/// Log to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
