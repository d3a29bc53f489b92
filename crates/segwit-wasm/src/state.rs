//! Serializable views of address validation results.

use segwit_core::{AddressType, Bech32Address};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Everything a caller may want to show about an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressReport {
    /// The address as entered.
    pub address: String,
    /// Whether the address passed validation.
    pub valid: bool,
    /// Witness version (valid addresses only).
    pub witness_version: Option<u8>,
    /// "bech32" or "bech32m" (valid addresses only).
    pub encoding: Option<String>,
    /// Script template, if supported.
    pub address_type: Option<AddressType>,
    /// scriptPubKey as hex, if a template applies.
    pub script_hex: Option<String>,
    /// Why validation or script derivation failed.
    pub error: Option<String>,
}

impl AddressReport {
    /// Build a report for an address.
    pub fn new(address: &Bech32Address) -> Self {
        match address.validate() {
            Ok(validated) => {
                let (script_hex, error) = match address.script_hex() {
                    Ok(hex) => (Some(hex), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                AddressReport {
                    address: validated.display,
                    valid: true,
                    witness_version: Some(validated.witness_version),
                    encoding: Some(validated.variant.name().to_string()),
                    address_type: validated.address_type,
                    script_hex,
                    error,
                }
            }
            Err(e) => AddressReport {
                address: address.as_str().to_string(),
                valid: false,
                witness_version: None,
                encoding: None,
                address_type: None,
                script_hex: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Convert to JSON.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Serialization error: {}", e))
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}
