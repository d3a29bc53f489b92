//! Segwit address validation for the Bitcoin mainnet.
//!
//! This crate provides pure Rust implementations of:
//! - Bech32 (BIP-173) and Bech32m (BIP-350) checksum verification
//! - Strict 5-bit to 8-bit witness program repacking
//! - scriptPubKey derivation for P2WPKH, P2WSH and P2TR outputs
//!
//! Everything here is a pure function of the input string: no I/O, no
//! shared mutable state.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod address;
pub mod charset;
pub mod checksum;
pub mod convert;
pub mod script;

pub use address::{validate_address, AddressError, Bech32Address, ValidatedAddress, MAINNET_HRP};
pub use checksum::Variant;
pub use convert::convert_bits;
pub use script::AddressType;
