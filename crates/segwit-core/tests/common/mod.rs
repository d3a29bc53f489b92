//! Fixture builder: assembles `bc1...` strings from a witness version and
//! program so tests are not limited to published vectors.

use segwit_core::charset::encode_symbol;
use segwit_core::checksum::create_checksum;
use segwit_core::{convert_bits, Variant, MAINNET_HRP};

#[allow(dead_code)]
pub fn fixture_address(witness_version: u8, program: &[u8], variant: Variant) -> String {
    let mut data = vec![witness_version];
    data.extend(convert_bits(program, 8, 5, true).unwrap());
    let checksum = create_checksum(MAINNET_HRP, &data, variant);
    data.extend_from_slice(&checksum);

    let mut address = String::from("bc1");
    address.extend(data.iter().map(|&d| encode_symbol(d).unwrap()));
    address
}

/// Fixture with the checksum variant the witness version calls for.
#[allow(dead_code)]
pub fn segwit_address(witness_version: u8, program: &[u8]) -> String {
    fixture_address(witness_version, program, Variant::for_witness_version(witness_version))
}
