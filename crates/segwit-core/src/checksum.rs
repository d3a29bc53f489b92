//! Bech32/Bech32m checksum verification (BIP-173, BIP-350).
//!
//! The checksum is a BCH code over GF(32). A string is valid when the
//! polymod residue of the expanded human-readable part followed by all data
//! symbols (checksum included) equals the variant constant.

use alloc::vec::Vec;

/// Number of trailing checksum symbols in the data part.
pub const CHECKSUM_LENGTH: usize = 6;

/// Generator coefficients of the BCH code.
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Residue of a valid Bech32 string.
pub const BECH32_CONST: u32 = 1;

/// Residue of a valid Bech32m string.
pub const BECH32M_CONST: u32 = 0x2bc830a3;

/// Checksum flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// BIP-173, used by witness version 0.
    Bech32,
    /// BIP-350, used by witness versions 1 through 16.
    Bech32m,
}

impl Variant {
    /// Target residue for this variant.
    pub const fn constant(self) -> u32 {
        match self {
            Variant::Bech32 => BECH32_CONST,
            Variant::Bech32m => BECH32M_CONST,
        }
    }

    /// The variant a segwit address of the given witness version must use.
    pub const fn for_witness_version(version: u8) -> Self {
        if version == 0 {
            Variant::Bech32
        } else {
            Variant::Bech32m
        }
    }

    /// Get the display name for this variant.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Bech32 => "bech32",
            Variant::Bech32m => "bech32m",
        }
    }
}

/// Expand the human-readable part into checksum input:
/// high bits of each char, a zero separator, then low bits of each char.
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut result = Vec::with_capacity(bytes.len() * 2 + 1);

    for &b in bytes {
        result.push(b >> 5);
    }
    result.push(0);
    for &b in bytes {
        result.push(b & 31);
    }

    result
}

/// Polynomial remainder of `values` under the bech32 generator.
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;

    for &value in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ u32::from(value);
        for (i, &g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }

    chk
}

/// Residue over the expanded `hrp` followed by `data` (checksum included).
pub fn residue(hrp: &str, data: &[u8]) -> u32 {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values)
}

/// Verify the checksum of a segwit data part.
///
/// The expected variant is dictated by the witness version (the first data
/// symbol): version 0 must carry a Bech32 checksum, any other version a
/// Bech32m one. A data part with nothing in front of the checksum has no
/// witness version and never verifies.
pub fn verify(hrp: &str, data_with_checksum: &[u8]) -> Option<Variant> {
    if data_with_checksum.len() <= CHECKSUM_LENGTH {
        return None;
    }

    let variant = Variant::for_witness_version(data_with_checksum[0]);
    let residue = residue(hrp, data_with_checksum);
    tracing::trace!(residue, expected = variant.constant(), "bech32 checksum residue");

    (residue == variant.constant()).then_some(variant)
}

/// Compute the six checksum symbols for `hrp` and `data`.
///
/// Used to build fixtures; the crate does not encode addresses.
pub fn create_checksum(hrp: &str, data: &[u8], variant: Variant) -> [u8; CHECKSUM_LENGTH] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LENGTH]);
    let modulus = polymod(&values) ^ variant.constant();

    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((modulus >> (5 * (5 - i))) & 31) as u8;
    }
    checksum
}
