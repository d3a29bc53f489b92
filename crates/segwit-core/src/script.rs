//! Witness version dispatch and scriptPubKey construction.

use alloc::vec::Vec;

/// OP_0, the version opcode for witness version 0.
pub const OP_0: u8 = 0x00;

/// OP_1; OP_2 through OP_16 follow consecutively.
pub const OP_1: u8 = 0x51;

/// Highest witness version a segwit output may carry.
pub const MAX_WITNESS_VERSION: u8 = 16;

/// P2WPKH program length (HASH160 of a public key).
pub const P2WPKH_PROGRAM_LEN: usize = 20;

/// P2WSH program length (SHA256 of a witness script).
pub const P2WSH_PROGRAM_LEN: usize = 32;

/// P2TR program length (x-only output key).
pub const P2TR_PROGRAM_LEN: usize = 32;

/// Bounds on program length for witness versions 1 through 16.
pub const MIN_PROGRAM_LEN: usize = 2;
pub const MAX_PROGRAM_LEN: usize = 40;

/// Segwit output templates this crate can build a script for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressType {
    /// Native SegWit v0 P2WPKH: OP_0 <20-byte-hash>
    P2WPKH,
    /// Native SegWit v0 P2WSH: OP_0 <32-byte-hash>
    P2WSH,
    /// Taproot P2TR: OP_1 <32-byte-x-only-pubkey>
    P2TR,
}

impl AddressType {
    /// Match a (witness version, program length) pair to a template.
    pub fn classify(witness_version: u8, program_len: usize) -> Option<Self> {
        match (witness_version, program_len) {
            (0, P2WPKH_PROGRAM_LEN) => Some(AddressType::P2WPKH),
            (0, P2WSH_PROGRAM_LEN) => Some(AddressType::P2WSH),
            (1, P2TR_PROGRAM_LEN) => Some(AddressType::P2TR),
            _ => None,
        }
    }

    /// Get the display name for this address type.
    pub fn name(&self) -> &'static str {
        match self {
            AddressType::P2WPKH => "P2WPKH",
            AddressType::P2WSH => "P2WSH",
            AddressType::P2TR => "P2TR",
        }
    }

    pub fn witness_version(&self) -> u8 {
        match self {
            AddressType::P2WPKH | AddressType::P2WSH => 0,
            AddressType::P2TR => 1,
        }
    }

    pub fn program_len(&self) -> usize {
        match self {
            AddressType::P2WPKH => P2WPKH_PROGRAM_LEN,
            AddressType::P2WSH => P2WSH_PROGRAM_LEN,
            AddressType::P2TR => P2TR_PROGRAM_LEN,
        }
    }
}

impl core::fmt::Display for AddressType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Opcode that pushes the witness version: OP_0 = 0x00, OP_1 = 0x51, OP_2 = 0x52, etc.
///
/// `None` above version 16.
pub const fn version_opcode(witness_version: u8) -> Option<u8> {
    match witness_version {
        0 => Some(OP_0),
        1..=MAX_WITNESS_VERSION => Some(OP_1 - 1 + witness_version),
        _ => None,
    }
}

/// Whether a program length is allowed for the witness version at all.
///
/// This is the address-family rule, independent of whether a script
/// template exists for the pair.
pub fn is_valid_program_length(witness_version: u8, program_len: usize) -> bool {
    match witness_version {
        0 => program_len == P2WPKH_PROGRAM_LEN || program_len == P2WSH_PROGRAM_LEN,
        1..=MAX_WITNESS_VERSION => (MIN_PROGRAM_LEN..=MAX_PROGRAM_LEN).contains(&program_len),
        _ => false,
    }
}

/// Build `<version opcode> <push length> <program>`.
///
/// Only the three supported templates are built; the caller maps `None`
/// to an unsupported-type error.
pub fn build_script_pubkey(witness_version: u8, program: &[u8]) -> Option<Vec<u8>> {
    let address_type = AddressType::classify(witness_version, program.len())?;

    let mut script_pubkey = Vec::with_capacity(2 + program.len());
    script_pubkey.push(version_opcode(address_type.witness_version())?);
    script_pubkey.push(program.len() as u8); // Push N bytes
    script_pubkey.extend_from_slice(program);
    Some(script_pubkey)
}
