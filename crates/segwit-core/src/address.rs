//! Bech32/Bech32m segwit address validation and scriptPubKey generation.
//!
//! Supports mainnet (`bc1...`) addresses of every witness version, and
//! derives scripts for:
//! - P2WPKH (Pay to Witness Public Key Hash) - SegWit v0, 20-byte program
//! - P2WSH (Pay to Witness Script Hash) - SegWit v0, 32-byte program
//! - P2TR (Pay to Taproot) - SegWit v1, 32-byte program
//!
//! Validation is a fixed pipeline: case check, format check, charset
//! decoding, checksum, program repacking and program length. The first
//! failing stage decides the error.

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::str::FromStr;

use crate::charset::{decode_char, has_mixed_case, is_charset_char, to_canonical};
use crate::checksum::{self, Variant, CHECKSUM_LENGTH};
use crate::convert::{convert_bits, ConvertError};
use crate::script::{self, AddressType, MAX_WITNESS_VERSION};

/// Human-readable part of mainnet segwit addresses.
pub const MAINNET_HRP: &str = "bc";

/// Separates the human-readable part from the data part.
pub const SEPARATOR: char = '1';

/// Offset of the first data character (`"bc1"`).
const DATA_OFFSET: usize = MAINNET_HRP.len() + 1;

/// Maximum number of data characters (90-character limit minus `"bc1"`).
pub const MAX_DATA_LENGTH: usize = 87;

/// Address validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Both uppercase and lowercase letters present
    MixedCase,
    /// Wrong prefix, missing separator or bad data length
    InvalidFormat,
    /// Character outside the bech32 alphabet
    InvalidCharacter(char),
    /// No witness version in front of the checksum
    EmptyPayload,
    /// Checksum does not match the variant required by the witness version
    InvalidChecksum,
    /// Witness version above 16
    InvalidWitnessVersion(u8),
    /// Program bits do not repack cleanly into bytes
    InvalidPadding,
    /// Program symbols could not be regrouped at all
    InvalidProgramData(ConvertError),
    /// Program length not allowed for the witness version
    InvalidWitnessProgramLength { version: u8, length: usize },
    /// Valid address without a supported script template
    UnsupportedType { version: u8, length: usize },
}

impl core::fmt::Display for AddressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AddressError::MixedCase => write!(f, "Mixed-case address"),
            AddressError::InvalidFormat => write!(f, "Invalid address format"),
            AddressError::InvalidCharacter(c) => write!(f, "Invalid Bech32 character: {:?}", c),
            AddressError::EmptyPayload => write!(f, "Empty data payload"),
            AddressError::InvalidChecksum => write!(f, "Invalid checksum"),
            AddressError::InvalidWitnessVersion(v) => write!(f, "Invalid witness version: {}", v),
            AddressError::InvalidPadding => write!(f, "Invalid padding in witness program"),
            AddressError::InvalidProgramData(e) => write!(f, "Invalid witness program data: {}", e),
            AddressError::InvalidWitnessProgramLength { version, length } => {
                write!(f, "Invalid witness program length {} for version {}", length, version)
            }
            AddressError::UnsupportedType { version, length } => {
                write!(f, "Unsupported address type: witness v{} with {}-byte program", version, length)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AddressError {}

impl From<ConvertError> for AddressError {
    fn from(e: ConvertError) -> Self {
        match e {
            ConvertError::InvalidPadding => AddressError::InvalidPadding,
            other => AddressError::InvalidProgramData(other),
        }
    }
}

/// A segwit address that passed every validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAddress {
    /// Script template, `None` for valid but unsupported version/length pairs.
    pub address_type: Option<AddressType>,
    /// Witness version, 0 through 16.
    pub witness_version: u8,
    /// Checksum variant the address was encoded with.
    pub variant: Variant,
    /// Witness program bytes.
    pub program: Vec<u8>,
    /// The original address string.
    pub display: String,
}

impl ValidatedAddress {
    /// The scriptPubKey for this address (used in transaction outputs).
    pub fn script_pubkey(&self) -> Result<Vec<u8>, AddressError> {
        script::build_script_pubkey(self.witness_version, &self.program).ok_or(
            AddressError::UnsupportedType {
                version: self.witness_version,
                length: self.program.len(),
            },
        )
    }
}

/// A candidate mainnet segwit address.
///
/// Construction never fails; validity is a query. The canonical form and
/// the decoded symbols are computed once in [`Bech32Address::new`] and the
/// value is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bech32Address {
    original: String,
    canonical: String,
    /// 5-bit symbols after `"bc1"`; `None` when a character is not in the
    /// alphabet.
    payload_with_checksum: Option<Vec<u8>>,
}

impl Bech32Address {
    pub fn new(address: &str) -> Self {
        let canonical = to_canonical(address);
        let payload_with_checksum = canonical
            .get(DATA_OFFSET..)
            .and_then(|data| data.chars().map(decode_char).collect::<Option<Vec<u8>>>());

        Bech32Address {
            original: String::from(address),
            canonical,
            payload_with_checksum,
        }
    }

    /// True iff format, checksum and witness program rules all pass.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Run the validation pipeline, reporting the first failing stage.
    pub fn validate(&self) -> Result<ValidatedAddress, AddressError> {
        let result = self.run_pipeline();
        if let Err(e) = &result {
            tracing::debug!(address = %self.original, error = %e, "rejected segwit address");
        }
        result
    }

    /// The scriptPubKey this address pays to.
    ///
    /// Callers are expected to gate on [`is_valid`](Self::is_valid). Asking
    /// an invalid address for its script is a contract violation and
    /// returns the validation error; a valid address outside the P2WPKH,
    /// P2WSH and P2TR templates returns [`AddressError::UnsupportedType`].
    pub fn script(&self) -> Result<Vec<u8>, AddressError> {
        self.validate()?.script_pubkey()
    }

    /// [`script`](Self::script) as lowercase hex.
    pub fn script_hex(&self) -> Result<String, AddressError> {
        self.script().map(hex::encode)
    }

    /// Script template, if the address is valid and supported.
    pub fn address_type(&self) -> Option<AddressType> {
        self.validate().ok().and_then(|v| v.address_type)
    }

    /// Witness version of a valid address.
    pub fn witness_version(&self) -> Option<u8> {
        self.validate().ok().map(|v| v.witness_version)
    }

    /// Witness program of a valid address.
    pub fn program(&self) -> Option<Vec<u8>> {
        self.validate().ok().map(|v| v.program)
    }

    /// The string exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for parsing.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn run_pipeline(&self) -> Result<ValidatedAddress, AddressError> {
        if has_mixed_case(&self.original) {
            return Err(AddressError::MixedCase);
        }
        self.check_format()?;

        let data = self.payload_with_checksum.as_deref().ok_or(AddressError::InvalidFormat)?;
        if data.len() <= CHECKSUM_LENGTH {
            return Err(AddressError::EmptyPayload);
        }
        let variant = checksum::verify(MAINNET_HRP, data).ok_or(AddressError::InvalidChecksum)?;

        let payload = &data[..data.len() - CHECKSUM_LENGTH];
        let witness_version = payload[0];
        if witness_version > MAX_WITNESS_VERSION {
            return Err(AddressError::InvalidWitnessVersion(witness_version));
        }

        let program = convert_bits(&payload[1..], 5, 8, false)?;
        if !script::is_valid_program_length(witness_version, program.len()) {
            return Err(AddressError::InvalidWitnessProgramLength {
                version: witness_version,
                length: program.len(),
            });
        }

        Ok(ValidatedAddress {
            address_type: AddressType::classify(witness_version, program.len()),
            witness_version,
            variant,
            program,
            display: self.original.clone(),
        })
    }

    /// `bc1` followed by 1 to 87 alphabet characters.
    fn check_format(&self) -> Result<(), AddressError> {
        let data = self
            .canonical
            .strip_prefix(MAINNET_HRP)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .ok_or(AddressError::InvalidFormat)?;

        let length = data.chars().count();
        if length == 0 || length > MAX_DATA_LENGTH {
            return Err(AddressError::InvalidFormat);
        }
        if let Some(c) = data.chars().find(|&c| !is_charset_char(c)) {
            return Err(AddressError::InvalidCharacter(c));
        }
        Ok(())
    }
}

impl core::fmt::Display for Bech32Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for Bech32Address {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Bech32Address::new(s))
    }
}

impl From<&str> for Bech32Address {
    fn from(s: &str) -> Self {
        Bech32Address::new(s)
    }
}

/// Validate a mainnet segwit address and return its details.
///
/// The string is taken as-is; surrounding whitespace makes it invalid.
pub fn validate_address(address: &str) -> Result<ValidatedAddress, AddressError> {
    Bech32Address::new(address).validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p2wpkh_uppercase() {
        let address = Bech32Address::new("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4");
        assert!(address.is_valid());
        assert_eq!(address.address_type(), Some(AddressType::P2WPKH));
        assert_eq!(
            address.script_hex().unwrap(),
            "0014751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_p2wpkh_mainnet() {
        let address = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
        let result = validate_address(address).unwrap();

        assert_eq!(result.address_type, Some(AddressType::P2WPKH));
        assert_eq!(result.variant, Variant::Bech32);
        let script = result.script_pubkey().unwrap();
        assert_eq!(script.len(), 22);
        assert_eq!(script[0], 0x00); // OP_0
        assert_eq!(script[1], 0x14); // Push 20 bytes
    }

    #[test]
    fn test_p2tr_mainnet() {
        let address = "bc1p5cyxnuxmeuwuvkwfem96lqzszd02n6xdcjrs20cac6yqjjwudpxqkedrcr";
        let result = validate_address(address).unwrap();

        assert_eq!(result.address_type, Some(AddressType::P2TR));
        assert_eq!(result.variant, Variant::Bech32m);
        let script = result.script_pubkey().unwrap();
        assert_eq!(script.len(), 34);
        assert_eq!(script[0], 0x51); // OP_1
        assert_eq!(script[1], 0x20); // Push 32 bytes
    }

    #[test]
    fn test_changed_last_char() {
        let address = Bech32Address::new("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T5");
        assert!(!address.is_valid());
        assert_eq!(address.validate(), Err(AddressError::InvalidChecksum));
    }

    #[test]
    fn test_mixed_case() {
        let address = Bech32Address::new("bC1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        assert_eq!(address.validate(), Err(AddressError::MixedCase));
    }

    #[test]
    fn test_program_too_short() {
        let address = Bech32Address::new("bc1pw5dgrnzv");
        assert!(!address.is_valid());
        assert_eq!(
            address.validate(),
            Err(AddressError::InvalidWitnessProgramLength { version: 1, length: 1 })
        );
    }

    #[test]
    fn test_v3_with_bech32_checksum() {
        // BIP-173 era vector: witness v3 must now carry a bech32m checksum
        let address = Bech32Address::new("bc1rw5uspcuh");
        assert!(!address.is_valid());
        assert_eq!(address.validate(), Err(AddressError::InvalidChecksum));
    }

    #[test]
    fn test_format_errors() {
        assert_eq!(validate_address(""), Err(AddressError::InvalidFormat));
        assert_eq!(validate_address("bc1"), Err(AddressError::InvalidFormat));
        assert_eq!(
            validate_address("tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"),
            Err(AddressError::InvalidFormat)
        );
        assert_eq!(
            validate_address(" bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"),
            Err(AddressError::InvalidFormat)
        );
        assert_eq!(
            validate_address("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdb"),
            Err(AddressError::InvalidCharacter('b'))
        );
    }

    #[test]
    fn test_data_part_too_long() {
        let address = alloc::format!("bc1{}", "q".repeat(MAX_DATA_LENGTH + 1));
        assert_eq!(validate_address(&address), Err(AddressError::InvalidFormat));
    }

    #[test]
    fn test_checksum_only_data() {
        assert_eq!(validate_address("bc1gmk9yu"), Err(AddressError::EmptyPayload));
        assert_eq!(validate_address("bc1q"), Err(AddressError::EmptyPayload));
    }

    #[test]
    fn test_non_ascii_input() {
        // Multi-byte character straddling the data offset must not panic
        let address = Bech32Address::new("bc\u{e9}qw508d6");
        assert!(!address.is_valid());
        assert!(address.script().is_err());
    }

    #[test]
    fn test_script_on_invalid_address_returns_validation_error() {
        let address = Bech32Address::new("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5");
        assert_eq!(address.script(), Err(AddressError::InvalidChecksum));
    }

    #[test]
    fn test_convert_error_mapping() {
        assert_eq!(AddressError::from(ConvertError::InvalidPadding), AddressError::InvalidPadding);
        assert_eq!(
            AddressError::from(ConvertError::ValueOutOfRange(32)),
            AddressError::InvalidProgramData(ConvertError::ValueOutOfRange(32))
        );
        assert_eq!(
            AddressError::from(ConvertError::InvalidWidth { from_bits: 5, to_bits: 0 }),
            AddressError::InvalidProgramData(ConvertError::InvalidWidth { from_bits: 5, to_bits: 0 })
        );
    }

    #[test]
    fn test_address_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bech32Address>();
        assert_send_sync::<ValidatedAddress>();
        assert_send_sync::<AddressError>();
    }

    #[test]
    fn test_display_and_from_str() {
        let text = "BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4";
        let address: Bech32Address = text.parse().unwrap();
        assert_eq!(address.to_string(), text);
        assert_eq!(address.as_str(), text);
        assert_eq!(address.canonical(), text.to_lowercase());
    }
}
