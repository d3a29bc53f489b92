//! General power-of-two base conversion, used to repack 5-bit bech32
//! symbols into 8-bit witness program bytes.

use alloc::vec::Vec;

/// Why a bit conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    /// An input value does not fit in `from_bits`.
    ValueOutOfRange(u8),
    /// Unpadded conversion left a full input group or nonzero bits behind.
    InvalidPadding,
    /// Group widths must be between 1 and 8 bits.
    InvalidWidth { from_bits: u8, to_bits: u8 },
}

impl core::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConvertError::ValueOutOfRange(v) => write!(f, "Value out of range: {}", v),
            ConvertError::InvalidPadding => write!(f, "Invalid padding"),
            ConvertError::InvalidWidth { from_bits, to_bits } => {
                write!(f, "Invalid bit widths: {} to {}", from_bits, to_bits)
            }
        }
    }
}

/// Regroup `data` from `from_bits`-wide values into `to_bits`-wide values.
///
/// With `pad` the final partial group is zero-filled. Without it, the
/// leftover must be shorter than one input group and all zero; anything
/// else means `data` was not produced by a padded conversion the other way.
pub fn convert_bits(data: &[u8], from_bits: u8, to_bits: u8, pad: bool) -> Result<Vec<u8>, ConvertError> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(ConvertError::InvalidWidth { from_bits, to_bits });
    }

    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let max_value = (1u32 << to_bits) - 1;
    let max_acc = (1u32 << (from_bits + to_bits - 1)) - 1;
    let mut result = Vec::with_capacity(data.len() * from_bits as usize / to_bits as usize + 1);

    for &value in data {
        if u32::from(value) >> from_bits != 0 {
            return Err(ConvertError::ValueOutOfRange(value));
        }
        acc = ((acc << from_bits) | u32::from(value)) & max_acc;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            result.push(((acc << (to_bits - bits)) & max_value) as u8);
        }
    } else if bits >= from_bits || ((acc << (to_bits - bits)) & max_value) != 0 {
        return Err(ConvertError::InvalidPadding);
    }

    Ok(result)
}
