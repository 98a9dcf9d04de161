//! Hash value and algorithm trait definitions.

use crate::core::decoder::FastDecoder;
use crate::error::{HashParseError, PhashError};
use image::DynamicImage;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default hash grid edge length (8x8 = 64 bits)
pub const DEFAULT_HASH_SIZE: u32 = 8;

/// A computed perceptual hash.
///
/// Bits are packed MSB-first in row-major order, so the hex rendering reads
/// the downscaled grid left to right, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHash {
    bytes: Vec<u8>,
}

impl ImageHash {
    /// Create a hash from packed bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Build a hash from a row-major bit sequence
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut bytes = Vec::new();
        let mut current_byte: u8 = 0;
        let mut bit_position = 0;

        for bit in bits {
            if bit {
                current_byte |= 1 << (7 - bit_position);
            }

            bit_position += 1;

            if bit_position == 8 {
                bytes.push(current_byte);
                current_byte = 0;
                bit_position = 0;
            }
        }

        if bit_position > 0 {
            bytes.push(current_byte);
        }

        Self { bytes }
    }

    /// Parse hex text produced by [`ImageHash::to_hex`] for a `hash_size` grid.
    ///
    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn from_hex(text: &str, hash_size: u32) -> Result<Self, HashParseError> {
        let text = text.trim();
        let expected = (hash_size * hash_size / 4) as usize;
        let actual = text.chars().count();
        if actual != expected {
            return Err(HashParseError::InvalidLength { expected, actual });
        }

        let nibbles = text
            .chars()
            .enumerate()
            .map(|(position, character)| {
                character
                    .to_digit(16)
                    .map(|digit| digit as u8)
                    .ok_or(HashParseError::InvalidCharacter {
                        character,
                        position,
                    })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let bytes = nibbles
            .chunks(2)
            .map(|pair| match pair {
                [high, low] => (*high << 4) | *low,
                [high] => *high << 4,
                _ => 0,
            })
            .collect();

        Ok(Self { bytes })
    }

    /// Get the raw hash bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Canonical uppercase hexadecimal rendering
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02X}", b)).collect()
    }

    /// Get the total number of bits in this hash
    pub fn bit_count(&self) -> u32 {
        (self.bytes.len() * 8) as u32
    }

    /// Hamming distance: the number of bits that differ.
    ///
    /// Hashes of different lengths are compared over their common prefix;
    /// use [`ImageHash::try_distance`] to reject the mismatch instead.
    pub fn distance(&self, other: &Self) -> u32 {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Hamming distance, failing when the hashes have different bit counts
    pub fn try_distance(&self, other: &Self) -> Result<u32, HashParseError> {
        if self.bit_count() != other.bit_count() {
            return Err(HashParseError::SizeMismatch {
                left: self.bit_count(),
                right: other.bit_count(),
            });
        }
        Ok(self.distance(other))
    }
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ImageHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for ImageHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s, DEFAULT_HASH_SIZE)
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm {
    /// Compute a hash from an already-loaded image
    fn hash_image(&self, image: &DynamicImage) -> ImageHash;

    /// Edge length of the hash grid
    fn hash_size(&self) -> u32;

    /// Compute a hash directly from a file path.
    fn hash_file(&self, path: &Path) -> Result<ImageHash, PhashError> {
        let image = FastDecoder::decode(path)?;
        Ok(self.hash_image(&image))
    }

    /// Parse hex text sized for this algorithm's hashes
    fn parse_hash(&self, text: &str) -> Result<ImageHash, HashParseError> {
        ImageHash::from_hex(text, self.hash_size())
    }
}
