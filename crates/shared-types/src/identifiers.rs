//! # Identifier Value Objects
//!
//! Immutable identifier primitives used across all subsystems: the 32-byte
//! resolver/configuration identifier and the 20-byte platform address.
//! Both parse eagerly from hex and reject malformed input with a
//! [`ValidationError`]; downstream code never sees an invalid identifier.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Errors from eager identifier validation.
///
/// These are the only failures in the system that surface as plain `Err`
/// values at call boundaries: they indicate caller programming errors, not
/// runtime conditions, and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input had the wrong byte length after hex decoding.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Input contained non-hexadecimal characters.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input was empty.
    #[error("empty identifier")]
    Empty,
}

fn decode_hex(input: &str, expected: usize) -> Result<Vec<u8>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let bare = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(bare).map_err(|e| ValidationError::InvalidHex(e.to_string()))?;
    if bytes.len() != expected {
        return Err(ValidationError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

// =============================================================================
// BYTES32 (32-byte identifier)
// =============================================================================

/// A 32-byte identifier.
///
/// Used for configuration ids and facet resolver keys. All resolver-facing
/// identifier fields use `[u8; 32]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Bytes32(pub [u8; 32]);

impl Bytes32 {
    /// The zero identifier.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an identifier from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an identifier from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 32 {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Parses a 64-hex-char identifier, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the input is empty, non-hex, or
    /// decodes to a length other than 32 bytes.
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        let bytes = decode_hex(input, 32)?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Keccak-256 of arbitrary input bytes.
    #[must_use]
    pub fn keccak256(input: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(input);
        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Self(out)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero identifier.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Full lowercase hex form with a `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[30..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Bytes32 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// EVM ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte platform address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct EvmAddress(pub [u8; 20]);

impl EvmAddress {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Parses a 40-hex-char address, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the input is empty, non-hex, or
    /// decodes to a length other than 20 bytes.
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        let bytes = decode_hex(input, 20)?;
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Full lowercase hex form with a `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for EvmAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for EvmAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for EvmAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EvmAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// RESOLVER KEY DERIVATION
// =============================================================================

/// Derives the canonical resolver key for a facet name.
///
/// Resolver keys are the Keccak-256 hash of the facet's resolver-key name
/// (e.g. `keccak256("AccessControlFacet")`), matching how the proxy resolves
/// selectors to facet addresses on chain.
#[must_use]
pub fn resolver_key_for(name: &str) -> Bytes32 {
    Bytes32::keccak256(name.as_bytes())
}

/// First four bytes of the Keccak-256 hash of a function signature, the
/// on-chain dispatch selector (e.g. `selector("transfer(address,uint256)")`).
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Bytes32::keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest.as_bytes()[..4]);
    out
}

// =============================================================================
// TESTS
// =============================================================================
