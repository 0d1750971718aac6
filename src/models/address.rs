// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ethereum address parsing.

use std::fmt;
use std::str::FromStr;

/// Hex digits following the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// A syntactically valid `0x`-prefixed Ethereum address.
///
/// The original spelling is kept for output; [`Address::lookup_key`] gives
/// the lower-cased form Neynar uses as a response map key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    /// Validate and wrap a raw address string.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        if raw.is_empty() {
            return Err(AddressError::Empty);
        }

        let hex = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;

        if hex.len() != ADDRESS_HEX_LEN {
            return Err(AddressError::WrongLength(hex.len()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::NotHex);
        }

        Ok(Self(raw.to_string()))
    }

    /// The address exactly as supplied by the caller.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used to read the bulk-by-address response.
    pub fn lookup_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons an address string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address must start with 0x")]
    MissingPrefix,

    #[error("address must have 40 hex digits, found {0}")]
    WrongLength(usize),

    #[error("address contains non-hex characters")]
    NotHex,
}
