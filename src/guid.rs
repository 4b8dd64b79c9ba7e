//! Public download identifiers.
//!
//! A `Guid` is a random version 4 UUID. It is the only identifier exposed
//! by download links, so record ids stay private and links stay unguessable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::{Uuid, Variant};

/// Canonical hyphen positions in the 8-4-4-4-12 form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];
const CANONICAL_LEN: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(Uuid);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a canonical version 4 GUID: {0:?}")]
pub struct InvalidGuid(pub String);

impl Guid {
    pub fn generate() -> Self {
        Guid(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Mint a fresh random GUID.
pub fn generate() -> Guid {
    Guid::generate()
}

/// Whether `s` is a canonical, hyphenated version 4 GUID with the RFC 4122
/// variant. Hex digits may be in either case.
pub fn is_valid(s: &str) -> bool {
    if s.len() != CANONICAL_LEN {
        return false;
    }
    let shape_ok = s.bytes().enumerate().all(|(i, b)| {
        if HYPHENS.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    });
    if !shape_ok {
        return false;
    }
    match Uuid::try_parse(s) {
        Ok(uuid) => uuid.get_version_num() == 4 && uuid.get_variant() == Variant::RFC4122,
        Err(_) => false,
    }
}

impl FromStr for Guid {
    type Err = InvalidGuid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid(s) {
            return Err(InvalidGuid(s.to_string()));
        }
        Uuid::try_parse(s)
            .map(Guid)
            .map_err(|_| InvalidGuid(s.to_string()))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
