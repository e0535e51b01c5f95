//! Digest formats and the incremental sinks that back them.
//!
//! A [`Format`] picks the digest primitive. Every traversal feeds bytes into
//! a fresh [`DigestSink`] created by [`Format::sink`] and finalizes it once.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use xxhash_rust::xxh3::Xxh3;

use crate::error::HashError;

/// The digest algorithm used to summarize a traversal.
///
/// Different formats produce different digests for the same value. The raw
/// selector `0` is reserved as "unset" and is never a valid format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// MD5, 16-byte output. Byte-compatible with the pinned golden digests.
    Md5 = 1,
    /// XXH3-128, 16-byte output. Fast, not cryptographic.
    Xxh3 = 2,
    /// SHA-256, 32-byte output.
    Sha256 = 3,
    /// BLAKE3, 32-byte output.
    Blake3 = 4,
}

impl Format {
    /// All supported formats in selector order.
    pub const ALL: [Format; 4] = [Format::Md5, Format::Xxh3, Format::Sha256, Format::Blake3];

    /// Returns the raw selector for this format.
    pub fn selector(self) -> u32 {
        self as u32
    }

    /// Returns the lowercase name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Format::Md5 => "md5",
            Format::Xxh3 => "xxh3",
            Format::Sha256 => "sha256",
            Format::Blake3 => "blake3",
        }
    }

    /// Returns the length in bytes of digests produced by this format.
    pub fn output_len(self) -> usize {
        match self {
            Format::Md5 | Format::Xxh3 => 16,
            Format::Sha256 | Format::Blake3 => 32,
        }
    }

    /// Creates a fresh, empty digest sink for this format.
    pub fn sink(self) -> Box<dyn DigestSink> {
        match self {
            Format::Md5 => Box::new(Md5::new()),
            Format::Xxh3 => Box::new(Xxh3::new()),
            Format::Sha256 => Box::new(Sha256::new()),
            Format::Blake3 => Box::new(blake3::Hasher::new()),
        }
    }
}

impl TryFrom<u32> for Format {
    type Error = HashError;

    fn try_from(selector: u32) -> Result<Self, Self::Error> {
        Format::ALL
            .into_iter()
            .find(|f| f.selector() == selector)
            .ok_or_else(|| HashError::invalid_format(selector))
    }
}

impl FromStr for Format {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HashError::invalid_format(s))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An incremental hash accumulator.
pub trait DigestSink {
    /// Feeds bytes into the accumulator.
    fn write(&mut self, bytes: &[u8]);

    /// Consumes the accumulator and returns the finalized digest.
    fn finish(self: Box<Self>) -> Vec<u8>;
}

impl DigestSink for Md5 {
    fn write(&mut self, bytes: &[u8]) {
        Digest::update(self, bytes);
    }

    fn finish(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(*self).to_vec()
    }
}

impl DigestSink for Sha256 {
    fn write(&mut self, bytes: &[u8]) {
        Digest::update(self, bytes);
    }

    fn finish(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(*self).to_vec()
    }
}

impl DigestSink for Xxh3 {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(self: Box<Self>) -> Vec<u8> {
        self.digest128().to_le_bytes().to_vec()
    }
}

impl DigestSink for blake3::Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(self: Box<Self>) -> Vec<u8> {
        self.finalize().as_bytes().to_vec()
    }
}
