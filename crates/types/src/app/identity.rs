// Path: crates/types/src/app/identity.rs

//! Defines the wire-format validator public key, its canonical internal form, and
//! the single, deterministic function used to derive a consensus address from it.
//!
//! Jailed-validator resolution on every node goes through this module, so the
//! derivation must be bit-identical across the network.

use crate::error::ChangeoverError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Defines the cryptographic algorithm suite of a validator consensus key.
///
/// Instead of a closed enum, this uses an `i32` identifier compatible with the
/// IANA COSE Algorithms Registry, so unknown suites can still be carried on the
/// wire and rejected at conversion time.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Hash,
)]
#[serde(transparent)]
pub struct KeySuite(pub i32);

impl KeySuite {
    /// Ed25519 (Pure). IANA COSE ID: -8.
    pub const ED25519: Self = Self(-8);
    /// ECDSA over secp256k1. IANA COSE ID: -47.
    pub const SECP256K1: Self = Self(-47);
}

/// A validator public key as it arrives from the external wire format.
///
/// The bytes are unvalidated; use [`ConsensusPubKey::try_from`] to obtain a key
/// that is known to be well-formed.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Hash)]
pub struct PublicKey {
    /// The algorithm suite of the key.
    pub suite: KeySuite,
    /// The raw, suite-specific key bytes.
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
}

impl PublicKey {
    /// Creates a new wire-format public key.
    pub fn new(suite: KeySuite, bytes: Vec<u8>) -> Self {
        Self { suite, bytes }
    }

    /// Shorthand for an Ed25519 wire key.
    pub fn ed25519(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(KeySuite::ED25519, bytes.into())
    }
}

/// A validated consensus public key in its internal, fixed-size representation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ConsensusPubKey {
    /// A raw 32-byte Ed25519 public key.
    Ed25519([u8; 32]),
    /// A 33-byte SEC1 compressed secp256k1 public key.
    Secp256k1([u8; 33]),
}

impl ConsensusPubKey {
    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(k) => k,
            Self::Secp256k1(k) => k,
        }
    }

    /// Derives the consensus address of this key.
    pub fn address(&self) -> ConsensusAddress {
        ConsensusAddress::derive(self)
    }
}

impl TryFrom<&PublicKey> for ConsensusPubKey {
    type Error = ChangeoverError;

    fn try_from(pk: &PublicKey) -> Result<Self, Self::Error> {
        let malformed = |reason: &str| {
            ChangeoverError::MalformedPublicKey(format!(
                "suite {} key 0x{}: {}",
                pk.suite.0,
                hex::encode(&pk.bytes),
                reason
            ))
        };
        match pk.suite {
            KeySuite::ED25519 => {
                let raw: [u8; 32] = pk
                    .bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| malformed("expected 32 bytes"))?;
                Ok(Self::Ed25519(raw))
            }
            KeySuite::SECP256K1 => {
                let raw: [u8; 33] = pk
                    .bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| malformed("expected 33 bytes"))?;
                if !matches!(raw.first(), Some(0x02) | Some(0x03)) {
                    return Err(malformed("not a compressed SEC1 point"));
                }
                Ok(Self::Secp256k1(raw))
            }
            _ => Err(malformed("unsupported key suite")),
        }
    }
}

/// The length in bytes of a consensus address.
pub const CONSENSUS_ADDRESS_LEN: usize = 20;

/// A 20-byte address derived from a validator's consensus public key, used to look
/// up the validator's record in the staking store.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    Hash,
)]
pub struct ConsensusAddress(pub [u8; CONSENSUS_ADDRESS_LEN]);

impl ConsensusAddress {
    /// Derives the address the way CometBFT does, so it matches the index the
    /// host's staking store keeps:
    /// - Ed25519: the first 20 bytes of `SHA256(key)`.
    /// - secp256k1: `RIPEMD160(SHA256(key))` over the compressed key.
    pub fn derive(key: &ConsensusPubKey) -> Self {
        let sha = Sha256::digest(key.as_bytes());
        let digest = match key {
            ConsensusPubKey::Ed25519(_) => sha.to_vec(),
            ConsensusPubKey::Secp256k1(_) => Ripemd160::digest(sha).to_vec(),
        };
        let mut out = [0u8; CONSENSUS_ADDRESS_LEN];
        for (dst, src) in out.iter_mut().zip(digest) {
            *dst = src;
        }
        Self(out)
    }
}

impl AsRef<[u8]> for ConsensusAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Display for ConsensusAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ed25519_key_converts_and_derives_stable_address() {
        let pk = PublicKey::ed25519(vec![7u8; 32]);
        let key = ConsensusPubKey::try_from(&pk).unwrap();
        assert_eq!(key, ConsensusPubKey::Ed25519([7u8; 32]));
        assert_eq!(key.address(), key.address());
        assert_ne!(
            key.address(),
            ConsensusPubKey::Ed25519([8u8; 32]).address()
        );
    }

    #[test]
    fn wrong_length_is_malformed() {
        let pk = PublicKey::ed25519(vec![1u8; 31]);
        let err = ConsensusPubKey::try_from(&pk).unwrap_err();
        assert!(matches!(err, ChangeoverError::MalformedPublicKey(_)));
    }

    #[test]
    fn secp256k1_requires_compressed_prefix() {
        let mut bytes = vec![0x02u8];
        bytes.extend_from_slice(&[9u8; 32]);
        let ok = PublicKey::new(KeySuite::SECP256K1, bytes.clone());
        assert!(ConsensusPubKey::try_from(&ok).is_ok());

        bytes[0] = 0x04;
        let bad = PublicKey::new(KeySuite::SECP256K1, bytes);
        assert!(ConsensusPubKey::try_from(&bad).is_err());
    }

    #[test]
    fn unknown_suite_is_malformed() {
        let pk = PublicKey::new(KeySuite(-100), vec![0u8; 32]);
        assert!(matches!(
            ConsensusPubKey::try_from(&pk),
            Err(ChangeoverError::MalformedPublicKey(_))
        ));
    }

    #[test]
    fn ed25519_address_is_truncated_sha256() {
        let key = ConsensusPubKey::Ed25519([7u8; 32]);
        let digest = Sha256::digest([7u8; 32]);
        assert_eq!(key.address().as_ref(), &digest[..CONSENSUS_ADDRESS_LEN]);
    }

    #[test]
    fn secp256k1_address_is_ripemd_of_sha256() {
        let mut raw = [0x11u8; 33];
        raw[0] = 0x03;
        let expected = Ripemd160::digest(Sha256::digest(raw));
        assert_eq!(
            ConsensusPubKey::Secp256k1(raw).address().as_ref(),
            expected.as_slice()
        );
    }

    #[test]
    fn known_ed25519_address_vector() {
        // SHA256 of 32 zero bytes is 66687aad...; the address is its first 20 bytes.
        let addr = ConsensusPubKey::Ed25519([0u8; 32]).address();
        assert_eq!(addr.to_string(), "0x66687aadf862bd776c8fc18b8e9f8e2008971485");
    }

    #[test]
    fn public_key_json_uses_hex() {
        let pk = PublicKey::ed25519(vec![0xabu8; 32]);
        let json = serde_json::to_string(&pk).unwrap();
        assert!(json.contains(&"ab".repeat(32)));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }
}
