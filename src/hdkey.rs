//! BIP-32 hierarchical-deterministic keys: master derivation from a seed,
//! private and public child key derivation (CKDpriv / CKDpub), and the
//! 78-byte extended key serialization.

use secp256k1::SecretKey;

use crate::curve;
use crate::encoding::{decode_check, encode_check};
use crate::error::KeyError;
use crate::hashing::{hash160, hmac_sha512};
use crate::key::Key;
use crate::network::Network;

const HARDENED: u32 = 0x8000_0000;
const SEED_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// A node in a BIP-32 hierarchical-deterministic tree: a `Key` (private or
/// public) paired with the chain code and lineage metadata needed to derive
/// further children and to serialize as `xprv`/`xpub`.
#[derive(Debug, Clone)]
pub struct HDKey {
    key: Key,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
}

impl HDKey {
    /// Derives the master key and chain code from a seed, per BIP-32:
    /// `I = HMAC-SHA512("Bitcoin seed", seed)`, `IL` is the master scalar and
    /// `IR` the master chain code. Rejects seeds shorter than 16 or longer
    /// than 64 bytes, as BIP-32 recommends.
    pub fn from_seed(seed: &[u8], network: Network) -> Result<HDKey, KeyError> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(KeyError::UnrecognizedFormat);
        }
        let i = hmac_sha512(SEED_HMAC_KEY, seed);
        let (il, ir) = i.split_at(32);
        let secret = SecretKey::from_slice(il).map_err(|_| KeyError::InvalidScalar)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);
        Ok(HDKey {
            key: Key::Private {
                secret,
                compressed: true,
                network,
            },
            chain_code,
            depth: 0,
            parent_fingerprint: [0; 4],
            child_index: 0,
        })
    }

    /// Generates a fresh master key from securely-random entropy.
    pub fn generate(network: Network) -> Result<HDKey, KeyError> {
        let seed = Key::generate(network)?
            .private_byte()
            .expect("freshly generated key always has a private component");
        Self::from_seed(&seed, network)
    }

    /// Parses a Base58Check-encoded extended key (`xprv`/`xpub`/`tprv`/`tpub`).
    pub fn from_extended(s: &str) -> Result<HDKey, KeyError> {
        let data = decode_check(s)?;
        if data.len() != 78 {
            return Err(KeyError::UnrecognizedFormat);
        }
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&data[0..4]);
        let (network, is_private) =
            Network::from_extended_prefix(prefix).ok_or(KeyError::UnrecognizedFormat)?;

        let depth = data[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let child_index = u32::from_be_bytes(data[9..13].try_into().unwrap());
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);
        let material = &data[45..78];

        let key = if is_private {
            if material[0] != 0x00 {
                return Err(KeyError::UnrecognizedFormat);
            }
            let secret = SecretKey::from_slice(&material[1..33]).map_err(|_| KeyError::InvalidScalar)?;
            Key::Private {
                secret,
                compressed: true,
                network,
            }
        } else {
            Key::Public {
                public: curve::decompress(material)?,
                compressed: true,
                network,
            }
        };

        Ok(HDKey {
            key,
            chain_code,
            depth,
            parent_fingerprint,
            child_index,
        })
    }

    pub fn network(&self) -> Network {
        self.key.network()
    }

    pub fn is_private(&self) -> bool {
        self.key.is_private()
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    /// The underlying key, private or public depending on how this node was
    /// derived or imported.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// HASH160 of the compressed SEC public key, truncated to its first four
    /// bytes — the identifier BIP-32 uses as `parent_fingerprint` in a
    /// child's serialization.
    pub fn fingerprint(&self) -> [u8; 4] {
        let digest = hash160(&curve::compress(&self.key.public_key()));
        let mut out = [0u8; 4];
        out.copy_from_slice(&digest[..4]);
        out
    }

    /// This node stripped of its private component, preserving chain code
    /// and lineage metadata — the public counterpart an `xpub` represents.
    pub fn public(&self) -> HDKey {
        HDKey {
            key: self.key.public(),
            chain_code: self.chain_code,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
        }
    }

    /// CKDpriv: derives child `index` (hardened if `index >= 2^31`) from
    /// this node's private scalar. Fails with `InvalidDerivation` if this
    /// node has no private component.
    pub fn child_private(&self, mut index: u32) -> Result<HDKey, KeyError> {
        let parent_secret = match &self.key {
            Key::Private { secret, .. } => *secret,
            Key::Public { .. } => return Err(KeyError::InvalidDerivation),
        };
        let parent_fingerprint = self.fingerprint();

        loop {
            let mut data = Vec::with_capacity(37);
            if index >= HARDENED {
                data.push(0x00);
                data.extend_from_slice(&parent_secret.secret_bytes());
            } else {
                data.extend_from_slice(&curve::compress(&curve::scalar_mul_base(&parent_secret)));
            }
            data.extend_from_slice(&index.to_be_bytes());

            let i = hmac_sha512(&self.chain_code, &data);
            let (il, ir) = i.split_at(32);

            if let Ok(tweak) = SecretKey::from_slice(il) {
                if let Ok(child_secret) = curve::scalar_add(&parent_secret, &tweak) {
                    let mut chain_code = [0u8; 32];
                    chain_code.copy_from_slice(ir);
                    return Ok(HDKey {
                        key: Key::Private {
                            secret: child_secret,
                            compressed: true,
                            network: self.network(),
                        },
                        chain_code,
                        depth: self.depth.checked_add(1).ok_or(KeyError::InvalidDerivation)?,
                        parent_fingerprint,
                        child_index: index,
                    });
                }
            }
            index = index.checked_add(1).ok_or(KeyError::InvalidDerivation)?;
        }
    }

    /// CKDpub: derives non-hardened child `index` from this node's public
    /// key alone, without requiring (or consulting) a private component.
    /// Fails with `InvalidDerivation` for a hardened index, since CKDpub is
    /// undefined there regardless of whether a private scalar also happens
    /// to be available.
    pub fn child_public(&self, mut index: u32) -> Result<HDKey, KeyError> {
        let parent_public = self.key.public_key();
        let parent_fingerprint = self.fingerprint();

        loop {
            if index >= HARDENED {
                return Err(KeyError::InvalidDerivation);
            }

            let mut data = Vec::with_capacity(37);
            data.extend_from_slice(&curve::compress(&parent_public));
            data.extend_from_slice(&index.to_be_bytes());

            let i = hmac_sha512(&self.chain_code, &data);
            let (il, ir) = i.split_at(32);

            if let Ok(tweak) = SecretKey::from_slice(il) {
                if let Ok(child_public) = curve::point_add_scalar(&parent_public, &tweak) {
                    let mut chain_code = [0u8; 32];
                    chain_code.copy_from_slice(ir);
                    return Ok(HDKey {
                        key: Key::Public {
                            public: child_public,
                            compressed: true,
                            network: self.network(),
                        },
                        chain_code,
                        depth: self.depth.checked_add(1).ok_or(KeyError::InvalidDerivation)?,
                        parent_fingerprint,
                        child_index: index,
                    });
                }
            }
            index = index.checked_add(1).ok_or(KeyError::InvalidDerivation)?;
        }
    }

    /// Walks a `m/a1/a2/…` path from this node, deriving privately at every
    /// step while a private component remains available and falling back to
    /// `child_public` once it doesn't. The leading `m` is an optional
    /// sentinel for "this node"; a bare leading index (e.g. `3/2h`) is
    /// equally valid.
    pub fn subkey_for_path(&self, path: &str) -> Result<HDKey, KeyError> {
        let mut current = self.clone();
        for index in parse_path(path)? {
            current = if current.is_private() {
                current.child_private(index)?
            } else {
                current.child_public(index)?
            };
        }
        Ok(current)
    }

    /// Base58Check `xprv`/`tprv` serialization, or `None` if this node has
    /// no private component.
    pub fn extended_wif(&self) -> Option<String> {
        self.is_private().then(|| self.serialize(true))
    }

    /// Base58Check `xpub`/`tpub` serialization.
    pub fn extended_wif_public(&self) -> String {
        self.serialize(false)
    }

    fn serialize(&self, private: bool) -> String {
        let mut buf = Vec::with_capacity(78);
        let prefix = if private {
            self.network().xprv_prefix()
        } else {
            self.network().xpub_prefix()
        };
        buf.extend_from_slice(&prefix);
        buf.push(self.depth);
        buf.extend_from_slice(&self.parent_fingerprint);
        buf.extend_from_slice(&self.child_index.to_be_bytes());
        buf.extend_from_slice(&self.chain_code);
        if private {
            buf.push(0x00);
            buf.extend_from_slice(
                &self
                    .key
                    .private_byte()
                    .expect("extended_wif only serializes private material when is_private()"),
            );
        } else {
            buf.extend_from_slice(&curve::compress(&self.key.public_key()));
        }
        encode_check(&buf)
    }

    /// A non-normative, human-readable dump of this node's lineage and
    /// serialized forms, useful for debugging.
    pub fn info(&self) -> String {
        format!(
            "depth={} parent_fingerprint={} child_index={} chain_code={} xpub={}",
            self.depth,
            hex::encode(self.parent_fingerprint),
            self.child_index,
            hex::encode(self.chain_code),
            self.extended_wif_public(),
        )
    }
}

/// Parses a `m/a1/a2/…` BIP-32 path into absolute child indices, with `h`,
/// `H`, or `'` marking hardened segments. The leading `m` sentinel is
/// optional; an empty segment (including one produced by a trailing `/`) or
/// a non-digit index is rejected.
fn parse_path(path: &str) -> Result<Vec<u32>, KeyError> {
    if path.is_empty() {
        return Err(KeyError::InvalidPath("path is empty".to_string()));
    }

    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.first() == Some(&"m") {
        segments.remove(0);
    }

    let mut steps = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.is_empty() || !segment.is_ascii() {
            return Err(KeyError::InvalidPath(format!(
                "empty or non-ascii path segment in {path:?}"
            )));
        }

        let (digits, hardened) = match segment.as_bytes()[segment.len() - 1] {
            b'h' | b'H' | b'\'' => (&segment[..segment.len() - 1], true),
            _ => (segment, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeyError::InvalidPath(format!(
                "invalid path segment {segment:?}"
            )));
        }

        let index: u32 = digits
            .parse()
            .map_err(|_| KeyError::InvalidPath(format!("index out of range in {segment:?}")))?;
        if index >= HARDENED {
            return Err(KeyError::InvalidPath(format!(
                "index too large in {segment:?}"
            )));
        }

        steps.push(if hardened { index + HARDENED } else { index });
    }

    Ok(steps)
}
