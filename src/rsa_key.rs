// src/rsa_key.rs

use crate::error::KeyMaterialError;
use base64::engine::{general_purpose::URL_SAFE_NO_PAD, Engine};
use rsa::BigUint;

/// The public half of an RSA signing key, rebuilt from its JWK components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub modulus: BigUint,
    pub exponent: u32,
}

impl PublicKey {
    /// Minimal big-endian encoding of the modulus (no leading zero bytes).
    pub fn modulus_bytes(&self) -> Vec<u8> {
        self.modulus.to_bytes_be()
    }

    /// Minimal big-endian encoding of the exponent (no leading zero bytes).
    pub fn exponent_bytes(&self) -> Vec<u8> {
        BigUint::from(self.exponent).to_bytes_be()
    }
}

impl TryFrom<&PublicKey> for rsa::RsaPublicKey {
    type Error = rsa::Error;

    fn try_from(key: &PublicKey) -> Result<Self, Self::Error> {
        rsa::RsaPublicKey::new(key.modulus.clone(), BigUint::from(key.exponent))
    }
}

/// Rebuilds an RSA public key from base64url (unpadded) exponent and modulus.
///
/// The exponent must fit in 32 bits; shorter encodings are read as
/// big-endian and left-padded with zeros. The modulus is unbounded.
pub fn public_key_from(exponent_b64: &str, modulus_b64: &str) -> Result<PublicKey, KeyMaterialError> {
    let decoded_e = URL_SAFE_NO_PAD
        .decode(exponent_b64)
        .map_err(|source| KeyMaterialError::InvalidEncoding { field: "e", source })?;

    if decoded_e.len() > 4 {
        return Err(KeyMaterialError::ExponentTooLarge {
            len: decoded_e.len(),
        });
    }
    let mut e32 = [0u8; 4];
    e32[4 - decoded_e.len()..].copy_from_slice(&decoded_e);
    let exponent = u32::from_be_bytes(e32);

    let decoded_n = URL_SAFE_NO_PAD
        .decode(modulus_b64)
        .map_err(|source| KeyMaterialError::InvalidEncoding { field: "n", source })?;
    let modulus = BigUint::from_bytes_be(&decoded_n);

    Ok(PublicKey { modulus, exponent })
}
