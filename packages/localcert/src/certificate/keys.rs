//! RSA key material
//!
//! Keys are generated and persisted with the `rsa` crate (PKCS#1 on disk) and
//! handed to `rcgen` as PKCS#8 for signing.

use log::debug;
use rcgen::{KeyPair, PKCS_RSA_SHA256};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use localcert_common::LoggingTransformer;

use crate::error::{PkiError, Result, Role};

/// PEM label of a PKCS#1 RSA private key
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// PEM label of a PKCS#8 private key
pub const PKCS8_PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// An RSA private key owned by exactly one certificate
pub struct RsaKeyMaterial {
    private_key: RsaPrivateKey,
}

impl RsaKeyMaterial {
    /// Generate a fresh key with a modulus of `bits` bits
    ///
    /// # Errors
    ///
    /// Returns `KeyGeneration` if the RSA library rejects the size or cannot
    /// find primes.
    pub fn generate(bits: usize, role: Role) -> Result<Self> {
        debug!("Generating {bits}-bit RSA key for {role}");
        let mut rng = rsa::rand_core::OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, bits).map_err(|source| {
            LoggingTransformer::log_crypto_error("RSA key generation", &source);
            PkiError::KeyGeneration { role, source }
        })?;
        Ok(Self { private_key })
    }

    /// Decode a persisted key from PEM text
    ///
    /// Accepts PKCS#1 (`RSA PRIVATE KEY`) and PKCS#8 (`PRIVATE KEY`) blocks.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem; callers attach the file path.
    pub fn from_pem(text: &str) -> std::result::Result<Self, String> {
        let block = pem::parse(text).map_err(|e| format!("invalid PEM: {e}"))?;
        let private_key = match block.tag() {
            RSA_PRIVATE_KEY_LABEL => RsaPrivateKey::from_pkcs1_der(block.contents())
                .map_err(|e| format!("invalid PKCS#1 RSA key: {e}"))?,
            PKCS8_PRIVATE_KEY_LABEL => RsaPrivateKey::from_pkcs8_der(block.contents())
                .map_err(|e| format!("invalid PKCS#8 RSA key: {e}"))?,
            other => return Err(format!("unsupported PEM block '{other}'")),
        };
        Ok(Self { private_key })
    }

    /// PKCS#1 DER encoding, the on-disk body of an `RSA PRIVATE KEY` block
    ///
    /// # Errors
    ///
    /// Returns `KeyEncoding` if the key cannot be serialized.
    pub fn pkcs1_der(&self, role: Role) -> Result<Zeroizing<Vec<u8>>> {
        let document = self
            .private_key
            .to_pkcs1_der()
            .map_err(|e| PkiError::KeyEncoding {
                role,
                reason: format!("PKCS#1 encoding failed: {e}"),
            })?;
        Ok(Zeroizing::new(document.as_bytes().to_vec()))
    }

    /// Convert into an `rcgen` signing key using RSA PKCS#1 v1.5 with SHA-256
    ///
    /// # Errors
    ///
    /// Returns `KeyEncoding` if the PKCS#8 conversion or the import fails.
    pub fn signing_key(&self, role: Role) -> Result<KeyPair> {
        let pkcs8_pem = self
            .private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| PkiError::KeyEncoding {
                role,
                reason: format!("PKCS#8 encoding failed: {e}"),
            })?;
        KeyPair::from_pem_and_sign_algo(&pkcs8_pem, &PKCS_RSA_SHA256).map_err(|e| {
            PkiError::KeyEncoding {
                role,
                reason: format!("signing key import failed: {e}"),
            }
        })
    }

    /// Public half of the key
    #[must_use]
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::from(&self.private_key)
    }

    /// Whether `spki_der` (a certificate's SubjectPublicKeyInfo) holds this key's public half
    #[must_use]
    pub fn matches_public_key_der(&self, spki_der: &[u8]) -> bool {
        RsaPublicKey::from_public_key_der(spki_der)
            .map(|public| public == self.public_key())
            .unwrap_or(false)
    }
}
