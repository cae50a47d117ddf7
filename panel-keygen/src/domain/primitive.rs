//! Ports for the cryptographic primitives behind key-material generation.
//!
//! The application layer only talks to these traits; the concrete curve and
//! KEM implementations live in `infrastructure`.

use async_trait::async_trait;
use zeroize::Zeroizing;

/// A private key whose decoded length does not match the curve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid private key: expected {expected} bytes, got {actual}")]
pub struct InvalidKeyError {
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum KeyGenerationError {
    /// The primitive could not be initialised or did not produce a key.
    #[error("key encapsulation primitive unavailable: {0}")]
    Unavailable(String),

    /// The requested usages are not valid for a key encapsulation key pair.
    #[error("unsupported key usages: {0}")]
    Usage(String),

    /// The key exists but refused to export in the requested format.
    #[error("key export failed: {0}")]
    Export(String),
}

/// Diffie-Hellman style curve used for connection profile key pairs.
pub trait KeyAgreementCurve: Send + Sync {
    fn name(&self) -> &'static str;

    /// Length in bytes of a raw private key on this curve.
    fn private_key_len(&self) -> usize;

    /// Draws a fresh private key from a cryptographically secure source.
    fn generate_private_key(&self) -> Zeroizing<Vec<u8>>;

    /// Scalar-multiplies `private_key` with the curve base point.
    fn derive_public_key(&self, private_key: &[u8]) -> Result<Vec<u8>, InvalidKeyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    Encapsulate,
    Decapsulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyExportFormat {
    /// Encoded encapsulation (public) key.
    RawPublic,
    /// The seed the decapsulation key expands from.
    RawSeed,
}

/// Key encapsulation mechanism, exposed as `generate_key_pair` / `export_key`
/// so callers can swap in a mock or a different backend.
#[async_trait]
pub trait EncapsulationPrimitive: Send + Sync {
    type KeyPair: Send + Sync;

    fn algorithm(&self) -> &'static str;

    async fn generate_key_pair(
        &self,
        usages: &[KeyUsage],
    ) -> Result<Self::KeyPair, KeyGenerationError>;

    fn export_key(
        &self,
        key_pair: &Self::KeyPair,
        format: KeyExportFormat,
    ) -> Result<Zeroizing<Vec<u8>>, KeyGenerationError>;
}
