//! RSA signing over the synthetic ECDHE server parameters (part of C7).
//!
//! Mirrors `generator::TlsSignature`: a scoped digest-sign context that is
//! fed the client random, server random, curve info, and pubkey, then
//! finalised into PKCS#1 v1.5 signature bytes. OpenSSL's `EVP_DigestSignInit`
//! / `Update` / `Final` sequence becomes the `rsa`/`sha2` crates' `Pkcs1v15Sign`
//! signer fed a pre-computed digest, since those crates do not expose an
//! incremental digest-then-sign context the way OpenSSL does.

use crate::error::{CoreError, Result};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

/// Accumulates bytes to digest, then signs the digest with an RSA private
/// key loaded from PEM. The signature algorithm advertised on the wire is
/// `rsa_pkcs1_sha512` (spec §4.7/§9) but the digest used here is SHA-256,
/// reproduced verbatim to match the upstream capture fixtures.
pub struct TlsSignature {
    key: RsaPrivateKey,
    hasher: Sha256,
}

impl TlsSignature {
    pub fn new(priv_key_pem: &str) -> Result<TlsSignature> {
        let key = RsaPrivateKey::from_pkcs8_pem(priv_key_pem)
            .map_err(|e| CoreError::LogicError(format!("invalid TLS private key: {}", e)))?;
        Ok(TlsSignature {
            key,
            hasher: Sha256::new(),
        })
    }

    pub fn digest(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    pub fn finalize(self) -> Result<Vec<u8>> {
        let digest = self.hasher.finalize();
        self.key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| CoreError::LogicError(format!("RSA signing failed: {}", e)))
    }
}
