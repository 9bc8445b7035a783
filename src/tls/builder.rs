//! Byte-exact builders for each TLS 1.2 handshake message (C7).
//!
//! Translated message-for-message from `generator::TlsBuilder` in
//! `layers/tlsbuilder.cpp`: each method opens a fresh `TlsBuffer`, writes the
//! record-layer and handshake-layer framing with `push_length`/`pop_length`,
//! and returns the finished bytes.

use super::buffer::{TlsBuffer, Width};
use super::constants::*;
use super::key_data::{TlsKeyData, TLS_KEY_DATABASE};
use super::signature::TlsSignature;
use crate::error::Result;
use crate::random::RandomSource;

/// Immutable per-flow TLS handshake state: the two randoms and the chosen
/// key-database entry, fixed once at construction (spec §3 `TlsBuilder`).
pub struct TlsBuilder {
    pub client_random: [u8; 32],
    pub server_random: [u8; 32],
    key: &'static TlsKeyData,
}

fn random_ciphersuites_except<R: RandomSource>(rng: &mut R, except: u16) -> Vec<u16> {
    let mut values: Vec<u16> = CIPHERSUITES_LIST
        .iter()
        .copied()
        .filter(|&v| v != except)
        .collect();
    rng.shuffle(&mut values);
    let count = rng.random_uint(0, values.len() as u64) as usize;
    values.truncate(count);
    values
}

impl TlsBuilder {
    pub fn key_cn(&self) -> &str {
        self.key.cn
    }

    pub fn new<R: RandomSource>(rng: &mut R) -> TlsBuilder {
        let client_random = array32(rng.random_bytes(CLIENT_RANDOM_LENGTH));
        let server_random = array32(rng.random_bytes(SERVER_RANDOM_LENGTH));
        let key = rng.random_choice(TLS_KEY_DATABASE);
        TlsBuilder {
            client_random,
            server_random,
            key,
        }
    }

    pub fn build_client_hello<R: RandomSource>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();

        buf.append_u8(CONTENT_TYPE_HANDSHAKE);
        buf.append_be16(RECORD_VERSION_1_0);
        buf.push_length(Width::Two);

        buf.append_u8(HANDSHAKE_TYPE_CLIENT_HELLO);
        buf.push_length(Width::Three);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.append(&self.client_random);
        buf.append_u8(SESSION_ID_LENGTH);
        buf.append(&rng.random_bytes(SESSION_ID_LENGTH as usize));

        buf.push_length(Width::Two);
        buf.append_be16(CIPHERSUITE_ECDHE_RSA_WITH_AES_256_GCM_SHA384);
        for suite in random_ciphersuites_except(rng, CIPHERSUITE_ECDHE_RSA_WITH_AES_256_GCM_SHA384)
        {
            buf.append_be16(suite);
        }
        buf.append_be16(CIPHERSUITE_EMPTY_RENEGOTIATION_INFO_SCSV);
        buf.pop_length(Width::Two)?;

        buf.push_length(Width::One);
        buf.append_u8(COMPRESSION_METHOD_NONE);
        buf.pop_length(Width::One)?;

        buf.push_length(Width::Two);

        // server_name
        buf.append_be16(EXTENSION_TYPE_SERVER_NAME);
        buf.push_length(Width::Two);
        buf.push_length(Width::Two);
        buf.append_u8(SERVER_NAME_TYPE_HOSTNAME);
        buf.append_be16(self.key.cn.len() as u16);
        buf.append_str(self.key.cn);
        buf.pop_length(Width::Two)?;
        buf.pop_length(Width::Two)?;

        // ec_point_formats
        buf.append_be16(EXTENSION_TYPE_EC_POINT_FORMATS);
        buf.push_length(Width::Two);
        buf.push_length(Width::One);
        buf.append_u8(EC_POINT_FORMAT_UNCOMPRESSED);
        buf.append_u8(EC_POINT_FORMAT_ANSIX962_COMPRESSED_PRIME);
        buf.append_u8(EC_POINT_FORMAT_ANSIX962_COMPRESSED_CHAR2);
        buf.pop_length(Width::One)?;
        buf.pop_length(Width::Two)?;

        // supported_groups
        buf.append_be16(EXTENSION_TYPE_SUPPORTED_GROUPS);
        buf.push_length(Width::Two);
        buf.push_length(Width::Two);
        buf.append_be16(SUPPORTED_GROUP_SECP256R1);
        buf.append_be16(SUPPORTED_GROUP_SECP521R1);
        buf.append_be16(SUPPORTED_GROUP_SECP384R1);
        buf.append_be16(SUPPORTED_GROUP_SECP256K1);
        buf.pop_length(Width::Two)?;
        buf.pop_length(Width::Two)?;

        // signature_algorithms
        buf.append_be16(EXTENSION_TYPE_SIGNATURE_ALGORITHMS);
        buf.push_length(Width::Two);
        buf.push_length(Width::Two);
        buf.append_be16(SIGNATURE_ALGORITHM_RSA_PKCS1_SHA512);
        buf.append_be16(SIGNATURE_ALGORITHM_SHA512_DSA);
        buf.pop_length(Width::Two)?;
        buf.pop_length(Width::Two)?;

        // application_layer_protocol_negotiation
        buf.append_be16(EXTENSION_TYPE_ALPN);
        buf.push_length(Width::Two);
        buf.push_length(Width::Two);
        buf.push_length(Width::One);
        buf.append_str(ALPN_H2);
        buf.pop_length(Width::One)?;
        buf.push_length(Width::One);
        buf.append_str(ALPN_HTTP_1_1);
        buf.pop_length(Width::One)?;
        buf.pop_length(Width::Two)?;
        buf.pop_length(Width::Two)?;

        buf.pop_length(Width::Two)?; // extensions length
        buf.pop_length(Width::Three)?; // handshake length
        buf.pop_length(Width::Two)?; // record length

        buf.finish()
    }

    pub fn build_server_hello(&self) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();

        buf.append_u8(CONTENT_TYPE_HANDSHAKE);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);

        buf.append_u8(HANDSHAKE_TYPE_SERVER_HELLO);
        buf.push_length(Width::Three);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.append(&self.server_random);
        buf.append_u8(0); // session id length
        buf.append_be16(CIPHERSUITE_ECDHE_RSA_WITH_AES_256_GCM_SHA384);
        buf.append_u8(COMPRESSION_METHOD_NONE);

        buf.push_length(Width::Two);

        buf.append_be16(EXTENSION_TYPE_EC_POINT_FORMATS);
        buf.push_length(Width::Two);
        buf.push_length(Width::One);
        buf.append_u8(EC_POINT_FORMAT_UNCOMPRESSED);
        buf.append_u8(EC_POINT_FORMAT_ANSIX962_COMPRESSED_PRIME);
        buf.append_u8(EC_POINT_FORMAT_ANSIX962_COMPRESSED_CHAR2);
        buf.pop_length(Width::One)?;
        buf.pop_length(Width::Two)?;

        buf.append_be16(EXTENSION_TYPE_ALPN);
        buf.push_length(Width::Two);
        buf.push_length(Width::Two);
        buf.push_length(Width::One);
        buf.append_str(ALPN_H2);
        buf.pop_length(Width::One)?;
        buf.pop_length(Width::Two)?;
        buf.pop_length(Width::Two)?;

        buf.pop_length(Width::Two)?;
        buf.pop_length(Width::Three)?;
        buf.pop_length(Width::Two)?;

        buf.finish()
    }

    pub fn build_certificate(&self) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();

        buf.append_u8(CONTENT_TYPE_HANDSHAKE);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);

        buf.append_u8(HANDSHAKE_TYPE_CERTIFICATE);
        buf.push_length(Width::Three);
        buf.push_length(Width::Three); // certificates length
        buf.push_length(Width::Three); // certificate length
        buf.append(self.key.cert_der);
        buf.pop_length(Width::Three)?;
        buf.pop_length(Width::Three)?;
        buf.pop_length(Width::Three)?;
        buf.pop_length(Width::Two)?;

        buf.finish()
    }

    pub fn build_server_key_exchange<R: RandomSource>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let pubkey = rng.random_bytes(SERVER_KEY_EXCHANGE_PUBKEY_LEN);

        let mut curve_info = TlsBuffer::new();
        curve_info.append_u8(CURVE_TYPE_NAMED_CURVE);
        curve_info.append_be16(NAMED_CURVE_SECP256R1);
        let curve_info_bytes = curve_info.finish()?;

        let mut sig = TlsSignature::new(self.key.priv_key_pem)?;
        sig.digest(&self.client_random);
        sig.digest(&self.server_random);
        sig.digest(&curve_info_bytes);
        sig.digest(&pubkey);
        let signature = sig.finalize()?;

        let mut buf = TlsBuffer::new();
        buf.append_u8(CONTENT_TYPE_HANDSHAKE);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);

        buf.append_u8(HANDSHAKE_TYPE_SERVER_KEY_EXCHANGE);
        buf.push_length(Width::Three);
        buf.append(&curve_info_bytes);
        buf.append_u8(pubkey.len() as u8);
        buf.append(&pubkey);
        buf.append_be16(SIGNATURE_ALGORITHM_RSA_PKCS1_SHA512);
        buf.append_be16(signature.len() as u16);
        buf.append(&signature);
        buf.pop_length(Width::Three)?;
        buf.pop_length(Width::Two)?;

        buf.finish()
    }

    pub fn build_server_hello_done(&self) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();
        buf.append_u8(CONTENT_TYPE_HANDSHAKE);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);
        buf.append_u8(HANDSHAKE_TYPE_SERVER_HELLO_DONE);
        buf.append_be24(0);
        buf.pop_length(Width::Two)?;
        buf.finish()
    }

    pub fn build_client_key_exchange<R: RandomSource>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();
        buf.append_u8(CONTENT_TYPE_HANDSHAKE);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);
        buf.append_u8(HANDSHAKE_TYPE_CLIENT_KEY_EXCHANGE);
        buf.push_length(Width::Three);
        buf.push_length(Width::One);
        buf.append(&rng.random_bytes(CLIENT_KEY_EXCHANGE_PUBKEY_LEN));
        buf.pop_length(Width::One)?;
        buf.pop_length(Width::Three)?;
        buf.pop_length(Width::Two)?;
        buf.finish()
    }

    pub fn build_change_cipher_spec(&self) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();
        buf.append_u8(CONTENT_TYPE_CHANGE_CIPHER_SPEC);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);
        buf.append_u8(1);
        buf.pop_length(Width::Two)?;
        buf.finish()
    }

    pub fn build_encrypted_handshake<R: RandomSource>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();
        buf.append_u8(CONTENT_TYPE_HANDSHAKE);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);
        buf.append(&rng.random_bytes(ENCRYPTED_HANDSHAKE_OPAQUE_LEN));
        buf.pop_length(Width::Two)?;
        buf.finish()
    }

    /// Builds an `ApplicationData` record whose total on-wire length equals
    /// `record_length`. Fails with a logic error if `record_length` is too
    /// small to hold the record-layer framing (5 bytes).
    pub fn build_application_data<R: RandomSource>(
        &self,
        rng: &mut R,
        record_length: usize,
    ) -> Result<Vec<u8>> {
        let mut buf = TlsBuffer::new();
        buf.append_u8(CONTENT_TYPE_APPLICATION_DATA);
        buf.append_be16(RECORD_VERSION_1_2);
        buf.push_length(Width::Two);

        if buf.len() > record_length {
            return Err(crate::error::CoreError::LogicError(format!(
                "record_length must be at least {}",
                buf.len()
            )));
        }
        buf.append(&rng.random_bytes(record_length - buf.len()));
        buf.pop_length(Width::Two)?;

        buf.finish()
    }
}

fn array32(bytes: Vec<u8>) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    out
}
