//! Wire constants for the synthesized TLS 1.2 handshake.
//!
//! Values and names follow `layers/tlsbuilder.cpp`'s inline comments in the
//! original generator; there is no single `tlsconstants.h` in the retrieved
//! source tree, so these are reconstructed from their call sites.

pub const CONTENT_TYPE_CHANGE_CIPHER_SPEC: u8 = 0x14;
pub const CONTENT_TYPE_HANDSHAKE: u8 = 0x16;
pub const CONTENT_TYPE_APPLICATION_DATA: u8 = 0x17;

pub const RECORD_VERSION_1_0: u16 = 0x0301;
pub const RECORD_VERSION_1_2: u16 = 0x0303;

pub const HANDSHAKE_TYPE_CLIENT_HELLO: u8 = 0x01;
pub const HANDSHAKE_TYPE_SERVER_HELLO: u8 = 0x02;
pub const HANDSHAKE_TYPE_CERTIFICATE: u8 = 0x0B;
pub const HANDSHAKE_TYPE_SERVER_KEY_EXCHANGE: u8 = 0x0C;
pub const HANDSHAKE_TYPE_SERVER_HELLO_DONE: u8 = 0x0E;
pub const HANDSHAKE_TYPE_CLIENT_KEY_EXCHANGE: u8 = 0x10;

pub const SESSION_ID_LENGTH: u8 = 32;
pub const CLIENT_RANDOM_LENGTH: usize = 32;
pub const SERVER_RANDOM_LENGTH: usize = 32;

pub const CIPHERSUITE_ECDHE_RSA_WITH_AES_256_GCM_SHA384: u16 = 0xC0_30;
pub const CIPHERSUITE_EMPTY_RENEGOTIATION_INFO_SCSV: u16 = 0x00_FF;

/// The full candidate cipher-suite list `ClientHello` shuffles a random
/// subset of, after the mandatory first entry above and the SCSV terminator.
pub const CIPHERSUITES_LIST: &[u16] = &[
    CIPHERSUITE_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
    0xC0_2F, // ECDHE_RSA_WITH_AES_128_GCM_SHA256
    0xC0_2C, // ECDHE_ECDSA_WITH_AES_256_GCM_SHA384
    0xC0_2B, // ECDHE_ECDSA_WITH_AES_128_GCM_SHA256
    0xC0_28, // ECDHE_RSA_WITH_AES_256_CBC_SHA384
    0xC0_27, // ECDHE_RSA_WITH_AES_128_CBC_SHA256
    0xC0_14, // ECDHE_RSA_WITH_AES_256_CBC_SHA
    0xC0_13, // ECDHE_RSA_WITH_AES_128_CBC_SHA
    0x00_9F, // DHE_RSA_WITH_AES_256_GCM_SHA384
    0x00_9E, // DHE_RSA_WITH_AES_128_GCM_SHA256
    0x00_3D, // RSA_WITH_AES_256_CBC_SHA256
    0x00_3C, // RSA_WITH_AES_128_CBC_SHA256
    0x00_35, // RSA_WITH_AES_256_CBC_SHA
    0x00_2F, // RSA_WITH_AES_128_CBC_SHA
];

pub const COMPRESSION_METHOD_NONE: u8 = 0;

pub const EXTENSION_TYPE_SERVER_NAME: u16 = 0;
pub const EXTENSION_TYPE_EC_POINT_FORMATS: u16 = 11;
pub const EXTENSION_TYPE_SUPPORTED_GROUPS: u16 = 10;
pub const EXTENSION_TYPE_SIGNATURE_ALGORITHMS: u16 = 13;
pub const EXTENSION_TYPE_ALPN: u16 = 16;

pub const SERVER_NAME_TYPE_HOSTNAME: u8 = 0;

pub const EC_POINT_FORMAT_UNCOMPRESSED: u8 = 0;
pub const EC_POINT_FORMAT_ANSIX962_COMPRESSED_PRIME: u8 = 1;
pub const EC_POINT_FORMAT_ANSIX962_COMPRESSED_CHAR2: u8 = 2;

pub const SUPPORTED_GROUP_SECP256K1: u16 = 0x0016;
pub const SUPPORTED_GROUP_SECP256R1: u16 = 0x0017;
pub const SUPPORTED_GROUP_SECP384R1: u16 = 0x0018;
pub const SUPPORTED_GROUP_SECP521R1: u16 = 0x0019;

/// Advertised in `signature_algorithms` and again on the `ServerKeyExchange`
/// signature itself. The digest actually used is SHA-256 — see
/// `tls::signature` and spec §9's open question; this is intentional.
pub const SIGNATURE_ALGORITHM_RSA_PKCS1_SHA512: u16 = 0x0601;
pub const SIGNATURE_ALGORITHM_SHA512_DSA: u16 = 0x0602;

pub const ALPN_H2: &str = "h2";
pub const ALPN_HTTP_1_1: &str = "http/1.1";

pub const CURVE_TYPE_NAMED_CURVE: u8 = 0x03;
pub const NAMED_CURVE_SECP256R1: u16 = 0x0017;

pub const SERVER_KEY_EXCHANGE_PUBKEY_LEN: usize = 65;
pub const CLIENT_KEY_EXCHANGE_PUBKEY_LEN: usize = 65;
pub const ENCRYPTED_HANDSHAKE_OPAQUE_LEN: usize = 40;

/// Packets below this size are not worth segmenting; handshake messages are
/// packed into TCP-sized chunks no smaller than this.
pub const PACKET_SPLIT_THRESHOLD: usize = 256;

/// Minimum viable TLS record: 5 bytes of record-layer framing, zero-length
/// payload.
pub const MIN_APPLICATION_DATA_PKT_LEN: u64 = 5;
