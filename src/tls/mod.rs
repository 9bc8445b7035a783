//! TLS 1.2 handshake synthesis: the length-stack buffer (C6), the message
//! builders (C7) and the flow-plan adapter (C8).

pub mod buffer;
pub mod builder;
pub mod constants;
pub mod flow;
pub mod key_data;
pub mod signature;

pub use buffer::{TlsBuffer, Width};
pub use builder::TlsBuilder;
pub use flow::Tls;
pub use key_data::{TlsKeyData, TLS_KEY_DATABASE};
pub use signature::TlsSignature;
