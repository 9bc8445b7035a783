use thiserror::Error;

/// The single error type produced anywhere in the core: the dissector, the
/// PacketInfo extractor, the TLS buffer/builder, and the peripheral
/// config/CLI layer all return `Result<T, CoreError>`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Any dissector invariant violation: short input, a failed `is_valid`
    /// check, an unknown EtherType/LinkType, an unknown MPLS-next nibble, or
    /// an exceeded tunnelling depth cap.
    #[error("malformed packet: {0}")]
    MalformedPacket(String),

    /// `PacketInfo` extraction could not locate an IPv4/IPv6 layer.
    #[error("structure missing: {0}")]
    StructureMissing(String),

    /// Builder misuse: a `record_length` too small to hold a TLS record
    /// header, a length region that overflowed its placeholder width, or a
    /// `pop_length` against an empty stack.
    #[error("logic error: {0}")]
    LogicError(String),

    /// Peripheral: invalid ranges, overlapping intervals, zero total
    /// probability in config-adjacent plumbing.
    #[error("config error: {0}")]
    ConfigError(String),

    /// Peripheral: file open/map/stat failures, forwarded from `std::io`.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn malformed_packet_display_contains_message() {
        let err = CoreError::MalformedPacket("unexpected end of packet".to_string());
        assert_eq!(err.to_string(), "malformed packet: unexpected end of packet");
    }

    #[test]
    fn structure_missing_display_contains_message() {
        let err = CoreError::StructureMissing("unable to locate IPv4/IPv6 layer".to_string());
        assert_eq!(
            err.to_string(),
            "structure missing: unable to locate IPv4/IPv6 layer"
        );
    }

    #[test]
    fn logic_error_display_contains_message() {
        let err = CoreError::LogicError("pop_length against an empty stack".to_string());
        assert_eq!(
            err.to_string(),
            "logic error: pop_length against an empty stack"
        );
    }

    #[test]
    fn config_error_display_contains_message() {
        let err = CoreError::ConfigError("missing required argument --profiles".to_string());
        assert_eq!(
            err.to_string(),
            "config error: missing required argument --profiles"
        );
    }

    #[test]
    fn io_error_forwards_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io_err.into();
        assert!(err.source().is_some());
        assert_eq!(err.source().unwrap().to_string(), "no such file");
    }
}
