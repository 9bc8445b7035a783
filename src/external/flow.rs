//! Single-record CSV parse for the flow table (§6). Reading the file,
//! validating the header line, and joining records against a reference
//! capture belong to the out-of-scope statistical validator; this is only
//! the named interface one record's worth of fields conforms to.

use crate::error::{CoreError, Result};

pub const HEADER_LINE: &str =
    "START_TIME,END_TIME,PROTOCOL,SRC_IP,DST_IP,SRC_PORT,DST_PORT,PACKETS,BYTES";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlowRecord {
    pub start_time: u64,
    pub end_time: u64,
    pub protocol: u16,
    pub src_ip: String,
    pub dst_ip: String,
    pub src_port: u16,
    pub dst_port: u16,
    pub packets: u64,
    pub bytes: u64,
}

impl FlowRecord {
    /// Parses one comma-separated record line (no trailing newline, no
    /// header-line handling) into its nine typed fields.
    pub fn parse(line: &str) -> Result<FlowRecord> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 9 {
            return Err(CoreError::MalformedPacket(format!(
                "expected 9 CSV fields, got {}",
                fields.len()
            )));
        }

        let parse_u64 = |s: &str, name: &str| -> Result<u64> {
            s.parse::<u64>()
                .map_err(|_| CoreError::MalformedPacket(format!("invalid {name}: {s}")))
        };
        let parse_u16 = |s: &str, name: &str| -> Result<u16> {
            s.parse::<u16>()
                .map_err(|_| CoreError::MalformedPacket(format!("invalid {name}: {s}")))
        };

        let record = FlowRecord {
            start_time: parse_u64(fields[0], "start_time")?,
            end_time: parse_u64(fields[1], "end_time")?,
            protocol: parse_u16(fields[2], "protocol")?,
            src_ip: fields[3].to_string(),
            dst_ip: fields[4].to_string(),
            src_port: parse_u16(fields[5], "src_port")?,
            dst_port: parse_u16(fields[6], "dst_port")?,
            packets: parse_u64(fields[7], "packets")?,
            bytes: parse_u64(fields[8], "bytes")?,
        };

        if record.packets == 0 || record.bytes == 0 {
            return Err(CoreError::MalformedPacket(
                "packets and bytes must be non-zero".to_string(),
            ));
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_record() {
        let line = "1000,2000,6,10.0.0.1,10.0.0.2,443,51234,12,3456";
        let record = FlowRecord::parse(line).unwrap();
        assert_eq!(record.start_time, 1000);
        assert_eq!(record.protocol, 6);
        assert_eq!(record.src_ip, "10.0.0.1");
        assert_eq!(record.dst_port, 51234);
        assert_eq!(record.bytes, 3456);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(FlowRecord::parse("1000,2000,6").is_err());
    }

    #[test]
    fn rejects_zero_packets() {
        let line = "1000,2000,6,10.0.0.1,10.0.0.2,443,51234,0,3456";
        assert!(FlowRecord::parse(line).is_err());
    }

    #[test]
    fn header_line_matches_the_documented_shape() {
        assert_eq!(
            HEADER_LINE,
            "START_TIME,END_TIME,PROTOCOL,SRC_IP,DST_IP,SRC_PORT,DST_PORT,PACKETS,BYTES"
        );
    }
}
