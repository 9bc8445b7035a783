//! 128-bit little-byte-order IP address container matching the flow table's
//! wire form (§6): IPv4 addresses are stored IPv4-mapped.

use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct IpAddr128 {
    bytes: [u8; 16],
}

impl IpAddr128 {
    /// Stores `addr` as `::ffff:a.b.c.d`: seven zero bytes, then `0x00 0xff
    /// 0xff`, then the four address octets.
    pub fn from_ipv4(addr: Ipv4Addr) -> IpAddr128 {
        let mut bytes = [0u8; 16];
        bytes[10] = 0xff;
        bytes[11] = 0xff;
        bytes[12..16].copy_from_slice(&addr.octets());
        IpAddr128 { bytes }
    }

    pub fn from_ipv6(addr: Ipv6Addr) -> IpAddr128 {
        IpAddr128 {
            bytes: addr.octets(),
        }
    }

    /// Recovers a `std::net::IpAddr`, reporting an IPv4 address whenever the
    /// `::ffff:0:0/96` mapped prefix is present.
    pub fn to_std(self) -> std::net::IpAddr {
        if self.bytes[..10] == [0u8; 10] && self.bytes[10] == 0xff && self.bytes[11] == 0xff {
            std::net::IpAddr::V4(Ipv4Addr::new(
                self.bytes[12],
                self.bytes[13],
                self.bytes[14],
                self.bytes[15],
            ))
        } else {
            std::net::IpAddr::V6(Ipv6Addr::from(self.bytes))
        }
    }
}
