//! Thin named-interface types for collaborators that live outside this
//! crate's core (C13): the CSV flow-record shape, the wire form of an IP
//! address used by the flow table, and the statistical model's segment
//! closed sum type. No loader, joiner, or matching algorithm is implemented
//! here — those belong to the out-of-scope statistical validator.

pub mod flow;
pub mod ip_addr;
pub mod sm_segment;

pub use flow::FlowRecord;
pub use ip_addr::IpAddr128;
pub use sm_segment::SmSegment;
