//! Closed sum type mirroring the statistical model's `SMSegment::Contains`
//! virtual dispatch (§9). Only the shape and the `Complement`-is-opaque
//! contract are named here; subnet and time-window matching belong to the
//! out-of-scope statistical validator.

use crate::error::{CoreError, Result};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SmSegment {
    Subnet,
    Time,
    All,
    /// Marker for "anything not otherwise matched"; never evaluated.
    Complement,
}

impl SmSegment {
    /// Named interface only. `Complement` has no representable matching
    /// rule in this core and must never be asked to evaluate.
    pub fn contains(&self) -> Result<bool> {
        match self {
            SmSegment::Complement => Err(CoreError::LogicError(
                "SmSegment::Complement must never be evaluated".to_string(),
            )),
            _ => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_raises_logic_error() {
        assert!(SmSegment::Complement.contains().is_err());
    }

    #[test]
    fn non_complement_variants_evaluate() {
        assert!(SmSegment::Subnet.contains().unwrap());
        assert!(SmSegment::Time.contains().unwrap());
        assert!(SmSegment::All.contains().unwrap());
    }
}
