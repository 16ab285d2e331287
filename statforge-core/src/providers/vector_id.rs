//! Statistics Canada vector identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric series identifier. Written `v41690973` by humans, sent as `41690973`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid vector id '{0}': expected digits with an optional 'v' prefix")]
pub struct VectorIdError(pub String);

impl FromStr for VectorId {
    type Err = VectorIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VectorIdError(s.to_string()));
        }
        digits
            .parse()
            .map(VectorId)
            .map_err(|_| VectorIdError(s.to_string()))
    }
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Split comma-separated user input into vector ids, skipping blank entries.
pub fn parse_vector_list(input: &str) -> Result<Vec<VectorId>, VectorIdError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_prefixed_and_bare() {
        assert_eq!("v41690973".parse::<VectorId>().unwrap(), VectorId(41690973));
        assert_eq!(" 41690914 ".parse::<VectorId>().unwrap(), VectorId(41690914));
        assert_eq!("V1".parse::<VectorId>().unwrap(), VectorId(1));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "v", "vv1", "v-1", "abc", "1.5", "v 1"] {
            assert!(bad.parse::<VectorId>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&VectorId(41690973)).unwrap();
        assert_eq!(json, "41690973");
        assert_eq!(VectorId(41690973).to_string(), "v41690973");
    }

    #[test]
    fn list_skips_blanks() {
        let ids = parse_vector_list("v41690973, ,v41690914,").unwrap();
        assert_eq!(ids, vec![VectorId(41690973), VectorId(41690914)]);
        assert!(parse_vector_list(" , ").unwrap().is_empty());
        assert!(parse_vector_list("v1, nope").is_err());
    }

    proptest! {
        #[test]
        fn display_round_trips(n in 0u64..u64::MAX) {
            let id = VectorId(n);
            prop_assert_eq!(id.to_string().parse::<VectorId>().unwrap(), id);
        }
    }
}
