use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::define_index_newtype;

define_index_newtype!(LocationIdx, Location);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LocationKind {
    /// A warehouse where ordered products originate.
    Center,
    /// The relay point every leg between two centers passes through.
    Hub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    external_id: String,
    kind: LocationKind,
}

impl Location {
    pub fn center(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            kind: LocationKind::Center,
        }
    }

    pub fn hub(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            kind: LocationKind::Hub,
        }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn is_center(&self) -> bool {
        self.kind == LocationKind::Center
    }

    pub fn is_hub(&self) -> bool {
        self.kind == LocationKind::Hub
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.external_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_kinds() {
        let center = Location::center("C1");
        let hub = Location::hub("L1");

        assert!(center.is_center());
        assert!(!center.is_hub());
        assert!(hub.is_hub());
        assert_eq!(hub.kind(), LocationKind::Hub);
        assert_eq!(center.to_string(), "C1");
    }
}
