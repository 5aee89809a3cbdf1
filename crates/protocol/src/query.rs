use crate::depth::Depth;
use crate::error::{ProtocolError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Selection that drives one lineage fetch.
///
/// Treated as a value object: a retry reuses the same query unchanged.
/// Decoding goes through [`LineageQuery::new`], so blank fields are rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub struct LineageQuery {
    pub entity_name: String,
    pub entity_type: String,
    #[schemars(with = "String")]
    pub depth: Depth,
}

impl LineageQuery {
    pub fn new(
        entity_name: impl Into<String>,
        entity_type: impl Into<String>,
        depth: Depth,
    ) -> Result<Self> {
        let entity_name = entity_name.into();
        let entity_type = entity_type.into();
        if entity_name.trim().is_empty() {
            return Err(ProtocolError::EmptyField("name"));
        }
        if entity_type.trim().is_empty() {
            return Err(ProtocolError::EmptyField("type"));
        }
        Ok(Self {
            entity_name,
            entity_type,
            depth,
        })
    }

    /// Same entity, different traversal depth.
    pub fn with_depth(&self, depth: Depth) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }

    pub fn same_entity(&self, other: &Self) -> bool {
        self.entity_name == other.entity_name && self.entity_type == other.entity_type
    }
}

impl<'de> Deserialize<'de> for LineageQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            entity_name: String,
            entity_type: String,
            depth: Depth,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.entity_name, raw.entity_type, raw.depth).map_err(serde::de::Error::custom)
    }
}
