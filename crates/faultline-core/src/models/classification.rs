//! Equipment group/type/subtype triple shared by knowledge-base entries,
//! incidents, and historical patterns.

use serde::{Deserialize, Serialize};

/// Equipment taxonomy position. Any level may be absent or unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentClassification {
    pub group: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub subtype: Option<String>,
}

impl EquipmentClassification {
    pub fn new(
        group: impl Into<String>,
        equipment_type: impl Into<String>,
        subtype: impl Into<String>,
    ) -> Self {
        Self {
            group: Some(group.into()),
            equipment_type: Some(equipment_type.into()),
            subtype: Some(subtype.into()),
        }
    }

    /// Group, trimmed; `None` when absent or blank.
    pub fn group(&self) -> Option<&str> {
        resolved(&self.group)
    }

    pub fn equipment_type(&self) -> Option<&str> {
        resolved(&self.equipment_type)
    }

    pub fn subtype(&self) -> Option<&str> {
        resolved(&self.subtype)
    }

    /// Per-level exact match (case-insensitive). Unresolved levels never match.
    pub fn level_matches(&self, other: &Self) -> (bool, bool, bool) {
        (
            same_level(self.group(), other.group()),
            same_level(self.equipment_type(), other.equipment_type()),
            same_level(self.subtype(), other.subtype()),
        )
    }

    /// Stable `group/type/subtype` rendering, `-` for unresolved levels.
    pub fn canonical_key(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group().unwrap_or("-").to_lowercase(),
            self.equipment_type().unwrap_or("-").to_lowercase(),
            self.subtype().unwrap_or("-").to_lowercase(),
        )
    }
}

fn resolved(level: &Option<String>) -> Option<&str> {
    level.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn same_level(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
