//! Knowledge-base entries: one declared failure mode per equipment context.

use serde::{Deserialize, Deserializer, Serialize};

use super::EquipmentClassification;

/// Declared confidence level of a knowledge-base entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ConfidenceLevel {
    /// Parse the free-text level used in knowledge-base imports.
    /// Unknown text yields `None` (no level declared).
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "very high" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Declared diagnostic value of the evidence an entry asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticValue {
    Critical,
    Important,
    Useful,
    Optional,
}

impl DiagnosticValue {
    /// Default weight used when no diagnostic value is declared.
    pub const DEFAULT_WEIGHT: u32 = 15;

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "important" => Some(Self::Important),
            "useful" => Some(Self::Useful),
            "optional" => Some(Self::Optional),
            _ => None,
        }
    }

    /// Weight of missing evidence with this diagnostic value.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Critical => 30,
            Self::Important => 20,
            Self::Useful => 15,
            Self::Optional => 10,
        }
    }
}

/// One declared failure mode. Supplied as an immutable snapshot per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseEntry {
    /// Stable identifier (equipment code).
    pub id: String,
    pub classification: EquipmentClassification,
    /// Component / failure-mode label.
    pub failure_mode: String,
    /// Free-text fault signature: keywords or phrases separated by `,` `;` `|` or newlines.
    pub fault_signature: String,
    /// Free-text elimination trigger list.
    pub elimination_triggers: Option<String>,
    /// Why the entry is eliminated when a trigger is confirmed.
    pub elimination_rationale: Option<String>,
    /// Free text on import ("HIGH", "very high"); unknown text means no level.
    #[serde(deserialize_with = "level_from_text")]
    pub confidence_level: Option<ConfidenceLevel>,
    #[serde(deserialize_with = "diagnostic_value_from_text")]
    pub diagnostic_value: Option<DiagnosticValue>,
    /// Required-evidence descriptors.
    pub required_evidence: Vec<String>,
    pub investigator_questions: Option<String>,
    pub follow_up_actions: Vec<String>,
    pub active: bool,
}

impl Default for KnowledgeBaseEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            classification: EquipmentClassification::default(),
            failure_mode: String::new(),
            fault_signature: String::new(),
            elimination_triggers: None,
            elimination_rationale: None,
            confidence_level: None,
            diagnostic_value: None,
            required_evidence: Vec::new(),
            investigator_questions: None,
            follow_up_actions: Vec::new(),
            active: true,
        }
    }
}

fn level_from_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ConfidenceLevel>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(ConfidenceLevel::parse))
}

fn diagnostic_value_from_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DiagnosticValue>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(DiagnosticValue::parse))
}

/// Why an entry cannot be used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryIssue {
    /// No identifier: the entry is skipped.
    MissingId,
    /// Inactive entries should have been excluded by the caller: skipped.
    Inactive,
    /// Another entry with the same id came first: skipped.
    DuplicateId,
    /// Triggers declared without a rationale: the elimination rule is ignored.
    TriggersWithoutRationale,
}

impl KnowledgeBaseEntry {
    /// Lowercased signature keywords in declaration order, duplicates removed.
    pub fn signature_keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        for raw in self
            .fault_signature
            .split(|c: char| matches!(c, ',' | ';' | '|' | '\n'))
        {
            let keyword = raw.trim().to_lowercase();
            if !keyword.is_empty() && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        keywords
    }

    /// Normalized elimination triggers split on `delimiter`. Empty triggers are dropped.
    pub fn trigger_list(&self, delimiter: char) -> Vec<String> {
        self.elimination_triggers
            .as_deref()
            .map(|triggers| {
                triggers
                    .split(delimiter)
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn rationale(&self) -> Option<&str> {
        self.elimination_rationale
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// First problem found with this entry, if any.
    pub fn issue(&self) -> Option<EntryIssue> {
        if self.id.trim().is_empty() {
            return Some(EntryIssue::MissingId);
        }
        if !self.active {
            return Some(EntryIssue::Inactive);
        }
        let has_triggers = self
            .elimination_triggers
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if has_triggers && self.rationale().is_none() {
            return Some(EntryIssue::TriggersWithoutRationale);
        }
        None
    }

    /// Weight of this entry's missing evidence.
    pub fn diagnostic_weight(&self) -> u32 {
        self.diagnostic_value
            .map(|v| v.weight())
            .unwrap_or(DiagnosticValue::DEFAULT_WEIGHT)
    }
}
