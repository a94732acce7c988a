//! Targeted follow-up questions and recommended actions for the investigator.

use faultline_core::models::{EvidenceGap, KnowledgeBaseEntry};

const MAX_QUESTIONS: usize = 5;
const MAX_ACTIONS: usize = 5;
const MAX_GAPS_IN_ACTION: usize = 3;

/// Coarse question category of a failure-mode label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    Alignment,
    Fatigue,
    Lubrication,
    Vibration,
    Thermal,
    Degradation,
    General,
}

impl QuestionCategory {
    pub fn of(failure_mode: &str) -> Self {
        let label = failure_mode.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| label.contains(n));
        if has(&["misalign"]) {
            Self::Alignment
        } else if has(&["fatigue"]) {
            Self::Fatigue
        } else if has(&["lubric", "oil"]) {
            Self::Lubrication
        } else if has(&["vibrat"]) {
            Self::Vibration
        } else if has(&["thermal", "temp"]) {
            Self::Thermal
        } else if has(&["corros", "wear"]) {
            Self::Degradation
        } else {
            Self::General
        }
    }

    /// Fixed question for the category; `None` for general.
    pub fn question(&self) -> Option<&'static str> {
        match self {
            Self::Alignment => Some("Was there any recorded misalignment during recent maintenance or operation?"),
            Self::Fatigue => Some("Was the equipment exposed to cyclic loading or stress variations?"),
            Self::Lubrication => Some("Were there any lubrication issues or oil analysis abnormalities?"),
            Self::Vibration => Some("Did vibration monitoring show any abnormal patterns before failure?"),
            Self::Thermal => Some("Were there any temperature excursions or thermal cycling events?"),
            Self::Degradation => Some("Was there evidence of corrosion, wear, or material degradation?"),
            Self::General => None,
        }
    }
}

/// Questions for the surviving entries, in candidate order.
///
/// Each category asks its fixed question once; general entries contribute
/// their own investigator questions (split on `?`, `;` or newlines).
pub fn targeted_questions(surviving: &[&KnowledgeBaseEntry]) -> Vec<String> {
    let mut questions: Vec<String> = Vec::new();
    for entry in surviving {
        let category = QuestionCategory::of(&entry.failure_mode);
        let asked: Vec<String> = match category.question() {
            Some(q) => vec![q.to_string()],
            None => investigator_questions(entry),
        };
        for q in asked {
            if questions.len() == MAX_QUESTIONS {
                return questions;
            }
            if !questions.contains(&q) {
                questions.push(q);
            }
        }
    }
    questions
}

fn investigator_questions(entry: &KnowledgeBaseEntry) -> Vec<String> {
    let Some(raw) = entry.investigator_questions.as_deref() else {
        return Vec::new();
    };
    raw.split_inclusive(|c: char| matches!(c, '?' | ';' | '\n'))
        .map(|q| q.trim().trim_end_matches(|c: char| c == ';' || c == '\n').trim())
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect()
}

/// Follow-up actions of the surviving entries plus one line for the top gaps.
pub fn recommended_actions(surviving: &[&KnowledgeBaseEntry], gaps: &[EvidenceGap]) -> Vec<String> {
    let mut actions: Vec<String> = Vec::new();
    let mut push = |action: String| {
        if actions.len() < MAX_ACTIONS && !actions.contains(&action) {
            actions.push(action);
        }
    };

    if !gaps.is_empty() {
        let top: Vec<&str> = gaps
            .iter()
            .take(MAX_GAPS_IN_ACTION)
            .map(|g| g.descriptor.as_str())
            .collect();
        push(format!("Collect missing evidence: {}", top.join(", ")));
    }
    for entry in surviving {
        for action in &entry.follow_up_actions {
            let action = action.trim();
            if !action.is_empty() {
                push(action.to_string());
            }
        }
    }
    actions
}
