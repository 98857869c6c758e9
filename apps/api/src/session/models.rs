//! Session-owned state: the conversation, the accumulated profile, and the
//! two trait score vectors. Owned exclusively by the `SessionStore`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::phase::Phase;
use crate::interview::questions::{QuestionCategory, QuestionSelector};
use crate::interview::scores::{IntelligenceScores, PersonalityTraits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Early,
    Mid,
    Senior,
    Executive,
}

impl Seniority {
    pub fn label(self) -> &'static str {
        match self {
            Seniority::Early => "Early-career",
            Seniority::Mid => "Mid-level",
            Seniority::Senior => "Senior",
            Seniority::Executive => "Executive",
        }
    }
}

/// One accepted user turn. Append-only; never rolled back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub text: String,
    pub phase: Phase,
    pub category: Option<QuestionCategory>,
    pub timestamp: DateTime<Utc>,
}

/// Accumulated facts about the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub target_role: String,
    pub seniority: Option<Seniority>,
    pub industry: Option<String>,
    pub responses: Vec<ResponseRecord>,
}

pub const DEFAULT_TARGET_ROLE: &str = "Professional";

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: None,
            target_role: DEFAULT_TARGET_ROLE.to_string(),
            seniority: None,
            industry: None,
            responses: Vec::new(),
        }
    }
}

impl Profile {
    /// Responses recorded during the story phases — the synthesis source for
    /// experience entries.
    pub fn story_responses(&self) -> impl Iterator<Item = &ResponseRecord> {
        self.responses.iter().filter(|r| r.phase.is_story_phase())
    }
}

/// Full per-session conversation state. One logical thread of control per
/// session; the store's per-session lock enforces turn serialization.
#[derive(Debug)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: String,
    pub session_type: String,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub question_count_in_phase: u32,
    pub follow_up_depth: u32,
    pub last_question: Option<String>,
    pub last_category: Option<QuestionCategory>,
    pub profile: Profile,
    pub intelligence: IntelligenceScores,
    pub personality: PersonalityTraits,
    pub selector: QuestionSelector,
}

impl Session {
    pub fn new(user_id: String, session_type: String, target_role: Option<String>, seed: u64) -> Self {
        let mut profile = Profile::default();
        if let Some(role) = target_role {
            if !role.trim().is_empty() {
                profile.target_role = role;
            }
        }
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            session_type,
            created_at: Utc::now(),
            phase: Phase::Introduction,
            question_count_in_phase: 0,
            follow_up_depth: 0,
            last_question: None,
            last_category: None,
            profile,
            intelligence: IntelligenceScores::default(),
            personality: PersonalityTraits::default(),
            selector: QuestionSelector::new(seed),
        }
    }
}
