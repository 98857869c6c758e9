//! Trait Score Accumulator — two independent five-dimensional score vectors.
//!
//! Ratchet semantics: `score = min(score + ratio * increment, 1.0)`. A strong
//! answer permanently credits a trait; scores never decrease within a session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interview::signals::LexicalSignals;

/// Per-turn increment applied to intelligence dimensions.
pub const INTELLIGENCE_INCREMENT: f64 = 0.15;
/// Per-turn increment applied to personality dimensions.
pub const PERSONALITY_INCREMENT: f64 = 0.12;

fn ratchet(score: f64, hit_ratio: f64, increment: f64) -> f64 {
    (score + hit_ratio * increment).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceScores {
    pub analytical: f64,
    pub emotional: f64,
    pub creative: f64,
    pub strategic: f64,
    pub execution: f64,
}

impl IntelligenceScores {
    pub fn apply(&mut self, signals: &LexicalSignals) {
        self.analytical = ratchet(self.analytical, signals.analytical, INTELLIGENCE_INCREMENT);
        self.emotional = ratchet(self.emotional, signals.emotional, INTELLIGENCE_INCREMENT);
        self.creative = ratchet(self.creative, signals.creative, INTELLIGENCE_INCREMENT);
        self.strategic = ratchet(self.strategic, signals.strategic, INTELLIGENCE_INCREMENT);
        self.execution = ratchet(self.execution, signals.execution, INTELLIGENCE_INCREMENT);
    }

    /// Highest-scoring dimension; ties break toward the fixed field order.
    pub fn top_dimension(&self) -> (&'static str, f64) {
        let dims = [
            ("analytical", self.analytical),
            ("emotional", self.emotional),
            ("creative", self.creative),
            ("strategic", self.strategic),
            ("execution", self.execution),
        ];
        dims.into_iter()
            .reduce(|best, d| if d.1 > best.1 { d } else { best })
            .unwrap_or(("analytical", 0.0))
    }

    pub fn as_entries(&self) -> [(&'static str, f64); 5] {
        [
            ("analytical", self.analytical),
            ("emotional", self.emotional),
            ("creative", self.creative),
            ("strategic", self.strategic),
            ("execution", self.execution),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub leadership: f64,
    pub collaboration: f64,
    pub innovation: f64,
    pub resilience: f64,
    pub communication: f64,
}

impl PersonalityTraits {
    pub fn apply(&mut self, signals: &LexicalSignals) {
        self.leadership = ratchet(self.leadership, signals.leadership, PERSONALITY_INCREMENT);
        self.collaboration =
            ratchet(self.collaboration, signals.collaboration, PERSONALITY_INCREMENT);
        self.innovation = ratchet(self.innovation, signals.innovation, PERSONALITY_INCREMENT);
        self.resilience = ratchet(self.resilience, signals.resilience, PERSONALITY_INCREMENT);
        self.communication =
            ratchet(self.communication, signals.communication, PERSONALITY_INCREMENT);
    }

    /// Highest-scoring trait; ties break toward the fixed field order.
    pub fn top_dimension(&self) -> (&'static str, f64) {
        let dims = self.as_entries();
        dims.into_iter()
            .reduce(|best, d| if d.1 > best.1 { d } else { best })
            .unwrap_or(("leadership", 0.0))
    }

    pub fn as_entries(&self) -> [(&'static str, f64); 5] {
        [
            ("leadership", self.leadership),
            ("collaboration", self.collaboration),
            ("innovation", self.innovation),
            ("resilience", self.resilience),
            ("communication", self.communication),
        ]
    }
}

/// Both vectors flattened into a deterministic category → score map, as the
/// live preview UI consumes them.
pub fn progress_scores(
    intelligence: &IntelligenceScores,
    personality: &PersonalityTraits,
) -> BTreeMap<String, f64> {
    intelligence
        .as_entries()
        .into_iter()
        .chain(personality.as_entries())
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
