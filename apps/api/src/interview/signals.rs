//! Lexical Signal Extractor — pure text → per-category hit ratios.
//!
//! Tokenizes a message (lowercase, whitespace split, punctuation trimmed) and
//! counts distinct membership against ten fixed keyword families, five per
//! score vector. Ratios are normalized by family size, so each lands in [0,1].

use std::collections::HashSet;

const ANALYTICAL_KEYWORDS: &[&str] = &[
    "analyzed", "analysis", "data", "metrics", "measured", "evaluated",
    "research", "revenue", "roi", "optimized",
];

const EMOTIONAL_KEYWORDS: &[&str] = &[
    "empathy", "listened", "understood", "supported", "morale", "trust",
    "feelings", "rapport", "coached", "cared",
];

const CREATIVE_KEYWORDS: &[&str] = &[
    "designed", "created", "invented", "brainstormed", "novel", "prototype",
    "reimagined", "original", "creative", "concept",
];

const STRATEGIC_KEYWORDS: &[&str] = &[
    "strategy", "strategic", "roadmap", "vision", "prioritized", "planned",
    "aligned", "positioning", "forecast", "tradeoffs",
];

const EXECUTION_KEYWORDS: &[&str] = &[
    "delivered", "shipped", "launched", "completed", "executed", "implemented",
    "achieved", "increased", "improved", "reduced",
];

const LEADERSHIP_KEYWORDS: &[&str] = &[
    "led", "managed", "directed", "coordinated", "mentored", "owned",
    "spearheaded", "initiative", "delegated", "hired",
];

const COLLABORATION_KEYWORDS: &[&str] = &[
    "team", "together", "partnered", "collaborated", "stakeholders",
    "cross-functional", "we", "pairing", "consensus", "shared",
];

const INNOVATION_KEYWORDS: &[&str] = &[
    "innovative", "innovation", "experiment", "disrupt", "modernized",
    "automated", "pioneered", "transformed", "breakthrough", "iterate",
];

const RESILIENCE_KEYWORDS: &[&str] = &[
    "persevered", "overcame", "challenge", "setback", "adapted", "persisted",
    "recovered", "pressure", "failure", "pivot",
];

const COMMUNICATION_KEYWORDS: &[&str] = &[
    "presented", "communicated", "wrote", "explained", "negotiated",
    "persuaded", "articulated", "audience", "documented", "facilitated",
];

/// Per-category hit ratios for one message. Every field is in [0,1].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalSignals {
    pub analytical: f64,
    pub emotional: f64,
    pub creative: f64,
    pub strategic: f64,
    pub execution: f64,
    pub leadership: f64,
    pub collaboration: f64,
    pub innovation: f64,
    pub resilience: f64,
    pub communication: f64,
}

/// Extracts hit ratios for all ten categories from a single message.
///
/// A numeric token counts as one analytical hit — a quantified claim is
/// analytical evidence even without analysis vocabulary.
pub fn extract_signals(text: &str) -> LexicalSignals {
    let lowered = text.to_lowercase();
    let tokens: HashSet<&str> = lowered
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|t| !t.is_empty())
        .collect();

    let has_numeric = tokens
        .iter()
        .any(|t| t.chars().any(|c| c.is_ascii_digit()));

    let hit_ratio = |keywords: &[&str]| -> f64 {
        let hits = keywords.iter().filter(|kw| tokens.contains(**kw)).count();
        hits as f64 / keywords.len() as f64
    };

    let mut analytical = hit_ratio(ANALYTICAL_KEYWORDS);
    if has_numeric {
        analytical =
            (analytical + 1.0 / ANALYTICAL_KEYWORDS.len() as f64).min(1.0);
    }

    LexicalSignals {
        analytical,
        emotional: hit_ratio(EMOTIONAL_KEYWORDS),
        creative: hit_ratio(CREATIVE_KEYWORDS),
        strategic: hit_ratio(STRATEGIC_KEYWORDS),
        execution: hit_ratio(EXECUTION_KEYWORDS),
        leadership: hit_ratio(LEADERSHIP_KEYWORDS),
        collaboration: hit_ratio(COLLABORATION_KEYWORDS),
        innovation: hit_ratio(INNOVATION_KEYWORDS),
        resilience: hit_ratio(RESILIENCE_KEYWORDS),
        communication: hit_ratio(COMMUNICATION_KEYWORDS),
    }
}
