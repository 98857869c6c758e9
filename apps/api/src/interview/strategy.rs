//! Follow-Up Strategist — deterministic first-match policy over the latest
//! user message. No randomness, no model inference, fully unit-testable.

use serde::{Deserialize, Serialize};

use crate::interview::phase::Phase;

/// Hard ceiling on consecutive follow-ups before the machine must move on.
pub const MAX_FOLLOWUP_DEPTH: u32 = 3;

/// Messages below this length without an outcome signal get a quantification probe.
const MIN_SUBSTANTIVE_LEN: usize = 150;
/// Messages below this length are treated as unelaborated.
const MIN_ELABORATION_LEN: usize = 40;
/// Messages at or above this length count as a rich story worth exploring.
const STORY_LEN: usize = 300;

const UNCERTAINTY_MARKERS: &[&str] = &["i think", "maybe", "not sure", "i guess"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpStrategy {
    Proceed,
    QuantificationProbe,
    ConfidenceBoost,
    Clarification,
    DepthExploration,
}

/// True when the text carries an outcome signal: an outcome token or a digit.
pub fn has_outcome_signal(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("result")
        || lowered.contains("outcome")
        || lowered.contains("impact")
        || text.chars().any(|c| c.is_ascii_digit())
}

/// First-match decision policy. Order matters:
/// depth cap, quantification, clarification, confidence, depth exploration.
pub fn decide_strategy(message: &str, follow_up_depth: u32, phase: Phase) -> FollowUpStrategy {
    let trimmed = message.trim();
    let len = trimmed.chars().count();

    if follow_up_depth >= MAX_FOLLOWUP_DEPTH {
        return FollowUpStrategy::Proceed;
    }
    if len < MIN_SUBSTANTIVE_LEN && !has_outcome_signal(trimmed) {
        return FollowUpStrategy::QuantificationProbe;
    }
    if len < MIN_ELABORATION_LEN {
        return FollowUpStrategy::Clarification;
    }
    let lowered = trimmed.to_lowercase();
    if UNCERTAINTY_MARKERS.iter().any(|m| lowered.contains(m)) {
        return FollowUpStrategy::ConfidenceBoost;
    }
    if len >= STORY_LEN && phase.is_story_phase() && follow_up_depth == 0 {
        return FollowUpStrategy::DepthExploration;
    }
    FollowUpStrategy::Proceed
}

const QUANTIFICATION_PROMPTS: &[&str] = &[
    "That sounds meaningful — can you put a number on it? What changed, and by how much?",
    "What was the measurable result? Think revenue, time saved, users reached, or error rates.",
    "If you had to quantify the impact for a résumé bullet, what figure would you use?",
];

const CLARIFICATION_PROMPTS: &[&str] = &[
    "Could you walk me through that in a bit more detail?",
    "Tell me more — what was the situation, and what did you actually do?",
    "I want to capture this accurately. Can you expand on that a little?",
];

const CONFIDENCE_PROMPTS: &[&str] = &[
    "It sounds like you did more than you're giving yourself credit for. What part are you most proud of?",
    "Let's state it plainly: what did you personally make happen there?",
    "Drop the hedging for a moment — what would a colleague say you accomplished?",
];

const DEPTH_PROMPTS: &[&str] = &[
    "That's a strong story. What was the hardest decision you made along the way?",
    "Great detail. What would have happened if you hadn't stepped in?",
    "What did you learn from that experience that you still apply today?",
];

/// Follow-up question for a non-proceed strategy, rotated by depth so three
/// consecutive probes never repeat the same wording.
pub fn follow_up_prompt(strategy: FollowUpStrategy, follow_up_depth: u32) -> Option<&'static str> {
    let bank = match strategy {
        FollowUpStrategy::Proceed => return None,
        FollowUpStrategy::QuantificationProbe => QUANTIFICATION_PROMPTS,
        FollowUpStrategy::Clarification => CLARIFICATION_PROMPTS,
        FollowUpStrategy::ConfidenceBoost => CONFIDENCE_PROMPTS,
        FollowUpStrategy::DepthExploration => DEPTH_PROMPTS,
    };
    Some(bank[follow_up_depth as usize % bank.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terse_claim_without_outcome_gets_quantification_probe() {
        // "I led a project" — under 150 chars, no outcome token, no digits
        let s = decide_strategy("I led a project", 0, Phase::Profiling);
        assert_eq!(s, FollowUpStrategy::QuantificationProbe);
    }

    #[test]
    fn test_depth_cap_forces_proceed() {
        let s = decide_strategy("I led a project", MAX_FOLLOWUP_DEPTH, Phase::Profiling);
        assert_eq!(s, FollowUpStrategy::Proceed);
    }

    #[test]
    fn test_short_message_with_outcome_token_gets_clarification() {
        // Carries "impact" so the quantification rule passes over it,
        // but it is too short to count as elaborated.
        let s = decide_strategy("big impact there", 0, Phase::DeepDive);
        assert_eq!(s, FollowUpStrategy::Clarification);
    }

    #[test]
    fn test_uncertain_substantive_answer_gets_confidence_boost() {
        let msg = "I think I was maybe responsible for the impact of the rollout across three \
                   regions, though honestly I'm not sure how much of the final result was down \
                   to my own work versus the rest of the group's effort.";
        assert!(msg.len() >= 150);
        let s = decide_strategy(msg, 0, Phase::Profiling);
        assert_eq!(s, FollowUpStrategy::ConfidenceBoost);
    }

    #[test]
    fn test_long_story_in_deep_dive_gets_depth_exploration() {
        let msg = "When our payments pipeline started failing under load, I volunteered to own \
                   the remediation. I profiled the hot paths, rewrote the batching layer, and \
                   coordinated the rollout with the platform group over two weeks. The result \
                   was a 70% reduction in timeout errors and the on-call burden dropped from \
                   nightly pages to roughly one page a month, which the whole org noticed."
            .trim();
        assert!(msg.chars().count() >= 300);
        assert_eq!(
            decide_strategy(msg, 0, Phase::DeepDive),
            FollowUpStrategy::DepthExploration
        );
        // Same story outside a story phase proceeds
        assert_eq!(
            decide_strategy(msg, 0, Phase::Profiling),
            FollowUpStrategy::Proceed
        );
        // And at depth > 0 it proceeds rather than probing again
        assert_eq!(
            decide_strategy(msg, 1, Phase::DeepDive),
            FollowUpStrategy::Proceed
        );
    }

    #[test]
    fn test_substantive_answer_proceeds() {
        let msg = "I ran the migration end to end: scoped the plan with stakeholders, led the \
                   execution across four backend services, and we cut infrastructure spend by 30%.";
        assert!(msg.len() >= 150);
        assert_eq!(decide_strategy(msg, 0, Phase::Profiling), FollowUpStrategy::Proceed);
    }

    #[test]
    fn test_outcome_signal_detects_tokens_and_digits() {
        assert!(has_outcome_signal("the outcome was good"));
        assert!(has_outcome_signal("Results improved"));
        assert!(has_outcome_signal("shipped it in 3 weeks"));
        assert!(!has_outcome_signal("I led a project"));
    }

    #[test]
    fn test_proceed_has_no_prompt() {
        assert!(follow_up_prompt(FollowUpStrategy::Proceed, 0).is_none());
    }

    #[test]
    fn test_prompt_rotation_varies_within_depth_bound() {
        let prompts: Vec<_> = (0..MAX_FOLLOWUP_DEPTH)
            .map(|d| follow_up_prompt(FollowUpStrategy::QuantificationProbe, d).unwrap())
            .collect();
        assert_eq!(prompts.len(), 3);
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
    }

    #[test]
    fn test_strategy_serde_tags_are_snake_case() {
        let json = serde_json::to_string(&FollowUpStrategy::QuantificationProbe).unwrap();
        assert_eq!(json, r#""quantification_probe""#);
    }
}
