//! Question Selector — phase and industry question banks with seeded,
//! repetition-avoiding pseudo-random selection.
//!
//! The RNG is injected at construction so selection is reproducible in tests.
//! Selection never repeats the previous question text, and rotates away from
//! the previously used category when the bank allows it.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::interview::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Background,
    Leadership,
    AnalyticalIntelligence,
    EmotionalIntelligence,
    CreativeIntelligence,
    StrategicThinking,
    Execution,
    Technical,
    Innovation,
    CareerGoals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub category: QuestionCategory,
}

const fn q(text: &'static str, category: QuestionCategory) -> Question {
    Question { text, category }
}

// ────────────────────────────────────────────────────────────────────────────
// Generic phase banks
// ────────────────────────────────────────────────────────────────────────────

const INTRODUCTION_BANK: &[Question] = &[
    q(
        "To start, tell me a bit about yourself — your name and the kind of role you're aiming for.",
        QuestionCategory::Background,
    ),
    q(
        "What does a typical week look like in your current or most recent role?",
        QuestionCategory::Background,
    ),
    q(
        "What drew you to this field in the first place?",
        QuestionCategory::CareerGoals,
    ),
];

const PROFILING_BANK: &[Question] = &[
    q(
        "Tell me about a time you had to lead people through something difficult.",
        QuestionCategory::Leadership,
    ),
    q(
        "Describe a problem you solved mostly by digging into the data.",
        QuestionCategory::AnalyticalIntelligence,
    ),
    q(
        "Tell me about a moment where reading the room mattered more than being right.",
        QuestionCategory::EmotionalIntelligence,
    ),
    q(
        "What's the most inventive solution you've come up with under constraints?",
        QuestionCategory::CreativeIntelligence,
    ),
    q(
        "How do you decide what not to work on? Walk me through a real prioritization call.",
        QuestionCategory::StrategicThinking,
    ),
    q(
        "Tell me about something you took from idea to done. What did 'done' look like?",
        QuestionCategory::Execution,
    ),
    q(
        "Where do you want your career to be in three years, and what's in the way?",
        QuestionCategory::CareerGoals,
    ),
];

const DEEP_DIVE_BANK: &[Question] = &[
    q(
        "Pick your proudest professional achievement. Set the scene: what was at stake?",
        QuestionCategory::Execution,
    ),
    q(
        "Tell me about a project that went sideways. What did you do, and how did it end?",
        QuestionCategory::Execution,
    ),
    q(
        "Describe a time you changed someone's mind about something important.",
        QuestionCategory::EmotionalIntelligence,
    ),
    q(
        "What's a decision you made with incomplete information? How did it play out?",
        QuestionCategory::StrategicThinking,
    ),
    q(
        "Tell me about mentoring or growing someone. What changed for them?",
        QuestionCategory::Leadership,
    ),
    q(
        "Describe a time you measured something nobody was measuring. What did it reveal?",
        QuestionCategory::AnalyticalIntelligence,
    ),
];

const SPECIALIZATION_BANK: &[Question] = &[
    q(
        "What's the hardest technical or domain problem you've personally cracked?",
        QuestionCategory::Technical,
    ),
    q(
        "Tell me about a time you introduced a new practice or tool that stuck.",
        QuestionCategory::Innovation,
    ),
    q(
        "What do peers come to you for that they can't get elsewhere?",
        QuestionCategory::Background,
    ),
    q(
        "Describe a result you delivered that your industry would recognize as hard.",
        QuestionCategory::Execution,
    ),
];

const SYNTHESIS_BANK: &[Question] = &[
    q(
        "If your next employer remembered one thing about you, what should it be?",
        QuestionCategory::CareerGoals,
    ),
    q(
        "Which achievement we discussed best represents the work you want more of?",
        QuestionCategory::CareerGoals,
    ),
    q(
        "Anything important we haven't covered that belongs on your résumé?",
        QuestionCategory::Background,
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Industry banks — drawn for story phases when the role is recognizable.
// Sub-categories rotate (technical / leadership / innovation) so consecutive
// questions don't repeat a flavor.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    Engineering,
    Product,
    Design,
    Sales,
    Marketing,
}

const ENGINEERING_BANK: &[Question] = &[
    q(
        "Walk me through a system you designed. What would you change about it today?",
        QuestionCategory::Technical,
    ),
    q(
        "Tell me about a production incident you owned. What was the blast radius and the fix?",
        QuestionCategory::Technical,
    ),
    q(
        "Describe a time you raised the engineering bar for people around you.",
        QuestionCategory::Leadership,
    ),
    q(
        "What's something you automated that meaningfully changed how your team worked?",
        QuestionCategory::Innovation,
    ),
];

const PRODUCT_BANK: &[Question] = &[
    q(
        "Tell me about a product bet you made. What evidence did you have, and were you right?",
        QuestionCategory::StrategicThinking,
    ),
    q(
        "Describe a launch you ran. What moved, and how did you know?",
        QuestionCategory::Execution,
    ),
    q(
        "How have you handled a roadmap fight between engineering and sales?",
        QuestionCategory::Leadership,
    ),
    q(
        "What's a user insight you found that nobody else saw?",
        QuestionCategory::Innovation,
    ),
];

const DESIGN_BANK: &[Question] = &[
    q(
        "Walk me through a design you shipped that changed a core metric.",
        QuestionCategory::CreativeIntelligence,
    ),
    q(
        "Tell me about defending a design decision against strong pushback.",
        QuestionCategory::EmotionalIntelligence,
    ),
    q(
        "How have you brought research into a process that didn't want it?",
        QuestionCategory::Innovation,
    ),
];

const SALES_BANK: &[Question] = &[
    q(
        "Tell me about the hardest deal you closed. What turned it?",
        QuestionCategory::Execution,
    ),
    q(
        "Describe how you rebuilt a relationship with a customer who was walking away.",
        QuestionCategory::EmotionalIntelligence,
    ),
    q(
        "What's your approach to territory or pipeline strategy? Give me a real quarter.",
        QuestionCategory::StrategicThinking,
    ),
];

const MARKETING_BANK: &[Question] = &[
    q(
        "Tell me about a campaign you ran end to end. What did it return?",
        QuestionCategory::Execution,
    ),
    q(
        "Describe a positioning change you drove and the evidence behind it.",
        QuestionCategory::StrategicThinking,
    ),
    q(
        "What's the most creative growth experiment you've shipped?",
        QuestionCategory::Innovation,
    ),
];

/// Maps a free-text role/industry description onto an industry bank, if any.
/// Unrecognized roles fall back to the generic phase banks — normal control
/// flow, not an error.
pub fn detect_industry(role: &str) -> Option<Industry> {
    let lowered = role.to_lowercase();
    if ["engineer", "developer", "software", "sre", "devops"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        Some(Industry::Engineering)
    } else if lowered.contains("product") {
        Some(Industry::Product)
    } else if lowered.contains("design") {
        Some(Industry::Design)
    } else if lowered.contains("sales") || lowered.contains("account exec") {
        Some(Industry::Sales)
    } else if lowered.contains("marketing") || lowered.contains("growth") {
        Some(Industry::Marketing)
    } else {
        None
    }
}

fn industry_bank(industry: Industry) -> &'static [Question] {
    match industry {
        Industry::Engineering => ENGINEERING_BANK,
        Industry::Product => PRODUCT_BANK,
        Industry::Design => DESIGN_BANK,
        Industry::Sales => SALES_BANK,
        Industry::Marketing => MARKETING_BANK,
    }
}

fn phase_bank(phase: Phase) -> &'static [Question] {
    match phase {
        Phase::Introduction => INTRODUCTION_BANK,
        Phase::Profiling => PROFILING_BANK,
        Phase::DeepDive => DEEP_DIVE_BANK,
        Phase::Specialization => SPECIALIZATION_BANK,
        Phase::Synthesis | Phase::Generation => SYNTHESIS_BANK,
    }
}

/// Seedable question selector. One per session; owns its RNG.
#[derive(Debug)]
pub struct QuestionSelector {
    rng: StdRng,
}

impl QuestionSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks the next question for the phase.
    ///
    /// Bank choice: industry bank for story phases when the role maps to one,
    /// generic phase bank otherwise. Eligibility filters drop the previous
    /// question text always, and the previous category when enough remains.
    pub fn select(
        &mut self,
        phase: Phase,
        role: &str,
        last_question: Option<&str>,
        last_category: Option<QuestionCategory>,
    ) -> Question {
        let bank = if phase.is_story_phase() {
            detect_industry(role)
                .map(industry_bank)
                .unwrap_or_else(|| phase_bank(phase))
        } else {
            phase_bank(phase)
        };

        let not_repeat: Vec<Question> = bank
            .iter()
            .copied()
            .filter(|question| Some(question.text) != last_question)
            .collect();

        let rotated: Vec<Question> = not_repeat
            .iter()
            .copied()
            .filter(|question| Some(question.category) != last_category)
            .collect();

        let eligible = if !rotated.is_empty() { &rotated } else { &not_repeat };
        if eligible.is_empty() {
            // Single-question bank edge: repetition of text is unavoidable
            return bank[0];
        }
        eligible[self.rng.gen_range(0..eligible.len())]
    }
}
