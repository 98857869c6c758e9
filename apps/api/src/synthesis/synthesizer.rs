//! Résumé Synthesizer — pluggable, trait-based preview builder.
//!
//! Default: `LocalSynthesizer` (pure-Rust, deterministic, idempotent).
//! Optional: `RemoteSynthesizer` delegates to the upstream model service and
//! surfaces failures without internal retry or partial state.
//!
//! `AppState` holds an `Arc<dyn Synthesizer>`, swapped at startup via config.

use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::json;

use crate::errors::AppError;
use crate::interview::scores::{progress_scores, IntelligenceScores, PersonalityTraits};
use crate::interview::strategy::has_outcome_signal;
use crate::session::models::{Profile, ResponseRecord};
use crate::synthesis::preview::{CarStructure, ExperienceEntry, ResumePreview};
use crate::synthesis::prompts::{SYNTHESIS_PROMPT_TEMPLATE, SYNTHESIS_SYSTEM};
use crate::upstream::UpstreamClient;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        profile: &Profile,
        intelligence: &IntelligenceScores,
        personality: &PersonalityTraits,
    ) -> Result<ResumePreview, AppError>;
}

/// Pure-Rust synthesizer. Identical state in, byte-identical preview out.
pub struct LocalSynthesizer;

#[async_trait]
impl Synthesizer for LocalSynthesizer {
    async fn synthesize(
        &self,
        profile: &Profile,
        intelligence: &IntelligenceScores,
        personality: &PersonalityTraits,
    ) -> Result<ResumePreview, AppError> {
        Ok(compose_preview(profile, intelligence, personality))
    }
}

/// Delegates synthesis to the upstream model service. Failures surface as
/// `AppError::Upstream`; transport retry is the collaborator's concern.
pub struct RemoteSynthesizer(pub UpstreamClient);

#[async_trait]
impl Synthesizer for RemoteSynthesizer {
    async fn synthesize(
        &self,
        profile: &Profile,
        intelligence: &IntelligenceScores,
        personality: &PersonalityTraits,
    ) -> Result<ResumePreview, AppError> {
        let state = json!({
            "profile": profile,
            "intelligence": intelligence,
            "personality": personality,
            "progress_scores": progress_scores(intelligence, personality),
        });
        let prompt = SYNTHESIS_PROMPT_TEMPLATE.replace("{state_json}", &state.to_string());
        self.0
            .call_json::<ResumePreview>(&prompt, SYNTHESIS_SYSTEM)
            .await
            .map_err(|e| AppError::Upstream(format!("synthesis failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Local synthesis rules
// ────────────────────────────────────────────────────────────────────────────

/// Controlled skill vocabulary: (match key, canonical display form).
/// Single-word keys match whole tokens; phrases match by containment.
const SKILL_VOCAB: &[(&str, &str)] = &[
    ("rust", "Rust"),
    ("python", "Python"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("sql", "SQL"),
    ("kubernetes", "Kubernetes"),
    ("docker", "Docker"),
    ("aws", "AWS"),
    ("react", "React"),
    ("machine learning", "Machine Learning"),
    ("data analysis", "Data Analysis"),
    ("project management", "Project Management"),
    ("public speaking", "Public Speaking"),
    ("negotiation", "Negotiation"),
    ("figma", "Figma"),
    ("excel", "Excel"),
    ("salesforce", "Salesforce"),
];

fn intelligence_phrase(dimension: &str) -> &'static str {
    match dimension {
        "analytical" => "rigorous, data-driven problem solving",
        "emotional" => "strong people judgment and empathy",
        "creative" => "original thinking under real constraints",
        "strategic" => "long-horizon planning and prioritization",
        _ => "reliable delivery from idea to done",
    }
}

fn personality_phrase(dimension: &str) -> &'static str {
    match dimension {
        "leadership" => "leading teams through ambiguity",
        "collaboration" => "building alignment across functions",
        "innovation" => "introducing practices that stick",
        "resilience" => "staying effective under pressure",
        _ => "making complex work legible to any audience",
    }
}

/// Pure derivation of the preview from accumulated state.
pub fn compose_preview(
    profile: &Profile,
    intelligence: &IntelligenceScores,
    personality: &PersonalityTraits,
) -> ResumePreview {
    ResumePreview {
        name: profile.name.clone(),
        target_role: profile.target_role.clone(),
        summary_bullets: summary_bullets(profile, intelligence, personality),
        experiences: profile
            .story_responses()
            .map(|story| experience_from_story(&profile.target_role, story))
            .collect(),
        skills: collect_skills(profile),
        progress_scores: progress_scores(intelligence, personality),
    }
}

fn summary_bullets(
    profile: &Profile,
    intelligence: &IntelligenceScores,
    personality: &PersonalityTraits,
) -> Vec<String> {
    let (intel_dim, _) = intelligence.top_dimension();
    let (trait_dim, _) = personality.top_dimension();

    let mut bullets = vec![
        format!(
            "{} with a strength in {}.",
            profile.target_role,
            intelligence_phrase(intel_dim)
        ),
        format!("Known for {}.", personality_phrase(trait_dim)),
    ];
    if let Some(seniority) = profile.seniority {
        bullets.push(format!(
            "{} professional targeting {} roles.",
            seniority.label(),
            profile.target_role
        ));
    }
    bullets
}

/// Splits an achievement story into Context / Action / Result on sentence
/// boundaries, anchoring the result on the last outcome-bearing sentence.
fn experience_from_story(target_role: &str, story: &ResponseRecord) -> ExperienceEntry {
    let sentences = split_sentences(&story.text);

    let result_idx = sentences
        .iter()
        .rposition(|s| has_outcome_signal(s))
        .unwrap_or(sentences.len().saturating_sub(1));

    let context = sentences.first().cloned().unwrap_or_default();
    let result = sentences.get(result_idx).cloned().unwrap_or_default();
    let action: String = if sentences.len() > 2 {
        sentences[1..sentences.len() - 1]
            .iter()
            .enumerate()
            .filter(|(i, _)| i + 1 != result_idx)
            .map(|(_, s)| s.as_str())
            .collect::<Vec<_>>()
            .join(". ")
    } else {
        String::new()
    };

    ExperienceEntry {
        title: target_role.to_string(),
        company: extract_company(&story.text).unwrap_or_else(|| "Not specified".to_string()),
        car: CarStructure {
            context,
            action: if action.is_empty() { result.clone() } else { action },
            result,
        },
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_company(text: &str) -> Option<String> {
    static COMPANY: OnceLock<Regex> = OnceLock::new();
    let pattern = COMPANY.get_or_init(|| {
        Regex::new(r"\bat ([A-Z][A-Za-z0-9&'-]*(?:\s+[A-Z][A-Za-z0-9&'-]*){0,2})")
            .expect("company pattern must compile")
    });
    pattern.captures(text).map(|caps| caps[1].to_string())
}

fn collect_skills(profile: &Profile) -> BTreeSet<String> {
    let mut skills = BTreeSet::new();
    for response in &profile.responses {
        let lowered = response.text.to_lowercase();
        let tokens: HashSet<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        for (key, canonical) in SKILL_VOCAB {
            let hit = if key.contains(' ') {
                lowered.contains(key)
            } else {
                tokens.contains(key)
            };
            if hit {
                skills.insert((*canonical).to_string());
            }
        }
    }
    skills
}
