//! Profile fact extraction — explicit, testable pure functions over free text.
//!
//! Each extractor documents its pattern precedence. These run on every
//! accepted turn and only ever fill fields the profile doesn't know yet.

use std::sync::OnceLock;

use regex::Regex;

use crate::session::models::Seniority;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction pattern must compile")
}

// ────────────────────────────────────────────────────────────────────────────
// Name
// ────────────────────────────────────────────────────────────────────────────

/// Name patterns in precedence order:
/// 1. "my name is X"   2. "i am X" / "i'm X"   3. "call me X"
/// The capture requires capitalization in the original text so "I'm a
/// software engineer" never yields a name.
fn name_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            regex(r"(?:(?i)my name is)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)"),
            regex(r"(?:(?i)\bi\s*am|\bi'm)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)"),
            regex(r"(?:(?i)call me)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)"),
        ]
    })
}

pub fn extract_name(text: &str) -> Option<String> {
    for pattern in name_patterns() {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Target role
// ────────────────────────────────────────────────────────────────────────────

const ROLE_VOCAB: &[&str] = &[
    "software engineer",
    "data scientist",
    "product manager",
    "project manager",
    "engineering manager",
    "designer",
    "marketing manager",
    "sales representative",
    "consultant",
    "analyst",
    "accountant",
    "teacher",
    "nurse",
];

/// Role patterns in precedence order:
/// 1. "work as a/an X"   2. "i'm a/an X" / "i am a/an X"   3. role vocabulary scan
fn role_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            regex(r"(?i)\bwork(?:ing|ed)?\s+as\s+an?\s+([a-z][a-z ]{2,40}?)(?:[.,;!?]|$)"),
            regex(r"(?i)\bi\s*(?:am|'m)\s+an?\s+([a-z][a-z ]{2,40}?)(?:[.,;!?]|$)"),
        ]
    })
}

pub fn extract_target_role(text: &str) -> Option<String> {
    for pattern in role_patterns() {
        if let Some(caps) = pattern.captures(text) {
            return Some(title_case(caps[1].trim()));
        }
    }
    let lowered = text.to_lowercase();
    ROLE_VOCAB
        .iter()
        .find(|role| lowered.contains(*role))
        .map(|role| title_case(role))
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Seniority
// ────────────────────────────────────────────────────────────────────────────

const EXECUTIVE_TOKENS: &[&str] = &[
    "cto", "ceo", "cfo", "coo", "vp", "vice president", "director", "chief",
    "head of", "executive", "founder",
];
const SENIOR_TOKENS: &[&str] = &["senior", "lead", "principal", "staff"];
const EARLY_TOKENS: &[&str] = &["junior", "intern", "entry-level", "entry level", "graduate"];

/// Whole-word membership test: multi-word tokens use phrase containment,
/// single words must match a whole token ("lead" must not hit "leadership").
fn contains_token(lowered: &str, needle: &str) -> bool {
    if needle.contains(' ') {
        return lowered.contains(needle);
    }
    lowered
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .any(|word| word == needle)
}

/// Seniority precedence: executive tokens > senior tokens > early tokens >
/// years-of-experience figure (≥10 senior, ≥4 mid, otherwise early).
pub fn extract_seniority(text: &str) -> Option<Seniority> {
    let lowered = text.to_lowercase();
    if EXECUTIVE_TOKENS.iter().any(|t| contains_token(&lowered, t)) {
        return Some(Seniority::Executive);
    }
    if SENIOR_TOKENS.iter().any(|t| contains_token(&lowered, t)) {
        return Some(Seniority::Senior);
    }
    if EARLY_TOKENS.iter().any(|t| contains_token(&lowered, t)) {
        return Some(Seniority::Early);
    }

    static YEARS: OnceLock<Regex> = OnceLock::new();
    let years = YEARS.get_or_init(|| regex(r"(\d{1,2})\+?\s*years"));
    if let Some(caps) = years.captures(&lowered) {
        if let Ok(n) = caps[1].parse::<u32>() {
            return Some(match n {
                0..=3 => Seniority::Early,
                4..=9 => Seniority::Mid,
                _ => Seniority::Senior,
            });
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Industry
// ────────────────────────────────────────────────────────────────────────────

const INDUSTRY_VOCAB: &[&str] = &[
    "fintech",
    "healthcare",
    "education",
    "e-commerce",
    "ecommerce",
    "gaming",
    "saas",
    "manufacturing",
    "consulting",
    "government",
    "media",
    "biotech",
];

pub fn extract_industry(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    INDUSTRY_VOCAB
        .iter()
        .find(|industry| lowered.contains(*industry))
        .map(|industry| industry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_my_name_is() {
        assert_eq!(extract_name("Hi, my name is Sarah Chen."), Some("Sarah Chen".to_string()));
    }

    #[test]
    fn test_name_i_am() {
        assert_eq!(extract_name("I'm Marcus and I build things"), Some("Marcus".to_string()));
        assert_eq!(extract_name("I am Priya"), Some("Priya".to_string()));
    }

    #[test]
    fn test_name_call_me() {
        assert_eq!(extract_name("Everyone just call me Jo"), Some("Jo".to_string()));
    }

    #[test]
    fn test_name_requires_capitalization() {
        // "I'm a software engineer" must never produce a name
        assert_eq!(extract_name("I'm a software engineer"), None);
        assert_eq!(extract_name("my name is unclear right now"), None);
    }

    #[test]
    fn test_name_precedence_prefers_my_name_is() {
        let text = "Call me Ace, but my name is Daniel.";
        assert_eq!(extract_name(text), Some("Daniel".to_string()));
    }

    #[test]
    fn test_role_work_as_pattern_wins() {
        let text = "I'm a generalist but I work as a data scientist.";
        assert_eq!(extract_target_role(text), Some("Data Scientist".to_string()));
    }

    #[test]
    fn test_role_i_am_a_pattern() {
        assert_eq!(
            extract_target_role("i am a product manager at heart"),
            Some("Product Manager At Heart".to_string())
        );
    }

    #[test]
    fn test_role_vocab_fallback() {
        assert_eq!(
            extract_target_role("Ten years doing software engineer things"),
            Some("Software Engineer".to_string())
        );
        assert_eq!(extract_target_role("nothing here"), None);
    }

    #[test]
    fn test_seniority_executive_tokens_beat_years() {
        assert_eq!(
            extract_seniority("VP of engineering with 2 years in the seat"),
            Some(Seniority::Executive)
        );
    }

    #[test]
    fn test_seniority_senior_tokens() {
        assert_eq!(extract_seniority("I'm a staff engineer"), Some(Seniority::Senior));
    }

    #[test]
    fn test_seniority_early_tokens() {
        assert_eq!(extract_seniority("recent graduate"), Some(Seniority::Early));
    }

    #[test]
    fn test_seniority_tokens_match_whole_words_only() {
        // "lead" must not fire inside "leadership", nor "intern" inside "internal"
        assert_eq!(extract_seniority("strong leadership skills"), None);
        assert_eq!(extract_seniority("worked on internal tooling"), None);
    }

    #[test]
    fn test_seniority_years_thresholds() {
        assert_eq!(extract_seniority("2 years of experience"), Some(Seniority::Early));
        assert_eq!(extract_seniority("5 years of experience"), Some(Seniority::Mid));
        assert_eq!(extract_seniority("12+ years of experience"), Some(Seniority::Senior));
        assert_eq!(extract_seniority("experience aplenty"), None);
    }

    #[test]
    fn test_industry_scan() {
        assert_eq!(extract_industry("mostly fintech startups"), Some("fintech".to_string()));
        assert_eq!(extract_industry("underwater basket weaving"), None);
    }
}
