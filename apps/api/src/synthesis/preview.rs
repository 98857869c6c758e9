//! Résumé preview wire types. Derived read-only views — recomputed on demand
//! from the profile and score vectors, never independently mutated.
//!
//! Collections use BTree ordering so identical inputs serialize to
//! byte-identical output.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Context / Action / Result split of one achievement story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarStructure {
    pub context: String,
    pub action: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub car: CarStructure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumePreview {
    pub name: Option<String>,
    pub target_role: String,
    pub summary_bullets: Vec<String>,
    pub experiences: Vec<ExperienceEntry>,
    pub skills: BTreeSet<String>,
    pub progress_scores: BTreeMap<String, f64>,
}
