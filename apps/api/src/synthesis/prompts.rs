//! Prompt constants for the remote synthesis backend.

pub const SYNTHESIS_SYSTEM: &str = "You are a résumé synthesis engine. You receive a \
candidate profile with accumulated responses and trait scores, and you return a résumé \
preview as JSON with keys: name, target_role, summary_bullets, experiences (each with \
title, company, and a car object holding context/action/result), skills, and \
progress_scores. Return only valid JSON, no prose.";

pub const SYNTHESIS_PROMPT_TEMPLATE: &str = "Synthesize a résumé preview from this \
accumulated interview state:\n\n{state_json}\n\nKeep progress_scores exactly as given.";
