//! Open-source bias filter.
//!
//! Swaps proprietary choices for open alternatives when the user's bias is
//! at or above [`OPEN_SOURCE_THRESHOLD`]. One pass only: a replacement is
//! never itself looked up again.
//!
//! [`OPEN_SOURCE_THRESHOLD`]: crate::preferences::OPEN_SOURCE_THRESHOLD

use crate::preferences::Preferences;
use crate::stack::RecommendedStack;
use crate::types::Category;

pub const OPEN_ALTERNATIVES: &[(&str, &str)] = &[
    ("firebase", "supabase"),
    ("auth0", "supabase-auth"),
    ("mongodb-atlas", "postgresql"),
    ("vercel", "railway"),
];

pub fn open_alternative(tech: &str) -> Option<&'static str> {
    OPEN_ALTERNATIVES
        .iter()
        .find(|(proprietary, _)| *proprietary == tech)
        .map(|(_, open)| *open)
}

fn replacement_note(old: &str, new: &str) -> String {
    format!("Replaced {old} with {new} (open source preference)")
}

pub fn apply_open_source_bias(mut stack: RecommendedStack, prefs: &Preferences) -> RecommendedStack {
    if !prefs.prefers_open_source() {
        return stack;
    }

    let mut notes = Vec::new();
    for &category in Category::all() {
        let slot = stack.slot_mut(category);
        if let Some(alt) = slot.as_deref().and_then(open_alternative) {
            if let Some(old) = slot.replace(alt.to_string()) {
                notes.push(replacement_note(&old, alt));
            }
        }
    }
    for value in stack.extra.values_mut() {
        if let Some(alt) = open_alternative(value) {
            let old = std::mem::replace(value, alt.to_string());
            notes.push(replacement_note(&old, alt));
        }
    }

    if !notes.is_empty() {
        tracing::debug!(replacements = notes.len(), "applied open source preference");
    }
    stack.open_source_replacements = notes;
    stack
}
