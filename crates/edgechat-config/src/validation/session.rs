//! Validation for the session and persona sections.

use std::collections::HashSet;

use crate::schema::EdgechatConfig;

use super::helpers::validate_range;

/// Validate session constraints.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &EdgechatConfig) {
    validate_range(errors, "session.max_turns", config.session.max_turns, 1, 100);
}

/// Validate the persona catalogue: non-empty, unique names.
///
/// `selected` is not checked; an unknown index falls back to the first persona.
pub(crate) fn validate_personas(errors: &mut Vec<String>, config: &EdgechatConfig) {
    let personas = &config.personas;
    if personas.list.is_empty() {
        errors.push("personas.list must contain at least one persona".to_string());
        return;
    }

    let mut seen = HashSet::new();
    for persona in &personas.list {
        let name = persona.name.trim().to_lowercase();
        if name.is_empty() {
            errors.push("personas.list entry has an empty name".to_string());
        } else if !seen.insert(name) {
            errors.push(format!("personas.list has duplicate name '{}'", persona.name));
        }
    }
}
