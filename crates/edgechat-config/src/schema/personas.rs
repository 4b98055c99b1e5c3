//! Persona catalogue: named system instructions the user can switch between.

use serde::{Deserialize, Serialize};

/// A named system instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub instruction: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }
}

/// Persona configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonasConfig {
    /// Index into `list` of the persona active at startup.
    pub selected: usize,
    pub list: Vec<Persona>,
}

impl Default for PersonasConfig {
    fn default() -> Self {
        Self {
            selected: 0,
            list: default_personas(),
        }
    }
}

impl PersonasConfig {
    /// Persona at `index`, falling back to the first one when out of range.
    ///
    /// Returns `None` only when the list is empty.
    pub fn get_or_first(&self, index: usize) -> Option<&Persona> {
        self.list.get(index).or_else(|| self.list.first())
    }

    /// Find a persona index by case-insensitive name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.list
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}

fn default_personas() -> Vec<Persona> {
    vec![
        Persona::new(
            "Helpful Assistant",
            "You are a helpful assistant. Answer clearly and concisely.",
        ),
        Persona::new(
            "Pirate",
            "You are a cheerful pirate. Answer every question in pirate speak.",
        ),
        Persona::new(
            "Poet",
            "You are a poet. Answer in short rhyming verse.",
        ),
        Persona::new(
            "Terse Expert",
            "You are a terse domain expert. Reply in at most two sentences.",
        ),
    ]
}
