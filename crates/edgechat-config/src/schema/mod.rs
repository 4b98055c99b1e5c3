//! Configuration schema types for edgechat.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults below.

mod generation;
mod model;
mod personas;
mod session;

pub use generation::*;
pub use model::*;
pub use personas::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Root configuration for edgechat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct EdgechatConfig {
    pub generation: GenerationConfig,
    pub model: ModelConfig,
    pub session: SessionConfig,
    pub personas: PersonasConfig,
}

// =============================================================================
// Tests
// =============================================================================
