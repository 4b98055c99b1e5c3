//! Prompt flattening and history rendering.
//!
//! The generator takes a single string, so the persona instruction and
//! the retained turns are concatenated into one block:
//!
//! ```text
//! <instruction>
//!
//! User: ...
//! AI: ...
//! ```

use crate::turn::{Role, Turn};

/// Build the prompt sent to the generator.
///
/// A blank or absent instruction is omitted. System turns found in the
/// history are skipped; the instruction is the only system text sent.
/// Trailing whitespace is trimmed.
pub fn flatten_prompt<'a>(
    system_instruction: Option<&str>,
    turns: impl IntoIterator<Item = &'a Turn>,
) -> String {
    let mut prompt = String::new();

    if let Some(instruction) = system_instruction.filter(|s| !s.trim().is_empty()) {
        prompt.push_str(instruction);
        prompt.push_str("\n\n");
    }

    for turn in turns {
        let label = match turn.role() {
            Role::User => "User: ",
            Role::Assistant => "AI: ",
            Role::System => continue,
        };
        prompt.push_str(label);
        prompt.push_str(turn.text());
        prompt.push('\n');
    }

    let trimmed = prompt.trim_end().len();
    prompt.truncate(trimmed);
    prompt
}

/// Render turns for the history view, one blank line between turns.
pub fn render_history<'a>(turns: impl IntoIterator<Item = &'a Turn>) -> String {
    let mut out = String::new();
    for turn in turns {
        out.push_str(turn.role().display_prefix());
        out.push_str(turn.text());
        out.push_str("\n\n");
    }
    out.trim().to_string()
}
