//! Conversation session management.
//!
//! A `ConversationSession` holds the persona instruction and a bounded
//! history, flattens both into a prompt for each submission, and records
//! the user and assistant turns.

mod chat;
mod manager;
mod types;


pub use manager::ConversationSession;
pub use types::{CancelPolicy, SubmitOutcome};
