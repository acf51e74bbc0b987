//! Optional move advice from an external chat-completions service.
//!
//! The advisor is a collaborator, never an authority: whatever it proposes
//! is matched against the engine's legal moves, and any failure (no
//! credential, transport error, timeout, bad reply, illegal move) hands
//! the decision back to the search engine.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod selector;

pub use client::{MoveAdvisor, OpenAiAdvisor};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, AdvisorResult};
pub use protocol::{Advice, AdvisoryRequest, Personality};
pub use selector::{MachineMove, MoveOrigin, MoveSelector};
