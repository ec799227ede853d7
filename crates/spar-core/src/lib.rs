//! # Spar Core
//!
//! Core types shared by the Spar debate assistant:
//! - [`ConversationTurn`] - one message of a debate, oldest first
//! - [`Policy`] - the [`Stance`] and [`Depth`] governing a generated turn
//! - [`DebateSession`] - in-memory, append-only transcript of one debate

pub mod policy;
pub mod session;
pub mod turn;

pub use policy::{Depth, Policy, PolicyParseError, Stance};
pub use session::DebateSession;
pub use turn::{ConversationTurn, Sender};
