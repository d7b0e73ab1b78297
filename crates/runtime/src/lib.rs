//! Turn orchestration over the battle engine.
//!
//! [`TurnController`] runs whole monster turns: it asks `battle-ai` to
//! decide, hands each intent to an [`ActionExecutor`], keeps the action
//! point accounting honest, and closes the turn with the facing rule. The
//! executor is the async boundary; plug in [`RehearsalExecutor`] to drive
//! turns without a combat resolver, or your own to resolve them for real.

pub mod controller;
pub mod error;
pub mod executor;
pub mod narration;
pub mod telemetry;

pub use controller::{TurnController, TurnReport};
pub use error::{Result, RuntimeError};
pub use executor::{ActionExecutor, ActionOutcome, RehearsalExecutor};
pub use telemetry::init_tracing;
