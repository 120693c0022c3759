//! The concurrent fetch-and-extract pipeline.
//!
//! - [`orchestrator`]: drives one run through its states
//! - [`pool`]: `N` workers turning page URLs into titles (fan-out)
//! - [`aggregator`]: the single collector that sorts every title (fan-in)
//!
//! Both channels are closed by dropping senders: the orchestrator owns the only
//! URL sender, and it drops its title sender only after every worker has joined.

pub mod aggregator;
pub mod orchestrator;
pub mod pool;
