//! # Ports
//!
//! Interfaces between the orchestrator and its external collaborators.

pub mod outbound;
