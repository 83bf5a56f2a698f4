//! # Facet-Forge Test Suite
//!
//! Unified test crate for cross-subsystem choreography.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem flows
//!     └── flows.rs      # Registry -> orchestrator -> resolver -> records
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ff-tests
//! ```

#![allow(dead_code)]

pub mod integration;
