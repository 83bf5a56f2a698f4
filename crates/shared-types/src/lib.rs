//! # Shared Types Crate
//!
//! This crate contains the identifier value objects shared across all
//! facet-forge subsystems: 32-byte resolver identifiers, 20-byte platform
//! addresses, and their eager hex validation.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem identifier types are
//!   defined here.
//! - **Eager Validation**: Malformed identifiers are rejected at the parse
//!   boundary with a `ValidationError`. Everything downstream operates on
//!   already-valid values.
//! - **Value Semantics**: Identifiers are `Copy` newtypes defined by their
//!   bytes, not their identity.

pub mod identifiers;

pub use identifiers::{resolver_key_for, selector, Bytes32, EvmAddress, ValidationError};
