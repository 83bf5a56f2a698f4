//! # Adapters
//!
//! In-memory implementations of the outbound ports, used by tests and local
//! dry runs. Production adapters translating to a real wallet/transport
//! layer live outside this subsystem.

pub mod in_memory;

pub use in_memory::{InMemoryAccessControl, InMemoryProvider, InMemoryProxyState};
