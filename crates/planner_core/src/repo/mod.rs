//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract for planner state.
//! - Isolate SQLite and JSON details from service/business orchestration.
//!
//! # Invariants
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Each collection persists independently under its own storage key.

pub mod state_repo;
