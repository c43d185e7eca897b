//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `planner_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the UI
    // shell that normally consumes the store.
    println!("planner_core ping={}", planner_core::ping());
    println!("planner_core version={}", planner_core::core_version());
}
