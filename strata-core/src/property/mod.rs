//! Property-based tests for the incremental merge engine.
//!
//! Compares the step table against a relabelling oracle that recomputes
//! connected components from scratch, checks structural invariants of every
//! emitted step, and verifies that the membership early exit never changes
//! the rows it does emit.

mod invariants;
mod oracle;
mod strategies;
