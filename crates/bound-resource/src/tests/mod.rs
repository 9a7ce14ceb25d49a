//! Behavioral tests for the reconciler and the pager.
//!
//! - `harness.rs`    - In-memory cache and page source with controllable gates
//! - `reconciler.rs` - Single-value reconciliation cycles
//! - `paging.rs`     - Page cursor state machine
