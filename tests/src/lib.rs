//! # Quantum-Chain Test Suite
//!
//! Unified test crate for cross-module flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Finality guard flows
//!     ├── restart.rs    # Persistence and resume
//!     ├── voting.rs     # Sprint voting racing chain import
//!     └── peers.rs      # Whitelist facade against remote peers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # With logs
//! RUST_LOG=qc_09_finality_guard=debug cargo test -p qc-tests -- --nocapture
//! ```
