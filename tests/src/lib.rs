//! # Land-Registry Test Suite
//!
//! Unified test crate containing the cross-contract integration flows:
//! every scenario wires all three contracts over an in-process channel,
//! each contract on its own sub-ledger, and drives the workflows exactly
//! the way an external client would.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── workflows.rs  # Typed-method scenarios (transfer, encumber, release)
//!     └── dispatch.rs   # Operation-name dispatch through the transport
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lr-tests
//!
//! # By category
//! cargo test -p lr-tests integration::workflows::
//! cargo test -p lr-tests integration::dispatch::
//! ```

#![allow(dead_code)]

pub mod integration;
