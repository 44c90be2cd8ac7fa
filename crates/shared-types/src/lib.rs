//! # Shared Types Crate
//!
//! Chain entities shared across subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-subsystem types are defined here.
//! - **Plain Data**: Entities carry no behavior beyond hashing.

pub mod entities;

pub use entities::*;
