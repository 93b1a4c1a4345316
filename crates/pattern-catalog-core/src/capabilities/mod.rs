// crates/pattern-catalog-core/src/capabilities/mod.rs
// ============================================================================
// Module: Pattern Capabilities
// Description: Per-category capability traits and their supporting types.
// Purpose: Replace base-class hierarchies with explicit trait contracts.
// Dependencies: crate::capabilities::{behavioral, creational, structural}
// ============================================================================

//! ## Overview
//! Each pattern category names the operations its implementations provide
//! through one trait. A concrete implementation satisfies exactly one
//! capability trait and is wrapped in the matching
//! [`PatternInstance`](crate::PatternInstance) variant.

pub mod behavioral;
pub mod creational;
pub mod structural;

pub use behavioral::*;
pub use creational::*;
pub use structural::*;
