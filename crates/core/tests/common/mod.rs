//! # Common Test Infrastructure
//!
//! Shared helpers used across the unit test tree.
