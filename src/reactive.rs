//! Dependency-tracking data model
//!
//! This module provides access to tether-reactive: values, reactive objects,
//! dependency registries and watchers.

// Re-export all tether-reactive functionality
pub use tether_reactive::*;
