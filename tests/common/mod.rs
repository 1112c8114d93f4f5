//! Common test utilities for badmap.
//!
//! This module provides shared fixtures for testing the colormap
//! registry against real source directories.

// Re-export all common test utilities
pub mod test_data;
