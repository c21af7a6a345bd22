//! Test module for apidoc-schema
//!
//! Cross-module tests for property derivation, driven by an in-memory model
//! that stands in for a reflection adapter.

#[cfg(test)]
pub mod support;


#[cfg(test)]
pub mod plugin_tests;
