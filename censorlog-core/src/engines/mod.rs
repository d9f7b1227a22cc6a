// censorlog-core/src/engines/mod.rs
//! Concrete implementations of the `RedactionEngine` trait.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod key_value_engine;
