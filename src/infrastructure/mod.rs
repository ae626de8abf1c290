//! # Infrastructure Layer
//!
//! Concrete implementations of the domain's ports.

pub mod catalog;
