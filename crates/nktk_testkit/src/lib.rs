//! # nktk Testkit
//!
//! Test utilities for nktk.
//!
//! This crate provides:
//! - Sample tracks and stored response files
//! - Property-based test generators using proptest
//! - Fuzz testing harnesses
//! - Wire vectors shared with other implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nktk_testkit::prelude::*;
//!
//! #[test]
//! fn test_sample_roundtrip() {
//!     let track = mountain_loop();
//!     let fragment = nktk_codec::encode_fragment(&track).unwrap();
//!     // ... decode and compare
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use vectors::*;
