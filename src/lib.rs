//! # dupmap
//!
//! An AST-based duplicate-method detector. Source files are parsed into
//! per-method syntax trees over a neutral kind taxonomy; candidate pairs are
//! prefiltered by a Bloom-filter fingerprint, scored with a kind-weighted
//! tree edit distance, and assembled into disjoint duplicate groups ranked by
//! refactoring impact.
//!
//! ## Quick start
//!
//! ```rust
//! use dupmap::config::DetectorOptions;
//! use dupmap::extract::{CSharpExtractor, MethodExtractor};
//! use std::path::Path;
//!
//! let source = r#"
//!     class A {
//!         int Sum(int[] xs) {
//!             var total = 0;
//!             foreach (var x in xs) {
//!                 total += x;
//!             }
//!             return total;
//!         }
//!     }
//! "#;
//! let mut extractor = CSharpExtractor::new().unwrap();
//! let parsed = extractor.extract_source(source, Path::new("a.cs")).unwrap();
//! let files = vec![parsed];
//!
//! let groups = dupmap::detect(&files, &DetectorOptions::default(), 0.87).unwrap();
//! assert!(groups.is_empty()); // a single method has nothing to duplicate
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! paths → walker → extractor (per-method trees, fingerprints)
//!       → eligibility filter → Bloom admission → parallel APTED scoring
//!       → group assembly → impact-ranked report
//! ```
//!
//! Scoring is embarrassingly parallel (rayon); group assembly is
//! single-threaded and driven by indices assigned before scoring, so results
//! are reproducible regardless of worker interleaving.

pub mod analysis;
pub mod apted;
pub mod cli;
pub mod config;
pub mod core;
pub mod detect;
pub mod extract;
pub mod fingerprint;
pub mod io;
pub mod observability;

pub use crate::analysis::similarity;
pub use crate::apted::{AptedCosts, AptedEngine};
pub use crate::config::{DetectorOptions, DEFAULT_THRESHOLD};
pub use crate::core::errors::{Error, Result};
pub use crate::core::kinds::{KindCategory, SyntaxKind};
pub use crate::core::tree::TreeNode;
pub use crate::core::{DuplicateEntry, DuplicateGroup, MethodInfo, ParsedFile};
pub use crate::detect::{detect, DuplicateDetector};
