//! Specgate Analyzer
//!
//! The three single-input analyses of the release gate.
//!
//! # Overview
//!
//! - **Coverage**: how many current specifications each category has against
//!   a [`CategoryCoverageModel`], folded into a 0-100 maturity score and a gap
//!   list.
//! - **Bias**: whether a proposed question steers the answer, with neutral
//!   rephrasings when it does.
//! - **Paths**: greedy vs thorough execution, costed in tokens and
//!   recommended by maturity.
//!
//! Every analyzer validates its configuration at construction and its input
//! before doing any work. All of them are pure and `Send + Sync`.
//!
//! # Example Usage
//!
//! ```
//! use specgate_analyzer::{CoverageAnalyzer, PathOptimizer};
//! use specgate_domain::Specification;
//!
//! let analyzer = CoverageAnalyzer::default_config().unwrap();
//! let specs = vec![Specification::new("p", "goals", "Ship an MVP", 0.9, 1)];
//! let report = analyzer.analyze_coverage(&specs).unwrap();
//! assert!(!report.passed);
//!
//! let optimizer = PathOptimizer::default_config().unwrap();
//! let comparison = optimizer.compare_paths("mvp", report.score).unwrap();
//! assert_eq!(comparison.recommended_id(), "thorough");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bias;
mod config;
mod coverage;
mod error;
mod model;
mod path;

pub use bias::{BiasDetector, BiasMatch, BiasReport, BiasType};
pub use config::{BiasConfig, CoverageConfig, PathConfig, PatternConfig, DEFAULT_CATEGORIES};
pub use coverage::{CoverageAnalyzer, CoverageGap, CoverageReport};
pub use error::AnalyzerError;
pub use model::CategoryCoverageModel;
pub use path::{
    PathCandidate, PathComparison, PathOptimizer, Risk, GREEDY, HIGH_RISK_THRESHOLD,
    RECOMMENDATION_THRESHOLD, THOROUGH,
};
