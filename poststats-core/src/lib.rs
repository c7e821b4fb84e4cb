//! # poststats-core
//!
//! Core library for poststats - per-author statistics over social media posts.
//!
//! This library provides:
//! - Domain types for hydrated posts
//! - Accumulate/finalize statistic calculators and their result tree
//! - Feed file ingestion
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data flow
//!
//! - **Ingest:** feed files are hydrated into [`SocialPost`]s
//! - **Accumulate:** each post is offered to every configured calculator
//!   whose date window contains it
//! - **Finalize:** calculators turn their running state into a
//!   [`StatisticsNode`](analytics::StatisticsNode) tree
//!
//! ## Example
//!
//! ```rust,no_run
//! use poststats_core::analytics::create_composite;
//! use poststats_core::{ingest, Config};
//! use std::path::Path;
//!
//! let config = Config::load().expect("failed to load config");
//! let params = config.statistics.params().expect("invalid statistics config");
//!
//! let input = ingest::read_posts(Path::new("posts.jsonl")).expect("failed to read posts");
//! let mut composite = create_composite(&params);
//! composite.accumulate_all(&input.posts).expect("accumulate");
//! let tree = composite.calculate().expect("calculate");
//! println!("{}", serde_json::to_string_pretty(&tree).unwrap());
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod types;
