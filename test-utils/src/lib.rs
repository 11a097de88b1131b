//! LevelUp Test Utils
//!
//! Provides shared testing utilities for the levelup engine and its migration crate.
//! This crate offers a builder for scratch directories holding settings documents,
//! factories for legacy settings documents, and factories for Serenity API objects.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment owning a scratch data directory
//! - **factory**: Legacy (pre-migration) settings document builders
//! - **serenity**: Serenity `Member`/`Role` factories built from JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn loads_settings() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_legacy_document(factory::legacy::legacy_document())
//!         .build()?;
//!
//!     let path = test.legacy_path();
//!     // Run the loader against the scratch directory...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
