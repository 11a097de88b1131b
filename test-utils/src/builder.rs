use serde_json::Value;

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with seeded settings documents.
///
/// Provides a fluent interface for configuring a scratch data directory. Use the
/// builder to seed a current and/or legacy settings document, then call `build()`
/// to create the directory and write the seeds.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_legacy_document(legacy)
///     .build()?;
/// ```
pub struct TestBuilder {
    /// Document written to the current settings path (`LevelUp.json`).
    current: Option<Value>,

    /// Document written to the legacy settings path (`settings.json`).
    legacy: Option<Value>,

    /// Raw text written to the legacy path instead of a JSON document.
    ///
    /// Used to simulate unreadable legacy files.
    legacy_raw: Option<String>,
}

impl TestBuilder {
    /// Creates a new test builder with an empty data directory.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with no seeded documents
    pub fn new() -> Self {
        Self {
            current: None,
            legacy: None,
            legacy_raw: None,
        }
    }

    /// Seeds the current settings document.
    ///
    /// # Arguments
    /// - `document` - JSON document to write to `LevelUp.json`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_current_document(mut self, document: Value) -> Self {
        self.current = Some(document);
        self
    }

    /// Seeds the legacy settings document.
    ///
    /// # Arguments
    /// - `document` - JSON document to write to `settings.json`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_legacy_document(mut self, document: Value) -> Self {
        self.legacy = Some(document);
        self
    }

    /// Seeds the legacy settings path with arbitrary text.
    ///
    /// # Arguments
    /// - `text` - Raw file contents, typically not valid JSON
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_legacy_text(mut self, text: &str) -> Self {
        self.legacy_raw = Some(text.to_string());
        self
    }

    /// Creates the scratch directory and writes every seeded document.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning the scratch directory
    /// - `Err(TestError::Io)` - Failed to create the directory or write a file
    /// - `Err(TestError::Json)` - Failed to serialize a seeded document
    pub fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        if let Some(document) = self.current {
            std::fs::write(context.settings_path(), serde_json::to_vec_pretty(&document)?)?;
        }

        if let Some(document) = self.legacy {
            std::fs::write(context.legacy_path(), serde_json::to_vec_pretty(&document)?)?;
        }

        if let Some(text) = self.legacy_raw {
            std::fs::write(context.legacy_path(), text)?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
