use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
  /// `chain` starts and ends with the same url.
  #[error("Circular import: {}", chain.join(" -> "))]
  CircularImport { chain: Vec<String> },

  #[error("Module not found: {url}")]
  ModuleNotFound { url: String },

  #[error("Failed to parse {url}:\n{message}")]
  ParseError { url: String, message: String },

  /// Only the lazy loader runs module bodies as async functions.
  #[error("Top-level await in {url} requires the lazy loader")]
  TopLevelAwait { url: String },
}

#[test]
fn circular_import_message_lists_the_chain() {
  let error = BundleError::CircularImport {
    chain: vec!["/a.js".to_string(), "/b.js".to_string(), "/a.js".to_string()],
  };

  assert_eq!(error.to_string(), "Circular import: /a.js -> /b.js -> /a.js");
}

#[test]
fn top_level_await_names_the_module() {
  let error = BundleError::TopLevelAwait { url: "/data.js".to_string() };

  assert_eq!(error.to_string(), "Top-level await in /data.js requires the lazy loader");
}
