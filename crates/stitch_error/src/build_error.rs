use std::ops::{Deref, DerefMut};

use crate::BundleError;

/// One or more diagnostics raised while bundling. The first entry is the one that aborted the run.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Finds the first typed bundler diagnostic, if any.
  pub fn bundle_error(&self) -> Option<&BundleError> {
    self.0.iter().find_map(|error| error.downcast_ref::<BundleError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<BundleError> for BuildError {
  fn from(error: BundleError) -> Self {
    Self(vec![error.into()])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn finds_typed_error_among_plain_ones() {
  let error = BuildError(vec![
    anyhow::anyhow!("unrelated"),
    BundleError::ModuleNotFound { url: "/a.js".to_string() }.into(),
  ]);

  assert!(matches!(error.bundle_error(), Some(BundleError::ModuleNotFound { url }) if url == "/a.js"));
  assert_eq!(error.len(), 2);
}
