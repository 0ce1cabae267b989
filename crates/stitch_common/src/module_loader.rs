use arcstr::ArcStr;

/// Result of asking a [`ModuleLoader`] for a url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
  /// Source text of the module. It is parsed as an ES module.
  Loaded(ArcStr),
  /// The url exists at runtime outside the bundle. It stays referenced but is not inlined.
  NotNeeded,
}

/// Supplies module sources to the bundler.
///
/// Loading is expected to be idempotent. Errors abort the whole bundling run and are surfaced
/// unchanged, so prefer `BundleError::ModuleNotFound` for missing modules.
pub trait ModuleLoader {
  fn load(&self, url: &str) -> anyhow::Result<LoadOutcome>;
}

impl<F> ModuleLoader for F
where
  F: Fn(&str) -> anyhow::Result<LoadOutcome>,
{
  fn load(&self, url: &str) -> anyhow::Result<LoadOutcome> {
    self(url)
  }
}
