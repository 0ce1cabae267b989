use serde::Deserialize;

/// Runtime loader emitted in front of the bundled modules. A bundle uses exactly one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderStrategy {
  /// Frozen accessor table, `include(url)` answers synchronously. Meant for bundles that contain
  /// every module they reference.
  Eager,
  /// Thunk registry with a fallback to native `import()` for urls outside the bundle.
  #[default]
  Lazy,
}

impl LoaderStrategy {
  pub fn is_lazy(self) -> bool {
    matches!(self, Self::Lazy)
  }
}
