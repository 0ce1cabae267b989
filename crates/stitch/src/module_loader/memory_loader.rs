use arcstr::ArcStr;
use rustc_hash::{FxHashMap, FxHashSet};
use stitch_common::{LoadOutcome, ModuleLoader};
use stitch_error::BundleError;

/// Module sources held in memory, keyed by url.
#[derive(Debug, Default, Clone)]
pub struct MemoryModuleLoader {
  modules: FxHashMap<String, ArcStr>,
  not_needed: FxHashSet<String>,
}

impl MemoryModuleLoader {
  pub fn new<'a>(modules: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
    Self {
      modules: modules.into_iter().map(|(url, source)| (url.to_string(), source.into())).collect(),
      not_needed: FxHashSet::default(),
    }
  }

  pub fn add_module(&mut self, url: impl Into<String>, source: impl Into<ArcStr>) -> &mut Self {
    self.modules.insert(url.into(), source.into());
    self
  }

  /// `url` is answered with [`LoadOutcome::NotNeeded`].
  pub fn not_needed(mut self, url: impl Into<String>) -> Self {
    self.not_needed.insert(url.into());
    self
  }
}

impl ModuleLoader for MemoryModuleLoader {
  fn load(&self, url: &str) -> anyhow::Result<LoadOutcome> {
    if self.not_needed.contains(url) {
      return Ok(LoadOutcome::NotNeeded);
    }
    match self.modules.get(url) {
      Some(source) => Ok(LoadOutcome::Loaded(source.clone())),
      None => Err(BundleError::ModuleNotFound { url: url.to_string() }.into()),
    }
  }
}

#[test]
fn answers_from_memory() {
  let mut loader = MemoryModuleLoader::new([("/a.js", "a")]).not_needed("/b.js");
  loader.add_module("/c.js", "c");

  assert_eq!(loader.load("/a.js").unwrap(), LoadOutcome::Loaded("a".into()));
  assert_eq!(loader.load("/b.js").unwrap(), LoadOutcome::NotNeeded);
  assert_eq!(loader.load("/c.js").unwrap(), LoadOutcome::Loaded("c".into()));
  assert!(loader.load("/d.js").is_err());
}
