use std::{io, path::PathBuf};

use anyhow::Context;
use stitch_common::{LoadOutcome, ModuleLoader};
use stitch_error::BundleError;
use stitch_fs::{FileSystem, OsFileSystem};

/// Serves urls from a directory: `/a/b.js` is read from `<root>/a/b.js`.
pub struct FsModuleLoader<F: FileSystem = OsFileSystem> {
  fs: F,
  root: PathBuf,
}

impl<F: FileSystem> FsModuleLoader<F> {
  pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
    Self { fs, root: root.into() }
  }

  pub fn path_of(&self, url: &str) -> PathBuf {
    self.root.join(url.trim_start_matches('/'))
  }
}

impl<F: FileSystem> ModuleLoader for FsModuleLoader<F> {
  fn load(&self, url: &str) -> anyhow::Result<LoadOutcome> {
    let path = self.path_of(url);
    match self.fs.read_to_string(&path) {
      Ok(source) => Ok(LoadOutcome::Loaded(source.into())),
      Err(err) if err.kind() == io::ErrorKind::NotFound => {
        Err(BundleError::ModuleNotFound { url: url.to_string() }.into())
      }
      Err(err) => Err(err).with_context(|| format!("Failed to read {url} from {}", path.display())),
    }
  }
}
