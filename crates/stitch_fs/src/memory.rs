use std::{
  cell::RefCell,
  io,
  path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use sugar_path::SugarPath;

use crate::FileSystem;

/// In-memory file system. Paths are normalized, so `a/./b.js` and `a/b.js` name the same file.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
  files: RefCell<FxHashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
  pub fn new<P: AsRef<Path>, S: Into<String>>(files: impl IntoIterator<Item = (P, S)>) -> Self {
    let fs = Self::default();
    for (path, content) in files {
      fs.add_file(path.as_ref(), content);
    }
    fs
  }

  pub fn add_file(&self, path: &Path, content: impl Into<String>) {
    self.files.borrow_mut().insert(path.normalize(), content.into());
  }
}

impl FileSystem for MemoryFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    self.files.borrow().get(&path.normalize()).cloned().ok_or_else(|| {
      io::Error::new(io::ErrorKind::NotFound, format!("{} does not exist", path.display()))
    })
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    let content = String::from_utf8(content.to_vec())
      .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    self.add_file(path, content);
    Ok(())
  }
}

#[test]
fn normalizes_paths() {
  let fs = MemoryFileSystem::new([("/project/src/./main.js", "main")]);

  assert_eq!(fs.read_to_string(Path::new("/project/src/main.js")).unwrap(), "main");
  assert_eq!(fs.read_to_string(Path::new("/project/lib/../src/main.js")).unwrap(), "main");
  assert_eq!(
    fs.read_to_string(Path::new("/project/missing.js")).unwrap_err().kind(),
    io::ErrorKind::NotFound
  );
}
