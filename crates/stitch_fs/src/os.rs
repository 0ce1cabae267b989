use std::{fs, io, path::Path};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
  }
}

#[test]
fn writes_create_missing_directories() {
  let dir = tempfile::tempdir().unwrap();
  let target = dir.path().join("dist").join("bundle.js");

  OsFileSystem.write(&target, b"void 0;").unwrap();

  assert!(target.parent().unwrap().is_dir());
  assert_eq!(OsFileSystem.read_to_string(&target).unwrap(), "void 0;");
}
