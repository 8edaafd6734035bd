use std::{io, path::Path};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    std::fs::write(path, content)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn is_file(&self, path: &Path) -> bool {
    path.metadata().is_ok_and(|meta| meta.is_file())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let fs = OsFileSystem;
    let nested = dir.path().join("a/b");
    fs.create_dir_all(&nested).unwrap();
    let file = nested.join("out.js");
    fs.write(&file, b"export {};\n").unwrap();
    assert!(fs.exists(&file));
    assert!(fs.is_file(&file));
    assert!(!fs.is_file(&nested));
    assert_eq!(fs.read_to_string(&file).unwrap(), "export {};\n");
  }
}
