use std::{borrow::Cow, ffi::OsStr, path::Path};

pub trait PathExt {
  fn representative_file_name(&self) -> Cow<str>;
}

impl PathExt for Path {
  /// The name a module's init function is derived from. `lib/index.js` is represented by `lib`.
  ///
  /// The result may still need to be legitimized into a JS identifier.
  fn representative_file_name(&self) -> Cow<str> {
    let file_name =
      self.file_stem().map_or_else(|| self.to_string_lossy(), |stem| stem.to_string_lossy());

    match &*file_name {
      "index" => self.parent().and_then(Self::file_stem).map_or(file_name, OsStr::to_string_lossy),
      _ => file_name,
    }
  }
}

#[test]
fn test_representative_file_name() {
  let project = Path::new("/project");
  assert_eq!(project.join("knex.js").representative_file_name(), "knex");
  assert_eq!(project.join("lib/index.js").representative_file_name(), "lib");
  assert_eq!(project.join("lib/client.cjs").representative_file_name(), "client");
  assert_eq!(Path::new("index.js").representative_file_name(), "index");
}
