pub mod ecmascript;
pub mod path_ext;

/// Concatenates anything that is `AsRef<str>` into a single `String`.
#[macro_export]
macro_rules! concat_string {
  () => { String::new() };
  ($($s:expr),+ $(,)?) => {{
    let mut out = String::new();
    $(out.push_str(::core::convert::AsRef::<str>::as_ref(&$s));)+
    out
  }};
}

#[test]
fn test_concat_string() {
  let name = String::from("foo");
  assert_eq!(concat_string!("var ", name, " = 1;"), "var foo = 1;");
  assert_eq!(concat_string!(), "");
}
