use esmpack_common::SourceJoiner;

/// Lazily runs a module factory once and hands out its exports object. A module that is still
/// initializing returns the partially filled object, which keeps import cycles working.
const MODULE: &str = "var __esmpack_module = (factory, cache) => () => {
  if (!cache) factory((cache = {}));
  return cache;
};";

const EXPORT: &str = "var __esmpack_export = (target, getters) => {
  for (let name in getters) Object.defineProperty(target, name, { get: getters[name], enumerable: true });
};";

const EXPORT_STAR: &str = "var __esmpack_export_star = (target, source) => {
  for (let name in source)
    if (name !== \"default\" && name !== \"__cjs_exports\" && !Object.prototype.hasOwnProperty.call(target, name))
      Object.defineProperty(target, name, { get: () => source[name], enumerable: true });
  return target;
};";

/// Wraps a required external module the way Node exposes CommonJS to ES modules. The wrapper is
/// tagged like a module namespace so converted CommonJS code requiring it gets `mod` back.
const TO_ESM: &str = "var __esmpack_to_esm = (mod) =>
  mod && mod.__esModule
    ? mod
    : __esmpack_export_star(Object.defineProperty({ default: mod }, Symbol.toStringTag, { value: \"Module\" }), mod);";

/// Tracks which runtime helpers the rendered code refers to.
#[derive(Debug, Default)]
pub struct RuntimeHelpers {
  pub export: bool,
  pub export_star: bool,
  pub to_esm: bool,
}

impl RuntimeHelpers {
  pub fn append_to(&self, source_joiner: &mut SourceJoiner<'_>) {
    source_joiner.append_source(MODULE);
    if self.export {
      source_joiner.append_source(EXPORT);
    }
    if self.export_star || self.to_esm {
      source_joiner.append_source(EXPORT_STAR);
    }
    if self.to_esm {
      source_joiner.append_source(TO_ESM);
    }
  }
}

#[test]
fn only_used_helpers_are_emitted() {
  let mut joiner = SourceJoiner::default();
  RuntimeHelpers::default().append_to(&mut joiner);
  let code = joiner.join();
  assert!(code.starts_with("var __esmpack_module ="));
  assert!(!code.contains("__esmpack_export"));

  let mut joiner = SourceJoiner::default();
  RuntimeHelpers { to_esm: true, ..Default::default() }.append_to(&mut joiner);
  let code = joiner.join();
  assert!(code.contains("var __esmpack_export_star ="));
  assert!(code.contains("var __esmpack_to_esm ="));
  assert!(code.contains(&format!("name !== \"{}\"", esmpack_plugin::COMMONJS_EXPORTS_ACCESSOR)));
}
