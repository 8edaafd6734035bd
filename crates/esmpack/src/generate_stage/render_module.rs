use esmpack_common::{ImportBinding, ImportRecordIdx, ImportReferenceKind, ModuleDecl, NormalModule};
use esmpack_utils::{
  concat_string,
  ecmascript::{property_access_str, to_module_import_export_name},
};
use rustc_hash::FxHashMap;
use string_wizard::MagicString;

use super::{runtime::RuntimeHelpers, GenerateContext};

const DEFAULT_EXPORT: &str = "__esmpack_default";

fn namespace_var(record: ImportRecordIdx) -> String {
  format!("__esmpack_ns_{}", record.index())
}

/// Binds the importees of import and re-export statements in source order and returns, for each
/// default or named import, the expression reading it from the importee's exports.
fn render_imports(
  ctx: &GenerateContext<'_>,
  module: &NormalModule,
  helpers: &mut RuntimeHelpers,
  imports: &mut String,
) -> FxHashMap<String, String> {
  let mut bindings = FxHashMap::default();
  for decl in &module.decls {
    let Some(record) = decl.record() else { continue };
    let importee = module.importee(record);
    let importee_expr = ctx.importee_expr(importee);
    match decl {
      ModuleDecl::Import { bindings: specifiers, .. } if specifiers.is_empty() => {
        if !ctx.is_external(importee) {
          imports.push_str(&concat_string!(importee_expr, ";\n"));
        }
      }
      ModuleDecl::Import { bindings: specifiers, .. } => {
        let namespace = if ctx.is_external(importee) {
          importee_expr
        } else {
          let namespace = namespace_var(record);
          imports.push_str(&concat_string!("var ", namespace, " = ", importee_expr, ";\n"));
          namespace
        };
        for specifier in specifiers {
          match specifier {
            ImportBinding::Namespace { local } => {
              imports.push_str(&concat_string!("var ", local, " = ", namespace, ";\n"));
            }
            ImportBinding::Default { local } | ImportBinding::Named { local, .. } => {
              let imported = specifier.imported().unwrap_or("default");
              bindings.insert(local.clone(), property_access_str(&namespace, imported));
            }
          }
        }
      }
      ModuleDecl::ReExportNamed { .. } | ModuleDecl::ReExportNamespace { .. } => {
        imports.push_str(&concat_string!("var ", namespace_var(record), " = ", importee_expr, ";\n"));
      }
      ModuleDecl::ReExportAll { .. } => {
        imports.push_str(&concat_string!("__esmpack_export_star(__exports, ", importee_expr, ");\n"));
        helpers.export_star = true;
      }
      _ => {}
    }
  }
  bindings
}

/// Renders an internal module as a lazily initialized factory:
///
/// ```js
/// // lib/client.js
/// var __esmpack_init_client = __esmpack_module((__exports) => {
///   __esmpack_export(__exports, { default: () => __esmpack_default });
///   var __esmpack_ns_0 = __esmpack_init_pool();
///   ...
///   new __esmpack_ns_0.Pool();
/// });
/// ```
///
/// Export getters are installed before any import runs, and imported bindings are read from the
/// importee's exports where they are used. A module caught in a cycle therefore only touches a
/// binding of its importer when the code using it runs, and every import stays live.
pub fn render_module(
  ctx: &GenerateContext<'_>,
  module: &NormalModule,
  helpers: &mut RuntimeHelpers,
) -> String {
  let source = module.source.as_str();
  let mut magic_string = MagicString::new(source);
  let mut getters: Vec<(String, String)> = vec![];
  let mut imports = String::new();
  let import_bindings = render_imports(ctx, module, helpers, &mut imports);

  if let Some(hashbang) = module.hashbang {
    magic_string.remove(hashbang.start as usize, hashbang.end as usize);
  }

  for decl in &module.decls {
    let span = decl.span();
    match decl {
      ModuleDecl::Import { .. } | ModuleDecl::ReExportAll { .. } => {
        magic_string.remove(span.start as usize, span.end as usize);
      }
      ModuleDecl::ExportDeclaration { declaration_start, names, .. } => {
        magic_string.remove(span.start as usize, *declaration_start as usize);
        getters.extend(names.iter().map(|name| (name.clone(), name.clone())));
      }
      ModuleDecl::ExportDefaultDeclaration { declaration_start, local, .. } => {
        magic_string.remove(span.start as usize, *declaration_start as usize);
        getters.push(("default".to_string(), local.clone()));
      }
      ModuleDecl::ExportDefaultExpression { expression_start, .. } => {
        magic_string.update(
          span.start as usize,
          *expression_start as usize,
          concat_string!("var ", DEFAULT_EXPORT, " = "),
        );
        if !source[..span.end as usize].ends_with(';') {
          magic_string.append_left(span.end as usize, ";");
        }
        getters.push(("default".to_string(), DEFAULT_EXPORT.to_string()));
      }
      ModuleDecl::ExportNamed { specifiers, .. } => {
        magic_string.remove(span.start as usize, span.end as usize);
        getters.extend(specifiers.iter().map(|(local, exported)| (exported.clone(), local.clone())));
      }
      ModuleDecl::ReExportNamed { record, specifiers, .. } => {
        magic_string.remove(span.start as usize, span.end as usize);
        let namespace = namespace_var(*record);
        getters.extend(specifiers.iter().map(|(imported, exported)| {
          (exported.clone(), property_access_str(&namespace, imported))
        }));
      }
      ModuleDecl::ReExportNamespace { record, exported, .. } => {
        magic_string.remove(span.start as usize, span.end as usize);
        getters.push((exported.clone(), namespace_var(*record)));
      }
    }
  }

  for reference in &module.import_references {
    let Some(expr) = import_bindings.get(&reference.local) else { continue };
    let replacement = match reference.kind {
      ImportReferenceKind::Read => expr.clone(),
      ImportReferenceKind::Callee => concat_string!("(0, ", expr, ")"),
      ImportReferenceKind::Shorthand => concat_string!(reference.local, ": ", expr),
    };
    magic_string.update(reference.span.start as usize, reference.span.end as usize, replacement);
  }

  for (span, record) in &module.dynamic_imports {
    let importee = module.importee(*record);
    if !ctx.is_external(importee) {
      magic_string.update(
        span.start as usize,
        span.end as usize,
        concat_string!("Promise.resolve().then(() => ", ctx.importee_expr(importee), ")"),
      );
    }
  }

  let mut header = concat_string!(
    "// ",
    module.stable_id,
    "\nvar ",
    ctx.binding_name(module.idx),
    " = __esmpack_module((__exports) => {\n"
  );
  if !getters.is_empty() {
    helpers.export = true;
    let getters = getters
      .iter()
      .map(|(exported, local)| {
        // `import { a } from './a'; export { a };`
        let value = import_bindings.get(local).unwrap_or(local);
        concat_string!(to_module_import_export_name(exported), ": () => ", value)
      })
      .collect::<Vec<_>>();
    header.push_str(&concat_string!("__esmpack_export(__exports, { ", getters.join(", "), " });\n"));
  }
  header.push_str(&imports);

  magic_string.prepend(header);
  magic_string.append("\n});");
  magic_string.to_string()
}
