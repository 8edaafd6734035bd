/// Node.js core modules, without the `node:` prefix.
const NODE_BUILTIN_MODULES: &[&str] = &[
  "assert",
  "assert/strict",
  "async_hooks",
  "buffer",
  "child_process",
  "cluster",
  "console",
  "constants",
  "crypto",
  "dgram",
  "diagnostics_channel",
  "dns",
  "dns/promises",
  "domain",
  "events",
  "fs",
  "fs/promises",
  "http",
  "http2",
  "https",
  "inspector",
  "module",
  "net",
  "os",
  "path",
  "path/posix",
  "path/win32",
  "perf_hooks",
  "process",
  "punycode",
  "querystring",
  "readline",
  "readline/promises",
  "repl",
  "stream",
  "stream/consumers",
  "stream/promises",
  "stream/web",
  "string_decoder",
  "sys",
  "timers",
  "timers/promises",
  "tls",
  "trace_events",
  "tty",
  "url",
  "util",
  "util/types",
  "v8",
  "vm",
  "wasi",
  "worker_threads",
  "zlib",
];

pub fn is_node_builtin_module(specifier: &str) -> bool {
  specifier.starts_with("node:") || NODE_BUILTIN_MODULES.binary_search(&specifier).is_ok()
}

#[test]
fn test_is_node_builtin_module() {
  assert!(NODE_BUILTIN_MODULES.windows(2).all(|pair| pair[0] < pair[1]));
  assert!(is_node_builtin_module("fs"));
  assert!(is_node_builtin_module("fs/promises"));
  assert!(is_node_builtin_module("node:test"));
  assert!(!is_node_builtin_module("lodash"));
  assert!(!is_node_builtin_module("./fs"));
}
