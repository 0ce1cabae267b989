use pretty_assertions::assert_eq;
use stitch::{
  BuildError, BundleError, BundleOutput, Bundler, BundlerOptions, LoaderStrategy,
  MemoryModuleLoader,
};
use stitch_ecmascript::EcmaCompiler;

const PAGE_LOAD: &str = r#"document.readyState === "complete" ? Promise.resolve() : new Promise((resolve) => addEventListener("load", () => resolve(), { once: true }))"#;

fn options(input: &[&str], loader: LoaderStrategy) -> BundlerOptions {
  BundlerOptions {
    input: Some(input.iter().map(|&entry| entry.into()).collect()),
    loader: Some(loader),
    ..Default::default()
  }
}

fn bundle(options: BundlerOptions, loader: MemoryModuleLoader) -> BundleOutput {
  Bundler::with_loader(options, loader).bundle().unwrap()
}

fn bundle_err(options: BundlerOptions, loader: MemoryModuleLoader) -> BuildError {
  Bundler::with_loader(options, loader).bundle().unwrap_err()
}

fn normalize(source: &str) -> String {
  EcmaCompiler::normalize(source).unwrap()
}

fn lines(code: &str) -> Vec<&str> {
  code.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

/// Checks that the printed form of `fragment` shows up in `code`, ignoring indentation. With
/// `in_generator`, the fragment is printed as the body of an async generator.
fn assert_prints(code: &str, fragment: &str, in_generator: bool) {
  let printed = if in_generator {
    normalize(&format!("async function* f() {{\n{fragment}\n}}"))
  } else {
    normalize(fragment)
  };
  let mut needle = lines(&printed);
  if in_generator {
    needle = needle[1..needle.len() - 1].to_vec();
  }
  assert!(
    lines(code).windows(needle.len()).any(|window| window == needle),
    "expected\n{}\nin\n{code}",
    needle.join("\n")
  );
}

#[test]
fn eager_without_modules_only_defines_the_globals() {
  let output = bundle(options(&[], LoaderStrategy::Eager), MemoryModuleLoader::default());

  assert_eq!(
    output.code,
    normalize(&format!(
      "Object.defineProperties(window, {{pageLoad: {{value: {PAGE_LOAD}}}, include: {{value: (url) => import(url)}}}});"
    ))
  );
  assert!(output.modules.is_empty());
  assert!(output.warnings.is_empty());
}

#[test]
fn eager_bundle_publishes_frozen_accessors() {
  let loader = MemoryModuleLoader::new([
    ("/main.js", "import { count, name } from './a.js';\nconsole.log(count, name);"),
    ("/a.js", "export let count = 0;\nexport const name = 'a';"),
  ]);
  let output = bundle(options(&["main.js"], LoaderStrategy::Eager), loader);

  let expected = format!(
    r#"{{
  const table = {{}};
  Object.defineProperties(window, {{
    pageLoad: {{ value: {PAGE_LOAD} }},
    include: {{ value: (url) => table[url] }},
  }});
  const modules = [];
  modules.push(["/a.js", function* () {{
    "use strict";
    let count = 0;
    yield {{count: {{get: () => count, set: (v) => count = v, enumerable: true}}}};
    const name = "a";
    yield {{name: {{get: () => name, enumerable: true}}}};
  }}]);
  modules.push(["/main.js", function* () {{
    "use strict";
    const {{count, name}} = include("/a.js");
    console.log(count, name);
  }}]);
  for (const [url, thunk] of modules) {{
    table[url] = Object.freeze(Object.defineProperties({{}}, Object.assign({{}}, ...thunk())));
  }}
  Object.freeze(table);
}}"#
  );

  assert_eq!(output.code, normalize(&expected));
  assert_eq!(output.modules, ["/a.js", "/main.js"]);
}

#[test]
fn eager_default_bindings_keep_their_mutability() {
  let loader = MemoryModuleLoader::new([
    ("/main.js", "import x, { label } from './a.js';\nconsole.log(x, label);"),
    ("/a.js", "let x = 0;\nexport { x as default };\nexport const label = 'a';"),
  ]);
  let output = bundle(options(&["main.js"], LoaderStrategy::Eager), loader);

  assert_prints(
    &output.code,
    r#"let x = 0;
    yield {default: {get: () => x, set: (v) => x = v, enumerable: true}};
    const label = "a";
    yield {label: {get: () => label, enumerable: true}};"#,
    true,
  );
  assert_prints(&output.code, r#"const {default: x, label} = include("/a.js");"#, true);
  assert_eq!(output.code.matches(r#""use strict";"#).count(), 2);
  assert_eq!(output.modules, ["/a.js", "/main.js"]);
}

#[test]
fn top_level_await_needs_the_lazy_loader() {
  let modules = [
    ("/main.js", "import { data } from './data.js';\nconsole.log(data);"),
    ("/data.js", "const data = await Promise.resolve(1);\nexport { data };"),
  ];

  let error =
    bundle_err(options(&["main.js"], LoaderStrategy::Eager), MemoryModuleLoader::new(modules));
  assert!(matches!(
    error.bundle_error(),
    Some(BundleError::TopLevelAwait { url }) if url == "/data.js"
  ));

  let output =
    bundle(options(&["main.js"], LoaderStrategy::Lazy), MemoryModuleLoader::new(modules));
  assert_prints(&output.code, "const data = await Promise.resolve(1);", true);
}

#[test]
fn modules_are_emitted_after_their_dependencies() {
  let loader = MemoryModuleLoader::new([
    ("/main.js", "import './a.js';\nimport './b.js';"),
    ("/a.js", "import './c.js';"),
    ("/b.js", "import './c.js';"),
    ("/c.js", "export const c = 1;"),
  ]);
  let output = bundle(options(&["main.js"], LoaderStrategy::Lazy), loader);

  assert_eq!(output.modules, ["/c.js", "/a.js", "/b.js", "/main.js"]);
}

#[test]
fn specifiers_meeting_on_one_url_share_a_module() {
  let loader = MemoryModuleLoader::new([
    (
      "/src/main.js",
      "import { a } from './lib/a.js';\nimport { b } from '../src/lib/./a.js';\nimport './lib/a.js';",
    ),
    ("/src/lib/a.js", "export const a = 1, b = 2;"),
  ]);
  let output = bundle(options(&["src/main.js", "/src/main.js"], LoaderStrategy::Eager), loader);

  assert_eq!(output.modules, ["/src/lib/a.js", "/src/main.js"]);
  assert_eq!(output.code.matches(r#"include("/src/lib/a.js")"#).count(), 1);
  assert_prints(&output.code, r#"const {a, b} = include("/src/lib/a.js");"#, false);
}

#[test]
fn cycles_are_rejected_whatever_the_entry() {
  let modules =
    [("/a.js", "import './b.js';"), ("/b.js", "import './c.js';"), ("/c.js", "import './a.js';")];

  for entry in ["a.js", "b.js", "c.js"] {
    let error =
      bundle_err(options(&[entry], LoaderStrategy::Lazy), MemoryModuleLoader::new(modules));
    let Some(BundleError::CircularImport { chain }) = error.bundle_error() else {
      panic!("expected a circular import for {entry}, got {error:?}");
    };
    assert_eq!(chain.len(), 4);
    assert_eq!(chain.first(), chain.last());
  }
}

#[test]
fn self_import_is_a_cycle() {
  let loader = MemoryModuleLoader::new([("/a.js", "export const a = () => include('./a.js');")]);
  let error = bundle_err(options(&["a.js"], LoaderStrategy::Eager), loader);

  assert!(matches!(
    error.bundle_error(),
    Some(BundleError::CircularImport { chain }) if *chain == ["/a.js", "/a.js"]
  ));
}

#[test]
fn missing_modules_abort_the_bundle() {
  let loader = MemoryModuleLoader::new([("/main.js", "import './missing.js';")]);
  let error = bundle_err(options(&["main.js"], LoaderStrategy::Lazy), loader);

  assert!(matches!(
    error.bundle_error(),
    Some(BundleError::ModuleNotFound { url }) if url == "/missing.js"
  ));
}

#[test]
fn parse_errors_name_the_module() {
  let loader =
    MemoryModuleLoader::new([("/main.js", "import './broken.js';"), ("/broken.js", "let = ;")]);
  let error = bundle_err(options(&["main.js"], LoaderStrategy::Lazy), loader);

  assert!(matches!(
    error.bundle_error(),
    Some(BundleError::ParseError { url, .. }) if url == "/broken.js"
  ));
}

#[test]
fn dynamic_imports_share_the_static_url() {
  let loader = MemoryModuleLoader::new([
    (
      "/app/main.js",
      "import './dep.js';
export const load = () => import('./dep.js');
export const other = (name) => import(name);",
    ),
    ("/app/dep.js", "export default 1;"),
  ]);
  let output = bundle(options(&["app/main.js"], LoaderStrategy::Lazy), loader);

  assert!(output.code.contains(r#"await include("/app/dep.js")"#), "{}", output.code);
  assert!(output.code.contains(r#"window.include("/app/dep.js")"#), "{}", output.code);
  assert!(output.code.contains("import(name)"), "{}", output.code);
  assert_eq!(output.modules, ["/app/dep.js", "/app/main.js"]);
}

#[test]
fn lazy_bundle_registers_async_thunks() {
  let loader = MemoryModuleLoader::new([
    (
      "/main.js",
      "import * as ns from './a.js';
import def, { a } from './a.js';
export * from './a.js';
export { a as renamed } from './a.js';",
    ),
    ("/a.js", "export const a = 1;\nexport default function named() {}"),
  ]);
  let output = bundle(options(&["main.js"], LoaderStrategy::Lazy), loader);
  let code = &output.code;

  assert!(code.contains("const included = new Map()"), "{code}");
  assert!(code.contains("async function* ()"), "{code}");
  assert_prints(
    code,
    r#"const __stitch_dep0__ = await include("/a.js"), {...ns} = __stitch_dep0__, {default: def, a} = ns;"#,
    true,
  );
  assert!(code.contains("Object.getOwnPropertyDescriptors(__stitch_dep0__)"), "{code}");
  assert!(code.contains("get: () => __stitch_dep0__.a"), "{code}");
  assert!(code.contains("function named() {}"), "{code}");
  assert!(code.contains("default: {"), "{code}");
}

#[test]
fn adjacent_publications_are_compacted() {
  let loader = MemoryModuleLoader::new([(
    "/main.js",
    "const a = 1;\nconst b = 2;\nexport { a, b };\nexport { a as c };\nexport default a + b;",
  )]);
  let output = bundle(options(&["main.js"], LoaderStrategy::Eager), loader);

  assert_prints(
    &output.code,
    "const a = 1, b = 2;
    yield* [
      { a: { get: () => a, enumerable: true }, b: { get: () => b, enumerable: true } },
      { c: { get: () => a, enumerable: true } },
      { default: { value: a + b, enumerable: true } },
    ];",
    true,
  );
}

#[test]
fn not_needed_modules_are_referenced_but_not_bundled() {
  let loader =
    MemoryModuleLoader::new([("/main.js", "import { render } from './vendor.js';\nrender();")])
      .not_needed("/vendor.js");
  let output = bundle(options(&["main.js"], LoaderStrategy::Lazy), loader);

  assert_eq!(output.modules, ["/main.js"]);
  assert!(output.code.contains(r#"await include("/vendor.js")"#), "{}", output.code);
  assert!(!output.code.contains(r#"modules.push(["/vendor.js""#));
}

#[test]
fn lazy_reexports_of_not_needed_modules_read_the_awaited_exports() {
  let loader = MemoryModuleLoader::new([(
    "/main.js",
    "export { render as draw } from './vendor.js';
export * from './vendor.js';
export * as vendor from './vendor.js';",
  )])
  .not_needed("/vendor.js");
  let output = bundle(options(&["main.js"], LoaderStrategy::Lazy), loader);
  let code = &output.code;

  assert_prints(
    code,
    r#"const __stitch_dep0__ = await include("/vendor.js");
    yield* [
      ((descriptors) => (delete descriptors.default, descriptors))(Object.getOwnPropertyDescriptors(__stitch_dep0__)),
      {draw: {get: () => __stitch_dep0__.render, enumerable: true}},
      {vendor: {value: __stitch_dep0__, enumerable: true}},
    ];"#,
    true,
  );
  assert_eq!(code.matches(r#"include("/vendor.js""#).count(), 1, "{code}");
  assert_eq!(output.modules, ["/main.js"]);
}

#[test]
fn eager_bundles_fall_back_to_import_for_missing_modules() {
  let loader = MemoryModuleLoader::new([("/main.js", "import './vendor/lib.js';")]);
  let output = bundle(
    BundlerOptions {
      external: Some(vec!["/vendor/".to_string()]),
      ..options(&["main.js"], LoaderStrategy::Eager)
    },
    loader,
  );

  assert_eq!(output.modules, ["/main.js"]);
  assert!(output.code.contains("table[url] ?? import(url)"), "{}", output.code);
  assert_eq!(output.warnings.len(), 1);
  assert!(output.warnings[0].to_string().contains("/vendor/lib.js"));
}

#[test]
fn bare_bundles_publish_nothing() {
  let loader = MemoryModuleLoader::new([
    ("/main.js", "import { a } from './a.js';\nexport default a;\nexport * from './a.js';"),
    ("/a.js", "export let a = 1;\nexport { a as b };"),
  ]);
  let output = bundle(
    BundlerOptions { bare: Some(true), ..options(&["main.js"], LoaderStrategy::Eager) },
    loader,
  );

  assert!(!output.code.contains("yield"), "{}", output.code);
  assert!(output.code.contains("let a = 1;"), "{}", output.code);
  assert_eq!(output.modules, ["/a.js", "/main.js"]);
}

#[test]
fn entries_resolve_against_the_base() {
  let loader = MemoryModuleLoader::new([
    ("/static/main.js", "import './lib/a.js';"),
    ("/static/lib/a.js", ""),
  ]);
  let output = bundle(
    BundlerOptions {
      base: Some("static/".to_string()),
      ..options(&["./main.js"], LoaderStrategy::Lazy)
    },
    loader,
  );

  assert_eq!(output.modules, ["/static/lib/a.js", "/static/main.js"]);
}

#[test]
fn write_puts_the_bundle_on_disk() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("main.js"), "import { a } from './a.js';\nconsole.log(a);")
    .unwrap();
  std::fs::write(dir.path().join("a.js"), "export const a = 1;").unwrap();

  let bundler = Bundler::new(BundlerOptions {
    cwd: Some(dir.path().to_path_buf()),
    file: Some("dist/bundle.js".to_string()),
    ..options(&["main.js"], LoaderStrategy::Eager)
  });
  let output = bundler.write().unwrap();

  let written = std::fs::read_to_string(dir.path().join("dist").join("bundle.js")).unwrap();
  assert_eq!(written, output.code);
  assert_eq!(output.modules, ["/a.js", "/main.js"]);
}
