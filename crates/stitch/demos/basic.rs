use std::path::PathBuf;
use sugar_path::SugarPath;

use stitch::{Bundler, BundlerOptions, LoaderStrategy};

fn main() {
  env_logger::Builder::new().filter_level(log::LevelFilter::Debug).parse_default_env().init();

  let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/basic");

  let bundler = Bundler::new(BundlerOptions {
    input: Some(vec!["./entry.js".into()]),
    cwd: Some(root.normalize()),
    file: Some("dist/bundle.js".to_string()),
    loader: Some(LoaderStrategy::Lazy),
    external: Some(vec!["/vendor/".to_string()]),
    ..Default::default()
  });

  match bundler.write() {
    Ok(output) => log::info!("Bundled {}", output.modules.join(", ")),
    Err(errors) => errors.iter().for_each(|error| log::error!("{error:?}")),
  }
}
