use std::path::PathBuf;

use clap::Args;

use crate::types::loader::Loader;

#[derive(Args)]
pub struct InputArgs {
  /// Entry files, relative to `--base`.
  pub entries: Vec<String>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub input: Option<Vec<String>>,

  #[clap(long)]
  pub cwd: Option<PathBuf>,

  /// Directory served as `/`. Defaults to `--cwd`.
  #[clap(long)]
  pub root: Option<PathBuf>,

  #[clap(long)]
  pub base: Option<String>,

  /// Url prefix left to the runtime. Repeatable.
  #[clap(long, action = clap::ArgAction::Append)]
  pub external: Option<Vec<String>>,

  /// JSON file with bundler options. Flags take precedence.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Without it the bundle is printed to stdout.
  #[clap(long, short = 'o')]
  pub file: Option<String>,
}

#[derive(Args)]
pub struct EnhanceArgs {
  #[clap(long)]
  pub loader: Option<Loader>,

  /// Skip export publication.
  #[clap(long)]
  pub bare: bool,

  #[clap(long, short = 'v', action = clap::ArgAction::Count)]
  pub verbose: u8,
}
