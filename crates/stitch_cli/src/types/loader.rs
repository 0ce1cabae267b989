use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Loader {
  Eager,
  Lazy,
}

impl From<Loader> for stitch::LoaderStrategy {
  fn from(value: Loader) -> Self {
    match value {
      Loader::Eager => stitch::LoaderStrategy::Eager,
      Loader::Lazy => stitch::LoaderStrategy::Lazy,
    }
  }
}
