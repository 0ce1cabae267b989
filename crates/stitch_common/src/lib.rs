mod bundler_options;
mod module_loader;
mod types;

pub use crate::{
  bundler_options::{
    BundlerOptions, input_item::InputItem, loader_strategy::LoaderStrategy,
    normalized_bundler_options::NormalizedBundlerOptions,
  },
  module_loader::{LoadOutcome, ModuleLoader},
  types::{
    exported_binding::{ExportTarget, ExportedBinding},
    module_idx::ModuleIdx,
  },
};
