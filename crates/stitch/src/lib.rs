mod bundler;
mod compactor;
mod generate_stage;
mod graph;
mod lowering;
mod module_loader;
mod scan_stage;
mod types;
mod utils;

pub use crate::{
  bundler::Bundler,
  compactor::compact,
  graph::{ModuleGraph, ModuleNode, ModuleState},
  module_loader::{FsModuleLoader, MemoryModuleLoader},
  types::bundle_output::BundleOutput,
};
pub use stitch_common::*;
pub use stitch_error::{BuildError, BuildResult, BundleError};
