mod build_error;
mod bundle_error;

pub use crate::{
  build_error::{BuildError, BuildResult},
  bundle_error::BundleError,
};
