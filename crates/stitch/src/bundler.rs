use anyhow::Context;
use log::debug;
use oxc::span::SourceType;
use stitch_common::{BundlerOptions, ModuleLoader, NormalizedBundlerOptions};
use stitch_ecmascript::EcmaCompiler;
use stitch_error::{BuildError, BuildResult};
use stitch_fs::{FileSystem, OsFileSystem};

use crate::{
  generate_stage::GenerateStage, module_loader::FsModuleLoader, scan_stage::ScanStage,
  types::bundle_output::BundleOutput, utils::normalize_options::normalize_options,
};

pub struct Bundler {
  pub(crate) fs: OsFileSystem,
  pub(crate) options: NormalizedBundlerOptions,
  pub(crate) loader: Box<dyn ModuleLoader>,
}

impl Bundler {
  /// Bundles files below `root`, which defaults to the working directory.
  pub fn new(options: BundlerOptions) -> Self {
    let options = normalize_options(options);
    let loader = FsModuleLoader::new(OsFileSystem, options.root.clone());
    Self { fs: OsFileSystem, options, loader: Box::new(loader) }
  }

  pub fn with_loader(options: BundlerOptions, loader: impl ModuleLoader + 'static) -> Self {
    Self { fs: OsFileSystem, options: normalize_options(options), loader: Box::new(loader) }
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  /// Bundles the configured entries into a single script. Nothing is written.
  pub fn bundle(&self) -> BuildResult<BundleOutput> {
    let mut modules = vec![];
    let mut warnings = vec![];

    let ast = EcmaCompiler::compose(SourceType::mjs(), |allocator| {
      let scan_output = ScanStage::new(&self.options, self.loader.as_ref(), allocator).scan()?;
      let output = GenerateStage::new(&self.options, allocator).generate(scan_output)?;
      modules = output.modules;
      warnings = output.warnings;
      Ok::<_, BuildError>(output.program)
    })?;

    let code = EcmaCompiler::print(&ast);
    debug!("Bundled {} modules into {} bytes", modules.len(), code.len());
    Ok(BundleOutput { ast, code, modules, warnings })
  }

  /// Bundles, then writes the script to `file`, relative to `cwd`.
  pub fn write(&self) -> BuildResult<BundleOutput> {
    let Some(file) = &self.options.file else {
      return Err(anyhow::anyhow!("`file` must be set to write the bundle").into());
    };

    let output = self.bundle()?;
    let path = self.options.cwd.join(file);
    self
      .fs
      .write(&path, output.code.as_bytes())
      .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(output)
  }
}
