use arcstr::ArcStr;
use stitch_ecmascript::EcmaAst;

#[derive(Debug)]
pub struct BundleOutput {
  /// The assembled script. `code` is its rendering.
  pub ast: EcmaAst,
  pub code: String,
  /// Bundled urls in the order their thunks run.
  pub modules: Vec<ArcStr>,
  pub warnings: Vec<anyhow::Error>,
}
