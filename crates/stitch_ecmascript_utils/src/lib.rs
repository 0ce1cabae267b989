mod ast_snippet;
mod extensions;
mod template_filler;

pub use crate::{
  ast_snippet::AstSnippet,
  extensions::{
    binding_pattern_ext::BindingPatternExt, declaration_ext::DeclarationExt,
    expression_ext::ExpressionExt,
  },
  template_filler::TemplateFiller,
};
