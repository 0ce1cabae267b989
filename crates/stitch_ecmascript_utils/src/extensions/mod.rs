pub mod binding_pattern_ext;
pub mod declaration_ext;
pub mod expression_ext;
