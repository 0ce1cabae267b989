pub mod exported_binding;
pub mod module_idx;
