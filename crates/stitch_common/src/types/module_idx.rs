oxc_index::define_index_type! {
  /// Slot of a module in the graph arena. Indices are handed out in discovery order.
  #[derive(Default)]
  pub struct ModuleIdx = u32;
}
