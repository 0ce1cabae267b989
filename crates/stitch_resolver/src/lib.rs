// Url resolution inside the bundle namespace. Only relative and absolute specifiers are understood.

mod resolver;

pub use crate::resolver::{dirname, is_absolute, resolve, resolve_entry};
