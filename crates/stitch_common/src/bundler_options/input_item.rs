use std::borrow::Cow;

use serde::Deserialize;

/// An entry file, as written by the user. It is resolved against the bundle base.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub struct InputItem {
  pub import: String,
}

impl From<&str> for InputItem {
  fn from(value: &str) -> Self {
    Self { import: value.to_string() }
  }
}

impl From<String> for InputItem {
  fn from(import: String) -> Self {
    Self { import }
  }
}

impl From<Cow<'_, str>> for InputItem {
  fn from(value: Cow<'_, str>) -> Self {
    Self { import: value.into_owned() }
  }
}
