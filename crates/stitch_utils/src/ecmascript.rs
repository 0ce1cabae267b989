use oxc::syntax::identifier;

use crate::concat_string;

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// Renders `value` as a double-quoted JS string literal.
pub fn quote_str(value: &str) -> String {
  serde_json::Value::from(value).to_string()
}

pub fn property_access_str(obj: &str, prop: &str) -> String {
  if is_validate_identifier_name(prop) {
    concat_string!(obj, ".", prop)
  } else {
    concat_string!(obj, "[", quote_str(prop), "]")
  }
}

/// Key usable inside an object literal or an object pattern.
pub fn to_property_key(name: &str) -> String {
  if is_validate_identifier_name(name) { name.into() } else { quote_str(name) }
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(is_validate_identifier_name("default"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_property_access_and_keys() {
  assert_eq!(property_access_str("ns", "value"), "ns.value");
  assert_eq!(property_access_str("ns", "a-b"), r#"ns["a-b"]"#);
  assert_eq!(to_property_key("x"), "x");
  assert_eq!(to_property_key("x y"), r#""x y""#);
  assert_eq!(quote_str("/a \"b\".js"), r#""/a \"b\".js""#);
}
