use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Pretty-prints `value` with `indent` spaces per level and no trailing
/// newline. Unicode and slashes are written unescaped.
pub fn to_pretty_json(value: &Value, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(serde_json::Error::custom)
}
