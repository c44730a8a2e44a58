//! Serializers that turn a comparison failure into new snapshot contents.

mod json;
mod text;
mod xml;

pub use json::JsonDriver;
pub use text::TextDriver;
pub use xml::XmlDriver;

use crate::comparison::ComparisonFailure;
use crate::error::NotSerializable;

pub trait Driver {
    /// Contents to write to the snapshot file in place of the old expected
    /// output.
    fn serialize(&self, failure: &ComparisonFailure) -> Result<String, NotSerializable>;
}
