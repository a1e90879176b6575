//! XML text helpers used by the part writers.

mod escape;

pub use escape::escape_xml;
