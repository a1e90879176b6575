//! Open Packaging Conventions (OPC) writer.
//!
//! This module implements the part of the OPC specification needed to emit
//! Office Open XML packages:
//!
//! - Package structure (parts, relationships)
//! - Content type management
//! - ZIP-based physical packaging

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
