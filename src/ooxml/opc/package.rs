/// In-memory OPC package assembled before it is written out.
///
/// OpcPackage owns every part plus the package-level relationships. Parts are
/// kept in insertion order so the ZIP members come out in a stable order.
use std::collections::HashSet;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;

/// Main API class for assembling OPC packages.
pub struct OpcPackage {
    /// Package-level relationships (`/_rels/.rels`)
    rels: Relationships,

    /// All parts in the package, in insertion order
    parts: Vec<Box<dyn Part>>,

    /// Partnames already taken
    names: HashSet<String>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(),
            parts: Vec::new(),
            names: HashSet::new(),
        }
    }

    /// Add a part to the package.
    ///
    /// Returns an error if a part with the same partname already exists.
    pub fn add_part(&mut self, part: Box<dyn Part>) -> Result<()> {
        let name = part.partname().as_str().to_string();
        if !self.names.insert(name.clone()) {
            return Err(OpcError::DuplicatePart(name));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .iter()
            .find(|part| part.partname() == partname)
            .map(|part| part.as_ref())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get an iterator over all parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.iter().map(|part| part.as_ref())
    }

    /// Get the number of parts in the package.
    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get the package-level relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Create a package-level relationship to a part and return its rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        self.rels
            .get_or_add(reltype, &target.relative_ref(PACKAGE_URI))
    }

    /// Check if a part with the given partname exists.
    #[inline]
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.names.contains(partname.as_str())
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
