/// Objects that implement reading and writing OPC packages.
///
/// `OpcPackage` holds every part of a presentation package in memory. Templates
/// are loaded once, generated slides and notes are added as new parts, and the
/// whole graph is serialized again by `PackageWriter`.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PackURI, PACKAGE_URI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;

/// An Open Packaging Convention package held in memory.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, indexed by partname
    parts: HashMap<String, Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: HashMap::new(),
        }
    }

    /// Open an OPC package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use slidewright::ooxml::opc::package::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("template.pptx").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys_reader = PhysPkgReader::open(path)?;
        Self::unmarshal(PackageReader::from_phys_reader(phys_reader)?)
    }

    /// Load an OPC package from the bytes of a ZIP archive.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let phys_reader = PhysPkgReader::from_bytes(data)?;
        Self::unmarshal(PackageReader::from_phys_reader(phys_reader)?)
    }

    /// Convert serialized parts and relationships into the in-memory graph.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.pkg_srels() {
            package.rels.add_relationship(
                srel.reltype.clone(),
                srel.target_ref.clone(),
                srel.r_id.clone(),
                srel.is_external(),
            );
        }

        for spart in pkg_reader.take_sparts() {
            let mut part = PartFactory::load(spart.partname, spart.content_type, spart.blob)?;
            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut().add_relationship(
                    srel.reltype,
                    srel.target_ref,
                    srel.r_id,
                    is_external,
                );
            }
            package.add_part(part);
        }

        Ok(package)
    }

    /// Partname of the main document part (`/ppt/presentation.xml` for decks).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    /// Get a reference to the main document part.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let partname = self.main_document_partname()?;
        self.get_part(&partname)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname.as_str())
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a mutable reference to a part by its partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .get_mut(partname.as_str())
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Add a part, replacing any part with the same partname.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        let partname = part.partname().to_string();
        self.parts.insert(partname, part);
    }

    /// Remove a part from the package and return it.
    pub fn remove_part(&mut self, partname: &PackURI) -> Option<Box<dyn Part>> {
        self.parts.remove(partname.as_str())
    }

    /// Get an iterator over all parts in the package (unordered).
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    /// Get the number of parts in the package.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname.as_str())
    }

    /// Get a reference to the package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Find the next free partname for a numbered template such as
    /// `/ppt/slides/slide%d.xml`.
    ///
    /// # Example
    /// ```no_run
    /// # use slidewright::ooxml::opc::package::OpcPackage;
    /// # let pkg = OpcPackage::new();
    /// let next_slide = pkg.next_partname("/ppt/slides/slide%d.xml");
    /// ```
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        for n in 1..=10_000u32 {
            let candidate = template.replace("%d", &n.to_string());
            if !self.parts.contains_key(&candidate) {
                return PackURI::new(candidate).map_err(OpcError::InvalidPackUri);
            }
        }
        Err(OpcError::InvalidPackUri(format!(
            "no free partname for {}",
            template
        )))
    }

    /// Drop every part no longer reachable from the package relationships.
    ///
    /// Returns the number of parts removed.
    pub fn prune_unreachable(&mut self) -> usize {
        let mut reachable: HashSet<String> = HashSet::with_capacity(self.parts.len());
        let mut stack: Vec<PackURI> = self
            .rels
            .iter()
            .filter(|rel| !rel.is_external())
            .filter_map(|rel| rel.target_partname().ok())
            .collect();

        while let Some(partname) = stack.pop() {
            if !reachable.insert(partname.to_string()) {
                continue;
            }
            if let Some(part) = self.parts.get(partname.as_str()) {
                stack.extend(
                    part.rels()
                        .iter()
                        .filter(|rel| !rel.is_external())
                        .filter_map(|rel| rel.target_partname().ok()),
                );
            }
        }

        let before = self.parts.len();
        self.parts.retain(|partname, _| reachable.contains(partname));
        before - self.parts.len()
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
