/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::pptx::parts::{PresentationPart, SlideMasterPart, SlideSize};
use std::path::Path;

/// Main-part content types accepted as presentations.
const PRESENTATION_CONTENT_TYPES: [&str; 3] = [
    ct::PML_PRESENTATION_MAIN,
    ct::PML_PRES_MACRO_MAIN,
    ct::PML_TEMPLATE_MAIN,
];

/// A PowerPoint (.pptx / .pptm / .potx) package.
///
/// Wraps an OPC package whose main part is verified to be a PresentationML
/// presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use slidewright::ooxml::pptx::Package;
///
/// let pkg = Package::open("template.pptx")?;
/// let masters = pkg.slide_masters()?;
/// println!("Template has {} slide masters", masters.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    opc: OpcPackage,
}

impl Package {
    /// Open a presentation package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::verified(OpcPackage::open(path)?)
    }

    /// Load a presentation package from ZIP bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::verified(OpcPackage::from_bytes(data)?)
    }

    fn verified(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        if !PRESENTATION_CONTENT_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: PRESENTATION_CONTENT_TYPES.join(" or "),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    /// Partname of `presentation.xml`.
    pub fn presentation_partname(&self) -> Result<PackURI> {
        Ok(self.opc.main_document_partname()?)
    }

    /// The presentation part.
    pub fn presentation_part(&self) -> Result<PresentationPart<'_>> {
        Ok(PresentationPart::from_part(self.opc.main_document_part()?))
    }

    /// Slide size declared by the presentation.
    pub fn slide_size(&self) -> Result<Option<SlideSize>> {
        self.presentation_part()?.slide_size()
    }

    /// Slide master parts in `sldMasterIdLst` order.
    pub fn slide_masters(&self) -> Result<Vec<&dyn Part>> {
        let pres = self.presentation_part()?;
        let pres_part = pres.part();

        let mut masters = Vec::new();
        for r_id in pres.slide_master_rids()? {
            let partname = pres_part.related_partname(&r_id)?;
            masters.push(self.opc.get_part(&partname)?);
        }
        Ok(masters)
    }

    /// Partnames of a master's layouts in `sldLayoutIdLst` order.
    ///
    /// The partnames come from the master's relationships; whether each part
    /// is present in the package is left to the caller.
    pub fn master_layout_partnames(&self, master: &dyn Part) -> Result<Vec<PackURI>> {
        SlideMasterPart::from_part(master)
            .slide_layout_rids()?
            .iter()
            .map(|r_id| -> Result<PackURI> { Ok(master.related_partname(r_id)?) })
            .collect()
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Get mutable access to the underlying OPC package.
    #[inline]
    pub fn opc_package_mut(&mut self) -> &mut OpcPackage {
        &mut self.opc
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.opc.to_bytes()?)
    }
}
