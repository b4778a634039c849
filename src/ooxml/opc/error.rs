/// Errors raised while reading or writing an OPC package.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    /// The package file could not be opened
    #[error("Cannot open package: {0}")]
    PackageNotFound(String),

    /// Not a ZIP container, or one without `[Content_Types].xml`
    #[error("Not an OPC package: {0}")]
    NotAPackage(String),

    #[error("Invalid pack URI: {0}")]
    InvalidPackUri(String),

    #[error("No part named {0}")]
    PartNotFound(String),

    #[error("No relationship {0}")]
    RelationshipNotFound(String),

    #[error("No content type for {0}")]
    ContentTypeNotFound(String),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Malformed content-types or relationships XML, or a non-UTF-8 XML part
    #[error("Malformed package XML: {0}")]
    Xml(String),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OpcError {
    fn from(err: quick_xml::Error) -> Self {
        OpcError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OpcError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OpcError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
