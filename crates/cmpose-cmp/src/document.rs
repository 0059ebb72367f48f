//! CMP document handling.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::record::{json_kind, RecordValue, SourceRecord};
use crate::{Error, Result};

/// File extension of CMP files.
pub const CMP_EXTENSION: &str = "cmp";

static MISSING: RecordValue = RecordValue::Missing;

/// Metadata keys carried next to the bone records.
pub mod keys {
    pub const CMP_VERSION: &str = "CMPVersion";
    pub const DESCRIPTION: &str = "Description";
    pub const DATE_CREATED: &str = "DateCreated";
    pub const RACE: &str = "Race";
    pub const CLAN: &str = "Clan";
    pub const BODY: &str = "Body";
}

/// A parsed CMP file.
///
/// The document keeps its records in file order. It is built once and not
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmpDocument {
    records: Vec<SourceRecord>,
}

impl CmpDocument {
    /// Create a document from records.
    pub fn new(records: Vec<SourceRecord>) -> Self {
        Self { records }
    }

    /// Read a CMP file from disk.
    pub fn from_cmp<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !extension.eq_ignore_ascii_case(CMP_EXTENSION) {
            return Err(Error::InvalidExtension {
                expected: CMP_EXTENSION.to_string(),
                actual: extension.to_string(),
            });
        }

        let bytes = fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// Parse a CMP document from raw bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value(&value)
    }

    /// Parse a CMP document from a string.
    pub fn parse(data: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(data)?;
        Self::from_value(&value)
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::NotAnObject(json_kind(value)))?;

        Ok(Self::from_map(object))
    }

    fn from_map(object: &Map<String, Value>) -> Self {
        let records = object
            .iter()
            .map(|(name, value)| SourceRecord::new(name.clone(), RecordValue::from_json(value)))
            .collect::<Vec<_>>();

        tracing::debug!("Parsed CMP document with {} records", records.len());

        Self { records }
    }

    /// Get all records in file order.
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    /// Iterate over the records.
    pub fn iter(&self) -> impl Iterator<Item = &SourceRecord> {
        self.records.iter()
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the document has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by name.
    ///
    /// If a name appears more than once the last occurrence wins, matching
    /// how the JSON object itself resolves duplicates.
    pub fn get(&self, name: &str) -> Option<&SourceRecord> {
        self.records.iter().rev().find(|r| r.name() == name)
    }

    /// Get the value for a name, [`RecordValue::Missing`] if absent.
    pub fn value(&self, name: &str) -> &RecordValue {
        self.get(name)
            .map(SourceRecord::value)
            .unwrap_or(&MISSING)
    }

    /// Get the CMP format version.
    pub fn cmp_version(&self) -> Option<&str> {
        self.value(keys::CMP_VERSION).as_str()
    }

    /// Get the free-text description.
    pub fn description(&self) -> Option<&str> {
        self.value(keys::DESCRIPTION).as_str()
    }

    /// Get the creation date string.
    pub fn date_created(&self) -> Option<&str> {
        self.value(keys::DATE_CREATED).as_str()
    }

    /// Get the race the pose was captured on.
    pub fn race(&self) -> Option<&str> {
        self.value(keys::RACE).as_str()
    }

    /// Get the clan the pose was captured on.
    pub fn clan(&self) -> Option<&str> {
        self.value(keys::CLAN).as_str()
    }

    /// Get the body type the pose was captured on.
    pub fn body_type(&self) -> Option<&str> {
        self.value(keys::BODY).as_str()
    }
}

impl<'a> IntoIterator for &'a CmpDocument {
    type Item = &'a SourceRecord;
    type IntoIter = std::slice::Iter<'a, SourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
