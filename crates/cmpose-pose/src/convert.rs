//! CMP to pose conversion.
//!
//! Every CMP record is classified in order:
//!
//! 1. keys containing a metadata marker ([`EXCLUDED_SUBSTRINGS`]) are skipped
//! 2. keys without an entry in the bone table are skipped
//! 3. null or missing values are skipped
//! 4. the hex value is decoded, rounded, negated and written as a bone
//!
//! Steps 1-3 are silent skips. A value that fails step 4 is a
//! [`MalformedRecordError`]: by default it is logged and reported while the
//! remaining records are still converted; with [`ConvertOptions::strict`] it
//! aborts the whole conversion.
//!
//! [`EXCLUDED_SUBSTRINGS`]: crate::bones::EXCLUDED_SUBSTRINGS

use std::fmt;
use std::path::Path;

use cmpose_cmp::{CmpDocument, Quaternion, SourceRecord};

use crate::bones;
use crate::document::{BoneTransform, PoseDocument, DEFAULT_AUTHOR};
use crate::error::{MalformedReason, MalformedRecordError};
use crate::format::format_rotation;
use crate::Result;

/// Decimal places kept for each rotation component.
pub const DEFAULT_PRECISION: u32 = 8;

/// Settings for a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Value of the pose `Author` field.
    pub author: String,
    /// Fail the whole conversion on the first malformed record.
    pub strict: bool,
    /// Decimal places kept for each rotation component.
    pub precision: u32,
}

impl ConvertOptions {
    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the rounding precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            strict: false,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Why a record produced no bone without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Key is a metadata field.
    Excluded,
    /// Key has no entry in the bone table.
    Unmapped,
    /// Value is null or absent.
    NullOrMissing,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Excluded => write!(f, "excluded field"),
            SkipReason::Unmapped => write!(f, "unmapped identifier"),
            SkipReason::NullOrMissing => write!(f, "null or missing value"),
        }
    }
}

/// Result of converting one record.
#[derive(Debug)]
pub enum RecordOutcome {
    /// A bone entry was written under `target`.
    Converted { target: &'static str },
    /// No bone entry, by design.
    Skipped(SkipReason),
    /// No bone entry because the value is malformed.
    Failed(MalformedRecordError),
}

/// Outcome of a single source record.
#[derive(Debug)]
pub struct RecordReport {
    /// CMP identifier.
    pub source: String,
    /// What happened to it.
    pub outcome: RecordOutcome,
}

/// Per-record outcomes of a conversion, in source order.
#[derive(Debug, Default)]
pub struct ConversionReport {
    records: Vec<RecordReport>,
}

impl ConversionReport {
    fn push(&mut self, source: &str, outcome: RecordOutcome) {
        self.records.push(RecordReport {
            source: source.to_string(),
            outcome,
        });
    }

    /// Get all record reports.
    pub fn records(&self) -> &[RecordReport] {
        &self.records
    }

    /// Number of records written as bones.
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Converted { .. }))
    }

    /// Number of records skipped without error.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Skipped(_)))
    }

    /// Number of malformed records.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Failed(_)))
    }

    /// Iterate over the malformed records.
    pub fn failures(&self) -> impl Iterator<Item = &MalformedRecordError> {
        self.records.iter().filter_map(|r| match &r.outcome {
            RecordOutcome::Failed(err) => Some(err),
            _ => None,
        })
    }

    /// Check that no record was malformed.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// A finished conversion.
#[derive(Debug)]
pub struct Conversion {
    /// The assembled pose.
    pub document: PoseDocument,
    /// What happened to every source record.
    pub report: ConversionReport,
}

/// Converts CMP documents into pose documents.
#[derive(Debug, Clone, Default)]
pub struct PoseConverter {
    options: ConvertOptions,
}

impl PoseConverter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a whole CMP document.
    ///
    /// Fails only in strict mode, with the first malformed record.
    pub fn convert(&self, cmp: &CmpDocument) -> Result<Conversion> {
        if !self.options.strict {
            return Ok(self.convert_lenient(cmp));
        }

        let mut document = PoseDocument::new(self.options.author.clone());
        let mut report = ConversionReport::default();
        for record in cmp {
            let outcome = self.apply_record(record, &mut document)?;
            report.push(record.name(), outcome);
        }

        Ok(Self::finish(document, report))
    }

    /// Convert a whole CMP document, skipping malformed records.
    ///
    /// Ignores [`ConvertOptions::strict`]; malformed records are logged and
    /// reported as [`RecordOutcome::Failed`].
    pub fn convert_lenient(&self, cmp: &CmpDocument) -> Conversion {
        let mut document = PoseDocument::new(self.options.author.clone());
        let mut report = ConversionReport::default();
        for record in cmp {
            let outcome = self.apply_record(record, &mut document).unwrap_or_else(|err| {
                tracing::warn!("Skipping {}", err);
                RecordOutcome::Failed(err)
            });
            report.push(record.name(), outcome);
        }

        Self::finish(document, report)
    }

    /// Convert one record into `document`.
    fn apply_record(
        &self,
        record: &SourceRecord,
        document: &mut PoseDocument,
    ) -> std::result::Result<RecordOutcome, MalformedRecordError> {
        match self.convert_record(record)? {
            Some((target, transform)) => {
                if document.insert_bone(target, transform).is_some() {
                    tracing::debug!("{} overwrites earlier value of {}", record.name(), target);
                }
                Ok(RecordOutcome::Converted { target })
            }
            None => {
                let reason = self.skip_reason(record);
                tracing::debug!("Skipping {}: {}", record.name(), reason);
                Ok(RecordOutcome::Skipped(reason))
            }
        }
    }

    fn finish(document: PoseDocument, report: ConversionReport) -> Conversion {
        tracing::debug!(
            "Converted {} bones ({} skipped, {} malformed)",
            report.converted(),
            report.skipped(),
            report.failed()
        );

        Conversion { document, report }
    }

    /// Convert one record.
    ///
    /// Returns `Ok(None)` when the record is skipped by design, and the joint
    /// name with its transform otherwise.
    pub fn convert_record(
        &self,
        record: &SourceRecord,
    ) -> std::result::Result<Option<(&'static str, BoneTransform)>, MalformedRecordError> {
        let Some(target) = self.classify(record) else {
            return Ok(None);
        };

        let rotation = record
            .decode_rotation()
            .map_err(|e| MalformedRecordError::new(record.name(), MalformedReason::Decode(e)))?;
        let Some(rotation) = rotation else {
            return Ok(None);
        };

        let rotation = self.finish_rotation(record.name(), rotation)?;
        Ok(Some((target, BoneTransform::from_rotation(format_rotation(&rotation)))))
    }

    /// Round and negate a decoded rotation, rejecting non-finite components.
    fn finish_rotation(
        &self,
        name: &str,
        rotation: Quaternion,
    ) -> std::result::Result<Quaternion, MalformedRecordError> {
        if let Some((index, &value)) = rotation
            .components()
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite())
        {
            return Err(MalformedRecordError::new(
                name,
                MalformedReason::NonFinite { index, value },
            ));
        }

        Ok(rotation.rounded(self.options.precision).negated())
    }

    /// Get the joint name for a record that passes all skip rules.
    fn classify(&self, record: &SourceRecord) -> Option<&'static str> {
        if bones::is_excluded(record.name()) || record.value().is_null_or_missing() {
            return None;
        }
        bones::target_bone(record.name())
    }

    fn skip_reason(&self, record: &SourceRecord) -> SkipReason {
        if bones::is_excluded(record.name()) {
            SkipReason::Excluded
        } else if bones::target_bone(record.name()).is_none() {
            SkipReason::Unmapped
        } else {
            SkipReason::NullOrMissing
        }
    }
}

/// Convert a CMP document with default options.
///
/// Malformed records are skipped; use [`PoseConverter`] to inspect them.
pub fn convert(cmp: &CmpDocument) -> PoseDocument {
    PoseConverter::default().convert_lenient(cmp).document
}

/// Read a CMP file, convert it and write the pose file.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let input = input.as_ref();
    let output = output.as_ref();
    let _span = tracing::info_span!("convert", file = %input.display()).entered();

    let cmp = CmpDocument::from_cmp(input)?;
    let conversion = PoseConverter::new(options.clone()).convert(&cmp)?;
    conversion.document.write_to_pose(output)?;

    tracing::info!(
        "Converted {} -> {} ({} bones)",
        input.display(),
        output.display(),
        conversion.document.bone_count()
    );

    Ok(conversion.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmpose_cmp::RecordValue;

    const WAIST: &str = "DB C4 32 3F F3 E6 9B BE 4B 8E 15 3F 05 4F 8F BE";

    #[test]
    fn test_convert_record() {
        let converter = PoseConverter::default();
        let (target, transform) = converter
            .convert_record(&SourceRecord::hex("Waist", WAIST))
            .unwrap()
            .unwrap();

        assert_eq!(target, "j_kosi");
        assert_eq!(
            transform.rotation,
            "-0.69831628, 0.30449638, -0.58420247, 0.27989975"
        );
    }

    #[test]
    fn test_skip_rules() {
        let converter = PoseConverter::default();
        let skipped = [
            SourceRecord::hex("Description", WAIST),
            SourceRecord::hex("Unknown", WAIST),
            SourceRecord::new("Waist", RecordValue::Null),
            SourceRecord::missing("Waist"),
        ];
        for record in &skipped {
            assert!(converter.convert_record(record).unwrap().is_none());
        }

        assert_eq!(converter.skip_reason(&skipped[0]), SkipReason::Excluded);
        assert_eq!(converter.skip_reason(&skipped[1]), SkipReason::Unmapped);
        assert_eq!(converter.skip_reason(&skipped[2]), SkipReason::NullOrMissing);
    }

    #[test]
    fn test_excluded_wins_over_unmapped() {
        let converter = PoseConverter::default();
        let record = SourceRecord::new("BodySize", RecordValue::Null);
        assert_eq!(converter.skip_reason(&record), SkipReason::Excluded);
    }

    #[test]
    fn test_non_finite_component() {
        let converter = PoseConverter::default();
        // w = 0x7F800000 (+inf)
        let record = SourceRecord::hex("Neck", "00 00 00 00 00 00 00 00 00 00 00 00 00 00 80 7F");
        let err = converter.convert_record(&record).unwrap_err();

        assert_eq!(err.source_name(), "Neck");
        assert!(matches!(err.reason(), MalformedReason::NonFinite { index: 3, .. }));
    }

    #[test]
    fn test_precision_option() {
        let converter = PoseConverter::new(ConvertOptions::default().with_precision(2));
        let (_, transform) = converter
            .convert_record(&SourceRecord::hex("Waist", WAIST))
            .unwrap()
            .unwrap();
        assert_eq!(transform.rotation, "-0.7, 0.3, -0.58, 0.28");
    }

    #[test]
    fn test_lenient_ignores_strict_option() {
        let json = format!(r#"{{"Neck": "DB C4", "Waist": "{WAIST}"}}"#);
        let cmp = CmpDocument::parse(&json).unwrap();
        let converter = PoseConverter::new(ConvertOptions::default().with_strict(true));
        assert!(converter.convert(&cmp).is_err());

        let conversion = converter.convert_lenient(&cmp);
        assert_eq!(conversion.report.failed(), 1);
        assert_eq!(conversion.report.converted(), 1);
        assert!(conversion.document.bone("j_kosi").is_some());
    }

    #[test]
    fn test_free_convert_skips_malformed() {
        let json = format!(r#"{{"Neck": 7, "Waist": "{WAIST}"}}"#);
        let cmp = CmpDocument::parse(&json).unwrap();
        let doc = convert(&cmp);
        assert_eq!(doc.bone_count(), 1);
        assert!(doc.bone("j_kubi").is_none());
    }
}
