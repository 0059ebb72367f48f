//! Pose file model and CMP to pose conversion.
//!
//! Pose files are JSON documents describing a skeleton pose as a map from
//! joint name to position, rotation and scale strings. This crate builds them
//! from CMP documents: bone names are translated through a fixed table,
//! rotations are decoded from hex, rounded and negated, and position and
//! scale are fixed at the zero and unit vectors.
//!
//! # Output Format
//!
//! ```json
//! {
//!     "FileExtension": ".pose",
//!     "TypeName": "Anamnesis Pose",
//!     "Position": "0, 0, 0",
//!     "Rotation": "0, 0, 0, 1",
//!     "Scale": "1, 1, 1",
//!     "Bones": {
//!         "j_kosi": {
//!             "Position": "0, 0, 0",
//!             "Rotation": "-0.69831628, 0.30449638, -0.58420247, 0.27989975",
//!             "Scale": "1, 1, 1"
//!         }
//!     },
//!     "Author": "CMP to POSE file converter"
//! }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use cmpose_cmp::CmpDocument;
//! use cmpose_pose::{ConvertOptions, PoseConverter};
//!
//! let cmp = CmpDocument::from_cmp("pose.cmp")?;
//! let conversion = PoseConverter::new(ConvertOptions::default()).convert(&cmp)?;
//!
//! for failure in conversion.report.failures() {
//!     eprintln!("{failure}");
//! }
//!
//! conversion.document.write_to_pose("pose.pose")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod document;
mod error;

pub mod bones;
pub mod format;

pub use convert::{
    convert, convert_file, Conversion, ConversionReport, ConvertOptions, PoseConverter,
    RecordOutcome, RecordReport, SkipReason, DEFAULT_PRECISION,
};
pub use document::{
    BoneTransform, PoseDocument, DEFAULT_AUTHOR, FILE_EXTENSION, IDENTITY_ROTATION,
    POSE_EXTENSION, TYPE_NAME, UNIT_VECTOR, ZERO_VECTOR,
};
pub use error::{Error, MalformedReason, MalformedRecordError, Result};
