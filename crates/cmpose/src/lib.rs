//! cmpose - CMP to pose conversion library.
//!
//! This crate provides a unified interface to the cmpose crates for turning
//! CMP pose saves into `.pose` files.
//!
//! # Crates
//!
//! - [`cmpose_common`] - Hex word handling and IEEE-754 decoding
//! - [`cmpose_cmp`] - CMP document reading and quaternion decoding
//! - [`cmpose_pose`] - Bone table, pose documents and conversion
//!
//! # Example
//!
//! ```no_run
//! use cmpose::prelude::*;
//!
//! let cmp = CmpDocument::from_cmp("pose.cmp")?;
//! let conversion = PoseConverter::default().convert(&cmp)?;
//! println!("Bones: {}", conversion.document.bone_count());
//!
//! conversion.document.write_to_pose("pose.pose")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use cmpose_cmp as cmp;
pub use cmpose_common as common;
pub use cmpose_pose as pose;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use cmpose_cmp::{CmpDocument, Quaternion, RecordValue, SourceRecord};
    pub use cmpose_common::{float, hex};
    pub use cmpose_pose::{
        bones, convert_file, BoneTransform, Conversion, ConversionReport, ConvertOptions,
        PoseConverter, PoseDocument, RecordOutcome, SkipReason,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
