//! CMP (pose save) file reader.
//!
//! CMP files are JSON objects produced by character posing tools. Most keys
//! name a bone and hold its rotation as space-separated hex bytes, the rest
//! carry metadata about the character the pose was saved on.
//!
//! # File Format
//!
//! ```json
//! {
//!     "CMPVersion": "2",
//!     "Race": "Hyur",
//!     "Waist": "DB C4 32 3F F3 E6 9B BE 4B 8E 15 3F 05 4F 8F BE",
//!     "Head": null
//! }
//! ```
//!
//! Each bone value is 16 bytes: four little-endian IEEE-754 singles holding
//! the `x, y, z, w` components of a rotation quaternion.
//!
//! # Example
//!
//! ```no_run
//! use cmpose_cmp::CmpDocument;
//!
//! let doc = CmpDocument::from_cmp("pose.cmp")?;
//! println!("Version: {:?}", doc.cmp_version());
//!
//! for record in &doc {
//!     if let Ok(Some(rotation)) = record.decode_rotation() {
//!         println!("{}: {:?}", record.name(), rotation);
//!     }
//! }
//! # Ok::<(), cmpose_cmp::Error>(())
//! ```

mod document;
mod error;
mod quaternion;
mod record;

pub use document::{keys, CmpDocument, CMP_EXTENSION};
pub use error::{Error, Result};
pub use quaternion::{Quaternion, QUATERNION_BYTES, QUATERNION_COMPONENTS, QUATERNION_DIGITS};
pub use record::{RecordValue, SourceRecord, NULL_MARKER};
