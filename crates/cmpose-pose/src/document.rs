//! Pose document model and serialization.

use std::fs;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// File extension of pose files, without the dot.
pub const POSE_EXTENSION: &str = "pose";

/// Value of the `FileExtension` field.
pub const FILE_EXTENSION: &str = ".pose";

/// Value of the `TypeName` field.
pub const TYPE_NAME: &str = "Anamnesis Pose";

/// Zero vector used for positions.
pub const ZERO_VECTOR: &str = "0, 0, 0";

/// Unit vector used for scales.
pub const UNIT_VECTOR: &str = "1, 1, 1";

/// Identity rotation of the document root.
pub const IDENTITY_ROTATION: &str = "0, 0, 0, 1";

/// Author written when none is configured.
pub const DEFAULT_AUTHOR: &str = "CMP to POSE file converter";

const INDENT: &[u8] = b"    ";

/// Transform of a single bone.
///
/// Only the rotation carries data; position and scale are always the zero and
/// unit vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoneTransform {
    pub position: String,
    pub rotation: String,
    pub scale: String,
}

impl BoneTransform {
    /// Create a transform with the given rotation string.
    pub fn from_rotation(rotation: impl Into<String>) -> Self {
        Self {
            position: ZERO_VECTOR.to_string(),
            rotation: rotation.into(),
            scale: UNIT_VECTOR.to_string(),
        }
    }
}

/// A pose file.
///
/// Field order matches the files written by posing tools. Bones keep the
/// order in which they were inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PoseDocument {
    file_extension: String,
    type_name: String,
    position: String,
    rotation: String,
    scale: String,
    bones: IndexMap<String, BoneTransform>,
    author: String,
}

impl PoseDocument {
    /// Create an empty pose with the given author.
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            file_extension: FILE_EXTENSION.to_string(),
            type_name: TYPE_NAME.to_string(),
            position: ZERO_VECTOR.to_string(),
            rotation: IDENTITY_ROTATION.to_string(),
            scale: UNIT_VECTOR.to_string(),
            bones: IndexMap::new(),
            author: author.into(),
        }
    }

    /// Get the `FileExtension` field.
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Get the `TypeName` field.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get the root position.
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Get the root rotation.
    pub fn rotation(&self) -> &str {
        &self.rotation
    }

    /// Get the root scale.
    pub fn scale(&self) -> &str {
        &self.scale
    }

    /// Get the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Get all bones.
    pub fn bones(&self) -> &IndexMap<String, BoneTransform> {
        &self.bones
    }

    /// Get a bone by joint name.
    pub fn bone(&self, name: &str) -> Option<&BoneTransform> {
        self.bones.get(name)
    }

    /// Get the number of bones.
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Add or replace a bone, returning the transform it replaced.
    ///
    /// A replaced bone keeps its original position in the map.
    pub fn insert_bone(
        &mut self,
        name: impl Into<String>,
        transform: BoneTransform,
    ) -> Option<BoneTransform> {
        self.bones.insert(name.into(), transform)
    }

    /// Serialize to pretty JSON with 4-space indentation.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;
        // serde_json only emits valid UTF-8
        String::from_utf8(buffer).map_err(|e| Error::Io(std::io::Error::other(e)))
    }

    /// Serialize to a writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    /// Parse a pose document from JSON.
    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Read a pose file from disk.
    pub fn from_pose<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_extension(path)?;

        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Write to a pose file.
    pub fn write_to_pose<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        check_extension(path)?;

        let json = self.to_json_string()?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for PoseDocument {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHOR)
    }
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !extension.eq_ignore_ascii_case(POSE_EXTENSION) {
        return Err(Error::InvalidExtension {
            expected: POSE_EXTENSION.to_string(),
            actual: extension.to_string(),
        });
    }
    Ok(())
}
