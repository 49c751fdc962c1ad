// operation.rs — File operations proposed by the assistant.
//
// On the wire an operation is a JSON object tagged by its `op` field:
//
//   { "op": "writeFile", "path": "src/a.ts", "content": "..." }
//   { "op": "deleteFile", "path": "src/b.ts" }
//
// Any record that is not one of these (another `op` value, no `op` at all, a
// known tag with unusable fields) deserializes to `Unknown` holding the raw
// JSON instead of failing. Serializing writes that JSON back unchanged, so
// batches pushed to the mirror or saved to history carry operation kinds this
// build does not understand.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single file mutation inside an operation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Create or overwrite the file at `path`.
    ///
    /// `content` may be missing on the wire. Locally that makes the write a
    /// no-op; it is not the same as writing an empty string.
    WriteFile {
        path: String,
        content: Option<String>,
    },

    /// Remove the file at `path`.
    DeleteFile { path: String },

    /// A record this build does not understand, kept verbatim. Ignored.
    Unknown(Value),
}

/// Wire form of the operations this build applies.
#[derive(Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
enum KnownOperation {
    WriteFile {
        path: String,
        #[serde(default)]
        content: Option<String>,
    },
    DeleteFile {
        path: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
enum KnownOperationRef<'a> {
    WriteFile {
        path: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<&'a str>,
    },
    DeleteFile {
        path: &'a str,
    },
}

impl<'de> Deserialize<'de> for FileOperation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let known = KnownOperation::deserialize(&value);
        Ok(match known {
            Ok(KnownOperation::WriteFile { path, content }) => Self::WriteFile { path, content },
            Ok(KnownOperation::DeleteFile { path }) => Self::DeleteFile { path },
            Err(_) => Self::Unknown(value),
        })
    }
}

impl Serialize for FileOperation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::WriteFile { path, content } => KnownOperationRef::WriteFile {
                path,
                content: content.as_deref(),
            }
            .serialize(serializer),
            Self::DeleteFile { path } => {
                KnownOperationRef::DeleteFile { path }.serialize(serializer)
            }
            Self::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

impl FileOperation {
    /// A write carrying content.
    pub fn write(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            content: Some(content.into()),
        }
    }

    /// A delete of `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::DeleteFile { path: path.into() }
    }

    /// The path this operation touches, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::WriteFile { path, .. } | Self::DeleteFile { path } => Some(path.as_str()),
            Self::Unknown(_) => None,
        }
    }

    /// Short label for logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WriteFile { .. } => "writeFile",
            Self::DeleteFile { .. } => "deleteFile",
            Self::Unknown(_) => "unknown",
        }
    }
}
