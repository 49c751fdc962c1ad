// snapshot.rs — Pre-batch state of one path.

use serde::{Deserialize, Serialize};

/// What a path held before a batch was applied.
///
/// `Absent` and `Present(String::new())` are different states: the first
/// means no file existed, the second an existing empty file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "content", rename_all = "snake_case")]
pub enum Snapshot {
    /// The file existed with this content.
    Present(String),
    /// No file existed at the path.
    Absent,
}

impl Snapshot {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The captured content, if the file existed.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Present(content) => Some(content.as_str()),
            Self::Absent => None,
        }
    }
}

impl From<Option<String>> for Snapshot {
    fn from(content: Option<String>) -> Self {
        content.map_or(Self::Absent, Self::Present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_present_is_not_absent() {
        let empty = Snapshot::Present(String::new());
        assert!(!empty.is_absent());
        assert_eq!(empty.content(), Some(""));
        assert_ne!(empty, Snapshot::Absent);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_string(&Snapshot::Present("x".into())).unwrap();
        assert_eq!(json, r#"{"state":"present","content":"x"}"#);

        let json = serde_json::to_string(&Snapshot::Absent).unwrap();
        assert_eq!(json, r#"{"state":"absent"}"#);
    }

    #[test]
    fn from_option() {
        assert_eq!(Snapshot::from(None), Snapshot::Absent);
        assert_eq!(
            Snapshot::from(Some("a".to_string())),
            Snapshot::Present("a".to_string())
        );
    }
}
