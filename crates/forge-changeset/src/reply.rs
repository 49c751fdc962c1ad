// reply.rs — The assistant's structured reply.
//
// The assistant answers every edit request with one JSON document:
//
//   { "message": "what I did", "ops": [ {"op": "writeFile", ...}, ... ] }
//
// Only the operation batch matters to the engine; the message is shown to
// the user as-is.

use serde::{Deserialize, Serialize};

use crate::error::ChangeSetError;
use crate::operation::FileOperation;

/// A parsed assistant reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantReply {
    /// Human-readable explanation of the proposed edit.
    #[serde(default)]
    pub message: String,

    /// The operation batch, in the order it should be applied.
    #[serde(default)]
    pub ops: Vec<FileOperation>,
}

impl AssistantReply {
    /// Parse a reply document.
    pub fn parse(json: &str) -> Result<Self, ChangeSetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if the reply proposes at least one operation.
    pub fn has_operations(&self) -> bool {
        !self.ops.is_empty()
    }

    /// Take the operation batch, leaving the reply with none.
    pub fn take_operations(&mut self) -> Vec<FileOperation> {
        std::mem::take(&mut self.ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_and_ops() {
        let reply = AssistantReply::parse(
            r#"{
                "message": "Added a counter.",
                "ops": [
                    {"op": "writeFile", "path": "counter.ts", "content": "let n = 0;"},
                    {"op": "deleteFile", "path": "old.ts"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(reply.message, "Added a counter.");
        assert_eq!(reply.ops.len(), 2);
        assert!(reply.has_operations());
    }

    #[test]
    fn missing_ops_means_empty_batch() {
        let reply = AssistantReply::parse(r#"{"message": "Nothing to change."}"#).unwrap();
        assert!(!reply.has_operations());
    }

    #[test]
    fn unknown_ops_survive_parsing() {
        let mut reply = AssistantReply::parse(
            r#"{"message": "", "ops": [{"op": "chmod", "path": "a"}, {"op": "deleteFile", "path": "b"}]}"#,
        )
        .unwrap();

        let ops = reply.take_operations();
        assert_eq!(
            ops,
            vec![
                FileOperation::Unknown(serde_json::json!({"op": "chmod", "path": "a"})),
                FileOperation::delete("b"),
            ]
        );
        assert!(reply.ops.is_empty());
    }

    #[test]
    fn record_without_op_does_not_reject_reply() {
        let reply = AssistantReply::parse(
            r#"{"message":"m","ops":[{"path":"a.ts"},{"op":"writeFile","path":"b.ts","content":"b"}]}"#,
        )
        .unwrap();

        assert_eq!(reply.message, "m");
        assert_eq!(reply.ops.len(), 2);
        assert_eq!(reply.ops[0].path(), None);
        assert_eq!(reply.ops[1], FileOperation::write("b.ts", "b"));
    }

    #[test]
    fn malformed_reply_is_serialization_error() {
        let err = AssistantReply::parse("Sure! Here is the code:").unwrap_err();
        assert!(matches!(err, ChangeSetError::SerializationError(_)));
    }
}
