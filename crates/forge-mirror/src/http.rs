// http.rs — HttpMirror: the project server's apply/export endpoints.
//
//   POST {base_url}/api/projects/{id}/apply   body {"operations": [...]}
//                                             reply {"results": [...]}
//   GET  {base_url}/api/projects/{id}/export  reply ProjectBundle
//
// Requests are blocking; the editor pushes after the local apply finished.

use std::time::Duration;

use forge_changeset::FileOperation;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::bundle::{ProjectBundle, ProjectInfo};
use crate::error::MirrorError;
use crate::mirror::{failure_count, OperationResult, RemoteMirror};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ApplyRequest<'a> {
    operations: &'a [FileOperation],
}

#[derive(Deserialize)]
struct ApplyResponse {
    #[serde(default)]
    results: Vec<OperationResult>,
}

/// Mirror hosted by the project server.
#[derive(Debug)]
pub struct HttpMirror {
    client: Client,
    base_url: String,
    project: ProjectInfo,
    token: Option<String>,
}

impl HttpMirror {
    /// Create a client for `project` on the server at `base_url`.
    ///
    /// `token` is sent as a bearer token when present.
    pub fn new(
        base_url: impl Into<String>,
        project: ProjectInfo,
        token: Option<String>,
    ) -> Result<Self, MirrorError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(MirrorError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }
        if project.id.is_empty() {
            return Err(MirrorError::InvalidConfig("project id is empty".to_string()));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url,
            project,
            token,
        })
    }

    pub fn apply_url(&self) -> String {
        format!("{}/api/projects/{}/apply", self.base_url, self.project.id)
    }

    pub fn export_url(&self) -> String {
        format!("{}/api/projects/{}/export", self.base_url, self.project.id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn check_status(response: Response) -> Result<Response, MirrorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(MirrorError::Status {
        status: status.as_u16(),
        body,
    })
}

impl RemoteMirror for HttpMirror {
    fn push(&mut self, operations: &[FileOperation]) -> Result<Vec<OperationResult>, MirrorError> {
        let url = self.apply_url();
        tracing::debug!("POST {} ({} operation(s))", url, operations.len());

        let request = self.client.post(&url).json(&ApplyRequest { operations });
        let response = check_status(self.authorize(request).send()?)?;
        let reply: ApplyResponse = response.json()?;

        tracing::info!(
            "pushed {} operation(s) to {} ({} failed)",
            reply.results.len(),
            self.project.id,
            failure_count(&reply.results)
        );
        Ok(reply.results)
    }

    fn export(&self) -> Result<ProjectBundle, MirrorError> {
        let url = self.export_url();
        tracing::debug!("GET {}", url);

        let response = check_status(self.authorize(self.client.get(&url)).send()?)?;
        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> ProjectInfo {
        ProjectInfo {
            id: id.to_string(),
            name: "demo".to_string(),
        }
    }

    #[test]
    fn builds_endpoint_urls() {
        let mirror = HttpMirror::new("https://forge.example.com/", project("p1"), None).unwrap();
        assert_eq!(
            mirror.apply_url(),
            "https://forge.example.com/api/projects/p1/apply"
        );
        assert_eq!(
            mirror.export_url(),
            "https://forge.example.com/api/projects/p1/export"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = HttpMirror::new("ftp://host", project("p1"), None).unwrap_err();
        assert!(matches!(err, MirrorError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_project_id() {
        let err = HttpMirror::new("http://localhost:3000", project(""), None).unwrap_err();
        assert!(matches!(err, MirrorError::InvalidConfig(_)));
    }

    #[test]
    fn apply_request_passes_operations_through() {
        let ops = vec![
            FileOperation::write("a.ts", "a"),
            FileOperation::WriteFile {
                path: "b.ts".to_string(),
                content: None,
            },
        ];
        let json = serde_json::to_string(&ApplyRequest { operations: &ops }).unwrap();
        assert_eq!(
            json,
            r#"{"operations":[{"op":"writeFile","path":"a.ts","content":"a"},{"op":"writeFile","path":"b.ts"}]}"#
        );
    }

    #[test]
    fn apply_request_forwards_unknown_ops_verbatim() {
        let record = r#"{"op":"renameFile","path":"a.ts","to":"b.ts"}"#;
        let ops: Vec<FileOperation> = serde_json::from_str(&format!("[{}]", record)).unwrap();

        let json = serde_json::to_string(&ApplyRequest { operations: &ops }).unwrap();
        assert_eq!(json, format!(r#"{{"operations":[{}]}}"#, record));
    }

    #[test]
    fn apply_response_parses_failures() {
        let reply: ApplyResponse = serde_json::from_str(
            r#"{"results":[{"path":"a.ts","success":true},{"path":"b.ts","success":false,"error":"denied"}]}"#,
        )
        .unwrap();
        assert_eq!(failure_count(&reply.results), 1);
        assert_eq!(reply.results[1].error.as_deref(), Some("denied"));
    }
}
