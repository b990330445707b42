use std::future::Future;

use rmcp::service::ServiceError;
use serde::Serialize;
use thiserror::Error;

/// A notebook the server exposes as an MCP resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookResource {
    pub name: String,
    pub uri: String,
}

impl From<rmcp::model::Resource> for NotebookResource {
    fn from(resource: rmcp::model::Resource) -> Self {
        let raw = resource.raw;
        Self {
            name: raw.name,
            uri: raw.uri,
        }
    }
}

/// A tool the server exposes. MCP leaves the description optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<rmcp::model::Tool> for ToolInfo {
    fn from(tool: rmcp::model::Tool) -> Self {
        Self {
            name: tool.name.into_owned(),
            description: tool.description.map(|d| d.into_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The server answered, but with an error or an unusable payload.
    Remote,
    /// The channel is closed or broken.
    Transport,
    /// No answer within the request timeout. The channel may still work.
    Timeout,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ListingError {
    pub kind: FailureKind,
    pub message: String,
}

impl ListingError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Remote,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: message.into(),
        }
    }

    /// Whether the channel is unusable after this failure.
    pub fn is_fatal(&self) -> bool {
        self.kind == FailureKind::Transport
    }
}

impl From<ServiceError> for ListingError {
    fn from(err: ServiceError) -> Self {
        let kind = match &err {
            ServiceError::McpError(_) | ServiceError::UnexpectedResponse => FailureKind::Remote,
            ServiceError::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Transport,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

pub type Outcome<T> = std::result::Result<Vec<T>, ListingError>;

/// Result of one run against a server.
#[derive(Debug, Clone)]
pub struct Listing {
    pub server: String,
    pub resources: Outcome<NotebookResource>,
    pub tools: Outcome<ToolInfo>,
}

/// Something that can answer the two list requests, then be shut down.
pub trait NotebookSource {
    fn list_resources(&self) -> impl Future<Output = Outcome<NotebookResource>>;
    fn list_tools(&self) -> impl Future<Output = Outcome<ToolInfo>>;
    fn close(self) -> impl Future<Output = ()>;
}

/// Issue both list requests in order, then close the source.
///
/// A remote or timeout failure on resources does not stop the tools request. A
/// transport failure does: the tools request is reported as not attempted.
pub async fn collect<S: NotebookSource>(server: &str, source: S) -> Listing {
    let resources = source.list_resources().await;
    if let Err(ref e) = resources {
        tracing::debug!(kind = ?e.kind, error = %e, "listing resources failed");
    }

    let tools = match &resources {
        Err(e) if e.is_fatal() => Err(ListingError::transport(format!(
            "not attempted, connection lost ({})",
            e.message
        ))),
        _ => source.list_tools().await,
    };
    if let Err(ref e) = tools {
        tracing::debug!(kind = ?e.kind, error = %e, "listing tools failed");
    }

    source.close().await;

    Listing {
        server: server.to_string(),
        resources,
        tools,
    }
}
