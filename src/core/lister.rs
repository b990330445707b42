use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::time::Duration;

use rmcp::ServiceExt;
use rmcp::service::{RoleClient, RunningService, ServiceError};
use rmcp::transport::TokioChildProcess;
use tokio::process::Command;

use crate::config::types::ServerConfig;
use crate::core::listing::{
    self, Listing, ListingError, NotebookResource, NotebookSource, Outcome, ToolInfo,
};
use crate::error::{ListerError, Result};

/// An MCP server that has not been started yet.
#[derive(Debug, Clone)]
pub struct NotebookLister {
    command: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    request_timeout: Option<Duration>,
}

impl NotebookLister {
    pub fn new(server: &ServerConfig) -> Self {
        Self {
            command: server.command.clone(),
            args: server.args.clone(),
            env: server.env.clone(),
            request_timeout: server.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Spawn the server with stdin/stdout piped. Must run inside a tokio runtime.
    ///
    /// The child inherits this process's environment, plus any configured extras.
    pub fn connect(self) -> Result<ConnectedLister> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args).envs(&self.env).kill_on_drop(true);

        let transport = TokioChildProcess::new(cmd).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ListerError::CommandNotFound {
                command: self.command.clone(),
            },
            _ => ListerError::Spawn {
                command: self.command.clone(),
                source,
            },
        })?;
        tracing::debug!(command = %self.command, args = ?self.args, "spawned server");

        Ok(ConnectedLister {
            command: self.command,
            transport,
            request_timeout: self.request_timeout,
        })
    }
}

/// A running child process, before the MCP handshake.
pub struct ConnectedLister {
    command: String,
    transport: TokioChildProcess,
    request_timeout: Option<Duration>,
}

impl ConnectedLister {
    /// Run the `initialize` exchange. On failure the child is dropped and killed.
    pub async fn initialize_session(self) -> Result<McpSession> {
        let service = ().serve(self.transport).await.map_err(|source| ListerError::Handshake {
            command: self.command.clone(),
            source,
        })?;

        if let Some(info) = service.peer_info() {
            tracing::debug!(
                server = %info.server_info.name,
                version = %info.server_info.version,
                "session initialized"
            );
        }

        Ok(McpSession {
            service,
            request_timeout: self.request_timeout,
        })
    }
}

/// An initialized client session over the child's stdio.
pub struct McpSession {
    service: RunningService<RoleClient, ()>,
    request_timeout: Option<Duration>,
}

impl McpSession {
    async fn bounded<T, F>(&self, request: F) -> std::result::Result<T, ListingError>
    where
        F: Future<Output = std::result::Result<T, ServiceError>>,
    {
        match self.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(result) => result.map_err(ListingError::from),
                Err(_) => Err(ListingError::timeout(format!(
                    "request timed out after {}s",
                    limit.as_secs()
                ))),
            },
            None => request.await.map_err(ListingError::from),
        }
    }
}

impl NotebookSource for McpSession {
    async fn list_resources(&self) -> Outcome<NotebookResource> {
        let resources = self.bounded(self.service.list_all_resources()).await?;
        tracing::debug!(count = resources.len(), "listed resources");
        Ok(resources.into_iter().map(NotebookResource::from).collect())
    }

    async fn list_tools(&self) -> Outcome<ToolInfo> {
        let tools = self.bounded(self.service.list_all_tools()).await?;
        tracing::debug!(count = tools.len(), "listed tools");
        Ok(tools.into_iter().map(ToolInfo::from).collect())
    }

    async fn close(self) {
        match self.service.cancel().await {
            Ok(reason) => tracing::debug!(?reason, "session closed"),
            Err(e) => tracing::warn!(error = %e, "session task did not shut down cleanly"),
        }
    }
}

/// Connect, handshake, list both catalogues, and close.
pub async fn fetch_listing(server: &ServerConfig) -> Result<Listing> {
    let lister = NotebookLister::new(server);
    let command = lister.command().to_string();

    let session = lister.connect()?.initialize_session().await?;
    Ok(listing::collect(&command, session).await)
}
