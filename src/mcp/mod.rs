use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    schemars::JsonSchema,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::services::Services;

#[derive(Clone)]
pub struct McpServer {
    services: Services,
    tool_router: ToolRouter<Self>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScanRepositoryRequest {
    #[schemars(description = "Repository in owner/name form, e.g. rust-lang/rust")]
    pub repo: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeIssuesRequest {
    #[schemars(description = "Repository in owner/name form; must have been scanned first")]
    pub repo: String,
    #[schemars(description = "Question or instruction about the repository's open issues")]
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListCachedRepositoriesRequest {}

impl McpServer {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            tool_router: Self::tool_router(),
        }
    }

    fn to_mcp_error(err: AppError) -> McpError {
        let data = err.details().map(|details| json!({ "details": details }));
        match err {
            AppError::InvalidInput(_) | AppError::NotFound(_) => {
                McpError::invalid_params(err.to_string(), data)
            }
            other => McpError::internal_error(other.to_string(), data),
        }
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_router]
impl McpServer {
    #[tool(description = "Fetch a GitHub repository's open issues and replace its cached copy")]
    async fn scan_repository(
        &self,
        params: Parameters<ScanRepositoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;

        let result = self
            .services
            .scanner
            .scan(&req.repo)
            .await
            .map_err(Self::to_mcp_error)?;

        Self::json_result(&result)
    }

    #[tool(description = "Ask a question about a scanned repository's cached open issues")]
    async fn analyze_issues(
        &self,
        params: Parameters<AnalyzeIssuesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;

        let result = self
            .services
            .analyzer
            .analyze(&req.repo, &req.prompt)
            .await
            .map_err(Self::to_mcp_error)?;

        Self::json_result(&result)
    }

    #[tool(description = "List repositories with cached issues and their issue counts")]
    async fn list_cached_repositories(
        &self,
        _params: Parameters<ListCachedRepositoriesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let repos = self
            .services
            .db
            .list_repositories()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Self::json_result(&repos)
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Issue Analyzer MCP server: scan a GitHub repository, then ask questions about its open issues"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(services: Services) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(services);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_invalid_params() {
        let err = McpServer::to_mcp_error(AppError::NotFound("nothing cached".into()));
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let err = McpServer::to_mcp_error(AppError::Configuration("no key".into()));
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert!(err.data.is_none());
    }

    #[test]
    fn upstream_errors_keep_response_body() {
        let err = McpServer::to_mcp_error(AppError::Upstream {
            message: "OpenAI API error: 429".into(),
            status: 429,
            details: r#"{"error":"rate limited"}"#.into(),
        });

        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "OpenAI API error: 429");
        assert_eq!(
            err.data,
            Some(json!({ "details": r#"{"error":"rate limited"}"# }))
        );
    }

    #[test]
    fn advertises_tool_capability() {
        let db = crate::db::Database::open_memory().unwrap();
        let server = McpServer::new(Services::new(&crate::Config::default(), db));

        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
    }
}
