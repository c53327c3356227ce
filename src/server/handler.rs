use crate::client::DetectorClient;
use crate::tools::detect::DetectInput;
use crate::tools::filter::FilterInput;
use crate::{Config, DetectStripeTool, FilterProductsTool, Result};
use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData, ServerHandler,
};
use std::{future::Future, sync::Arc};
use tracing::{debug, info, instrument};

const SERVER_INSTRUCTIONS: &str = "A Rust-based MCP server for Stripe payment detection. \
Provides tools to check a URL for Stripe integration and to filter product lists \
down to Stripe-enabled entries.";

/// Main MCP server handler implementing rmcp
#[derive(Debug, Clone)]
pub struct DetectorServerHandler {
    config: Arc<Config>,
    filter_tool: FilterProductsTool,
    detect_tool: DetectStripeTool,
}

impl DetectorServerHandler {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        info!("Initializing Stripe detector MCP server handler");

        let client = Arc::new(DetectorClient::new(&config)?);
        let filter_tool = FilterProductsTool::new(Arc::clone(&client));
        let detect_tool = DetectStripeTool::new(client);

        Ok(Self {
            config,
            filter_tool,
            detect_tool,
        })
    }

    /// Health check for the server
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<()> {
        debug!("Ping received - server is healthy");
        Ok(())
    }

    /// Configured base URL of the backing detection service
    #[must_use]
    pub fn detector_base_url(&self) -> &str {
        &self.config.detector.base_url
    }
}

impl ServerHandler for DetectorServerHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, request, context))]
    fn initialize(
        &self,
        request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<InitializeResult, ErrorData>> + Send + '_ {
        info!("MCP server initializing");

        async move {
            if context.peer.peer_info().is_none() {
                context.peer.set_peer_info(request);
            }

            Ok(InitializeResult {
                protocol_version: ProtocolVersion::default(),
                capabilities: ServerCapabilities::builder().enable_tools().build(),
                server_info: Implementation {
                    name: env!("CARGO_PKG_NAME").into(),
                    version: env!("CARGO_PKG_VERSION").into(),
                },
                instructions: Some(SERVER_INSTRUCTIONS.into()),
            })
        }
    }

    #[instrument(skip(self, _request, _context))]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListToolsResult, ErrorData>> + Send + '_ {
        info!("Listing available tools");

        async move {
            let tools = vec![
                Tool {
                    name: DetectStripeTool::NAME.into(),
                    description: Some(DetectStripeTool::DESCRIPTION.into()),
                    input_schema: Arc::new(
                        serde_json::to_value(schemars::schema_for!(DetectInput))
                            .unwrap()
                            .as_object()
                            .unwrap()
                            .clone(),
                    ),
                    output_schema: None,
                    annotations: None,
                },
                Tool {
                    name: FilterProductsTool::NAME.into(),
                    description: Some(FilterProductsTool::DESCRIPTION.into()),
                    input_schema: Arc::new(
                        serde_json::to_value(schemars::schema_for!(FilterInput))
                            .unwrap()
                            .as_object()
                            .unwrap()
                            .clone(),
                    ),
                    output_schema: None,
                    annotations: None,
                },
            ];

            Ok(ListToolsResult {
                tools,
                next_cursor: None,
            })
        }
    }

    #[instrument(skip(self, request, _context))]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<CallToolResult, ErrorData>> + Send + '_ {
        info!("Tool called: {}", request.name);

        let filter_tool = self.filter_tool.clone();
        let detect_tool = self.detect_tool.clone();

        async move {
            let arguments = serde_json::Value::Object(request.arguments.unwrap_or_default());

            // Both tools absorb remote failures into their fallback payloads,
            // so a completed call is never an MCP-level error; only malformed
            // arguments or an unknown tool name are.
            let result = match request.name.as_ref() {
                "detect_stripe" => {
                    let input: DetectInput = serde_json::from_value(arguments).map_err(|e| {
                        ErrorData::invalid_params(format!("Invalid detection input: {e}"), None)
                    })?;
                    detect_tool.run(input).await
                }
                "filter_products" => {
                    let input: FilterInput = serde_json::from_value(arguments).map_err(|e| {
                        ErrorData::invalid_params(format!("Invalid filter input: {e}"), None)
                    })?;
                    filter_tool.run(input).await
                }
                _ => {
                    return Err(ErrorData::invalid_request(
                        format!("Unknown tool: {}", request.name),
                        None,
                    ))
                }
            };

            let rendered = serde_json::to_string_pretty(&result)
                .map_err(|e| ErrorData::internal_error(format!("Serialization failed: {e}"), None))?;

            Ok(CallToolResult {
                content: Some(vec![Content::text(rendered)]),
                structured_content: None,
                is_error: Some(false),
            })
        }
    }
}
