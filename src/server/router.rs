use crate::server::UiPromptServer;
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, InitializeRequestParam,
        InitializeResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo, Tool, ToolsCapability,
    },
    service::{RequestContext, RoleServer},
};
use tracing::info;

pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tools exposed by the server, in listing order
pub const TOOL_NAMES: [&str; 5] = [
    "generate_pc_prompt",
    "generate_app_prompt",
    "generate_gemini_enhanced_prompt",
    "suggest_components",
    "detailed_help",
];

impl UiPromptServer {
    /// Tool definitions advertised by `tools/list`
    pub fn tool_definitions(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "generate_pc_prompt".into(),
                title: Some("Generate PC Prompt".into()),
                description: Some(
                    "Build a Vue single-file component prompt for a desktop web UI".into(),
                ),
                input_schema: crate::schemas::generate_prompt_schema(),
                icons: None,
                annotations: None,
                output_schema: None,
                meta: None,
            },
            Tool {
                name: "generate_app_prompt".into(),
                title: Some("Generate App Prompt".into()),
                description: Some(
                    "Build a Vue single-file component prompt for a mobile UI".into(),
                ),
                input_schema: crate::schemas::generate_prompt_schema(),
                icons: None,
                annotations: None,
                output_schema: None,
                meta: None,
            },
            Tool {
                name: "generate_gemini_enhanced_prompt".into(),
                title: Some("Generate Gemini-Enhanced Prompt".into()),
                description: Some(
                    "Build the base prompt and let Gemini rewrite it with more technical detail; falls back to the base prompt on failure".into(),
                ),
                input_schema: crate::schemas::enhanced_prompt_schema(),
                icons: None,
                annotations: None,
                output_schema: None,
                meta: None,
            },
            Tool {
                name: "suggest_components".into(),
                title: Some("Suggest Element Plus Components".into()),
                description: Some(
                    "Map UI keywords found in free text to Element Plus components and charts".into(),
                ),
                input_schema: crate::schemas::suggest_components_schema(),
                icons: None,
                annotations: None,
                output_schema: Some(crate::schemas::suggest_components_output_schema()),
                meta: None,
            },
            Tool {
                name: "detailed_help".into(),
                title: Some("Detailed Help".into()),
                description: Some("Get detailed help for a specific tool".into()),
                input_schema: crate::schemas::detailed_help_schema(),
                icons: None,
                annotations: None,
                output_schema: Some(crate::schemas::detailed_help_output_schema()),
                meta: None,
            },
        ]
    }
}

impl ServerHandler for UiPromptServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("UI Prompt Generator".to_string()),
                version: SERVER_VERSION.to_string(),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Generates prompts for Vue 3 + Element Plus single-file components. Use generate_pc_prompt / generate_app_prompt for plain prompts, generate_gemini_enhanced_prompt for an LLM-refined prompt, and suggest_components to map UI wording to Element Plus widgets.".to_string(),
            ),
            ..Default::default()
        }
    }

    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        let mut info = self.get_info();
        info.protocol_version = request.protocol_version.clone();
        Ok(info)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("tools/list requested");
        Ok(ListToolsResult {
            tools: self.tool_definitions(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("tools/call {}", request.name);
        self.dispatch_tool(request).await
    }
}

impl UiPromptServer {
    /// Route a tool call to its handler
    pub async fn dispatch_tool(
        &self,
        request: CallToolRequestParam,
    ) -> std::result::Result<CallToolResult, McpError> {
        match request.name.as_ref() {
            "generate_pc_prompt" => self
                .handle_generate_pc_prompt(request)
                .await
                .map_err(|e| e.into()),
            "generate_app_prompt" => self
                .handle_generate_app_prompt(request)
                .await
                .map_err(|e| e.into()),
            "generate_gemini_enhanced_prompt" => self
                .handle_enhanced_prompt(request)
                .await
                .map_err(|e| e.into()),
            "suggest_components" => self
                .handle_suggest_components(request)
                .await
                .map_err(|e| e.into()),
            "detailed_help" => self
                .handle_detailed_help(request)
                .await
                .map_err(|e| e.into()),
            _ => Err(McpError {
                code: rmcp::model::ErrorCode::METHOD_NOT_FOUND,
                message: format!("Unknown tool: {}", request.name).into(),
                data: None,
            }),
        }
    }
}
