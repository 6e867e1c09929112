//! Gateway tool surfaces for the agent runtime
//!
//! Exposes the control-plane capabilities to the agent as three
//! multiplexed tools, each taking a discriminated `action` plus a flat
//! parameter bag. Dispatch deserializes the bag into a tagged enum, so
//! an unknown action or a missing required parameter fails before any
//! network call is made.

pub mod actions;
pub mod apps;
pub mod cases;

pub use actions::ActionsTool;
pub use apps::AppsTool;
pub use cases::CasesTool;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use paralegal_config::GatewayConfig;
use paralegal_gateway::GatewayClient;

pub type BoxedTool = Box<dyn ToolTrait + Send + Sync>;

/// A tool the agent runtime can call
#[async_trait]
pub trait ToolTrait: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters(&self) -> Value;
    async fn execute(
        &self,
        args: Value,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Tool definition handed to the hosting runtime / model provider
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

pub fn to_tool_spec(tool: &dyn ToolTrait) -> ToolSpec {
    ToolSpec {
        name: tool.name().to_string(),
        description: tool.description().to_string(),
        parameters: tool.parameters(),
    }
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, BoxedTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register<T: ToolTrait + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&(dyn ToolTrait + Send + Sync)> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|t| to_tool_spec(t.as_ref())).collect()
    }

    pub async fn execute(
        &self,
        name: &str,
        args: Value,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| format!("tool '{}' not found", name))?;
        tool.execute(args).await
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the gateway toolset. With no client (missing `BOT_API_URL` /
/// `BOT_API_TOKEN`) this yields no tools at all, so the hosting runtime
/// omits the capability from the agent instead of surfacing a tool that
/// errors on first use.
pub fn gateway_toolset(client: Option<Arc<GatewayClient>>) -> Vec<BoxedTool> {
    let Some(client) = client else {
        return Vec::new();
    };

    vec![
        Box::new(ActionsTool::new(client.clone())) as BoxedTool,
        Box::new(CasesTool::new(client.clone())),
        Box::new(AppsTool::new(client)),
    ]
}

/// Build the gateway toolset straight from the environment. A missing
/// or unusable `BOT_API_URL`/`BOT_API_TOKEN` yields an empty toolset;
/// the misconfiguration is logged here and otherwise invisible to the
/// agent.
pub fn gateway_toolset_from_env() -> Vec<BoxedTool> {
    if !GatewayConfig::env_is_configured() {
        tracing::debug!("gateway not configured, omitting gateway tools");
        return Vec::new();
    }

    match GatewayClient::from_env() {
        Ok(client) => gateway_toolset(Some(Arc::new(client))),
        Err(e) => {
            tracing::warn!("gateway client unavailable: {}", e);
            Vec::new()
        }
    }
}

/// Register the gateway tools, if configured
pub fn register_gateway_tools(registry: &mut ToolRegistry, client: Option<Arc<GatewayClient>>) {
    let Some(client) = client else {
        return;
    };

    registry.register(ActionsTool::new(client.clone()));
    registry.register(CasesTool::new(client.clone()));
    registry.register(AppsTool::new(client));
}
