//! Connected-apps proxy tool
//!
//! The bot never talks to third-party providers directly: every call
//! goes through the control plane, which executes reads immediately and
//! converts writes into a pending approval. The sentinel outcome is
//! surfaced to the agent as data, so "no unsupervised write access" is
//! a contract, not a policy comment.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use paralegal_gateway::{ExecuteOutcome, GatewayClient};

use super::ToolTrait;

/// Proxy to the lawyer's connected apps (mail, calendar, storage, ...)
pub struct AppsTool {
    client: Arc<GatewayClient>,
}

impl AppsTool {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        Self { client }
    }
}

fn empty_object() -> Value {
    json!({})
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum AppsAction {
    DiscoverTools {
        #[serde(default)]
        toolkits: Vec<String>,
    },
    ExecuteTool {
        tool_name: String,
        #[serde(default = "empty_object")]
        tool_arguments: Value,
    },
}

#[async_trait]
impl ToolTrait for AppsTool {
    fn name(&self) -> &str {
        "gateway_apps"
    }

    fn description(&self) -> &str {
        "Access the lawyer's connected apps (Gmail, Google Calendar, Drive, Outlook, Slack, \
         Notion, etc.) through the control-plane proxy. Use discover_tools to see what tools \
         are available for the connected apps, then execute_tool to run a specific tool. Read \
         operations (list emails, get events, search files) execute immediately. Write \
         operations (send email, create event, delete file) require lawyer approval: the call \
         returns approvalRequired with an approvalId instead of executing. Poll that approval \
         via gateway_actions check_approval and re-invoke execute_tool only once it is \
         approved. Re-executing while one is pending creates a second approval request. \
         IMPORTANT: Only use this for apps the lawyer has connected. Check heartbeat \
         connectedToolkits first."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["discover_tools", "execute_tool"],
                    "description": "Action: discover_tools (list available tools for connected apps), execute_tool (run a specific proxied tool by name with arguments)"
                },
                "toolkits": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Toolkit slugs to discover tools for (e.g., [\"GMAIL\", \"GOOGLECALENDAR\"]). Required for discover_tools. Get available toolkits from heartbeat connectedToolkits."
                },
                "tool_name": {
                    "type": "string",
                    "description": "Full proxied tool name to execute (e.g., \"GMAIL_LIST_EMAILS\", \"GOOGLECALENDAR_LIST_EVENTS\"). Required for execute_tool. Get names from discover_tools first."
                },
                "tool_arguments": {
                    "type": "object",
                    "description": "Arguments to pass to the proxied tool. Schema available from discover_tools."
                }
            },
            "required": ["action"]
        })
    }

    async fn execute(
        &self,
        args: Value,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let action: AppsAction = serde_json::from_value(args)
            .map_err(|e| format!("invalid gateway_apps call: {}", e))?;
        debug!("gateway_apps: {:?}", action);

        match action {
            AppsAction::DiscoverTools { toolkits } => {
                if toolkits.is_empty() {
                    return Ok(json!({
                        "error": "toolkits array is required for discover_tools. Use the \
                                  toolkit slugs from heartbeat connectedToolkits \
                                  (e.g., [\"GMAIL\", \"GOOGLEDRIVE\"])."
                    })
                    .to_string());
                }

                let list = self.client.discover_app_tools(&toolkits).await?;
                let count = list.tools.len();
                let mut envelope = json!({ "tools": list.tools, "count": count });
                if let Some(message) = list.message {
                    envelope["message"] = json!(message);
                }
                Ok(envelope.to_string())
            }

            AppsAction::ExecuteTool {
                tool_name,
                tool_arguments,
            } => {
                let outcome = self
                    .client
                    .execute_app_tool(&tool_name, tool_arguments)
                    .await?;

                match outcome {
                    ExecuteOutcome::PendingApproval {
                        approval_id,
                        reason,
                    } => Ok(json!({
                        "approvalRequired": true,
                        "approvalId": approval_id,
                        "reason": reason,
                        "message": "This is a write operation that requires lawyer approval. \
                                    The approval request has been created. Wait for the lawyer \
                                    to approve before retrying, or notify them via \
                                    gateway_actions -> notify_lawyer.",
                    })
                    .to_string()),

                    ExecuteOutcome::Executed { result } => {
                        Ok(json!({ "result": result }).to_string())
                    }
                }
            }
        }
    }
}
