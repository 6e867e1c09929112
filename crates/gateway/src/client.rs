//! HTTP client for the control-plane gateway
//!
//! One authenticated request per call, a bounded wait, and a typed JSON
//! decode. No retries: retry policy belongs to whatever drives the
//! agent, not this crate.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, trace};

use paralegal_config::GatewayConfig;

use crate::types::*;
use crate::{GatewayError, Result};

/// Fixed client identifier sent with every request
const USER_AGENT: &str = "Paralegal/1.0";

/// Cap on how much response text an error may carry
const ERROR_BODY_LIMIT: usize = 200;

#[derive(serde::Deserialize)]
struct CasesEnvelope {
    cases: Vec<Case>,
}

#[derive(serde::Deserialize)]
struct CaseEnvelope {
    case: CaseDetail,
}

#[derive(serde::Deserialize)]
struct DocumentsEnvelope {
    documents: Vec<CaseDocument>,
}

#[derive(serde::Deserialize)]
struct ChecklistEnvelope {
    items: Vec<ChecklistItem>,
}

#[derive(serde::Deserialize)]
struct TasksEnvelope {
    tasks: Vec<TaskSummary>,
}

#[derive(serde::Deserialize)]
struct ApprovalEnvelope {
    approval: ApprovalStatus,
}

#[derive(serde::Deserialize)]
struct IdEnvelope {
    id: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskIdEnvelope {
    task_id: String,
}

/// Client for the control-plane gateway API.
///
/// Construct once at startup from validated configuration and share via
/// `Arc`; tools, the heartbeat service and the CLI all borrow the same
/// handle. Each call is independently cancellable through the
/// per-request timeout; there is no shared mutable state.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    timeout: Duration,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(GatewayError::Config("base URL is empty".to_string()));
        }
        if config.bot_token.trim().is_empty() {
            return Err(GatewayError::Config("bot token is empty".to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token,
            timeout: config.timeout,
        })
    }

    /// Construct from `BOT_API_URL`/`BOT_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let config = GatewayConfig::from_env()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Self::new(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Cases ---

    pub async fn list_cases(&self) -> Result<Vec<Case>> {
        let res: CasesEnvelope = self
            .request(Method::GET, "/api/bot/gateway/cases", None)
            .await?;
        Ok(res.cases)
    }

    pub async fn get_case(&self, case_id: &str) -> Result<CaseDetail> {
        let res: CaseEnvelope = self
            .request(
                Method::GET,
                &format!("/api/bot/gateway/cases/{}", case_id),
                None,
            )
            .await?;
        Ok(res.case)
    }

    pub async fn update_case(&self, case_id: &str, updates: &CaseUpdate) -> Result<()> {
        let _: Value = self
            .request(
                Method::PUT,
                &format!("/api/bot/gateway/cases/{}", case_id),
                Some(serde_json::to_value(updates)?),
            )
            .await?;
        Ok(())
    }

    pub async fn case_documents(&self, case_id: &str) -> Result<Vec<CaseDocument>> {
        let res: DocumentsEnvelope = self
            .request(
                Method::GET,
                &format!("/api/bot/gateway/cases/{}/documents", case_id),
                None,
            )
            .await?;
        Ok(res.documents)
    }

    pub async fn save_document(
        &self,
        case_id: &str,
        title: &str,
        content: &str,
        file_type: Option<&str>,
    ) -> Result<SavedDocument> {
        let mut body = json!({ "title": title, "content": content });
        if let Some(file_type) = file_type {
            body["fileType"] = json!(file_type);
        }
        self.request(
            Method::POST,
            &format!("/api/bot/gateway/cases/{}/documents", case_id),
            Some(body),
        )
        .await
    }

    /// Semantic search over the case's documents; the control plane does
    /// all ranking and returns scored content chunks.
    pub async fn search_documents(
        &self,
        case_id: &str,
        query: &str,
        limit: u32,
    ) -> Result<SearchResults> {
        self.request(
            Method::POST,
            &format!("/api/bot/gateway/cases/{}/search", case_id),
            Some(json!({ "query": query, "limit": limit })),
        )
        .await
    }

    pub async fn checklist(&self, case_id: &str) -> Result<Vec<ChecklistItem>> {
        let res: ChecklistEnvelope = self
            .request(
                Method::GET,
                &format!("/api/bot/gateway/cases/{}/checklist", case_id),
                None,
            )
            .await?;
        Ok(res.items)
    }

    pub async fn update_checklist_item(
        &self,
        case_id: &str,
        item_id: &str,
        updates: &ChecklistUpdate,
    ) -> Result<()> {
        let mut body = serde_json::to_value(updates)?;
        body["itemId"] = json!(item_id);
        let _: Value = self
            .request(
                Method::PUT,
                &format!("/api/bot/gateway/cases/{}/checklist", case_id),
                Some(body),
            )
            .await?;
        Ok(())
    }

    // --- Tasks ---

    /// Queue follow-up work for the agent itself; the external
    /// scheduler/runtime consumes it.
    pub async fn create_task(
        &self,
        description: &str,
        priority: Option<TaskPriority>,
        case_id: Option<&str>,
    ) -> Result<String> {
        let mut body = json!({ "description": description });
        if let Some(priority) = priority {
            body["priority"] = serde_json::to_value(priority)?;
        }
        if let Some(case_id) = case_id {
            body["caseId"] = json!(case_id);
        }
        let res: TaskIdEnvelope = self
            .request(Method::POST, "/api/bot/gateway/tasks", Some(body))
            .await?;
        Ok(res.task_id)
    }

    pub async fn list_tasks(
        &self,
        status: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<TaskSummary>> {
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(format!("status={}", status));
        }
        if let Some(limit) = limit {
            query.push(format!("limit={}", limit));
        }
        let path = if query.is_empty() {
            "/api/bot/gateway/tasks".to_string()
        } else {
            format!("/api/bot/gateway/tasks?{}", query.join("&"))
        };
        let res: TasksEnvelope = self.request(Method::GET, &path, None).await?;
        Ok(res.tasks)
    }

    // --- Schedules ---

    pub async fn create_schedule(&self, schedule: &NewSchedule) -> Result<String> {
        let res: IdEnvelope = self
            .request(
                Method::POST,
                "/api/bot/gateway/schedules",
                Some(serde_json::to_value(schedule)?),
            )
            .await?;
        Ok(res.id)
    }

    pub async fn update_schedule(&self, schedule_id: &str, updates: &ScheduleUpdate) -> Result<()> {
        let _: Value = self
            .request(
                Method::PUT,
                &format!("/api/bot/gateway/schedules/{}", schedule_id),
                Some(serde_json::to_value(updates)?),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_schedule(&self, schedule_id: &str) -> Result<()> {
        let _: Value = self
            .request(
                Method::DELETE,
                &format!("/api/bot/gateway/schedules/{}", schedule_id),
                None,
            )
            .await?;
        Ok(())
    }

    // --- Notifications ---

    pub async fn notify_lawyer(
        &self,
        subject: &str,
        message: &str,
        urgency: Option<Urgency>,
        case_id: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({ "subject": subject, "message": message });
        if let Some(urgency) = urgency {
            body["urgency"] = serde_json::to_value(urgency)?;
        }
        if let Some(case_id) = case_id {
            body["caseId"] = json!(case_id);
        }
        let _: Value = self
            .request(Method::POST, "/api/bot/gateway/notify", Some(body))
            .await?;
        Ok(())
    }

    // --- Audit ---

    pub async fn log_action(&self, action: &ActionRecord) -> Result<String> {
        let res: IdEnvelope = self
            .request(
                Method::POST,
                "/api/bot/gateway/actions",
                Some(serde_json::to_value(action)?),
            )
            .await?;
        Ok(res.id)
    }

    // --- Approvals ---

    pub async fn request_approval(&self, approval: &ApprovalRequest) -> Result<String> {
        let res: IdEnvelope = self
            .request(
                Method::POST,
                "/api/bot/gateway/approvals",
                Some(serde_json::to_value(approval)?),
            )
            .await?;
        Ok(res.id)
    }

    /// Poll the current state of an approval. Resolution happens only
    /// on the control plane; this never transitions anything.
    pub async fn check_approval(&self, approval_id: &str) -> Result<ApprovalStatus> {
        let res: ApprovalEnvelope = self
            .request(
                Method::GET,
                &format!("/api/bot/gateway/approvals?id={}", approval_id),
                None,
            )
            .await?;
        Ok(res.approval)
    }

    // --- Metering ---

    pub async fn report_token_usage(&self, usage: &TokenUsageReport) -> Result<()> {
        let _: Value = self
            .request(
                Method::POST,
                "/api/bot/gateway/tokens",
                Some(serde_json::to_value(usage)?),
            )
            .await?;
        Ok(())
    }

    // --- Heartbeat ---

    pub async fn heartbeat(&self) -> Result<Heartbeat> {
        self.request(Method::POST, "/api/bot/gateway/heartbeat", Some(json!({})))
            .await
    }

    // --- Connected-apps proxy ---

    /// List the operations available for the given connected-provider
    /// toolkits. Read-only; executes immediately.
    pub async fn discover_app_tools(&self, toolkits: &[String]) -> Result<AppToolList> {
        self.request(
            Method::POST,
            "/api/bot/gateway/composio",
            Some(json!({ "action": "discover", "toolkits": toolkits })),
        )
        .await
    }

    /// Run one named operation on a connected app. Write operations do
    /// not execute: the control plane converts them into an approval
    /// request and the outcome comes back as
    /// [`ExecuteOutcome::PendingApproval`].
    pub async fn execute_app_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> Result<ExecuteOutcome> {
        self.request(
            Method::POST,
            "/api/bot/gateway/composio",
            Some(json!({
                "action": "execute",
                "toolName": tool_name,
                "arguments": arguments,
            })),
        )
        .await
    }

    // --- Internal ---

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        trace!("{} {}", method, url);

        let mut req = self
            .http
            .request(method, &url)
            .header("Authorization", format!("BotToken {}", self.bot_token))
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .timeout(self.timeout);

        if let Some(body) = &body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();

        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            debug!("gateway returned {} for {}", status, path);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body: truncate(&text, ERROR_BODY_LIMIT),
            });
        }

        Ok(res.json::<T>().await?)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
