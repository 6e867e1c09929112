//! Audit, approval, metering and self-scheduling tool
//!
//! The compliance surface: every skill run gets logged, high-risk work
//! goes through the lawyer's approval queue, and every model call gets
//! metered.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use paralegal_gateway::{
    ActionRecord, ActionStatus, ApprovalRequest, GatewayClient, NewSchedule, RiskLevel,
    ScheduleType, ScheduleUpdate, TaskPriority, TokenUsageReport, Urgency,
};

use super::ToolTrait;

/// Audit/approval/metering actions against the control plane
pub struct ActionsTool {
    client: Arc<GatewayClient>,
}

impl ActionsTool {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        Self { client }
    }
}

fn default_model() -> String {
    "unknown".to_string()
}

fn default_status() -> ActionStatus {
    ActionStatus::Completed
}

fn empty_object() -> Value {
    json!({})
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum GatewayAction {
    LogAction {
        action_type: String,
        risk_level: RiskLevel,
        description: String,
        #[serde(default)]
        tools_used: Vec<String>,
        #[serde(default = "default_model")]
        model_used: String,
        #[serde(default)]
        input_tokens: u64,
        #[serde(default)]
        output_tokens: u64,
        #[serde(default)]
        cost_usd: f64,
        #[serde(default = "default_status")]
        status: ActionStatus,
        duration_ms: Option<u64>,
        case_id: Option<String>,
        metadata: Option<Value>,
    },
    RequestApproval {
        action_type: String,
        description: String,
        #[serde(default = "empty_object")]
        proposed_action: Value,
        expires_in_ms: Option<u64>,
    },
    CheckApproval {
        approval_id: String,
    },
    ReportTokens {
        model_used: String,
        input_tokens: u64,
        output_tokens: u64,
        cost_usd: f64,
        feature: String,
    },
    Heartbeat,
    CreateTask {
        description: String,
        priority: Option<TaskPriority>,
        case_id: Option<String>,
    },
    CreateSchedule {
        name: String,
        schedule_type: ScheduleType,
        schedule_value: String,
        task_type: String,
        description: Option<String>,
        task_config: Option<Value>,
    },
    UpdateSchedule {
        schedule_id: String,
        name: Option<String>,
        description: Option<String>,
        schedule_value: Option<String>,
        task_config: Option<Value>,
        enabled: Option<bool>,
    },
    DeleteSchedule {
        schedule_id: String,
    },
    NotifyLawyer {
        subject: String,
        message: String,
        urgency: Option<Urgency>,
        case_id: Option<String>,
    },
}

#[async_trait]
impl ToolTrait for ActionsTool {
    fn name(&self) -> &str {
        "gateway_actions"
    }

    fn description(&self) -> &str {
        "Log actions for audit compliance, request lawyer approval for high-risk actions, \
         check approval status, report token usage for billing, send heartbeats, create tasks \
         for yourself, manage schedules, and send proactive notifications to the lawyer. \
         IMPORTANT: Always log_action after completing any skill. Use request_approval for \
         HIGH risk actions (document drafting, filing prep). Use report_tokens after every \
         LLM call for accurate billing. Use notify_lawyer for urgent findings or deadline \
         alerts. Use create_task to queue follow-up work for yourself."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": [
                        "log_action", "request_approval", "check_approval", "report_tokens",
                        "heartbeat", "create_task", "create_schedule", "update_schedule",
                        "delete_schedule", "notify_lawyer"
                    ],
                    "description": "Action: log_action (audit log), request_approval (human-in-the-loop), check_approval (poll status), report_tokens (usage tracking), heartbeat (health check), create_task (queue a task for yourself), create_schedule (create recurring schedule), update_schedule (modify schedule), delete_schedule (remove schedule), notify_lawyer (send proactive email notification)"
                },
                "action_type": { "type": "string", "description": "Type of action performed: research, draft, analyze, browse, schedule, notify" },
                "risk_level": { "type": "string", "enum": ["low", "medium", "high"], "description": "Risk classification: low, medium, high" },
                "description": { "type": "string", "description": "Human-readable description of what was done" },
                "tools_used": { "type": "array", "items": { "type": "string" }, "description": "List of tools/skills used" },
                "model_used": { "type": "string", "description": "LLM model ID used" },
                "input_tokens": { "type": "integer", "description": "Input tokens consumed" },
                "output_tokens": { "type": "integer", "description": "Output tokens consumed" },
                "cost_usd": { "type": "number", "description": "Estimated cost in USD" },
                "status": { "type": "string", "enum": ["completed", "pending_approval", "failed"], "description": "Action status" },
                "duration_ms": { "type": "integer", "description": "Action duration in milliseconds" },
                "case_id": { "type": "string", "description": "Associated case ID" },
                "metadata": { "type": "object", "description": "Additional structured data" },
                "proposed_action": { "type": "object", "description": "Structured data describing the proposed action for lawyer review" },
                "expires_in_ms": { "type": "integer", "description": "Approval expiry in ms (default: 24 hours)" },
                "approval_id": { "type": "string", "description": "Approval ID to check (from request_approval)" },
                "feature": { "type": "string", "description": "Feature name for token reporting (e.g., case-research)" },
                "subject": { "type": "string", "description": "Email subject for notify_lawyer" },
                "message": { "type": "string", "description": "Email message body for notify_lawyer" },
                "urgency": { "type": "string", "enum": ["normal", "urgent"], "description": "Notification urgency" },
                "name": { "type": "string", "description": "Schedule name for create_schedule" },
                "schedule_type": { "type": "string", "enum": ["cron", "daily", "weekday", "hourly", "interval"], "description": "Schedule trigger kind" },
                "schedule_value": { "type": "string", "description": "Schedule value (cron expr, ISO time, ms)" },
                "task_type": { "type": "string", "description": "deadline_check, case_research, briefing, etc." },
                "task_config": { "type": "object", "description": "Task configuration" },
                "schedule_id": { "type": "string", "description": "Schedule ID for update/delete" },
                "priority": { "type": "string", "enum": ["normal", "high"], "description": "Task priority" }
            },
            "required": ["action"]
        })
    }

    async fn execute(
        &self,
        args: Value,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let action: GatewayAction = serde_json::from_value(args)
            .map_err(|e| format!("invalid gateway_actions call: {}", e))?;
        debug!("gateway_actions: {:?}", action);

        match action {
            GatewayAction::LogAction {
                action_type,
                risk_level,
                description,
                tools_used,
                model_used,
                input_tokens,
                output_tokens,
                cost_usd,
                status,
                duration_ms,
                case_id,
                metadata,
            } => {
                let record = ActionRecord {
                    action_type,
                    risk_level,
                    description,
                    tools_used,
                    model_used,
                    input_tokens,
                    output_tokens,
                    cost_usd,
                    status,
                    duration_ms,
                    case_id,
                    result: None,
                    metadata,
                };
                let id = self.client.log_action(&record).await?;
                Ok(json!({ "ok": true, "actionId": id }).to_string())
            }

            GatewayAction::RequestApproval {
                action_type,
                description,
                proposed_action,
                expires_in_ms,
            } => {
                let request = ApprovalRequest {
                    action_type,
                    description,
                    proposed_action,
                    expires_in_ms,
                };
                let id = self.client.request_approval(&request).await?;
                Ok(json!({ "ok": true, "approvalId": id }).to_string())
            }

            GatewayAction::CheckApproval { approval_id } => {
                let approval = self.client.check_approval(&approval_id).await?;
                Ok(json!({ "approval": approval }).to_string())
            }

            GatewayAction::ReportTokens {
                model_used,
                input_tokens,
                output_tokens,
                cost_usd,
                feature,
            } => {
                let usage = TokenUsageReport {
                    model_used,
                    input_tokens,
                    output_tokens,
                    cost_usd,
                    feature,
                };
                self.client.report_token_usage(&usage).await?;
                Ok(json!({ "ok": true }).to_string())
            }

            GatewayAction::Heartbeat => {
                let heartbeat = self.client.heartbeat().await?;
                Ok(serde_json::to_string(&heartbeat)?)
            }

            GatewayAction::CreateTask {
                description,
                priority,
                case_id,
            } => {
                let task_id = self
                    .client
                    .create_task(&description, priority, case_id.as_deref())
                    .await?;
                Ok(json!({ "ok": true, "taskId": task_id }).to_string())
            }

            GatewayAction::CreateSchedule {
                name,
                schedule_type,
                schedule_value,
                task_type,
                description,
                task_config,
            } => {
                let schedule = NewSchedule {
                    name,
                    schedule_type,
                    schedule_value,
                    task_type,
                    description,
                    task_config,
                    enabled: None,
                };
                let id = self.client.create_schedule(&schedule).await?;
                Ok(json!({ "ok": true, "scheduleId": id }).to_string())
            }

            GatewayAction::UpdateSchedule {
                schedule_id,
                name,
                description,
                schedule_value,
                task_config,
                enabled,
            } => {
                let updates = ScheduleUpdate {
                    name,
                    description,
                    schedule_value,
                    task_config,
                    enabled,
                };
                self.client.update_schedule(&schedule_id, &updates).await?;
                Ok(json!({ "ok": true, "scheduleId": schedule_id }).to_string())
            }

            GatewayAction::DeleteSchedule { schedule_id } => {
                self.client.delete_schedule(&schedule_id).await?;
                Ok(json!({ "ok": true, "scheduleId": schedule_id, "deleted": true }).to_string())
            }

            GatewayAction::NotifyLawyer {
                subject,
                message,
                urgency,
                case_id,
            } => {
                self.client
                    .notify_lawyer(&subject, &message, urgency, case_id.as_deref())
                    .await?;
                Ok(json!({ "ok": true, "sent": true }).to_string())
            }
        }
    }
}
