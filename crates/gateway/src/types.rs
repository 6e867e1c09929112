//! Wire types for the control-plane gateway
//!
//! The server speaks camelCase JSON. Closed enumerations from the
//! protocol (case status, risk level, approval state, priorities) are
//! real enums; everything the control plane leaves open stays a
//! `String`. Timestamps are passed through as the server sent them;
//! the client does no validation beyond JSON decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default approval expiry applied by the control plane when a request
/// carries no explicit `expiresInMs`: 24 hours from creation.
pub const DEFAULT_APPROVAL_EXPIRY_MS: u64 = 24 * 60 * 60 * 1000;

// --- Cases ---

/// Lifecycle state of a legal matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Active,
    OnHold,
    Closed,
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CaseStatus::Active => "ACTIVE",
            CaseStatus::OnHold => "ON_HOLD",
            CaseStatus::Closed => "CLOSED",
        };
        write!(f, "{}", s)
    }
}

/// A legal matter owned by the lawyer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub title: String,
    pub case_number: String,
    pub case_type: String,
    pub court: String,
    pub status: CaseStatus,
    pub next_hearing: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Case with the extra detail the single-case endpoint returns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetail {
    #[serde(flatten)]
    pub case: Case,
    pub intelligence: Option<Value>,
    pub document_count: u64,
    pub checklist_count: u64,
}

/// Sparse patch for case metadata; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A file attached to a case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDocument {
    pub id: String,
    pub title: String,
    pub file_type: String,
    pub file_size: u64,
    pub uploaded_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_content: Option<String>,
}

/// Result of saving a document to a case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub document_id: String,
    pub hash: String,
}

/// One ranked chunk from semantic search over case documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchChunk {
    pub content: String,
    pub score: f64,
    pub document_title: String,
}

/// Semantic search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub chunks: Vec<SearchChunk>,
}

/// A task item inside a case checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub due_date: Option<String>,
    pub priority: String,
}

/// Sparse patch for one checklist item
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChecklistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// --- Audit ---

/// Risk classification attached to audit records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Outcome recorded for an audited action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Completed,
    PendingApproval,
    Failed,
}

/// Audit-log entry for something the agent did. Write-once: the
/// control plane never mutates a record after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub action_type: String,
    pub risk_level: RiskLevel,
    pub description: String,
    pub tools_used: Vec<String>,
    pub model_used: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
    pub status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

// --- Approvals ---

/// Human-in-the-loop gate on a proposed action
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub action_type: String,
    pub description: String,
    /// Opaque structured payload shown to the lawyer for review
    pub proposed_action: Value,
    /// Omitted when `None`; the control plane then applies
    /// [`DEFAULT_APPROVAL_EXPIRY_MS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_ms: Option<u64>,
}

/// Approval lifecycle. Transitions are driven entirely by the control
/// plane (human review or time-based expiry) and move forward only:
/// `pending` resolves to exactly one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl ApprovalState {
    /// Terminal states never revert to `pending`.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ApprovalState::Pending)
    }

    /// `rejected` and `expired` are hard stops for the proposed action:
    /// callers must create a fresh request instead of retrying this one.
    pub fn is_denied(&self) -> bool {
        matches!(self, ApprovalState::Rejected | ApprovalState::Expired)
    }
}

impl std::fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApprovalState::Pending => "pending",
            ApprovalState::Approved => "approved",
            ApprovalState::Rejected => "rejected",
            ApprovalState::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// Current state of one approval request, as reported by polling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatus {
    pub id: String,
    pub status: ApprovalState,
    pub reviewed_at: Option<String>,
}

// --- Metering ---

/// Billing event: exactly one per LLM call. Calls are not idempotent:
/// two identical reports produce two records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsageReport {
    pub model_used: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
    pub feature: String,
}

// --- Tasks ---

/// Priority for self-queued work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Normal,
    High,
}

/// Follow-up work the agent queued for itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub description: String,
    pub status: String,
}

// --- Schedules ---

/// Trigger kind for a recurring schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Cron,
    Daily,
    Weekday,
    Hourly,
    Interval,
}

/// A new recurring trigger definition. The control plane owns the
/// schedule; this side only issues CRUD requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub name: String,
    pub schedule_type: ScheduleType,
    pub schedule_value: String,
    pub task_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Sparse patch for an existing schedule
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

// --- Notifications ---

/// Urgency of a proactive notification to the lawyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Urgent,
}

// --- Heartbeat ---

/// Health/status snapshot. `pending_approvals` is the only
/// backpressure signal the control plane exposes; it is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heartbeat {
    pub ok: bool,
    pub pending_approvals: u64,
    pub server_time: String,
    /// Toolkit slugs of the lawyer's connected apps (e.g. "GMAIL")
    #[serde(default)]
    pub connected_toolkits: Vec<String>,
}

// --- Connected-apps proxy ---

/// One operation available on a connected third-party app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppTool {
    pub name: String,
    pub description: String,
    pub toolkit: String,
}

/// Discovery response from the connected-apps proxy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppToolList {
    pub tools: Vec<AppTool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of executing a proxied third-party operation: either the
/// operation ran, or the control plane converted it into a pending
/// approval and nothing was executed. One call site, two qualitatively
/// different results, so callers must match, not sniff shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExecuteOutcome {
    #[serde(rename_all = "camelCase")]
    PendingApproval { approval_id: String, reason: String },
    Executed { result: Value },
}

impl ExecuteOutcome {
    pub fn is_pending_approval(&self) -> bool {
        matches!(self, ExecuteOutcome::PendingApproval { .. })
    }
}
