//! Case access tool: cases, documents, checklists, semantic search

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use paralegal_gateway::{CaseUpdate, ChecklistUpdate, GatewayClient};

use super::ToolTrait;

const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Structured access to the lawyer's cases on the control plane
pub struct CasesTool {
    client: Arc<GatewayClient>,
}

impl CasesTool {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum CasesAction {
    ListCases,
    GetCase {
        case_id: String,
    },
    GetDocuments {
        case_id: String,
    },
    SearchDocuments {
        case_id: String,
        query: String,
        limit: Option<u32>,
    },
    GetChecklist {
        case_id: String,
    },
    UpdateChecklistItem {
        case_id: String,
        item_id: String,
        completed: Option<bool>,
        text: Option<String>,
    },
    SaveDocument {
        case_id: String,
        title: String,
        content: String,
        file_type: Option<String>,
    },
    UpdateCase {
        case_id: String,
        description: Option<String>,
        status: Option<String>,
        notes: Option<String>,
    },
}

#[async_trait]
impl ToolTrait for CasesTool {
    fn name(&self) -> &str {
        "gateway_cases"
    }

    fn description(&self) -> &str {
        "Access and manage the lawyer's cases, documents, and checklists on the control plane. \
         Use list_cases to see all cases, get_case for details, get_documents for case files, \
         search_documents for semantic search across case content, get_checklist for task items, \
         update_checklist_item to mark items complete, save_document to save research/drafts as \
         case docs, and update_case to update case metadata (description, status, notes)."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": [
                        "list_cases", "get_case", "get_documents", "search_documents",
                        "get_checklist", "update_checklist_item", "save_document", "update_case"
                    ],
                    "description": "Action to perform: list_cases (all cases), get_case (case details), get_documents (case docs), search_documents (semantic search), get_checklist (checklist items), update_checklist_item (mark item done), save_document (save content as case document), update_case (update case description/status/notes)"
                },
                "case_id": { "type": "string", "description": "Case ID (required for all actions except list_cases)" },
                "query": { "type": "string", "description": "Search query (required for search_documents)" },
                "limit": { "type": "integer", "description": "Max results for search (default: 10)", "minimum": 1, "maximum": 50 },
                "item_id": { "type": "string", "description": "Checklist item ID (required for update_checklist_item)" },
                "completed": { "type": "boolean", "description": "Mark checklist item as completed/incomplete" },
                "text": { "type": "string", "description": "Updated text for checklist item" },
                "title": { "type": "string", "description": "Document title (for save_document)" },
                "content": { "type": "string", "description": "Document content (for save_document)" },
                "file_type": { "type": "string", "description": "File type, e.g. 'md', 'txt' (default: md)" },
                "notes": { "type": "string", "description": "Case notes to update (for update_case)" },
                "status": { "type": "string", "description": "Case status: ACTIVE, ON_HOLD, CLOSED (for update_case)" },
                "description": { "type": "string", "description": "Case description (for update_case)" }
            },
            "required": ["action"]
        })
    }

    async fn execute(
        &self,
        args: Value,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let action: CasesAction = serde_json::from_value(args)
            .map_err(|e| format!("invalid gateway_cases call: {}", e))?;
        debug!("gateway_cases: {:?}", action);

        match action {
            CasesAction::ListCases => {
                let cases = self.client.list_cases().await?;
                let count = cases.len();
                Ok(json!({ "cases": cases, "count": count }).to_string())
            }

            CasesAction::GetCase { case_id } => {
                let detail = self.client.get_case(&case_id).await?;
                Ok(json!({ "case": detail }).to_string())
            }

            CasesAction::GetDocuments { case_id } => {
                let documents = self.client.case_documents(&case_id).await?;
                let count = documents.len();
                Ok(json!({ "documents": documents, "count": count }).to_string())
            }

            CasesAction::SearchDocuments {
                case_id,
                query,
                limit,
            } => {
                let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
                let results = self.client.search_documents(&case_id, &query, limit).await?;
                Ok(serde_json::to_string(&results)?)
            }

            CasesAction::GetChecklist { case_id } => {
                let items = self.client.checklist(&case_id).await?;
                let total = items.len();
                let completed = items.iter().filter(|i| i.completed).count();
                Ok(json!({
                    "items": items,
                    "total": total,
                    "completed": completed,
                })
                .to_string())
            }

            CasesAction::UpdateChecklistItem {
                case_id,
                item_id,
                completed,
                text,
            } => {
                let updates = ChecklistUpdate { completed, text };
                self.client
                    .update_checklist_item(&case_id, &item_id, &updates)
                    .await?;
                Ok(json!({ "ok": true, "itemId": item_id, "updates": updates }).to_string())
            }

            CasesAction::SaveDocument {
                case_id,
                title,
                content,
                file_type,
            } => {
                let saved = self
                    .client
                    .save_document(&case_id, &title, &content, file_type.as_deref())
                    .await?;
                Ok(json!({ "ok": true, "documentId": saved.document_id }).to_string())
            }

            CasesAction::UpdateCase {
                case_id,
                description,
                status,
                notes,
            } => {
                let updates = CaseUpdate {
                    description,
                    status,
                    notes,
                };
                self.client.update_case(&case_id, &updates).await?;
                Ok(json!({ "ok": true, "caseId": case_id, "updates": updates }).to_string())
            }
        }
    }
}
