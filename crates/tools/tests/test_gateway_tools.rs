//! Tests for the gateway tool surfaces and their dispatch contract

use mockito::Matcher;
use paralegal_config::{GatewayConfig, ENV_API_TOKEN, ENV_API_URL};
use paralegal_gateway::GatewayClient;
use paralegal_tools::{
    gateway_toolset, gateway_toolset_from_env, register_gateway_tools, to_tool_spec, ActionsTool,
    AppsTool, CasesTool, ToolRegistry, ToolTrait,
};
use serde_json::{json, Value};
use serial_test::serial;
use std::sync::Arc;

fn client_for(server: &mockito::ServerGuard) -> Arc<GatewayClient> {
    Arc::new(GatewayClient::new(GatewayConfig::new(server.url(), "test-token")).unwrap())
}

/// Client pointed at a mock server used purely to prove that no
/// request was made.
async fn silent_server() -> mockito::ServerGuard {
    mockito::Server::new_async().await
}

// ========== Toolset availability ==========

#[test]
fn test_toolset_without_client_is_empty() {
    let tools = gateway_toolset(None);
    assert!(tools.is_empty());
}

#[tokio::test]
async fn test_toolset_with_client_has_three_surfaces() {
    let server = silent_server().await;
    let tools = gateway_toolset(Some(client_for(&server)));

    let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
    assert_eq!(tools.len(), 3);
    assert!(names.contains(&"gateway_actions"));
    assert!(names.contains(&"gateway_cases"));
    assert!(names.contains(&"gateway_apps"));
}

#[test]
#[serial]
fn test_toolset_from_env_unconfigured_is_empty() {
    std::env::remove_var(ENV_API_URL);
    std::env::remove_var(ENV_API_TOKEN);

    assert!(gateway_toolset_from_env().is_empty());

    std::env::set_var(ENV_API_URL, "https://example.legal");
    assert!(gateway_toolset_from_env().is_empty());

    std::env::remove_var(ENV_API_URL);
}

#[test]
#[serial]
fn test_toolset_from_env_configured_yields_tools() {
    std::env::set_var(ENV_API_URL, "https://example.legal");
    std::env::set_var(ENV_API_TOKEN, "tok");

    let tools = gateway_toolset_from_env();
    assert_eq!(tools.len(), 3);

    std::env::remove_var(ENV_API_URL);
    std::env::remove_var(ENV_API_TOKEN);
}

#[tokio::test]
async fn test_register_gateway_tools() {
    let server = silent_server().await;
    let mut registry = ToolRegistry::new();

    register_gateway_tools(&mut registry, None);
    assert!(registry.names().is_empty());

    register_gateway_tools(&mut registry, Some(client_for(&server)));
    assert_eq!(registry.names().len(), 3);
    assert!(registry.has("gateway_actions"));
    assert!(registry.has("gateway_cases"));
    assert!(registry.has("gateway_apps"));
}

#[tokio::test]
async fn test_registry_execute_unknown_tool() {
    let registry = ToolRegistry::new();
    let result = registry.execute("nonexistent", json!({})).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[tokio::test]
async fn test_tool_specs_expose_schemas() {
    let server = silent_server().await;
    let tool = CasesTool::new(client_for(&server));
    let spec = to_tool_spec(&tool);

    assert_eq!(spec.name, "gateway_cases");
    assert!(!spec.description.is_empty());
    assert_eq!(spec.parameters["type"], "object");
    let actions = spec.parameters["properties"]["action"]["enum"]
        .as_array()
        .unwrap();
    assert_eq!(actions.len(), 8);
}

// ========== Dispatch contract ==========

#[tokio::test]
async fn test_unknown_action_fails_before_any_network_call() {
    let mut server = silent_server().await;
    let guard = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tool = CasesTool::new(client_for(&server));
    let err = tool
        .execute(json!({"action": "frobnicate"}))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("unknown variant"));
    guard.assert_async().await;
}

#[tokio::test]
async fn test_missing_required_param_is_a_hard_failure() {
    let mut server = silent_server().await;
    let guard = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tool = CasesTool::new(client_for(&server));
    let err = tool.execute(json!({"action": "get_case"})).await.unwrap_err();

    assert!(err.to_string().contains("case_id"));
    guard.assert_async().await;
}

#[tokio::test]
async fn test_actions_tool_rejects_unknown_action() {
    let server = silent_server().await;
    let tool = ActionsTool::new(client_for(&server));

    let err = tool
        .execute(json!({"action": "launch_missiles"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unknown variant"));
}

// ========== Cases surface ==========

#[tokio::test]
async fn test_list_cases_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/bot/gateway/cases")
        .with_status(200)
        .with_body(
            json!({
                "cases": [{
                    "id": "case-1",
                    "title": "Doe v. Acme",
                    "caseNumber": "2024-CV-0112",
                    "caseType": "civil",
                    "court": "District Court",
                    "status": "ACTIVE",
                    "nextHearing": null,
                    "createdAt": "2026-01-02T10:00:00Z",
                    "updatedAt": "2026-07-30T09:30:00Z"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tool = CasesTool::new(client_for(&server));
    let out = tool.execute(json!({"action": "list_cases"})).await.unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["count"], 1);
    assert_eq!(envelope["cases"][0]["id"], "case-1");
    assert_eq!(envelope["cases"][0]["status"], "ACTIVE");
}

#[tokio::test]
async fn test_get_checklist_counts_completed_items() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/bot/gateway/cases/case-1/checklist")
        .with_status(200)
        .with_body(
            json!({
                "items": [
                    {"id": "i1", "text": "File motion", "completed": true, "dueDate": null, "priority": "high"},
                    {"id": "i2", "text": "Call client", "completed": false, "dueDate": null, "priority": "normal"},
                    {"id": "i3", "text": "Review exhibit", "completed": true, "dueDate": "2026-08-10", "priority": "normal"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tool = CasesTool::new(client_for(&server));
    let out = tool
        .execute(json!({"action": "get_checklist", "case_id": "case-1"}))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["total"], 3);
    assert_eq!(envelope["completed"], 2);
}

#[tokio::test]
async fn test_search_documents_defaults_limit() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/bot/gateway/cases/case-1/search")
        .match_body(Matcher::Json(json!({"query": "deadline", "limit": 10})))
        .with_status(200)
        .with_body(r#"{"chunks": []}"#)
        .create_async()
        .await;

    let tool = CasesTool::new(client_for(&server));
    tool.execute(json!({"action": "search_documents", "case_id": "case-1", "query": "deadline"}))
        .await
        .unwrap();

    mock.assert_async().await;
}

// ========== Actions surface ==========

#[tokio::test]
async fn test_log_action_applies_defaults() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/bot/gateway/actions")
        .match_body(Matcher::Json(json!({
            "actionType": "research",
            "riskLevel": "low",
            "description": "checked filings",
            "toolsUsed": [],
            "modelUsed": "unknown",
            "inputTokens": 0,
            "outputTokens": 0,
            "costUsd": 0.0,
            "status": "completed"
        })))
        .with_status(200)
        .with_body(r#"{"id": "act-1"}"#)
        .create_async()
        .await;

    let tool = ActionsTool::new(client_for(&server));
    let out = tool
        .execute(json!({
            "action": "log_action",
            "action_type": "research",
            "risk_level": "low",
            "description": "checked filings"
        }))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["ok"], true);
    assert_eq!(envelope["actionId"], "act-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_approval_omits_unset_expiry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/bot/gateway/approvals")
        .match_body(Matcher::Json(json!({
            "actionType": "draft",
            "description": "send settlement letter",
            "proposedAction": {}
        })))
        .with_status(200)
        .with_body(r#"{"id": "apr-1"}"#)
        .create_async()
        .await;

    let tool = ActionsTool::new(client_for(&server));
    let out = tool
        .execute(json!({
            "action": "request_approval",
            "action_type": "draft",
            "description": "send settlement letter"
        }))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["approvalId"], "apr-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_check_approval_returns_typed_state() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/bot/gateway/approvals")
        .match_query(Matcher::UrlEncoded("id".into(), "apr-1".into()))
        .with_status(200)
        .with_body(r#"{"approval": {"id": "apr-1", "status": "rejected", "reviewedAt": "2026-08-05T11:00:00Z"}}"#)
        .create_async()
        .await;

    let tool = ActionsTool::new(client_for(&server));
    let out = tool
        .execute(json!({"action": "check_approval", "approval_id": "apr-1"}))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["approval"]["status"], "rejected");
}

#[tokio::test]
async fn test_report_tokens_requires_all_fields() {
    let server = silent_server().await;
    let tool = ActionsTool::new(client_for(&server));

    let err = tool
        .execute(json!({
            "action": "report_tokens",
            "model_used": "claude-sonnet",
            "input_tokens": 120
        }))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("missing field"));
}

#[tokio::test]
async fn test_delete_schedule_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/bot/gateway/schedules/sched-1")
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let tool = ActionsTool::new(client_for(&server));
    let out = tool
        .execute(json!({"action": "delete_schedule", "schedule_id": "sched-1"}))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["deleted"], true);
    assert_eq!(envelope["scheduleId"], "sched-1");
}

// ========== Connected-apps surface ==========

#[tokio::test]
async fn test_discover_tools_requires_toolkits() {
    let mut server = silent_server().await;
    let guard = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tool = AppsTool::new(client_for(&server));
    let out = tool
        .execute(json!({"action": "discover_tools"}))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert!(envelope["error"]
        .as_str()
        .unwrap()
        .contains("connectedToolkits"));
    guard.assert_async().await;
}

#[tokio::test]
async fn test_discover_tools_lists_operations() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/bot/gateway/composio")
        .match_body(Matcher::PartialJson(json!({"action": "discover"})))
        .with_status(200)
        .with_body(
            json!({
                "tools": [
                    {"name": "GMAIL_LIST_EMAILS", "description": "List inbox", "toolkit": "GMAIL"},
                    {"name": "GMAIL_SEND_EMAIL", "description": "Send an email", "toolkit": "GMAIL"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tool = AppsTool::new(client_for(&server));
    let out = tool
        .execute(json!({"action": "discover_tools", "toolkits": ["GMAIL"]}))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["count"], 2);
    assert_eq!(envelope["tools"][1]["name"], "GMAIL_SEND_EMAIL");
}

#[tokio::test]
async fn test_execute_write_surfaces_approval_sentinel() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/bot/gateway/composio")
        .match_body(Matcher::PartialJson(json!({
            "action": "execute",
            "toolName": "GMAIL_SEND_EMAIL"
        })))
        .with_status(200)
        .with_body(
            json!({
                "approvalRequired": true,
                "approvalId": "apr-42",
                "reason": "write operation on GMAIL"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tool = AppsTool::new(client_for(&server));
    let out = tool
        .execute(json!({
            "action": "execute_tool",
            "tool_name": "GMAIL_SEND_EMAIL",
            "tool_arguments": {"to": "client@example.com"}
        }))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["approvalRequired"], true);
    assert_eq!(envelope["approvalId"], "apr-42");
    assert!(envelope["message"].as_str().unwrap().contains("approval"));
    assert!(envelope.get("result").is_none());
}

#[tokio::test]
async fn test_execute_read_returns_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/bot/gateway/composio")
        .match_body(Matcher::PartialJson(json!({
            "action": "execute",
            "toolName": "GMAIL_LIST_EMAILS"
        })))
        .with_status(200)
        .with_body(json!({"result": {"messages": ["m-1", "m-2"]}}).to_string())
        .create_async()
        .await;

    let tool = AppsTool::new(client_for(&server));
    let out = tool
        .execute(json!({
            "action": "execute_tool",
            "tool_name": "GMAIL_LIST_EMAILS"
        }))
        .await
        .unwrap();
    let envelope: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(envelope["result"]["messages"][0], "m-1");
    assert!(envelope.get("approvalRequired").is_none());
}
