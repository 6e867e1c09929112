//! Paralegal command implementations

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::sync::Arc;

use paralegal_config::{GatewayConfig, Settings};
use paralegal_gateway::{
    ApprovalState, GatewayClient, NewSchedule, ScheduleType, ScheduleUpdate, Urgency,
};
use paralegal_heartbeat::HeartbeatService;

/// Build the shared gateway client from the environment
fn gateway() -> Result<Arc<GatewayClient>> {
    let config = GatewayConfig::from_env().context("gateway not configured")?;
    let client = GatewayClient::new(config)?;
    Ok(Arc::new(client))
}

fn format_server_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => t
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Show control-plane status
pub async fn status_command() -> Result<()> {
    let client = gateway()?;
    let heartbeat = client.heartbeat().await?;

    println!("Control plane status");
    println!("  OK: {}", if heartbeat.ok { "yes" } else { "no" });
    println!("  Pending approvals: {}", heartbeat.pending_approvals);
    println!(
        "  Server time: {}",
        format_server_time(&heartbeat.server_time)
    );
    let toolkits = if heartbeat.connected_toolkits.is_empty() {
        "none".to_string()
    } else {
        heartbeat.connected_toolkits.join(", ")
    };
    println!("  Connected toolkits: {}", toolkits);

    Ok(())
}

/// List the lawyer's cases
pub async fn cases_command() -> Result<()> {
    let client = gateway()?;
    let cases = client.list_cases().await?;

    if cases.is_empty() {
        println!("No cases");
        return Ok(());
    }

    println!("Cases:");
    for case in cases {
        println!(
            "  {} - {} [{}] ({})",
            case.case_number, case.title, case.status, case.court
        );
        if let Some(hearing) = case.next_hearing {
            println!("    next hearing: {}", hearing);
        }
    }

    Ok(())
}

/// Show one case in detail
pub async fn case_command(id: String) -> Result<()> {
    let client = gateway()?;
    let detail = client.get_case(&id).await?;
    let items = client.checklist(&id).await?;
    let done = items.iter().filter(|i| i.completed).count();

    println!("{} ({})", detail.case.title, detail.case.case_number);
    println!("  Type: {}", detail.case.case_type);
    println!("  Court: {}", detail.case.court);
    println!("  Status: {}", detail.case.status);
    println!(
        "  Next hearing: {}",
        detail.case.next_hearing.as_deref().unwrap_or("none")
    );
    println!("  Documents: {}", detail.document_count);
    println!("  Checklist: {}/{} done", done, items.len());

    Ok(())
}

/// Poll an approval request
pub async fn approval_command(id: String) -> Result<()> {
    let client = gateway()?;
    let approval = client.check_approval(&id).await?;

    println!("Approval {}: {}", approval.id, approval.status);
    if let Some(reviewed_at) = &approval.reviewed_at {
        println!("  Reviewed at: {}", format_server_time(reviewed_at));
    }

    match approval.status {
        ApprovalState::Pending => println!("  Awaiting review - check again later"),
        ApprovalState::Approved => println!("  Approved - the action may proceed"),
        ApprovalState::Rejected | ApprovalState::Expired => {
            println!("  Hard stop - create a fresh request if the action is still needed")
        }
    }

    Ok(())
}

/// List self-queued tasks
pub async fn tasks_command(status: Option<String>, limit: Option<u32>) -> Result<()> {
    let client = gateway()?;
    let tasks = client.list_tasks(status.as_deref(), limit).await?;

    if tasks.is_empty() {
        println!("No tasks");
    } else {
        println!("Tasks:");
        for task in tasks {
            println!("  {} [{}] {}", task.id, task.status, task.description);
        }
    }

    Ok(())
}

/// Send a notification to the lawyer
pub async fn notify_command(
    subject: String,
    message: String,
    urgent: bool,
    case: Option<String>,
) -> Result<()> {
    let client = gateway()?;
    let urgency = urgent.then_some(Urgency::Urgent);

    client
        .notify_lawyer(&subject, &message, urgency, case.as_deref())
        .await?;

    println!("✓ Notification sent");
    Ok(())
}

/// Show the tool surfaces the agent runtime would receive
pub async fn tools_command() -> Result<()> {
    let tools = paralegal_tools::gateway_toolset_from_env();

    if tools.is_empty() {
        println!("Gateway not configured - no tools exposed");
        println!("(set BOT_API_URL and BOT_API_TOKEN)");
        return Ok(());
    }

    println!("Tool surfaces:");
    for tool in &tools {
        let actions = tool.parameters()["properties"]["action"]["enum"]
            .as_array()
            .map(|a| a.len())
            .unwrap_or(0);
        println!("  {} ({} actions)", tool.name(), actions);
    }

    Ok(())
}

fn parse_schedule_type(raw: &str) -> Result<ScheduleType> {
    match raw {
        "cron" => Ok(ScheduleType::Cron),
        "daily" => Ok(ScheduleType::Daily),
        "weekday" => Ok(ScheduleType::Weekday),
        "hourly" => Ok(ScheduleType::Hourly),
        "interval" => Ok(ScheduleType::Interval),
        other => anyhow::bail!(
            "unknown schedule type '{}' (expected cron, daily, weekday, hourly, interval)",
            other
        ),
    }
}

/// Add a schedule on the control plane
pub async fn schedule_add_command(
    name: String,
    schedule_type: String,
    schedule_value: String,
    task_type: String,
) -> Result<()> {
    let client = gateway()?;
    let schedule = NewSchedule {
        name,
        schedule_type: parse_schedule_type(&schedule_type)?,
        schedule_value,
        task_type,
        description: None,
        task_config: None,
        enabled: None,
    };

    let id = client.create_schedule(&schedule).await?;
    println!("✓ Schedule {} added", id);
    Ok(())
}

/// Update a schedule on the control plane
pub async fn schedule_update_command(
    id: String,
    enabled: Option<bool>,
    schedule_value: Option<String>,
) -> Result<()> {
    if enabled.is_none() && schedule_value.is_none() {
        anyhow::bail!("nothing to update - pass --enabled and/or --schedule-value");
    }

    let client = gateway()?;
    let updates = ScheduleUpdate {
        enabled,
        schedule_value,
        ..Default::default()
    };

    client.update_schedule(&id, &updates).await?;
    println!("✓ Schedule {} updated", id);
    Ok(())
}

/// Remove a schedule from the control plane
pub async fn schedule_remove_command(id: String) -> Result<()> {
    let client = gateway()?;
    client.delete_schedule(&id).await?;
    println!("✓ Schedule {} removed", id);
    Ok(())
}

/// Run the heartbeat loop in the foreground
pub async fn watch_command(interval: Option<u64>) -> Result<()> {
    let client = gateway()?;
    let settings = Settings::load().await.context("failed to load settings")?;

    let interval = interval.or(Some(settings.heartbeat.interval_s));
    let service = HeartbeatService::new(client, interval, settings.heartbeat.enabled);

    service
        .run(|heartbeat| async move {
            if heartbeat.pending_approvals > 0 {
                println!(
                    "{} approval(s) awaiting review (server time {})",
                    heartbeat.pending_approvals,
                    format_server_time(&heartbeat.server_time)
                );
            }
        })
        .await;

    Ok(())
}
