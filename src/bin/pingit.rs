use std::env;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dotenvy::dotenv;
use log::info;

use pingit::core::{format_interval, Config, DEFAULT_INTERVAL_MINUTES};
use pingit::features::scheduling::NotificationScheduler;
use pingit::manager::{list_acknowledged, list_active, ReminderManager};
use pingit::notify::{
    NotificationCategory, NotificationGateway, NotificationRequest, NotificationResponse,
    ACTION_YES,
};
use pingit::storage::{FileStore, ReminderStore};

/// Gateway that logs schedule/cancel calls instead of talking to a device.
/// Stands in for the mobile shell when exercising the engine from a
/// terminal.
struct LogGateway;

#[async_trait]
impl NotificationGateway for LogGateway {
    async fn request_permission(&self) -> bool {
        true
    }

    async fn register_category(&self, category: NotificationCategory) -> Result<()> {
        info!("Registered notification category {}", category.identifier);
        Ok(())
    }

    async fn schedule(&self, request: NotificationRequest) -> Result<String> {
        info!(
            "Would notify at {}: {}",
            request.trigger_at.format("%H:%M"),
            request.body
        );
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn cancel(&self, handle: &str) -> Result<()> {
        info!("Cancelled notification {handle}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let backend = Arc::new(FileStore::new(config.storage_path.clone()));
    let store = Arc::new(ReminderStore::new(backend, config.storage_key.clone()));
    let scheduler = Arc::new(NotificationScheduler::new(Arc::new(LogGateway)));
    let manager = ReminderManager::new(store, scheduler);

    manager.setup_notifications().await;
    manager.activate().await;

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("add") => {
            let text = args.get(1).map(String::as_str).unwrap_or_default();
            let interval = args
                .get(2)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INTERVAL_MINUTES);
            let reminder = manager.create(text, interval).await?;
            println!(
                "Created {} (every {})",
                reminder.id,
                format_interval(reminder.interval_minutes)
            );
        }
        Some("ack") => {
            if let Some(id) = args.get(1) {
                manager
                    .handle_response(&NotificationResponse {
                        action_id: ACTION_YES.to_string(),
                        reminder_id: Some(id.clone()),
                    })
                    .await;
            }
        }
        Some("rm") => {
            if let Some(id) = args.get(1) {
                manager.delete(id).await;
            }
        }
        Some(other) => {
            println!("Unknown command {other:?}");
            println!("Usage: pingit [add <text> [minutes] | ack <id> | rm <id>]");
            return Ok(());
        }
        None => {}
    }

    let rx = manager.subscribe();
    let snapshot = rx.borrow().clone();
    println!(
        "{} active, {} done today",
        list_active(&snapshot.reminders).len(),
        list_acknowledged(&snapshot.reminders).len()
    );
    for reminder in &snapshot.reminders {
        let status = if reminder.is_acknowledged_today() {
            "done"
        } else {
            "active"
        };
        println!(
            "  [{status}] {}  every {}  {}",
            reminder.id,
            format_interval(reminder.interval_minutes),
            reminder.text
        );
    }

    Ok(())
}
