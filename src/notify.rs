//! Notifications
//!
//! Transient messages shown in the dashboard's alert region. Each one is
//! removed by its own timer once the TTL elapses, independently of any
//! other notification or user action.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::time::Instant;
use uuid::Uuid;

/// Default lifetime of a notification
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// Capacity of the live feed
const FEED_CAPACITY: usize = 64;

/// Severity, mapped to the alert style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }
}

/// A single transient message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: Level,
    pub message: String,
    pub created_at: Instant,
}

/// Shared alert region
#[derive(Clone)]
pub struct NotificationCenter {
    entries: Arc<Mutex<Vec<Notification>>>,
    feed: broadcast::Sender<Notification>,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            feed,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Append a notification and schedule its removal.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn push(&self, level: Level, message: impl Into<String>) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Instant::now(),
        };
        let id = notification.id;

        tracing::info!(level = level.as_str(), message = %notification.message, "Notification");
        // No subscribers is fine
        let _ = self.feed.send(notification.clone());
        self.entries.lock().await.push(notification);

        let entries = Arc::clone(&self.entries);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            entries.lock().await.retain(|n| n.id != id);
        });

        id
    }

    pub async fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(Level::Success, message).await
    }

    pub async fn info(&self, message: impl Into<String>) -> Uuid {
        self.push(Level::Info, message).await
    }

    pub async fn warning(&self, message: impl Into<String>) -> Uuid {
        self.push(Level::Warning, message).await
    }

    pub async fn danger(&self, message: impl Into<String>) -> Uuid {
        self.push(Level::Danger, message).await
    }

    /// Every notification pushed from now on, including ones that expire
    /// before anyone looks at the region
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.feed.subscribe()
    }

    /// Remove a notification before it expires. Returns false if it was
    /// already gone.
    pub async fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }

    /// Live notifications, oldest first
    pub async fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().await.clone()
    }

    /// Messages of the live notifications, oldest first
    pub async fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}
