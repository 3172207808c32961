//! # DupeTube
//!
//! Dashboard client for DupeTube, a service that turns a YouTube channel's
//! videos into blog posts. The client signs a user in, registers and indexes
//! channels, lists videos and blog posts, and drives generation and
//! WordPress publishing through the DupeTube REST API.
//!
//! ## Modules
//!
//! - [`api`]: REST client and the [`DupeTubeApi`] seam
//! - [`session`]: Token/user session with a durable store
//! - [`controller`]: Session and view controller
//! - [`view`]: View model, render tree and formatting
//! - [`notify`]: Self-expiring notifications
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dupetube::api::{ApiClient, ClientConfig};
//! use dupetube::session::FileStore;
//! use dupetube::DashboardController;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new(ClientConfig::default())?;
//!     let store = FileStore::new("session.json");
//!     let controller =
//!         DashboardController::new(Arc::new(api), Box::new(store), Duration::from_secs(5));
//!
//!     controller.init().await;
//!     if controller.login("ada", "secret").await {
//!         controller.show_videos().await;
//!     }
//!
//!     println!("{}", controller.render().await.to_text());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod notify;
pub mod session;
pub mod view;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, ClientConfig, DupeTubeApi};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};

pub use controller::{validate_channel_url, DashboardController};

pub use notify::{Level, Notification, NotificationCenter};

pub use session::{FileStore, MemoryStore, Session, SessionManager, SessionStore, StoreError};

pub use view::{Action, DashboardContent, Loadable, Node, Screen, Section};
