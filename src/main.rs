//! DupeTube CLI
//!
//! Command-line front end for the DupeTube dashboard:
//! - Sign in, register and sign out
//! - Add, index and sync channels
//! - Browse, search and process videos, and ask for content ideas
//! - Generate (one or many), edit, publish and delete blog posts
//!
//! Each command runs one dashboard operation, waits for any background work
//! it started, then prints the resulting screen.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dupetube::api::{ApiClient, BlogPostUpdate, PostQuery, PostStatus, VideoQuery};
use dupetube::config::{generate_default_config, Config, LoggingConfig};
use dupetube::session::FileStore;
use dupetube::DashboardController;

#[derive(Parser)]
#[command(name = "dupetube")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn your YouTube channel into blog posts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the screen as HTML instead of text
    #[arg(long, global = true)]
    pub html: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in
    Login { username: String, password: String },

    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show who is signed in
    Status,

    /// Open the dashboard (onboarding and your channels)
    Dashboard,

    /// List channels
    Channels,

    /// Add a YouTube channel and index its videos
    AddChannel {
        /// Channel URL (@handle, /c/name, /user/name or /channel/ID)
        url: String,
    },

    /// Index every video of a channel
    Index { channel_id: i64 },

    /// Pick up new videos of a channel
    Sync { channel_id: i64 },

    /// List videos
    Videos {
        #[arg(short, long)]
        page: Option<u32>,

        /// Only videos of this channel
        #[arg(long)]
        channel: Option<i64>,
    },

    /// Search videos by title or description
    Search {
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show one video
    Video { video_id: i64 },

    /// Extract transcript and summary of a video
    Process { video_id: i64 },

    /// Show book, course and blog post ideas for a video
    Suggest { video_id: i64 },

    /// Generate a blog post from a video
    Generate { video_id: i64 },

    /// Generate blog posts for several videos
    BulkGenerate {
        #[arg(required = true)]
        video_ids: Vec<i64>,
    },

    /// List blog posts
    Posts {
        /// Only posts with this status (draft, published, scheduled)
        #[arg(short, long)]
        status: Option<PostStatus>,
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Show a blog post, or update it when any field is given
    EditPost {
        post_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        status: Option<PostStatus>,
    },

    /// Publish a blog post to WordPress
    Publish { post_id: i64 },

    /// Delete a blog post
    DeletePost { post_id: i64 },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    init_logging(&config.logging);
    tracing::debug!("DupeTube CLI v{}", env!("CARGO_PKG_VERSION"));

    let api = ApiClient::new(config.api.client_config())?;
    let store = FileStore::new(&config.session.path);
    let controller =
        DashboardController::new(Arc::new(api), Box::new(store), config.notifications.ttl());

    // Notifications can expire while background work runs; echo them as
    // they arrive so none is lost.
    let mut feed = controller.notifications().subscribe();
    let echo = tokio::spawn(async move {
        while let Ok(n) = feed.recv().await {
            eprintln!("[{}] {}", n.level.as_str(), n.message);
        }
    });

    let ok = run(&controller, cli.command).await;
    controller.wait_for_background().await;

    let screen = controller.render().await;
    if cli.html {
        println!("{}", screen.to_html());
    } else {
        println!("{}", screen.to_text());
    }

    drop(controller);
    let _ = echo.await;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one command against the controller. Returns false when the server
/// refused or could not be reached.
async fn run(controller: &DashboardController, command: Commands) -> bool {
    match command {
        Commands::Login { username, password } => controller.login(&username, &password).await,
        Commands::Register {
            username,
            email,
            password,
        } => controller.register(&username, &email, &password).await,
        Commands::Logout => {
            controller.logout().await;
            true
        }
        Commands::Status => {
            controller.init().await;
            match controller.user().await {
                Some(user) => {
                    println!("Signed in as {} (id {})", user.username, user.id);
                    true
                }
                None => {
                    println!("Not signed in");
                    false
                }
            }
        }
        Commands::Dashboard => {
            controller.init().await;
            true
        }
        Commands::Channels => {
            controller.show_channels().await;
            true
        }
        Commands::AddChannel { url } => {
            controller.show_onboarding().await;
            controller.add_channel(&url).await
        }
        Commands::Index { channel_id } => controller.index_channel_videos(channel_id).await,
        Commands::Sync { channel_id } => controller.sync_channel(channel_id).await,
        Commands::Videos { page, channel } => {
            controller
                .show_video_list(VideoQuery {
                    page,
                    per_page: None,
                    channel_id: channel,
                })
                .await;
            true
        }
        Commands::Search { query, page } => {
            controller.search_videos(&query, page).await;
            true
        }
        Commands::Video { video_id } => {
            controller.view_video(video_id).await;
            true
        }
        Commands::Process { video_id } => {
            controller.view_video(video_id).await;
            controller.process_video(video_id).await
        }
        Commands::Suggest { video_id } => {
            controller.show_suggestions(video_id).await;
            true
        }
        Commands::Generate { video_id } => controller.generate_blog_post(video_id).await,
        Commands::BulkGenerate { video_ids } => {
            controller.bulk_generate_blog_posts(&video_ids).await
        }
        Commands::Posts { status, page } => {
            controller
                .show_post_list(PostQuery { status, page })
                .await;
            true
        }
        Commands::EditPost {
            post_id,
            title,
            content,
            excerpt,
            status,
        } => {
            let update = BlogPostUpdate {
                title,
                content,
                excerpt,
                status,
            };
            if update.is_empty() {
                controller.edit_blog_post(post_id).await;
                true
            } else {
                controller.save_blog_post(post_id, &update).await
            }
        }
        Commands::Publish { post_id } => {
            controller.show_blog_posts(None).await;
            controller.publish_blog_post(post_id).await
        }
        Commands::DeletePost { post_id } => {
            controller.show_blog_posts(None).await;
            controller.delete_blog_post(post_id).await
        }
        // Handled before the controller is built
        Commands::Config { .. } => true,
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("dupetube={}", logging.level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
