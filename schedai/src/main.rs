//! `SchedAI` — command-line client for the Schedule.ai task service.
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/schedai/config.toml`).
//!
//! ```bash
//! # List tasks from the backend
//! cargo run --bin schedai -- tasks
//!
//! # Add a task with a duration and a deadline
//! cargo run --bin schedai -- add "Essay draft" --duration 90 \
//!     --deadline 2025-11-30T14:00 --category Kuliah
//!
//! # Work against the in-memory fake backend
//! cargo run --bin schedai -- --offline tasks
//! ```

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing_appender::non_blocking::WorkerGuard;

use schedai::assistant::AssistantChat;
use schedai::config::{CliArgs, ClientConfig};
use schedai::session::{SessionFile, session_from_login};
use schedai::tasks::TaskStore;
use schedai::transport::http::HttpTransport;
use schedai::transport::memory::MemoryTransport;
use schedai::transport::Transport;
use schedai_proto::task::{Task, TaskDraft, TaskId, UserId};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(version, about = "Schedule.ai command-line client")]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List all tasks.
    Tasks,
    /// Add a task.
    Add {
        /// Task name.
        name: String,
        /// Estimated duration in minutes.
        #[arg(long)]
        duration: Option<u32>,
        /// Deadline (`YYYY-MM-DDTHH:MM`).
        #[arg(long)]
        deadline: Option<String>,
        /// Category tag.
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a task by id.
    Rm {
        /// Id of the task to delete.
        id: String,
    },
    /// List known categories.
    Categories,
    /// Add a category.
    AddCategory {
        /// Category display name.
        name: String,
    },
    /// Log in and store the session.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Clear the stored session.
    Logout,
    /// Register a new account.
    Register {
        /// Display name.
        name: String,
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Send a prompt to the scheduling assistant.
    Ask {
        /// The prompt text.
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli.args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    let _log_guard = init_logging(&cli.args.log_level, cli.args.log_file.as_deref());

    let result = if cli.args.offline {
        run_command(cli.command, &config, MemoryTransport::seeded()).await
    } else {
        match HttpTransport::new(&config.base_url, config.request_timeout) {
            Ok(transport) => run_command(cli.command, &config, transport).await,
            Err(e) => Err(e.into()),
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("Something went wrong. Run with --log-level debug for details.");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging to stderr, or to a file when `--log-file` is given.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown so buffered
/// log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Some(path) = file_path {
        let dir = path.parent()?;
        let file_name = path.file_name()?.to_str()?;
        let file_appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_env_filter(env_filter)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
        None
    }
}

/// Resolve the active user id: stored session first, config fallback.
fn active_user_id(session_file: &SessionFile, config: &ClientConfig) -> UserId {
    match session_file.load() {
        Ok(Some(session)) => session.user_id,
        Ok(None) => config.user_id,
        Err(error) => {
            tracing::warn!(%error, "unreadable session file; using configured user id");
            config.user_id
        }
    }
}

async fn run_command<T: Transport>(
    command: Command,
    config: &ClientConfig,
    transport: T,
) -> Result<(), BoxError> {
    let session_file = SessionFile::at_default_path()?;
    let user_id = active_user_id(&session_file, config);
    let make_store =
        |transport: T| TaskStore::new(transport, user_id, config.default_categories.clone());

    match command {
        Command::Tasks => {
            let snapshot = make_store(transport).load().await?;
            if snapshot.tasks.is_empty() {
                println!("No tasks yet — add one!");
            }
            for task in &snapshot.tasks {
                println!("{}", format_task(task));
            }
        }
        Command::Add {
            name,
            duration,
            deadline,
            category,
        } => {
            let draft = TaskDraft {
                name,
                duration_minutes: duration,
                deadline,
                category,
            };
            let created = make_store(transport).add_task(&draft).await?;
            println!("Added {}", format_task(&created));
        }
        Command::Rm { id } => {
            make_store(transport).delete_task(&TaskId::new(id)).await?;
            println!("Deleted.");
        }
        Command::Categories => {
            let snapshot = make_store(transport).load().await?;
            for category in &snapshot.categories {
                println!("{category}");
            }
        }
        Command::AddCategory { name } => {
            let created = make_store(transport).add_category(&name).await?;
            println!("Added category {created}");
        }
        Command::Login { email, password } => {
            let record = transport.login(&email, &password).await?;
            let Some(session) = session_from_login(&record) else {
                return Err("login response was missing a token or user id".into());
            };
            session_file.save(&session)?;
            println!("Logged in as {} (user {})", session.email, session.user_id);
        }
        Command::Logout => {
            session_file.clear()?;
            println!("Logged out.");
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            transport
                .register(&json!({"name": name, "email": email, "password": password}))
                .await?;
            println!("Registered. You can log in now.");
        }
        Command::Ask { prompt } => {
            let mut chat = AssistantChat::new(transport);
            if let Some(line) = chat.send(&prompt).await {
                println!("{}", line.text);
            }
        }
    }

    Ok(())
}

/// One task per line: id, name, then whatever optional fields are set.
fn format_task(task: &Task) -> String {
    let mut parts = vec![format!("#{}", task.id), task.name.clone()];
    if let Some(category) = &task.category {
        parts.push(format!("[{category}]"));
    }
    if let Some(category2) = &task.category2 {
        parts.push(format!("[{category2}]"));
    }
    if let Some(minutes) = task.duration_minutes {
        parts.push(format!("{minutes}min"));
    }
    if let Some(deadline) = &task.deadline {
        parts.push(format!("due {deadline}"));
    }
    parts.join("  ")
}
