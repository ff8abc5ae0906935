// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Taskboard command-line shell
//!
//! Drives the client state layer against a live task-board API: signs in,
//! loads the board and performs single task/category mutations.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use taskboard_client::{
    config::Config,
    models::{Credential, ImageUpload, PostProfile, PostTask},
    services::ApiClient,
    storage::FileStorage,
    Route, Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Command-line shell for the task board", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in (or register with --register) and store the access token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        register: bool,
    },
    /// Forget the stored access token
    Logout,
    /// Load and print the board
    Tasks,
    /// Create a category
    AddCategory {
        #[arg(short, long)]
        name: String,
    },
    /// Create a task
    AddTask {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        #[arg(short = 'a', long)]
        criteria: String,
        #[arg(short, long)]
        responsible: u64,
        #[arg(short, long, default_value_t = 0)]
        estimate: i64,
        #[arg(short, long)]
        category: u64,
        #[arg(short, long, default_value = "1")]
        status: String,
    },
    /// Change the status of an existing task
    SetStatus {
        #[arg(short, long)]
        id: u64,
        #[arg(short, long)]
        status: String,
    },
    /// Delete a task
    Delete {
        #[arg(short, long)]
        id: u64,
    },
    /// Upload an avatar image for a profile
    Avatar {
        #[arg(short, long)]
        profile: u64,
        #[arg(short, long)]
        file: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let session = Session::new(
        ApiClient::new(&config.api_url),
        FileStorage::new(&config.token_file),
    );

    match cli.command {
        Commands::Login {
            username,
            password,
            register,
        } => {
            let credential = Credential::new(username, password);
            credential.validate().context("Invalid credential")?;
            if register {
                session.toggle_mode();
            }
            session.sign_in(&credential).await?;
        }
        Commands::Logout => session.logout()?,
        Commands::Tasks => {
            session.bootstrap().await?;
            if session.current_route() != Some(Route::Root) {
                print_board(&session);
            }
        }
        Commands::AddCategory { name } => session.create_category(&name).await?,
        Commands::AddTask {
            title,
            description,
            criteria,
            responsible,
            estimate,
            category,
            status,
        } => {
            let draft = PostTask {
                id: 0,
                title,
                description,
                acceptance_criteria: criteria,
                responsible_id: responsible,
                estimate,
                category_id: category,
                status,
            };
            draft.validate().context("Invalid task")?;
            session.set_edit_draft(draft);
            session.save_edit_draft().await?;
        }
        Commands::SetStatus { id, status } => {
            session.list_tasks().await?;
            let Some(task) = session.tasks().snapshot().task(id).cloned() else {
                bail!("No task with id {}", id);
            };
            let mut draft = task.to_draft();
            draft.status = status;
            session.set_selected_task(task);
            session.set_edit_draft(draft);
            session.save_edit_draft().await?;
        }
        Commands::Delete { id } => session.delete_task(id).await?,
        Commands::Avatar { profile, file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "avatar".to_string());
            let mime_type = mime_guess::from_path(&file).first_or_octet_stream();
            session
                .update_profile(PostProfile {
                    id: profile,
                    image: Some(ImageUpload {
                        file_name,
                        mime_type: mime_type.to_string(),
                        bytes,
                    }),
                })
                .await?;
        }
    }

    if let Some(route) = session.current_route() {
        println!("-> {}", route);
    }
    Ok(())
}

fn print_board(session: &Session<FileStorage>) {
    let me = session.auth().login_user();
    println!("Signed in as {} (#{})", me.username, me.id);

    let state = session.tasks().snapshot();
    for task in &state.tasks {
        println!(
            "#{:<4} [{}] {} (owner: {}, responsible: {}, category: {}, estimate: {})",
            task.id,
            task.status_name,
            task.title,
            task.owner_name,
            task.responsible_name,
            task.category_name,
            task.estimate
        );
    }
    println!(
        "{} tasks, {} users, {} categories",
        state.tasks.len(),
        state.users.len(),
        state.categories.len()
    );
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taskboard_client=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
