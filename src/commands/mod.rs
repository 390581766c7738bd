pub mod init;
pub mod migrations;
pub mod serve;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Run the task server")]
    Serve(serve::ServeArgs),
    #[command(about = "List tasks")]
    List(task::ListArgs),
    #[command(about = "Create a task")]
    Add(task::AddArgs),
    #[command(about = "Edit a task", arg_required_else_help = true)]
    Edit(task::EditArgs),
    #[command(about = "Mark a task done or not done")]
    Toggle(task::IdArgs),
    #[command(about = "Delete a task")]
    Delete(task::IdArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::List(args) => task::list(args).await,
            Commands::Add(args) => task::add(args).await,
            Commands::Edit(args) => task::edit(args).await,
            Commands::Toggle(args) => task::toggle(args).await,
            Commands::Delete(args) => task::delete(args).await,
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
