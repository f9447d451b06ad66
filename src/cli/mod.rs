use clap::{Parser, Subcommand};

use crate::auth::JwtAuthority;
use crate::config::AppConfig;
use crate::types::UserId;

#[derive(Parser)]
#[command(name = "recipe-api")]
#[command(about = "Recipe API - owner-scoped recipe service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides RECIPE_API_PORT / PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Use the in-memory store even if DATABASE_URL is set")]
        memory: bool,
    },

    #[command(about = "Print a signed bearer token for a user id")]
    Token {
        #[arg(long, help = "Caller identity to embed in the token")]
        user_id: i64,
        #[arg(long, help = "Informational email claim")]
        email: Option<String>,
    },
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None, memory: false }) {
        Commands::Serve { port, memory } => crate::server::serve(config, port, memory).await,
        Commands::Token { user_id, email } => {
            let token = JwtAuthority::from_config(&config.security).issue(UserId(user_id), email)?;
            println!("{}", token);
            Ok(())
        }
    }
}
