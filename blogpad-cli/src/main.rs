//! Main entry point for the Blogpad CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use std::path::PathBuf;
use url::Url;

mod commands;
mod render;
mod tracer;

use commands::{config::ConfigFormat, posts::PostsCommand};

/// Blogpad CLI
#[derive(Parser, Debug)]
#[command(name = "blogpad", version)]
#[command(about = "Command-line client for a Blogpad backend", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (YAML or JSON)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true)]
    server: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the Blogpad CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the session token
    Login {
        /// Email address; prompted for when omitted
        #[arg(long, short)]
        email: Option<String>,
    },

    /// Create an account
    Signup {
        /// Username; prompted for when omitted
        #[arg(long, short)]
        username: Option<String>,

        /// Email address; prompted for when omitted
        #[arg(long, short)]
        email: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Browse and manage posts
    #[command(subcommand)]
    Posts(PostsCommand),

    /// Run the interactive admin dashboard
    Admin,

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate
        #[arg(long, short, value_enum, default_value_t = ConfigFormat::Yaml)]
        format: ConfigFormat,

        /// Where to write the file. Defaults to config.<format> in the current directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let Cli {
        config,
        server,
        command,
    } = Cli::parse();

    match command {
        Commands::Login { email } => {
            let (_, ctx) = commands::connect(config, server)?;
            commands::session::login(&ctx, email).await?;
        }
        Commands::Signup { username, email } => {
            let (_, ctx) = commands::connect(config, server)?;
            commands::session::signup(&ctx, username, email).await?;
        }
        Commands::Logout => {
            let (_, ctx) = commands::connect(config, server)?;
            commands::session::logout(&ctx)?;
        }
        Commands::Status => {
            let (config, ctx) = commands::connect(config, server)?;
            commands::session::status(&config, &ctx);
        }
        Commands::Posts(command) => {
            let (_, ctx) = commands::connect(config, server)?;
            commands::posts::run(&ctx, command).await?;
        }
        Commands::Admin => {
            let (_, ctx) = commands::connect(config, server)?;
            commands::admin::run(&ctx).await?;
        }
        Commands::Config { format, output } => {
            commands::config::generate_config(format, output)?;
        }
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
        }
    }

    Ok(())
}
