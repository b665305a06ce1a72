use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use uuid::Uuid;

use courseware::cli::{issue_token, logout_session, revoke_session};
use courseware::courseware_config::OAuthConfig;
use courseware::courseware_db::init_db_pool;

#[derive(Parser)]
#[command(name = "courseware-cli")]
#[command(about = "Courseware CLI - Client access token administration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a session and print a signed access token for it
    IssueToken {
        /// Client application identifier
        #[arg(short = 'c', long)]
        client_id: String,

        /// User the token acts for (required by password-gated routes)
        #[arg(short = 'u', long)]
        user_id: Option<Uuid>,
    },
    /// Revoke a session; its tokens stop working immediately
    RevokeSession {
        session_id: Uuid,
    },
    /// Mark a session's user as logged out
    LogoutSession {
        session_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool().await;

    let result = match cli.command {
        Commands::IssueToken { client_id, user_id } => {
            let oauth_config = OAuthConfig::from_env();
            issue_token(&pool, &oauth_config, &client_id, user_id)
                .await
                .map(|issued| {
                    println!("Session: {}", issued.session_id);
                    println!("Access token: {}", issued.access_token);
                })
        }
        Commands::RevokeSession { session_id } => revoke_session(&pool, session_id)
            .await
            .map(|_| println!("Session {} revoked", session_id)),
        Commands::LogoutSession { session_id } => logout_session(&pool, session_id)
            .await
            .map(|_| println!("Session {} logged out", session_id)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.error);
        std::process::exit(1);
    }

    Ok(())
}
