use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use skillsphere_auth::create_token;
use skillsphere_config::{IdentityConfig, StoreBackend, StoreConfig};
use skillsphere_db::PgDocumentStore;

#[derive(Parser)]
#[command(name = "skillsphere-cli")]
#[command(about = "SkillSphere CLI - Administrative tools for SkillSphere", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a signed bearer token for local testing
    IssueToken {
        /// Subject (user id) the token asserts
        #[arg(short = 's', long)]
        sub: String,

        /// Email claim
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Apply pending PostgreSQL migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::IssueToken { sub, email } => handle_issue_token(&sub, email.as_deref()),
        Commands::Migrate => handle_migrate().await,
    };

    if let Err(e) = outcome {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

fn handle_issue_token(sub: &str, email: Option<&str>) -> anyhow::Result<()> {
    let config = IdentityConfig::from_env();
    if config.uses_dev_secret() {
        eprintln!("⚠️  JWT_SECRET is not set; signing with the development secret");
    }

    let token = create_token(sub, email, &config)?;
    println!("{token}");
    Ok(())
}

async fn handle_migrate() -> anyhow::Result<()> {
    let StoreBackend::Postgres {
        url,
        max_connections,
    } = StoreConfig::from_env()?.backend
    else {
        anyhow::bail!("migrate requires DOCUMENT_STORE=postgres");
    };

    let store = PgDocumentStore::connect(&url, max_connections).await?;
    store.migrate().await?;
    store.pool().close().await;

    println!("✅ Migrations applied");
    Ok(())
}
