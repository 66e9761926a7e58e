mod authz;
mod entities;
mod errors;
mod filters;
mod settings;
mod storage;

use clap::{Parser, Subcommand};
use migration::MigratorTrait;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "palisade",
    version,
    about = "Access-control rule administration and decision checks"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Store a new rule for an actor or group
    AddRule {
        path: String,
        action: String,
        entity: String,
        /// Grant access instead of denying it
        #[arg(long)]
        allow: bool,
    },
    /// Add an actor to a group
    AddMember { actor: String, group: String },
    /// Decide whether an actor may perform an action on a path
    Check {
        actor: String,
        path: String,
        action: String,
    },
    /// List the (path, action) pairs an actor is effectively denied
    Denials { actor: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let settings = settings::Settings::load(&cli.config)?;

    // init storage (database)
    let db = storage::init(&settings.database).await?;

    match cli.command {
        Command::Migrate => {
            migration::Migrator::up(&db, None).await.into_diagnostic()?;
            tracing::info!("Migrations applied");
        }
        Command::AddRule {
            path,
            action,
            entity,
            allow,
        } => {
            let rule = storage::add_rule(&db, &path, &action, &entity, allow).await?;
            tracing::info!(
                %rule.path,
                %rule.action,
                %rule.entity,
                allowed = rule.allowed,
                "Rule stored"
            );
        }
        Command::AddMember { actor, group } => {
            storage::add_membership(&db, &actor, &group).await?;
            tracing::info!(%actor, %group, "Membership stored");
        }
        Command::Check {
            actor,
            path,
            action,
        } => {
            // Filters run ahead of the engine and can only reject; the
            // engine's decision is never altered by them.
            let chain = filters::build_filters(&settings.filters)?;
            let admitted = chain.iter().all(|f| f.apply(&actor, &path, &action));
            let allowed = admitted && authz::evaluate(&db, &actor, &path, &action).await?;
            println!("{}", if allowed { "allow" } else { "deny" });
        }
        Command::Denials { actor } => {
            let denials = authz::effective_denials(&db, &actor).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&denials).into_diagnostic()?
            );
        }
    }

    Ok(())
}
