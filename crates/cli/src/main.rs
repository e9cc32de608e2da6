mod seed;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bookstall_kernel::settings::Settings;
use bookstall_kernel::ModuleRegistry;

#[derive(Parser)]
#[command(
    name = "bookstall-cli",
    about = "Operational tooling for the Bookstall storefront"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply module migrations and exit.
    Migrate,
    /// Wipe the catalog and reload it from the bundled fixtures.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Bookstall settings")?;
    bookstall_telemetry::init(&settings.telemetry);

    let mut registry = ModuleRegistry::new();
    bookstall_app::modules::register_all(&mut registry);

    let db = bookstall_db::connect(&settings.database)
        .await
        .with_context(|| "failed to connect to the datastore")?;
    bookstall_db::apply_migrations(db, &registry).await?;

    match cli.command {
        Command::Migrate => {
            tracing::info!("migrations applied");
        }
        Command::Seed => {
            let summary = seed::run(db).await?;
            tracing::info!(
                books = summary.books,
                reviews = summary.reviews,
                dropped_reviews = summary.dropped_reviews,
                "seed complete"
            );
        }
    }

    Ok(())
}
