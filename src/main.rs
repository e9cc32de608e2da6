use anyhow::Context;
use bookstall_app::modules;
use bookstall_kernel::settings::Settings;
use bookstall_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Bookstall settings")?;
    bookstall_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.endpoint,
        "bookstall bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let db = bookstall_db::connect(&settings.database)
        .await
        .with_context(|| "failed to connect to the datastore")?;
    bookstall_db::apply_migrations(db, &registry).await?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("bookstall bootstrap complete");

    bookstall_http::start_server(&registry, &settings, db.clone()).await?;

    registry.stop_all().await?;

    Ok(())
}
