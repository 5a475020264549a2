use anyhow::Context;
use chanarchive::{archive::Archive, config::Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chanarchive=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let archive = Archive::load(&config.archive_path)
        .await
        .with_context(|| format!("loading {}", config.archive_path.display()))?;

    let app = chanarchive::app(archive, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        assets = %config.assets_dir.display(),
        markup = %config.markup_policy,
        "serving on http://{}",
        config.bind_addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}
