pub mod archive;
pub mod config;
pub mod render;
pub mod res;
pub mod shell;

mod index;

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use archive::Archive;
use config::Config;
use render::RenderOptions;
use shell::PreferenceCookies;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub archive: Arc<Archive>,
    pub render: Arc<RenderOptions>,
    pub cookies: PreferenceCookies,
}

impl AppState {
    pub fn new(archive: Archive, config: &Config) -> Self {
        Self {
            archive: Arc::new(archive),
            render: Arc::new(RenderOptions {
                channel_identity: config.channel_identity.clone(),
                markup_policy: config.markup_policy,
            }),
            cookies: PreferenceCookies {
                max_age: time::Duration::days(config.theme_ttl_days),
            },
        }
    }
}

/// The whole site: the archive page, the theme toggle, the stylesheet, and
/// everything under the assets directory (media, `profile_pic.jpg`).
pub fn app(archive: Archive, config: &Config) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/theme", post(index::toggle_theme))
        .route("/style.css", get(res::stylesheet))
        .fallback_service(ServeDir::new(&config.assets_dir))
        .with_state(AppState::new(archive, config))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
