use std::sync::Arc;

use axum::{
    Form, debug_handler,
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::debug;

use crate::{
    AppState,
    archive::Archive,
    render::{Page, RenderOptions, render_page},
    shell::{PreferenceCookies, Sidebar, Theme, page_href},
};

#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default)]
    sidebar: Sidebar,
    /// Set when the theme couldn't be saved for this visitor.
    theme: Option<Theme>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn index(
    State(archive): State<Arc<Archive>>,
    State(render): State<Arc<RenderOptions>>,
    State(cookies): State<PreferenceCookies>,
    jar: CookieJar,
    Query(PageQuery { sidebar, theme }): Query<PageQuery>,
) -> Html<String> {
    let page = match theme {
        Some(theme) => Page {
            theme,
            sidebar,
            pinned: true,
        },
        None => Page {
            theme: Theme::restore(&cookies.store(jar)),
            sidebar,
            pinned: false,
        },
    };

    Html(render_page(&archive, page, &render))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThemeForm {
    current: Theme,
    #[serde(default)]
    sidebar: Sidebar,
}

#[debug_handler(state = AppState)]
pub(crate) async fn toggle_theme(
    State(cookies): State<PreferenceCookies>,
    jar: CookieJar,
    Form(ThemeForm { current, sidebar }): Form<ThemeForm>,
) -> (CookieJar, Redirect) {
    let mut store = cookies.store(jar);
    let (theme, saved) = current.toggle(&mut store);
    debug!(%theme, saved, "theme toggled");

    (store.into_jar(), Redirect::to(&after_toggle(theme, saved, sidebar)))
}

/// Where the visitor lands after toggling. An unsaved theme stays in the URL.
fn after_toggle(theme: Theme, saved: bool, sidebar: Sidebar) -> String {
    page_href(sidebar, (!saved).then_some(theme))
}
