//! Page chrome state: the display theme and the sidebar.
//!
//! Both values are owned by the request handlers and handed to the renderer
//! explicitly. Only the theme outlives a request, in a cookie on the visitor's
//! side.

use std::{fmt, str::FromStr};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Reads the saved theme, falling back to light when nothing usable is
    /// stored or the store can't be reached.
    pub fn restore(store: &impl PreferenceStore) -> Theme {
        match store.get(THEME_KEY) {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|_| {
                warn!(saved = %saved, "ignoring unrecognised saved theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("preference store unavailable, using default theme: {err:#}");
                Theme::default()
            }
        }
    }

    /// Flips `self` and saves the result. Returns the new theme and whether it
    /// was persisted; an unsaved theme has to travel in page URLs instead.
    pub fn toggle(self, store: &mut impl PreferenceStore) -> (Theme, bool) {
        let next = self.toggled();
        match store.set(THEME_KEY, next.as_str()) {
            Ok(()) => (next, true),
            Err(err) => {
                warn!(theme = next.as_str(), "couldn't persist theme: {err:#}");
                (next, false)
            }
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("unknown theme {s}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sidebar {
    Open,
    #[default]
    Closed,
}

impl Sidebar {
    pub fn is_open(self) -> bool {
        self == Sidebar::Open
    }

    pub fn toggled(self) -> Sidebar {
        match self {
            Sidebar::Open => Sidebar::Closed,
            Sidebar::Closed => Sidebar::Open,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sidebar::Open => "open",
            Sidebar::Closed => "closed",
        }
    }
}

/// Page URL showing the sidebar in the given state. A theme that couldn't be
/// saved rides along in the query so later links keep it.
pub fn page_href(sidebar: Sidebar, unsaved_theme: Option<Theme>) -> String {
    let mut params = Vec::new();
    if sidebar.is_open() {
        params.push(format!("sidebar={}", sidebar.as_str()));
    }
    if let Some(theme) = unsaved_theme {
        params.push(format!("theme={theme}"));
    }

    if params.is_empty() {
        "/".to_owned()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// String key-value storage for visitor preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// How long a saved preference cookie lives.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceCookies {
    pub max_age: time::Duration,
}

impl PreferenceCookies {
    pub fn store(self, jar: CookieJar) -> CookiePreferences {
        CookiePreferences {
            jar,
            max_age: self.max_age,
        }
    }
}

/// Preferences kept in the visitor's cookies. Changes are only sent once the
/// jar is returned as part of the response.
#[derive(Debug)]
pub struct CookiePreferences {
    jar: CookieJar,
    max_age: time::Duration,
}

impl CookiePreferences {
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl PreferenceStore for CookiePreferences {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.jar.get(key).map(|cookie| cookie.value().to_owned()))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let cookie = Cookie::build((key.to_owned(), value.to_owned()))
            .path("/")
            .max_age(self.max_age)
            .same_site(SameSite::Lax)
            .http_only(true);
        self.jar = self.jar.clone().add(cookie);
        Ok(())
    }
}
