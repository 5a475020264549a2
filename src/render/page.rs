use crate::{
    archive::{Archive, ArchiveMetadata},
    include_res,
    res::fill,
    shell::{Sidebar, Theme, page_href},
};

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{RenderOptions, markdown, render_messages};

/// Shell state for one rendered page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub theme: Theme,
    pub sidebar: Sidebar,
    /// The theme came from the query rather than the visitor's saved choice,
    /// so every link on the page has to carry it.
    pub pinned: bool,
}

impl Page {
    pub fn href(self, sidebar: Sidebar) -> String {
        encode_double_quoted_attribute(&page_href(sidebar, self.pinned.then_some(self.theme))).into_owned()
    }
}

pub fn render_page(archive: &Archive, page: Page, opts: &RenderOptions) -> String {
    let metadata = &archive.metadata;
    let site_name = encode_text(&metadata.site_name);

    let (theme_title, theme_icon) = match page.theme {
        Theme::Light => ("Switch to Dark Mode", include_res!(str, "/icons/moon.svg")),
        Theme::Dark => ("Switch to Light Mode", include_res!(str, "/icons/sun.svg")),
    };

    let overlay = if page.sidebar.is_open() {
        format!(
            r#"<a class="sidebar-overlay" href="{}" aria-label="Close sidebar"></a>"#,
            page.href(Sidebar::Closed)
        )
    } else {
        String::new()
    };

    fill(
        include_res!(str, "/pages/archive.html"),
        &[
            ("theme", page.theme.as_str()),
            ("site_name", &site_name),
            ("menu_href", &page.href(page.sidebar.toggled())),
            ("menu_icon", include_res!(str, "/icons/menu.svg")),
            ("theme_current", page.theme.as_str()),
            ("sidebar_state", page.sidebar.as_str()),
            ("theme_title", theme_title),
            ("theme_icon", theme_icon),
            ("overlay", &overlay),
            ("messages", &render_messages(archive.display_messages(), opts)),
            ("sidebar_class", if page.sidebar.is_open() { " open" } else { "" }),
            ("sidebar", &render_sidebar(metadata, page)),
        ],
    )
}

fn render_sidebar(metadata: &ArchiveMetadata, page: Page) -> String {
    let website = match metadata.links.website() {
        Some(url) => fill(
            include_res!(str, "/pages/info_block.html"),
            &[
                ("icon", include_res!(str, "/icons/globe.svg")),
                ("label", "Website"),
                (
                    "value",
                    &format!(
                        r#"<a href="{}" target="_blank" rel="noreferrer">{}</a>"#,
                        encode_double_quoted_attribute(url),
                        encode_text(strip_scheme(url))
                    ),
                ),
            ],
        ),
        None => String::new(),
    };

    let bio = if metadata.bio.trim().is_empty() {
        String::new()
    } else {
        fill(
            include_res!(str, "/pages/info_block.html"),
            &[
                ("icon", include_res!(str, "/icons/info.svg")),
                ("label", "About"),
                ("value", &markdown(&metadata.bio)),
            ],
        )
    };

    let socials: String = metadata
        .links
        .social()
        .into_iter()
        .map(|(platform, url)| {
            format!(
                r#"<a href="{}" target="_blank" rel="noreferrer" class="social-link-btn" title="{}">{}</a>"#,
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(&platform_title(platform)),
                platform_icon(platform)
            )
        })
        .collect();

    let year = time::OffsetDateTime::now_utc().year().to_string();

    fill(
        include_res!(str, "/pages/sidebar.html"),
        &[
            ("site_name", &encode_text(&metadata.site_name)),
            ("site_name_attr", &encode_double_quoted_attribute(&metadata.site_name)),
            ("close_href", &page.href(Sidebar::Closed)),
            ("close_icon", include_res!(str, "/icons/x.svg")),
            ("tagline", &encode_text(&metadata.tagline)),
            ("bio", &bio),
            ("website", &website),
            ("socials", &socials),
            ("year", &year),
        ],
    )
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

fn platform_title(platform: &str) -> String {
    match platform {
        "telegram" => "Telegram".to_owned(),
        "instagram" => "Instagram".to_owned(),
        "youtube" => "YouTube".to_owned(),
        "linkedin" => "LinkedIn".to_owned(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

fn platform_icon(platform: &str) -> &'static str {
    match platform {
        "telegram" => include_res!(str, "/icons/send.svg"),
        "instagram" => include_res!(str, "/icons/instagram.svg"),
        "youtube" => include_res!(str, "/icons/youtube.svg"),
        "linkedin" => include_res!(str, "/icons/linkedin.svg"),
        _ => include_res!(str, "/icons/globe.svg"),
    }
}
