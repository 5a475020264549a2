//! HTML rendering of the archive page.
//!
//! Everything here is a pure function of the loaded archive plus the shell
//! state passed in by the handler; nothing is cached between requests.

mod media;
mod message;
mod page;

use std::{fmt, str::FromStr};

use html_escape::encode_text;

pub use media::{Attachment, render_media};
pub use message::{render_message, render_messages};
pub use page::{Page, render_page};

/// What to do with the inline HTML carried in message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupPolicy {
    /// Insert the export's markup verbatim; the exporter is trusted to have
    /// produced safe HTML.
    #[default]
    Trusted,
    /// Show the markup as literal text.
    Escaped,
}

impl FromStr for MarkupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trusted" => Ok(MarkupPolicy::Trusted),
            "escaped" => Ok(MarkupPolicy::Escaped),
            _ => Err(format!("expected trusted or escaped, got {s}")),
        }
    }
}

impl fmt::Display for MarkupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            MarkupPolicy::Trusted => "trusted",
            MarkupPolicy::Escaped => "escaped",
        })
    }
}

/// Settings that shape how individual messages come out.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub channel_identity: String,
    pub markup_policy: MarkupPolicy,
}

impl RenderOptions {
    fn rich_text(&self, text: &str) -> String {
        match self.markup_policy {
            MarkupPolicy::Trusted => text.to_owned(),
            MarkupPolicy::Escaped => encode_text(text).into_owned(),
        }
    }
}

/// Media paths in the export are relative to the static assets root, which
/// is served at `/`.
pub fn asset_url(src: &str) -> String {
    format!("/{}", src.trim_start_matches('/'))
}

/// Renders Markdown (used for the channel bio).
pub fn markdown(source: &str) -> String {
    use pulldown_cmark::{Options, Parser};

    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH);
    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);
    html_output
}
