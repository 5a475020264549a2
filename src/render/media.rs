use crate::{
    archive::{Media, MediaKind},
    include_res,
};

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::asset_url;

const AUDIO_SUFFIXES: [&str; 7] = [".ogg", ".oga", ".opus", ".mp3", ".m4a", ".wav", ".flac"];

/// How a media block is presented. Voice notes and anything with an audio
/// suffix play inline regardless of the declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment<'a> {
    Photo(&'a Media),
    Audio(&'a Media),
    Video(&'a Media),
    File(&'a Media),
    Unsupported(&'a str),
}

impl<'a> Attachment<'a> {
    pub fn classify(media: &'a Media) -> Self {
        match &media.kind {
            MediaKind::Photo => Attachment::Photo(media),
            MediaKind::Voice => Attachment::Audio(media),
            _ if has_audio_suffix(&media.src) => Attachment::Audio(media),
            MediaKind::File => Attachment::File(media),
            MediaKind::Video => Attachment::Video(media),
            MediaKind::Unknown(kind) => Attachment::Unsupported(kind),
        }
    }
}

fn has_audio_suffix(src: &str) -> bool {
    let src = src.to_ascii_lowercase();
    AUDIO_SUFFIXES.iter().any(|suffix| src.ends_with(suffix))
}

pub fn render_media(media: &Media) -> String {
    match Attachment::classify(media) {
        Attachment::Photo(media) => format!(
            r#"<div class="message-media photo"><img src="{}" alt="Message attachment" loading="lazy"></div>"#,
            encode_double_quoted_attribute(&asset_url(&media.src))
        ),
        Attachment::Audio(media) => {
            let title = match (&media.title, &media.duration) {
                (None, None) => String::new(),
                (title, duration) => {
                    let mut line = String::from(r#"<div class="file-name">"#);
                    if let Some(title) = title {
                        line += &encode_text(title);
                    }
                    if let Some(duration) = duration {
                        line += &format!(r#" <span class="media-duration">{}</span>"#, encode_text(duration));
                    }
                    line + "</div>"
                }
            };
            format!(
                r#"<div class="message-media audio">{title}<audio controls preload="none" src="{}"></audio></div>"#,
                encode_double_quoted_attribute(&asset_url(&media.src))
            )
        }
        Attachment::Video(media) => format!(
            r#"<div class="message-media video"><video controls preload="metadata" src="{}"></video></div>"#,
            encode_double_quoted_attribute(&asset_url(&media.src))
        ),
        Attachment::File(media) => {
            let href = asset_url(media.href.as_deref().unwrap_or(&media.src));
            format!(
                r#"<div class="message-media file"><div class="file-icon">{}</div><div class="file-info"><a class="file-name" href="{}" download>{}</a><div class="file-size">{}</div></div></div>"#,
                include_res!(str, "/icons/file.svg"),
                encode_double_quoted_attribute(&href),
                encode_text(media.title.as_deref().unwrap_or("Unknown file")),
                encode_text(media.size.as_deref().unwrap_or_default()),
            )
        }
        Attachment::Unsupported(kind) => {
            tracing::debug!(kind, src = %media.src, "skipping unsupported media");
            String::new()
        }
    }
}
