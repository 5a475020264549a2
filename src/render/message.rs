use crate::{
    archive::{ContentMessage, Message, ServiceMessage, should_show_author_header},
    include_res,
    res::fill,
};

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{RenderOptions, render_media};

/// Renders a display-ordered sequence, deciding author headers from each
/// message's predecessor.
pub fn render_messages(messages: &[Message], opts: &RenderOptions) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(index, msg)| {
            let show_author = should_show_author_header(messages, index);
            render_message(msg, &msg.key(index), show_author, opts)
        })
        .collect()
}

pub fn render_message(msg: &Message, key: &str, show_author: bool, opts: &RenderOptions) -> String {
    match msg {
        Message::Service(msg) => render_service(msg, key),
        Message::Content(msg) => render_content(msg, key, show_author, opts),
    }
}

// Clicking the badge does nothing yet; the id is there so a date can be linked to.
fn render_service(msg: &ServiceMessage, key: &str) -> String {
    fill(
        include_res!(str, "/pages/service_message.html"),
        &[
            ("key", &encode_double_quoted_attribute(key)),
            ("text", &encode_text(&msg.text)),
        ],
    )
}

fn render_content(msg: &ContentMessage, key: &str, show_author: bool, opts: &RenderOptions) -> String {
    let author = match msg.author.as_deref() {
        Some(author) if show_author && author != opts.channel_identity => {
            format!(r#"<div class="message-author">{}</div>"#, encode_text(author))
        }
        _ => String::new(),
    };

    let reply = match msg.reply_to.as_deref().map(str::trim) {
        Some(reply_to) if !reply_to.is_empty() => format!(
            r##"<a class="message-reply" href="#{}">In reply to an earlier post</a>"##,
            encode_double_quoted_attribute(reply_to)
        ),
        _ => String::new(),
    };

    let media = msg.media.as_ref().map(render_media).unwrap_or_default();

    let text = if msg.text.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="message-text">{}</div>"#, opts.rich_text(&msg.text))
    };

    fill(
        include_res!(str, "/pages/message.html"),
        &[
            ("key", &encode_double_quoted_attribute(key)),
            ("joined", if msg.is_joined { " joined" } else { "" }),
            ("author", &author),
            ("reply", &reply),
            ("media", &media),
            ("text", &text),
            ("time", &encode_text(msg.time.as_deref().unwrap_or_default())),
        ],
    )
}
