use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Channel-level information shown in the header and sidebar.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveMetadata {
    pub site_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub links: Links,
}

/// The website link plus any number of social networks keyed by platform name.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Links {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(flatten)]
    pub networks: BTreeMap<String, String>,
}

impl Links {
    /// Social links in sidebar order: the well-known platforms first, then
    /// anything else alphabetically. Empty URLs are skipped.
    pub fn social(&self) -> Vec<(&str, &str)> {
        const KNOWN: [&str; 4] = ["telegram", "instagram", "youtube", "linkedin"];

        let known = KNOWN
            .iter()
            .filter_map(|name| self.networks.get_key_value(*name));
        let others = self
            .networks
            .iter()
            .filter(|(name, _)| !KNOWN.contains(&name.as_str()));

        known
            .chain(others)
            .filter(|(_, url)| !url.trim().is_empty())
            .map(|(name, url)| (name.as_str(), url.as_str()))
            .collect()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Anything that isn't explicitly a service entry renders as a regular post,
/// including entries with a missing or unrecognised `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Service(ServiceMessage),
    Content(ContentMessage),
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let message = match value.get("type").and_then(Value::as_str) {
            Some("service") => ServiceMessage::deserialize(value).map(Message::Service),
            _ => ContentMessage::deserialize(value).map(Message::Content),
        };
        message.map_err(D::Error::custom)
    }
}

/// Date separators and system notices.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentMessage {
    #[serde(default)]
    pub id: String,
    /// Inline HTML from the export.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub is_joined: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MediaKind {
    Photo,
    File,
    Video,
    Voice,
    Unknown(String),
}

impl From<String> for MediaKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "photo" => MediaKind::Photo,
            "file" => MediaKind::File,
            "video" => MediaKind::Video,
            "voice" => MediaKind::Voice,
            _ => MediaKind::Unknown(kind),
        }
    }
}

impl Message {
    pub fn id(&self) -> &str {
        match self {
            Message::Service(msg) => &msg.id,
            Message::Content(msg) => &msg.id,
        }
    }

    /// DOM key for the message, falling back to its position when the export
    /// left the id out.
    pub fn key(&self, index: usize) -> String {
        match self.id().trim() {
            "" => index.to_string(),
            id => id.to_owned(),
        }
    }

    pub fn author(&self) -> Option<&str> {
        match self {
            Message::Service(_) => None,
            Message::Content(msg) => msg.author.as_deref(),
        }
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Message::Service(_))
    }
}
