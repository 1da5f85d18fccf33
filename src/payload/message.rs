//! Message and webhook profile payloads.

use serde::{Deserialize, Serialize};

use super::Embed;

/// A message posted through a webhook.
///
/// At least one of `content` or `embeds` should be set; this is not
/// checked before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Plain text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Overrides the webhook's display name for this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Overrides the webhook's avatar for this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Text-to-speech
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tts: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,

    /// Creates a forum thread with this name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
}

impl Message {
    /// Creates a plain text message.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Creates a message carrying only embeds.
    #[must_use]
    pub fn from_embeds(embeds: impl IntoIterator<Item = Embed>) -> Self {
        Self {
            embeds: embeds.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Partial update of the webhook's own profile, sent with PATCH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookProfile {
    /// New default display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New default avatar as a data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
