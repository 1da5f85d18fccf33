//! Wire-schema types for webhook payloads.
//!
//! Plain serde data: every type serializes to the JSON shape webhook
//! providers expect, omitting unset optionals, empty lists and `false`
//! flags. No size or count validation happens here or in the engine.

mod embed;
mod message;


pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia};
pub use message::{Message, WebhookProfile};
