//! `EMBED_TEXT` and `EMBED_TEXTS`.
//!
//! Both take `(method, model, payload)` string arguments and share setup,
//! name resolution and outcome reporting; they differ only in how the
//! payload becomes engine inputs and how the batch is encoded.

mod common;
mod embed_text;
mod embed_texts;

pub use embed_text::EmbedText;
pub use embed_texts::EmbedTexts;
