use serde::de::DeserializeOwned;

use crate::error::{CourseprepError, Result};

/// One channel's collection as handed over by the I/O boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelInput<T> {
    /// No document was supplied for this channel.
    Missing,
    /// A document was supplied but could not be read or decoded.
    Malformed(String),
    Loaded(T),
}

impl<T> ChannelInput<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            ChannelInput::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ChannelInput::Missing)
    }
}

impl<T: DeserializeOwned> ChannelInput<T> {
    /// Decode a raw JSON document. Decoding failures become `Malformed`, never an error.
    /// A `null` document carries no collection and reads as `Missing`.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Option<T>>(raw) {
            Ok(Some(value)) => ChannelInput::Loaded(value),
            Ok(None) => ChannelInput::Missing,
            Err(e) => ChannelInput::Malformed(e.to_string()),
        }
    }
}

/// Decode a document the pipeline cannot run without (course structure, rule tables).
pub fn parse_document<T: DeserializeOwned>(document: &'static str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| CourseprepError::MalformedInput {
        document,
        reason: e.to_string(),
    })
}
