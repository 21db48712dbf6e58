//! Core types for the ad relay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a relay session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of content a source points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    TvProgram,
    Video,
    Channel,
    /// Any kind this crate does not know about, passed through verbatim
    #[serde(untagged)]
    Other(String),
}

/// How TV content is played back
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvMode {
    Timeshift,
    Live,
    #[serde(untagged)]
    Other(String),
}

/// Description of what the player should load.
///
/// Field names on the wire follow the SDK (`type`, `tvMode`, `channelName`,
/// `epgFrom`, `epgTo`, `positionMs`). Only `uri` is required: ad and VOD
/// sources handed back by the SDK carry no TV mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceKind>,
    pub uri: String,
    #[serde(rename = "tvMode", default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TvMode>,
    /// Channel name; the SDK normalizes spelling and casing
    #[serde(rename = "channelName", default, skip_serializing_if = "Option::is_none")]
    pub channel_identifier: Option<String>,
    /// Start of the EPG window, needed for ad markers
    #[serde(rename = "epgFrom", default, skip_serializing_if = "Option::is_none")]
    pub time_window_start: Option<DateTime<Utc>>,
    /// End of the EPG window
    #[serde(rename = "epgTo", default, skip_serializing_if = "Option::is_none")]
    pub time_window_end: Option<DateTime<Utc>>,
    #[serde(rename = "positionMs", default)]
    pub start_position_ms: f64,
}

impl SourceDescriptor {
    /// Timeshifted TV program starting at position zero
    pub fn tv_program(uri: impl Into<String>) -> Self {
        Self {
            kind: Some(SourceKind::TvProgram),
            uri: uri.into(),
            mode: Some(TvMode::Timeshift),
            channel_identifier: None,
            time_window_start: None,
            time_window_end: None,
            start_position_ms: 0.0,
        }
    }

    pub fn with_mode(mut self, mode: TvMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel_identifier = Some(channel.into());
        self
    }

    pub fn with_time_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.time_window_start = Some(start);
        self.time_window_end = Some(end);
        self
    }

    pub fn with_start_position_ms(mut self, ms: f64) -> Self {
        self.start_position_ms = ms;
        self
    }
}

/// Handle to the skip function supplied with an ad metadata snapshot.
///
/// Compared by identity. The default value does nothing.
#[derive(Clone, Default)]
pub struct SkipAction(Option<Rc<dyn Fn()>>);

impl SkipAction {
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self(Some(Rc::new(action)))
    }

    pub fn noop() -> Self {
        Self(None)
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    /// Run the action
    pub fn trigger(&self) {
        if let Some(action) = &self.0 {
            action();
        }
    }
}

impl PartialEq for SkipAction {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const (),
            _ => false,
        }
    }
}

impl fmt::Debug for SkipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            f.write_str("SkipAction(noop)")
        } else {
            f.write_str("SkipAction(..)")
        }
    }
}

/// Snapshot of the currently playing ad.
///
/// Every snapshot replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdMetadata {
    /// Ad break position, e.g. "preroll" or "midroll"
    pub sub_type: String,
    /// Position of this ad within its break
    #[serde(default)]
    pub order: Option<f64>,
    /// Number of ads in the break
    #[serde(default)]
    pub total_count: Option<f64>,
    #[serde(default)]
    pub seconds_to_skippable: Option<f64>,
    pub seconds_to_end: f64,
    pub can_trigger_skip: bool,
    pub is_skippable: bool,
    #[serde(skip)]
    pub skip: SkipAction,
}

/// Generic playback failure reported to the SDK
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PlaybackError {
    message: String,
}

impl PlaybackError {
    pub const DEFAULT_MESSAGE: &'static str = "Failed to play";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for PlaybackError {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE)
    }
}

/// Convert a media surface time reading (seconds) to milliseconds
pub fn position_ms(current_time_secs: f64) -> f64 {
    current_time_secs * 1000.0
}

/// Convert milliseconds to the media surface time unit (seconds)
pub fn ms_to_secs(ms: f64) -> f64 {
    ms / 1000.0
}
