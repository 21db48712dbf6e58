//! Contract of the external ad SDK
//!
//! ```text
//!  UI ──► Player ──► PlayerWrapper (SDK) ──► WrapperCallbacks ──► MediaSurface
//!                          ▲                                          │
//!                          └──── time progress / ended / error ◄──────┘
//! ```
//!
//! The SDK owns the decision of when a source change or seek is actually
//! committed; it calls back through [`WrapperCallbacks`] once it has.

use crate::{AdMetadata, PlaybackError, Result, SdkConfig, SourceDescriptor};
use async_trait::async_trait;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// Events a player wrapper can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperEvent {
    AdMetadata,
}

impl WrapperEvent {
    /// Event type name used by the SDK
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapperEvent::AdMetadata => "adMetadata",
        }
    }
}

impl fmt::Display for WrapperEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-once holder for the live wrapper; empty until the SDK is ready
pub type WrapperSlot = OnceCell<Rc<dyn PlayerWrapper>>;

/// Handler for ad metadata changes; `None` means no ad is active
pub type AdMetadataHandler = Box<dyn Fn(Option<AdMetadata>)>;

/// Commands the SDK issues back to the player once it has decided on them
pub trait WrapperCallbacks {
    fn set_source(&self, source: Option<SourceDescriptor>);

    fn seek_to(&self, ms: f64);
}

/// Ad-aware player wrapper handed out by the SDK
pub trait PlayerWrapper {
    fn report_time_progress(&self, ms: f64);

    fn report_playback_ended(&self);

    fn report_error(&self, error: &PlaybackError);

    /// Ask the SDK to seek; it answers through [`WrapperCallbacks::seek_to`]
    fn seek_to(&self, ms: f64);

    /// Ask the SDK to change source; it answers through [`WrapperCallbacks::set_source`]
    fn set_source(&self, source: Option<SourceDescriptor>);

    fn add_event_listener(&self, event: WrapperEvent, handler: AdMetadataHandler);
}

/// API handle returned by a successful SDK initialization
pub trait SdkApi {
    /// Soft failure carried inside an otherwise present handle
    fn init_error(&self) -> Option<String>;

    /// Create the player wrapper, or `None` if this API has no wrapper support
    fn create_player_wrapper(
        &self,
        callbacks: Rc<dyn WrapperCallbacks>,
    ) -> Option<Rc<dyn PlayerWrapper>>;
}

/// SDK entry point
#[async_trait(?Send)]
pub trait SdkFactory {
    /// Initialize the SDK.
    ///
    /// `Err` is a rejected initialization, `Ok(None)` an absent handle.
    async fn init(&self, config: &SdkConfig) -> Result<Option<Rc<dyn SdkApi>>>;
}
