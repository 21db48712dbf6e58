//! Ad Relay Core - ad SDK integration for an HTML-style video surface
//!
//! This crate wires a third-party video-ad SDK to a native media element:
//! - Playback adapters (internal surface driver + SDK-mediated facade)
//! - Event mediation between media events and the SDK player wrapper
//! - Ad metadata projection into a presentation surface
//! - SDK configuration and session context
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Ad Relay Core                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │   UI ──► ┌──────────┐  seek/source  ┌───────────────┐           │
//! │          │  Player  │ ────────────► │ PlayerWrapper │ (SDK)     │
//! │          └────┬─────┘               └───┬───────▲───┘           │
//! │     play/pause│          callbacks      │       │ reports       │
//! │          ┌────▼───────────┐ ◄───────────┘  ┌────┴──────────┐    │
//! │          │ InternalPlayer │                │ EventMediator │    │
//! │          └────┬───────────┘                └────┬──────────┘    │
//! │               │                                 │ adMetadata    │
//! │          ┌────▼─────────┐  timeupdate/ended/ ┌──▼──────┐        │
//! │          │ MediaSurface │ ─────error───────► │ AdPanel │        │
//! │          └──────────────┘                    └─────────┘        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on a single-threaded event loop: shared handles are
//! `Rc` and write-once cells, and the SDK traits are `?Send`.

pub mod adapter;
pub mod config;
pub mod error;
pub mod mediator;
pub mod presentation;
pub mod sdk;
pub mod session;
pub mod surface;
pub mod types;

pub use adapter::{InternalPlayer, PlaybackControl, Player};
pub use config::SdkConfig;
pub use error::{Error, Result};
pub use mediator::{EventMediator, MediatorState};
pub use presentation::{
    project, AdField, AdPanel, AdPanelView, PresentationLookup, PresentationSurface, SkipControl,
    NOT_APPLICABLE, SKIP_CONTROL_ID,
};
pub use sdk::{AdMetadataHandler, PlayerWrapper, SdkApi, SdkFactory, WrapperCallbacks, WrapperEvent};
pub use session::SessionContext;
pub use surface::{MediaEvent, MediaListener, MediaSlot, MediaSurface};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
