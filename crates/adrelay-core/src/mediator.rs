//! Event mediator
//!
//! Drives the SDK lifecycle and, once the SDK is ready, relays events in
//! both directions:
//!
//! - media surface `timeupdate` / `ended` / `error` → SDK wrapper reports
//! - SDK `adMetadata` → ad panel
//!
//! Each relay is independent and fire-and-forget. Listeners are never
//! removed.

use crate::{
    sdk::{PlayerWrapper, SdkApi, SdkFactory, WrapperCallbacks, WrapperEvent},
    session::SessionContext,
    surface::{MediaEvent, MediaSurface},
    types::position_ms,
    AdMetadata, Error, PlaybackError, Result,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, instrument};

/// SDK lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediatorState {
    Uninitialized,
    Initializing,
    Ready,
    /// Terminal; nothing is relayed and no retry happens
    Failed,
}

impl MediatorState {
    pub fn can_transition_to(&self, next: MediatorState) -> bool {
        use MediatorState::*;
        matches!(
            (*self, next),
            (Uninitialized, Initializing) | (Initializing, Ready) | (Initializing, Failed)
        )
    }
}

impl fmt::Display for MediatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediatorState::Uninitialized => write!(f, "uninitialized"),
            MediatorState::Initializing => write!(f, "initializing"),
            MediatorState::Ready => write!(f, "ready"),
            MediatorState::Failed => write!(f, "failed"),
        }
    }
}

/// Bridges the media surface, the SDK wrapper and the ad panel
pub struct EventMediator {
    ctx: Rc<SessionContext>,
    state: Cell<MediatorState>,
}

impl EventMediator {
    pub fn new(ctx: Rc<SessionContext>) -> Self {
        Self {
            ctx,
            state: Cell::new(MediatorState::Uninitialized),
        }
    }

    pub fn state(&self) -> MediatorState {
        self.state.get()
    }

    pub fn context(&self) -> &Rc<SessionContext> {
        &self.ctx
    }

    fn set_state(&self, next: MediatorState) -> Result<()> {
        let current = self.state.get();
        if !current.can_transition_to(next) {
            return Err(Error::InvalidStateTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }
        self.state.set(next);
        debug!(from = %current, to = %next, "Mediator state transition");
        Ok(())
    }

    /// Initialize the SDK and start relaying.
    ///
    /// Runs once. Any initialization failure is terminal and returned after
    /// being logged; commands sent through the player facade afterwards are
    /// dropped because no wrapper exists.
    #[instrument(skip_all, fields(session_id = %self.ctx.id()))]
    pub async fn start<F>(&self, factory: &F) -> Result<()>
    where
        F: SdkFactory + ?Sized,
    {
        self.set_state(MediatorState::Initializing)?;
        info!("Initializing SDK");

        let wrapper = match self.connect(factory).await {
            Ok(wrapper) => wrapper,
            Err(e) => {
                error!(code = e.error_code(), error = %e, "SDK initialization failed");
                self.set_state(MediatorState::Failed)?;
                return Err(e);
            }
        };

        // Only one start can get past Initializing, so the slot is empty here
        let _ = self.ctx.wrapper_slot().set(Rc::clone(&wrapper));

        self.register_media_listeners(&wrapper);
        self.register_wrapper_listeners(&wrapper);

        self.set_state(MediatorState::Ready)?;
        info!("Initialization OK");
        Ok(())
    }

    async fn connect<F>(&self, factory: &F) -> Result<Rc<dyn PlayerWrapper>>
    where
        F: SdkFactory + ?Sized,
    {
        let api: Rc<dyn SdkApi> = factory
            .init(self.ctx.config())
            .await?
            .ok_or(Error::InitAbsent)?;

        if let Some(message) = api.init_error() {
            return Err(Error::InitFailed(message));
        }

        let callbacks: Rc<dyn WrapperCallbacks> = self.ctx.internal_player().clone();
        api.create_player_wrapper(callbacks)
            .ok_or(Error::WrapperUnavailable)
    }

    /// Hook the media surface events; deferred until the surface is mounted
    fn register_media_listeners(&self, wrapper: &Rc<dyn PlayerWrapper>) {
        let wrapper = Rc::clone(wrapper);

        self.ctx.media().when_mounted(move |surface| {
            let weak: Weak<dyn MediaSurface> = Rc::downgrade(surface);
            let progress = Rc::clone(&wrapper);
            surface.add_listener(
                MediaEvent::TimeUpdate,
                Box::new(move || {
                    let Some(surface) = weak.upgrade() else {
                        return;
                    };
                    let ms = position_ms(surface.current_time());
                    debug!(ms, "Signalling time progress to SDK");
                    progress.report_time_progress(ms);
                }),
            );

            let ended = Rc::clone(&wrapper);
            surface.add_listener(
                MediaEvent::Ended,
                Box::new(move || {
                    debug!("Signalling playback ended to SDK");
                    ended.report_playback_ended();
                }),
            );

            let failed = Rc::clone(&wrapper);
            surface.add_listener(
                MediaEvent::Error,
                Box::new(move || {
                    debug!("Signalling error to SDK");
                    failed.report_error(&PlaybackError::default());
                }),
            );

            debug!("Media listeners registered");
        });
    }

    fn register_wrapper_listeners(&self, wrapper: &Rc<dyn PlayerWrapper>) {
        let panel = Rc::clone(self.ctx.panel());
        wrapper.add_event_listener(
            WrapperEvent::AdMetadata,
            Box::new(move |metadata: Option<AdMetadata>| {
                debug!(?metadata, "Ad metadata changed");
                panel.render(metadata.as_ref());
            }),
        );
    }
}

impl fmt::Debug for EventMediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMediator")
            .field("state", &self.state.get())
            .field("ctx", &self.ctx)
            .finish()
    }
}
