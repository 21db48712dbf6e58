//! Session context
//!
//! Holds every handle that lives for the whole page session: the media
//! surface slot, the SDK wrapper slot, the ad panel and the internal
//! player. Slots are written at most once and read thereafter.

use crate::{
    adapter::{InternalPlayer, Player},
    presentation::{AdPanel, PresentationLookup},
    sdk::{PlayerWrapper, WrapperSlot},
    surface::{MediaSlot, MediaSurface},
    SdkConfig, SessionId,
};
use std::fmt;
use std::rc::Rc;
use tracing::info;

/// Shared state of one relay session
pub struct SessionContext {
    id: SessionId,
    config: SdkConfig,
    surface: Rc<MediaSlot>,
    wrapper: Rc<WrapperSlot>,
    internal: Rc<InternalPlayer>,
    panel: Rc<AdPanel>,
}

impl SessionContext {
    pub fn new(config: SdkConfig, presentation: impl PresentationLookup + 'static) -> Self {
        let id = SessionId::new();
        let surface = Rc::new(MediaSlot::new());
        let internal = Rc::new(InternalPlayer::new(Rc::clone(&surface)));

        info!(session_id = %id, currency = %config.currency, "Session created");

        Self {
            id,
            config,
            surface,
            wrapper: Rc::new(WrapperSlot::new()),
            internal,
            panel: Rc::new(AdPanel::new(presentation)),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Mount the media surface; only the first call takes effect
    pub fn mount(&self, surface: Rc<dyn MediaSurface>) -> bool {
        self.surface.mount(surface)
    }

    pub fn media(&self) -> &Rc<MediaSlot> {
        &self.surface
    }

    /// Live SDK wrapper, if initialization succeeded
    pub fn wrapper(&self) -> Option<&Rc<dyn PlayerWrapper>> {
        self.wrapper.get()
    }

    pub(crate) fn wrapper_slot(&self) -> &Rc<WrapperSlot> {
        &self.wrapper
    }

    pub(crate) fn internal_player(&self) -> &Rc<InternalPlayer> {
        &self.internal
    }

    pub fn panel(&self) -> &Rc<AdPanel> {
        &self.panel
    }

    /// Player facade for application code
    pub fn player(&self) -> Player {
        Player::new(Rc::clone(&self.internal), Rc::clone(&self.wrapper))
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("id", &self.id)
            .field("surface", &self.surface)
            .field("wrapper", &self.wrapper.get().is_some())
            .field("panel", &self.panel)
            .finish()
    }
}
