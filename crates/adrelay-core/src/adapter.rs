//! Playback adapters
//!
//! Two facades over the same [`PlaybackControl`] capability set:
//!
//! - [`InternalPlayer`] drives the media surface directly. Only the SDK
//!   wrapper reaches its `set_source`/`seek_to`, via [`WrapperCallbacks`].
//! - [`Player`] is what UI code holds. Source changes and seeks go to the
//!   SDK wrapper, which may run ad insertion or timeshift logic before
//!   calling back into the internal player. Transport goes straight to the
//!   surface.

use crate::{
    sdk::{WrapperCallbacks, WrapperSlot},
    surface::MediaSlot,
    types::ms_to_secs,
    SourceDescriptor,
};
use std::rc::Rc;
use tracing::{debug, warn};

/// Player capability set shared by both adapters
pub trait PlaybackControl {
    fn play(&self);

    fn pause(&self);

    fn seek_to(&self, ms: f64);

    fn set_source(&self, source: Option<SourceDescriptor>);
}

/// Low-level player bound to the media surface
#[derive(Debug)]
pub struct InternalPlayer {
    surface: Rc<MediaSlot>,
}

impl InternalPlayer {
    const NAME: &'static str = "InternalPlayer";

    pub fn new(surface: Rc<MediaSlot>) -> Self {
        Self { surface }
    }

    /// Pause, drop the current source and reload the element
    pub fn reset(&self) {
        debug!(adapter = Self::NAME, "reset");
        self.surface.with(|surface| {
            surface.pause();
            surface.clear_source();
            surface.load();
        });
    }
}

impl PlaybackControl for InternalPlayer {
    fn play(&self) {
        debug!(adapter = Self::NAME, "play");
        self.surface.with(|surface| surface.play());
    }

    fn pause(&self) {
        debug!(adapter = Self::NAME, "pause");
        self.surface.with(|surface| surface.pause());
    }

    fn seek_to(&self, ms: f64) {
        debug!(adapter = Self::NAME, ms, "seek_to");
        self.surface.with(|surface| surface.set_current_time(ms_to_secs(ms)));
    }

    fn set_source(&self, source: Option<SourceDescriptor>) {
        let Some(source) = source else {
            debug!(adapter = Self::NAME, "set_source without source, ignoring");
            return;
        };
        debug!(adapter = Self::NAME, uri = %source.uri, "set_source");

        self.reset();
        self.surface.with(|surface| surface.set_source_uri(&source.uri));
        self.play();
    }
}

impl WrapperCallbacks for InternalPlayer {
    fn set_source(&self, source: Option<SourceDescriptor>) {
        debug!(
            uri = source.as_ref().map(|s| s.uri.as_str()),
            "Received source from SDK"
        );
        PlaybackControl::set_source(self, source);
    }

    fn seek_to(&self, ms: f64) {
        debug!(ms, "Received seek from SDK");
        PlaybackControl::seek_to(self, ms);
    }
}

/// Player facade for application code
pub struct Player {
    internal: Rc<InternalPlayer>,
    wrapper: Rc<WrapperSlot>,
}

impl Player {
    const NAME: &'static str = "Player";

    pub fn new(internal: Rc<InternalPlayer>, wrapper: Rc<WrapperSlot>) -> Self {
        Self { internal, wrapper }
    }
}

impl PlaybackControl for Player {
    fn play(&self) {
        debug!(adapter = Self::NAME, "play");
        self.internal.play();
    }

    fn pause(&self) {
        debug!(adapter = Self::NAME, "pause");
        self.internal.pause();
    }

    fn seek_to(&self, ms: f64) {
        match self.wrapper.get() {
            Some(wrapper) => {
                debug!(adapter = Self::NAME, ms, "seek_to through SDK wrapper");
                wrapper.seek_to(ms);
            }
            None => warn!(adapter = Self::NAME, ms, "No SDK wrapper, dropping seek"),
        }
    }

    fn set_source(&self, source: Option<SourceDescriptor>) {
        match self.wrapper.get() {
            Some(wrapper) => {
                debug!(adapter = Self::NAME, "set_source through SDK wrapper");
                wrapper.set_source(source);
            }
            None => warn!(adapter = Self::NAME, "No SDK wrapper, dropping source"),
        }
    }
}
