//! Native media surface abstraction
//!
//! The surface is the video element the page renders into. It may not be
//! mounted yet when commands arrive, so everything goes through a
//! [`MediaSlot`] that turns calls on an empty slot into no-ops.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Events emitted by the media surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    TimeUpdate,
    Ended,
    Error,
}

impl MediaEvent {
    /// DOM event name
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::Ended => "ended",
            MediaEvent::Error => "error",
        }
    }
}

impl fmt::Display for MediaEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler invoked for a media event
pub type MediaListener = Box<dyn Fn()>;

/// Transport, source and event API of a native media element
pub trait MediaSurface {
    fn play(&self);

    fn pause(&self);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    fn set_current_time(&self, secs: f64);

    /// Drop the current source attribute
    fn clear_source(&self);

    fn set_source_uri(&self, uri: &str);

    fn load(&self);

    /// Register a listener that stays active for the surface's lifetime
    fn add_listener(&self, event: MediaEvent, listener: MediaListener);
}

type MountHook = Box<dyn FnOnce(&Rc<dyn MediaSurface>)>;

/// Write-once holder for the mounted media surface
#[derive(Default)]
pub struct MediaSlot {
    surface: OnceCell<Rc<dyn MediaSurface>>,
    on_mount: RefCell<Vec<MountHook>>,
}

impl MediaSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the surface. Returns false if one was already mounted.
    pub fn mount(&self, surface: Rc<dyn MediaSurface>) -> bool {
        if self.surface.set(Rc::clone(&surface)).is_err() {
            warn!("Media surface already mounted, ignoring");
            return false;
        }
        debug!("Media surface mounted");

        let hooks = std::mem::take(&mut *self.on_mount.borrow_mut());
        for hook in hooks {
            hook(&surface);
        }
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.get().is_some()
    }

    pub fn get(&self) -> Option<&Rc<dyn MediaSurface>> {
        self.surface.get()
    }

    /// Run `f` on the surface now, or as soon as it is mounted
    pub fn when_mounted(&self, f: impl FnOnce(&Rc<dyn MediaSurface>) + 'static) {
        match self.surface.get() {
            Some(surface) => f(surface),
            None => self.on_mount.borrow_mut().push(Box::new(f)),
        }
    }

    /// Run `f` on the surface if mounted; no-op otherwise
    pub fn with<R>(&self, f: impl FnOnce(&dyn MediaSurface) -> R) -> Option<R> {
        self.surface.get().map(|surface| f(&**surface))
    }
}

impl fmt::Debug for MediaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaSlot")
            .field("mounted", &self.is_mounted())
            .field("pending_hooks", &self.on_mount.borrow().len())
            .finish()
    }
}
