//! Recording fakes for the SDK, media surface and presentation surface

#![allow(dead_code)]

use adrelay_core::{
    AdField, AdMetadata, AdMetadataHandler, Error, MediaEvent, MediaListener, MediaSurface,
    PlaybackError, PlayerWrapper, PresentationSurface, Result, SdkApi, SdkConfig, SdkFactory,
    SkipControl, SourceDescriptor, WrapperCallbacks, WrapperEvent,
};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Media surface
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Play,
    Pause,
    SetCurrentTime(f64),
    ClearSource,
    SetSourceUri(String),
    Load,
}

#[derive(Default)]
pub struct FakeSurface {
    pub calls: RefCell<Vec<SurfaceCall>>,
    pub current_time: Cell<f64>,
    listeners: RefCell<HashMap<MediaEvent, Vec<MediaListener>>>,
}

impl FakeSurface {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn emit(&self, event: MediaEvent) {
        if let Some(listeners) = self.listeners.borrow().get(&event) {
            for listener in listeners {
                listener();
            }
        }
    }

    pub fn listener_count(&self, event: MediaEvent) -> usize {
        self.listeners.borrow().get(&event).map_or(0, Vec::len)
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }
}

impl MediaSurface for FakeSurface {
    fn play(&self) {
        self.calls.borrow_mut().push(SurfaceCall::Play);
    }

    fn pause(&self) {
        self.calls.borrow_mut().push(SurfaceCall::Pause);
    }

    fn current_time(&self) -> f64 {
        self.current_time.get()
    }

    fn set_current_time(&self, secs: f64) {
        self.current_time.set(secs);
        self.calls.borrow_mut().push(SurfaceCall::SetCurrentTime(secs));
    }

    fn clear_source(&self) {
        self.calls.borrow_mut().push(SurfaceCall::ClearSource);
    }

    fn set_source_uri(&self, uri: &str) {
        self.calls
            .borrow_mut()
            .push(SurfaceCall::SetSourceUri(uri.to_string()));
    }

    fn load(&self) {
        self.calls.borrow_mut().push(SurfaceCall::Load);
    }

    fn add_listener(&self, event: MediaEvent, listener: MediaListener) {
        self.listeners
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(listener);
    }
}

// =============================================================================
// SDK
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum WrapperCall {
    TimeProgress(f64),
    PlaybackEnded,
    Error(String),
    SeekTo(f64),
    SetSource(Option<SourceDescriptor>),
}

pub struct FakeWrapper {
    pub calls: RefCell<Vec<WrapperCall>>,
    callbacks: Rc<dyn WrapperCallbacks>,
    handlers: RefCell<Vec<AdMetadataHandler>>,
    /// Commit seeks and source changes straight back to the player
    pub auto_commit: Cell<bool>,
}

impl FakeWrapper {
    pub fn emit_ad_metadata(&self, metadata: Option<AdMetadata>) {
        for handler in self.handlers.borrow().iter() {
            handler(metadata.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn calls(&self) -> Vec<WrapperCall> {
        self.calls.borrow().clone()
    }

    pub fn callbacks(&self) -> Rc<dyn WrapperCallbacks> {
        Rc::clone(&self.callbacks)
    }
}

impl PlayerWrapper for FakeWrapper {
    fn report_time_progress(&self, ms: f64) {
        self.calls.borrow_mut().push(WrapperCall::TimeProgress(ms));
    }

    fn report_playback_ended(&self) {
        self.calls.borrow_mut().push(WrapperCall::PlaybackEnded);
    }

    fn report_error(&self, error: &PlaybackError) {
        self.calls
            .borrow_mut()
            .push(WrapperCall::Error(error.message().to_string()));
    }

    fn seek_to(&self, ms: f64) {
        self.calls.borrow_mut().push(WrapperCall::SeekTo(ms));
        if self.auto_commit.get() {
            self.callbacks.seek_to(ms);
        }
    }

    fn set_source(&self, source: Option<SourceDescriptor>) {
        self.calls
            .borrow_mut()
            .push(WrapperCall::SetSource(source.clone()));
        if self.auto_commit.get() {
            self.callbacks.set_source(source);
        }
    }

    fn add_event_listener(&self, event: WrapperEvent, handler: AdMetadataHandler) {
        assert_eq!(event, WrapperEvent::AdMetadata);
        self.handlers.borrow_mut().push(handler);
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub error: Option<String>,
    pub without_wrapper: bool,
    pub wrapper: RefCell<Option<Rc<FakeWrapper>>>,
}

impl FakeApi {
    pub fn wrapper(&self) -> Rc<FakeWrapper> {
        self.wrapper
            .borrow()
            .clone()
            .expect("wrapper was not created")
    }
}

impl SdkApi for FakeApi {
    fn init_error(&self) -> Option<String> {
        self.error.clone()
    }

    fn create_player_wrapper(
        &self,
        callbacks: Rc<dyn WrapperCallbacks>,
    ) -> Option<Rc<dyn PlayerWrapper>> {
        if self.without_wrapper {
            return None;
        }
        let wrapper = Rc::new(FakeWrapper {
            calls: RefCell::new(Vec::new()),
            callbacks,
            handlers: RefCell::new(Vec::new()),
            auto_commit: Cell::new(false),
        });
        *self.wrapper.borrow_mut() = Some(Rc::clone(&wrapper));
        Some(wrapper)
    }
}

pub enum InitOutcome {
    Reject,
    Absent,
    Api(Rc<FakeApi>),
}

pub struct FakeFactory {
    outcome: InitOutcome,
    pub seen_config: RefCell<Option<SdkConfig>>,
    pub init_calls: Cell<usize>,
}

impl FakeFactory {
    pub fn new(outcome: InitOutcome) -> Self {
        Self {
            outcome,
            seen_config: RefCell::new(None),
            init_calls: Cell::new(0),
        }
    }

    pub fn ok() -> (Self, Rc<FakeApi>) {
        let api = Rc::new(FakeApi::default());
        (Self::new(InitOutcome::Api(Rc::clone(&api))), api)
    }
}

#[async_trait(?Send)]
impl SdkFactory for FakeFactory {
    async fn init(&self, config: &SdkConfig) -> Result<Option<Rc<dyn SdkApi>>> {
        self.init_calls.set(self.init_calls.get() + 1);
        *self.seen_config.borrow_mut() = Some(config.clone());

        match &self.outcome {
            InitOutcome::Reject => Err(Error::InitRejected("network unreachable".into())),
            InitOutcome::Absent => Ok(None),
            InitOutcome::Api(api) => Ok(Some(Rc::clone(api) as Rc<dyn SdkApi>)),
        }
    }
}

// =============================================================================
// Presentation
// =============================================================================

#[derive(Default)]
pub struct FakeElements {
    pub text: RefCell<HashMap<&'static str, String>>,
    pub skip: RefCell<SkipControl>,
    pub lookups: Cell<usize>,
}

impl FakeElements {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn text(&self, field: AdField) -> String {
        self.text
            .borrow()
            .get(field.element_id())
            .cloned()
            .unwrap_or_default()
    }

    /// Lookup closure for a session; counts how often it is resolved
    pub fn lookup(self: &Rc<Self>) -> impl Fn() -> Box<dyn PresentationSurface> + 'static {
        let elements = Rc::clone(self);
        move || {
            elements.lookups.set(elements.lookups.get() + 1);
            Box::new(ElementsHandle(Rc::clone(&elements))) as Box<dyn PresentationSurface>
        }
    }
}

pub struct ElementsHandle(Rc<FakeElements>);

impl PresentationSurface for ElementsHandle {
    fn set_field(&self, field: AdField, text: &str) {
        self.0
            .text
            .borrow_mut()
            .insert(field.element_id(), text.to_string());
    }

    fn set_skip_control(&self, control: &SkipControl) {
        *self.0.skip.borrow_mut() = control.clone();
    }
}
