//! Ad Relay WASM - ad SDK integration for the browser `<video>` element
//!
//! Wires the Tivio SDK to the first video element of the page and mirrors
//! ad metadata into the ad panel elements (`subType`, `order`,
//! `totalCount`, `secondsToSkippable`, `secondsToEnd`, `canSkip`,
//! `isSkippable`, `skip`).
//!
//! ## Usage
//!
//! ```javascript
//! import init, { KinoAdRelay } from '@kino/adrelay-wasm';
//!
//! await init();
//! const relay = new KinoAdRelay({ secret: 'XXXXXXXXX', deviceCapabilities: [], currency: 'EUR' });
//! relay.start();
//!
//! window.unpauseVideo = () => relay.unpause();
//! window.pauseVideo = () => relay.pause();
//! window.jumpForward = () => relay.jump_forward();
//! window.setSourceTivio = () => relay.set_demo_source();
//! ```

use adrelay_core::{EventMediator, PlaybackControl, Player, SdkConfig, SessionContext};
use std::rc::Rc;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod demo;
mod dom;
mod sdk;

pub use demo::{demo_source, JUMP_STEP_MS};
pub use dom::{DomAdPanel, VideoSurface};
pub use sdk::TivioSdk;

fn js_error(message: impl Into<String>) -> JsValue {
    JsValue::from_str(&message.into())
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    info!(version = adrelay_core::VERSION, "Ad relay initialized");
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn mount_video(ctx: &SessionContext) {
    match dom::find_video() {
        Some(video) => {
            ctx.mount(Rc::new(VideoSurface::new(video)));
        }
        None => warn!("No <video> element on the page"),
    }
}

/// Page-level relay: one per page
#[wasm_bindgen]
pub struct KinoAdRelay {
    ctx: Rc<SessionContext>,
    mediator: Rc<EventMediator>,
    player: Player,
}

#[wasm_bindgen]
impl KinoAdRelay {
    /// Create the relay from an SDK config object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<KinoAdRelay, JsValue> {
        let config: SdkConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| js_error(format!("invalid config: {e}")))?;
        config.validate().map_err(|e| js_error(e.to_string()))?;

        let ctx = Rc::new(SessionContext::new(config, || {
            Box::new(DomAdPanel::lookup()) as Box<dyn adrelay_core::PresentationSurface>
        }));
        let player = ctx.player();

        Ok(Self {
            mediator: Rc::new(EventMediator::new(Rc::clone(&ctx))),
            ctx,
            player,
        })
    }

    /// Mount the video element (now, or once the page has loaded) and
    /// initialize the SDK
    pub fn start(&self) -> Result<(), JsValue> {
        if dom::find_video().is_some() {
            mount_video(&self.ctx);
        } else {
            let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
            let ctx = Rc::clone(&self.ctx);
            let on_load = Closure::once_into_js(move || mount_video(&ctx));
            window.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
        }

        let mediator = Rc::clone(&self.mediator);
        wasm_bindgen_futures::spawn_local(async move {
            // Failures are logged by the mediator and are terminal
            let _ = mediator.start(&TivioSdk).await;
        });
        Ok(())
    }

    /// Lifecycle state: uninitialized, initializing, ready or failed
    pub fn state(&self) -> String {
        self.mediator.state().to_string()
    }

    pub fn session_id(&self) -> String {
        self.ctx.id().to_string()
    }

    pub fn unpause(&self) {
        info!("onClick: unpausing video");
        self.player.play();
    }

    pub fn pause(&self) {
        info!("onClick: pausing video");
        self.player.pause();
    }

    pub fn jump_forward(&self) {
        let Some(position) = self.ctx.media().with(|surface| surface.current_time()) else {
            warn!("onClick: no video mounted, cannot jump");
            return;
        };
        let ms = adrelay_core::position_ms(position) + JUMP_STEP_MS;
        info!(ms, "onClick: seeking");
        self.player.seek_to(ms);
    }

    pub fn set_demo_source(&self) {
        info!("onClick: setting source");
        self.player.set_source(Some(demo_source()));
    }

    /// Ask the SDK to play `source` (`null` is forwarded as is)
    pub fn set_source(&self, source: JsValue) {
        self.player.set_source(sdk::source_from_js(&source));
    }
}
