//! Bindings to the Tivio JS SDK
//!
//! The SDK is loaded as the `@tivio/sdk-js` ES module. Its objects are
//! wrapped in thin types implementing the core SDK traits; payloads cross
//! the boundary through `serde-wasm-bindgen`.

use adrelay_core::{
    AdMetadata, AdMetadataHandler, Error, PlaybackError, PlayerWrapper, Result, SdkApi,
    SdkConfig, SdkFactory, SkipAction, SourceDescriptor, WrapperCallbacks, WrapperEvent,
};
use async_trait::async_trait;
use js_sys::{Date, Function, Object, Promise, Reflect};
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Source fields the SDK exchanges as `Date` objects
const DATE_FIELDS: [&str; 2] = ["epgFrom", "epgTo"];

#[wasm_bindgen(module = "@tivio/sdk-js")]
extern "C" {
    #[wasm_bindgen(js_name = createTivio)]
    fn create_tivio() -> Function;
}

#[wasm_bindgen]
extern "C" {
    pub type JsApi;

    #[wasm_bindgen(method, getter)]
    fn error(this: &JsApi) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = createPlayerWrapper)]
    fn create_player_wrapper_fn(this: &JsApi) -> JsValue;

    pub type JsPlayerWrapper;

    #[wasm_bindgen(method, js_name = reportTimeProgress)]
    fn report_time_progress(this: &JsPlayerWrapper, ms: f64);

    #[wasm_bindgen(method, js_name = reportPlaybackEnded)]
    fn report_playback_ended(this: &JsPlayerWrapper);

    #[wasm_bindgen(method, js_name = reportError)]
    fn report_error(this: &JsPlayerWrapper, error: &js_sys::Error);

    #[wasm_bindgen(method, js_name = seekTo)]
    fn seek_to(this: &JsPlayerWrapper, ms: f64);

    #[wasm_bindgen(method, js_name = setSource)]
    fn set_source(this: &JsPlayerWrapper, source: &JsValue);

    #[wasm_bindgen(method, js_name = addEventListener)]
    fn add_event_listener(this: &JsPlayerWrapper, event: &str, handler: &Function);
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn is_absent(value: &JsValue) -> bool {
    value.is_null() || value.is_undefined()
}

/// Serialize a source with the SDK's field names and `Date` time bounds
pub fn source_to_js(source: &SourceDescriptor) -> std::result::Result<JsValue, JsValue> {
    let value = serde_wasm_bindgen::to_value(source)?;
    let bounds = [source.time_window_start, source.time_window_end];
    for (field, bound) in DATE_FIELDS.iter().zip(bounds) {
        if let Some(at) = bound {
            let date = Date::new(&JsValue::from_str(&at.to_rfc3339()));
            Reflect::set(&value, &JsValue::from_str(field), &date)?;
        }
    }
    Ok(value)
}

/// Decode a source coming from JS; `null`, `undefined` and malformed
/// values all yield `None`
pub fn source_from_js(value: &JsValue) -> Option<SourceDescriptor> {
    if is_absent(value) {
        return None;
    }

    let copy = Object::assign(&Object::new(), value.unchecked_ref());
    for field in DATE_FIELDS {
        let key = JsValue::from_str(field);
        if let Ok(date) = Reflect::get(&copy, &key).ok()?.dyn_into::<Date>() {
            Reflect::set(&copy, &key, &JsValue::from(date.to_iso_string())).ok()?;
        }
    }

    match serde_wasm_bindgen::from_value(copy.into()) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!(error = %e, "Malformed source descriptor, ignoring");
            None
        }
    }
}

fn ad_metadata_from_js(value: &JsValue) -> Option<AdMetadata> {
    if is_absent(value) {
        return None;
    }

    let mut metadata: AdMetadata = match serde_wasm_bindgen::from_value(value.clone()) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(error = %e, "Malformed ad metadata, treating as no ad");
            return None;
        }
    };

    if let Ok(skip) = Reflect::get(value, &JsValue::from_str("skip"))
        .and_then(|skip| skip.dyn_into::<Function>())
    {
        let this = value.clone();
        metadata.skip = SkipAction::new(move || {
            if let Err(e) = skip.call0(&this) {
                warn!(error = %describe(&e), "Skip action failed");
            }
        });
    }

    Some(metadata)
}

/// SDK entry point backed by `createTivio()`
#[derive(Debug, Default, Clone, Copy)]
pub struct TivioSdk;

#[async_trait(?Send)]
impl SdkFactory for TivioSdk {
    async fn init(&self, config: &SdkConfig) -> Result<Option<Rc<dyn SdkApi>>> {
        let conf = serde_wasm_bindgen::to_value(config)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let tivio = create_tivio();
        let pending = tivio
            .call1(&JsValue::NULL, &conf)
            .map_err(|e| Error::InitRejected(describe(&e)))?;

        let api = JsFuture::from(Promise::resolve(&pending))
            .await
            .map_err(|e| Error::InitRejected(describe(&e)))?;
        debug!(api = ?api, "SDK API received");

        if is_absent(&api) {
            return Ok(None);
        }
        Ok(Some(Rc::new(JsSdkApi {
            api: api.unchecked_into(),
        })))
    }
}

struct JsSdkApi {
    api: JsApi,
}

impl SdkApi for JsSdkApi {
    fn init_error(&self) -> Option<String> {
        let error = self.api.error();
        (!is_absent(&error)).then(|| describe(&error))
    }

    fn create_player_wrapper(
        &self,
        callbacks: Rc<dyn WrapperCallbacks>,
    ) -> Option<Rc<dyn PlayerWrapper>> {
        let create = self.api.create_player_wrapper_fn().dyn_into::<Function>().ok()?;

        let target = match callbacks_object(callbacks) {
            Ok(target) => target,
            Err(e) => {
                warn!(error = %describe(&e), "Failed to build wrapper callbacks");
                return None;
            }
        };

        match create.call1(&self.api, &target) {
            Ok(wrapper) if !is_absent(&wrapper) => {
                info!("Player wrapper created");
                Some(Rc::new(JsWrapperHandle {
                    inner: wrapper.unchecked_into(),
                }))
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %describe(&e), "createPlayerWrapper threw");
                None
            }
        }
    }
}

/// `{ setSource, seekTo }` object the SDK calls back into
fn callbacks_object(callbacks: Rc<dyn WrapperCallbacks>) -> std::result::Result<Object, JsValue> {
    let target = Object::new();

    let on_source = Rc::clone(&callbacks);
    let set_source = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
        on_source.set_source(source_from_js(&value));
    });
    Reflect::set(&target, &JsValue::from_str("setSource"), set_source.as_ref())?;
    set_source.forget();

    let seek_to = Closure::<dyn Fn(f64)>::new(move |ms: f64| {
        callbacks.seek_to(ms);
    });
    Reflect::set(&target, &JsValue::from_str("seekTo"), seek_to.as_ref())?;
    seek_to.forget();

    Ok(target)
}

struct JsWrapperHandle {
    inner: JsPlayerWrapper,
}

impl PlayerWrapper for JsWrapperHandle {
    fn report_time_progress(&self, ms: f64) {
        self.inner.report_time_progress(ms);
    }

    fn report_playback_ended(&self) {
        self.inner.report_playback_ended();
    }

    fn report_error(&self, error: &PlaybackError) {
        self.inner.report_error(&js_sys::Error::new(error.message()));
    }

    fn seek_to(&self, ms: f64) {
        self.inner.seek_to(ms);
    }

    fn set_source(&self, source: Option<SourceDescriptor>) {
        let value = match source.as_ref().map(source_to_js).transpose() {
            Ok(value) => value.unwrap_or(JsValue::NULL),
            Err(e) => {
                warn!(error = %describe(&e), "Failed to serialize source, dropping");
                return;
            }
        };
        self.inner.set_source(&value);
    }

    fn add_event_listener(&self, event: WrapperEvent, handler: AdMetadataHandler) {
        let listener = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            handler(ad_metadata_from_js(&value));
        });
        self.inner
            .add_event_listener(event.as_str(), listener.as_ref().unchecked_ref());
        listener.forget();
    }
}
