//! DOM-backed media and presentation surfaces

use adrelay_core::{
    AdField, MediaEvent, MediaListener, MediaSurface, PresentationSurface, SkipControl,
    SKIP_CONTROL_ID,
};
use std::cell::RefCell;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlVideoElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// First `<video>` element of the page
pub fn find_video() -> Option<HtmlVideoElement> {
    document()?
        .get_elements_by_tag_name("video")
        .item(0)?
        .dyn_into::<HtmlVideoElement>()
        .ok()
}

/// Media surface over an `HtmlVideoElement`
pub struct VideoSurface {
    element: HtmlVideoElement,
}

impl VideoSurface {
    pub fn new(element: HtmlVideoElement) -> Self {
        Self { element }
    }
}

impl MediaSurface for VideoSurface {
    fn play(&self) {
        // Rejections (autoplay policy) surface as the element's own events
        if let Err(e) = self.element.play() {
            debug!(error = ?e, "play() threw");
        }
    }

    fn pause(&self) {
        if let Err(e) = self.element.pause() {
            debug!(error = ?e, "pause() threw");
        }
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&self, secs: f64) {
        self.element.set_current_time(secs);
    }

    fn clear_source(&self) {
        if let Err(e) = self.element.remove_attribute("src") {
            debug!(error = ?e, "Failed to remove src");
        }
    }

    fn set_source_uri(&self, uri: &str) {
        self.element.set_src(uri);
    }

    fn load(&self) {
        self.element.load();
    }

    fn add_listener(&self, event: MediaEvent, listener: MediaListener) {
        let closure = Closure::<dyn Fn()>::wrap(listener);
        if let Err(e) = self
            .element
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
        {
            warn!(%event, error = ?e, "Failed to add media listener");
            return;
        }
        // Lives for the page lifetime
        closure.forget();
    }
}

/// Ad panel elements, resolved by id
pub struct DomAdPanel {
    fields: Vec<(AdField, Option<HtmlElement>)>,
    skip: Option<HtmlButtonElement>,
    on_skip: RefCell<Option<Closure<dyn Fn()>>>,
}

impl DomAdPanel {
    pub fn lookup() -> Self {
        let document = document();
        let by_id = |id: &str| document.as_ref()?.get_element_by_id(id);

        let fields = AdField::ALL
            .iter()
            .map(|&field| {
                let element = by_id(field.element_id())
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                if element.is_none() {
                    warn!(id = field.element_id(), "Ad panel element missing");
                }
                (field, element)
            })
            .collect();

        let skip =
            by_id(SKIP_CONTROL_ID).and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        if skip.is_none() {
            warn!(id = SKIP_CONTROL_ID, "Skip button missing");
        }

        Self {
            fields,
            skip,
            on_skip: RefCell::new(None),
        }
    }
}

impl PresentationSurface for DomAdPanel {
    fn set_field(&self, field: AdField, text: &str) {
        let element = self
            .fields
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, el)| el.as_ref());
        if let Some(element) = element {
            element.set_text_content(Some(text));
        }
    }

    fn set_skip_control(&self, control: &SkipControl) {
        let Some(button) = &self.skip else {
            return;
        };

        let action = control.action.clone();
        let handler = Closure::<dyn Fn()>::new(move || action.trigger());
        button.set_onclick(Some(handler.as_ref().unchecked_ref()));
        button.set_disabled(!control.enabled);

        // The previous handler is no longer referenced by the button
        self.on_skip.replace(Some(handler));
    }
}
