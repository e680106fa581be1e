//! Browser adapter for folio-motion.
//!
//! Compiled to WASM and loaded by the portfolio page. On mount it scans the
//! document for motion attributes, feeds window input to the
//! [`Choreographer`], ticks it from `requestAnimationFrame`, and writes the
//! result to inline styles through [`DomSurface`].
//!
//! Every [`ChoreographyEvent`] is re-dispatched on `window` as a
//! `folio-motion` `CustomEvent` whose detail is the event as JSON, so page
//! scripts can react to the turn-on or idle state.

pub mod dom;
pub mod listeners;
pub mod scan;

use std::cell::RefCell;
use std::rc::Rc;

use folio_motion::choreographer::{ChoreographyEvent, Choreographer};
use folio_motion::effects::TurnOnEvent;
use folio_motion::input::InputEvent;
use folio_motion::markup::HERO_COMPLETE;
use folio_motion::options::MotionOptions;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, HtmlElement, Window};
use web_time::Instant;

pub use dom::DomSurface;
use listeners::Listeners;

/// Name of the `CustomEvent` carrying choreography events.
pub const EVENT_NAME: &str = "folio-motion";

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Install the panic hook and route `log` to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Sends choreography events to the page.
///
/// Kept apart from [`Page`] so events are dispatched after the page borrow
/// ends: page listeners may call straight back into [`FolioPage`].
#[derive(Clone)]
pub struct Publisher {
    window: Window,
    hero_root: Option<HtmlElement>,
}

impl Publisher {
    fn publish(&self, events: &[ChoreographyEvent]) {
        for event in events {
            match event {
                ChoreographyEvent::TurnOn(TurnOnEvent::Completed) => self.mark_complete(true),
                ChoreographyEvent::TurnOn(TurnOnEvent::Started) => self.mark_complete(false),
                _ => {}
            }
            self.dispatch(event);
        }
    }

    fn mark_complete(&self, complete: bool) {
        let Some(root) = &self.hero_root else {
            return;
        };
        let _ = if complete {
            root.set_attribute(HERO_COMPLETE, "true")
        } else {
            root.remove_attribute(HERO_COMPLETE)
        };
    }

    fn dispatch(&self, event: &ChoreographyEvent) {
        let Ok(json) = serde_json::to_string(event) else {
            return;
        };
        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(&json));
        match CustomEvent::new_with_event_init_dict(EVENT_NAME, &init) {
            Ok(custom) => {
                let _ = self.window.dispatch_event(&custom);
            }
            Err(e) => log::warn!("could not create {EVENT_NAME} event: {e:?}"),
        }
    }
}

/// Everything the listeners share.
pub struct Page {
    choreographer: Choreographer,
    surface: DomSurface,
    publisher: Publisher,
}

impl Page {
    fn input(&mut self, event: InputEvent) {
        if matches!(event, InputEvent::Resized { .. }) {
            let _ = self.surface.refresh_viewport();
        }
        self.choreographer.handle_input(event, Instant::now());
    }

    /// Run `step` on the choreographer, then publish its events once the
    /// page is released. Skipped if the page is already borrowed.
    fn drive<F>(page: &RefCell<Self>, step: F)
    where
        F: FnOnce(&mut Choreographer, &mut DomSurface) -> Vec<ChoreographyEvent>,
    {
        let Ok(mut guard) = page.try_borrow_mut() else {
            log::debug!("page busy, skipping re-entrant call");
            return;
        };
        let Self {
            choreographer,
            surface,
            publisher,
        } = &mut *guard;
        let events = step(choreographer, surface);
        let publisher = publisher.clone();
        drop(guard);
        publisher.publish(&events);
    }

    fn tick(page: &RefCell<Self>) {
        Self::drive(page, |choreographer, surface| {
            choreographer.frame(Instant::now(), surface).events
        });
    }
}

/// A mounted page. Dropping it without [`unmount`](Self::unmount) still
/// detaches the listeners and stops the frame loop, but leaves every
/// element's inline styles as they are.
#[wasm_bindgen]
pub struct FolioPage {
    page: Rc<RefCell<Page>>,
    listeners: Listeners,
}

#[wasm_bindgen]
impl FolioPage {
    /// Scan the document and start animating. `options` is a TOML
    /// document; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails without a window or document, on malformed options, or if
    /// the listeners cannot be attached.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::needless_pass_by_value)] // wasm-bindgen passes owned strings
    pub fn mount(options: Option<String>) -> Result<FolioPage, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let mut options = match options.as_deref() {
            Some(toml) => MotionOptions::from_toml(toml)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => MotionOptions::default(),
        };
        options.page.reduced_motion |= prefers_reduced_motion(&window);

        let mut surface = DomSurface::new(window.clone());
        let layout = scan::scan(&document, &mut surface)?;
        let publisher = Publisher {
            window: window.clone(),
            hero_root: layout
                .turn_on
                .and_then(|hero| surface.element(hero.root).cloned()),
        };

        let mut choreographer = Choreographer::new(options);
        let events = choreographer.mount(&layout, Instant::now(), &mut surface);
        let page = Rc::new(RefCell::new(Page {
            choreographer,
            surface,
            publisher: publisher.clone(),
        }));
        publisher.publish(&events);

        let listeners = Listeners::attach(&window, &page)?;
        Ok(Self { page, listeners })
    }

    /// Jump the hero turn-on to its end.
    #[wasm_bindgen(js_name = skipIntro)]
    pub fn skip_intro(&self) {
        Page::drive(&self.page, |choreographer, surface| {
            choreographer.skip_intro(Instant::now(), surface)
        });
    }

    /// Play the hero turn-on again. `false` if the page has no hero.
    #[wasm_bindgen(js_name = replayIntro)]
    #[must_use]
    pub fn replay_intro(&self) -> bool {
        let Ok(mut guard) = self.page.try_borrow_mut() else {
            return false;
        };
        let Page {
            choreographer,
            surface,
            publisher,
        } = &mut *guard;
        let replayed = choreographer.replay_intro(Instant::now(), surface);
        if replayed {
            publisher.mark_complete(false);
        }
        replayed
    }

    /// Whether the visitor is currently idle.
    #[wasm_bindgen(js_name = isIdle)]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.page
            .try_borrow()
            .is_ok_and(|page| page.choreographer.is_idle())
    }

    /// Detach every listener, stop the frame loop and cancel all motion.
    pub fn unmount(self) {
        let Self { page, listeners } = self;
        drop(listeners);
        let Ok(mut page) = page.try_borrow_mut() else {
            return;
        };
        page.choreographer.unmount();
        page.surface.clear();
        log::info!("page unmounted");
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}
