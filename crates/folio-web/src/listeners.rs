//! Window event listeners and the `requestAnimationFrame` loop.
//!
//! Every closure holds a shared handle to the [`Page`]; [`Listeners`]
//! owns the closures and detaches them on drop, which also breaks the
//! frame loop's self-reference.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_motion::input::InputEvent;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, MouseEvent, WheelEvent, Window};

use crate::dom::read_viewport;
use crate::Page;

type Handler = Closure<dyn FnMut(Event)>;
type FrameCallback = Closure<dyn FnMut(f64)>;

/// Maps a DOM event to an engine input.
type Mapper = fn(&Event, &Window) -> Option<InputEvent>;

const EVENTS: [(&str, Mapper); 7] = [
    ("mousemove", pointer_moved),
    ("scroll", scrolled),
    ("touchstart", touch),
    ("keydown", key_down),
    ("click", click),
    ("wheel", wheel),
    ("resize", resized),
];

fn pointer_moved(event: &Event, _: &Window) -> Option<InputEvent> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(InputEvent::PointerMoved {
        x: mouse.client_x() as f32,
        y: mouse.client_y() as f32,
    })
}

fn touch(_: &Event, _: &Window) -> Option<InputEvent> {
    Some(InputEvent::Touch)
}

fn key_down(_: &Event, _: &Window) -> Option<InputEvent> {
    Some(InputEvent::KeyDown)
}

fn click(_: &Event, _: &Window) -> Option<InputEvent> {
    Some(InputEvent::Click)
}

fn scrolled(_: &Event, window: &Window) -> Option<InputEvent> {
    let offset_y = window.scroll_y().ok()? as f32;
    Some(InputEvent::Scrolled { offset_y })
}

fn wheel(event: &Event, _: &Window) -> Option<InputEvent> {
    let wheel = event.dyn_ref::<WheelEvent>()?;
    Some(InputEvent::Wheel {
        delta: wheel.delta_y() as f32,
    })
}

fn resized(_: &Event, window: &Window) -> Option<InputEvent> {
    let viewport = read_viewport(window);
    Some(InputEvent::Resized {
        width: viewport.width,
        height: viewport.height,
    })
}

/// Attached listeners plus the running frame loop.
pub struct Listeners {
    window: Window,
    handlers: Vec<(&'static str, Handler)>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    request: Rc<Cell<Option<i32>>>,
}

impl Listeners {
    /// Listen for page input and start ticking `page` every frame.
    ///
    /// # Errors
    ///
    /// Fails if a listener cannot be added or no frame can be requested.
    pub fn attach(window: &Window, page: &Rc<RefCell<Page>>) -> Result<Self, JsValue> {
        let mut listeners = Self {
            window: window.clone(),
            handlers: Vec::with_capacity(EVENTS.len()),
            frame: Rc::new(RefCell::new(None)),
            request: Rc::new(Cell::new(None)),
        };

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        for (kind, map) in EVENTS {
            let page = Rc::clone(page);
            let target = window.clone();
            let handler = Handler::new(move |event: Event| {
                let Some(input) = map(&event, &target) else {
                    return;
                };
                if let Ok(mut page) = page.try_borrow_mut() {
                    page.input(input);
                }
            });
            window.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                handler.as_ref().unchecked_ref(),
                &options,
            )?;
            listeners.handlers.push((kind, handler));
        }

        listeners.start_loop(page)?;
        log::debug!("attached {} listeners", listeners.handlers.len());
        Ok(listeners)
    }

    fn start_loop(&self, page: &Rc<RefCell<Page>>) -> Result<(), JsValue> {
        let page = Rc::clone(page);
        let frame = Rc::clone(&self.frame);
        let request = Rc::clone(&self.request);
        let window = self.window.clone();
        let callback = FrameCallback::new(move |_timestamp: f64| {
            Page::tick(&page);
            if let Some(next) = frame.borrow().as_ref() {
                request.set(
                    window
                        .request_animation_frame(next.as_ref().unchecked_ref())
                        .ok(),
                );
            }
        });
        let first = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.request.set(Some(first));
        *self.frame.borrow_mut() = Some(callback);
        Ok(())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        if let Some(id) = self.request.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        drop(self.frame.borrow_mut().take());
        for (kind, handler) in self.handlers.drain(..) {
            let _ = self
                .window
                .remove_event_listener_with_callback(kind, handler.as_ref().unchecked_ref());
        }
    }
}
