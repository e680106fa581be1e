//! Finds every element carrying a motion attribute.

use folio_motion::choreographer::PageLayout;
use folio_motion::markup::{
    AttributeSource, ANIMATE_DIRECTION, FLOAT, HERO_BACKGROUND, HERO_CONTENT,
    HERO_ROOT, IDLE_ELEMENT, LAYER, PARALLAX,
};
use folio_motion::surface::ElementId;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::dom::DomSurface;

/// Attributes that make an element worth tracking.
const MARKERS: [&str; 8] = [
    ANIMATE_DIRECTION,
    PARALLAX,
    FLOAT,
    LAYER,
    IDLE_ELEMENT,
    HERO_ROOT,
    HERO_BACKGROUND,
    HERO_CONTENT,
];

/// Attribute access for a DOM element.
pub struct ElementAttributes<'a>(pub &'a Element);

impl AttributeSource for ElementAttributes<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

fn selector() -> String {
    MARKERS
        .iter()
        .map(|attr| format!("[{attr}]"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Query the document, register every match with `surface` (ids follow
/// document order) and build the page layout.
///
/// # Errors
///
/// Fails if the selector query throws.
pub fn scan(document: &Document, surface: &mut DomSurface) -> Result<PageLayout, JsValue> {
    let nodes = document.query_selector_all(&selector())?;
    let mut found = Vec::new();
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else {
            continue;
        };
        let Ok(element) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        let id = ElementId(i);
        surface.insert(id, element.clone());
        found.push((id, element));
    }

    let attrs: Vec<_> = found
        .iter()
        .map(|(id, element)| (*id, ElementAttributes(element)))
        .collect();
    let layout = PageLayout::scan(attrs.iter().map(|(id, a)| (*id, a)));
    log::debug!(
        "scanned {} marked elements, {} animated",
        found.len(),
        layout.elements.len()
    );
    Ok(layout)
}
