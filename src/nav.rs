use crate::dom;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vandal_core::constants::{CLASS_ACTIVE, CLASS_SCROLLED};
use vandal_core::navigation::{
    active_section, nav_link_selector, navbar_scrolled, FrameGate, MenuState, SectionBounds,
};
use wasm_bindgen::JsCast;
use web_sys as web;

struct Menu {
    document: web::Document,
    toggle: web::Element,
    panel: web::Element,
    state: Cell<MenuState>,
}

impl Menu {
    fn apply(&self, state: MenuState) {
        self.state.set(state);
        dom::set_class(&self.toggle, CLASS_ACTIVE, state.is_open());
        dom::set_class(&self.panel, CLASS_ACTIVE, state.is_open());
        dom::set_body_overflow(&self.document, state.body_overflow());
    }

    fn toggle(&self) {
        let mut state = self.state.get();
        state.toggle();
        self.apply(state);
    }

    fn close(&self) {
        let mut state = self.state.get();
        state.close();
        self.apply(state);
    }

    // True when `target` is inside neither the menu nor its toggle.
    fn is_outside(&self, target: Option<web::EventTarget>) -> bool {
        let node = target.and_then(|t| t.dyn_into::<web::Node>().ok());
        let node = node.as_ref();
        !self.panel.contains(node) && !self.toggle.contains(node)
    }
}

/// Mobile menu toggle plus active-link highlighting.
pub fn init(document: &web::Document) {
    let links = dom::query_all(document, ".nav-link");
    wire_menu(document, &links);
    wire_active_link(document, links);
}

fn wire_menu(document: &web::Document, links: &[web::Element]) {
    let (Some(toggle), Some(panel)) = (
        dom::query(document, ".nav-toggle"),
        dom::query(document, ".nav-menu"),
    ) else {
        return;
    };
    let menu = Rc::new(Menu {
        document: document.clone(),
        toggle,
        panel,
        state: Cell::new(MenuState::default()),
    });

    let m = menu.clone();
    dom::listen(&menu.toggle, "click", move |_| m.toggle());

    for link in links {
        let m = menu.clone();
        dom::listen(link, "click", move |_| m.close());
    }

    let m = menu.clone();
    dom::listen(document, "click", move |ev| {
        if m.state.get().is_open() && m.is_outside(ev.target()) {
            m.close();
        }
    });
}

fn wire_active_link(document: &web::Document, links: Vec<web::Element>) {
    let sections: Vec<web::HtmlElement> = dom::query_all(document, "section[id]")
        .into_iter()
        .filter_map(|el| el.dyn_into::<web::HtmlElement>().ok())
        .collect();
    if sections.is_empty() {
        return;
    }

    let doc = document.clone();
    let update = Rc::new(move || {
        let bounds: Vec<SectionBounds> = sections
            .iter()
            .map(|s| SectionBounds {
                id: s.id(),
                top: s.offset_top() as f64,
                height: s.offset_height() as f64,
            })
            .collect();
        let Some(id) = active_section(dom::scroll_y(), &bounds) else {
            return;
        };
        for link in &links {
            dom::remove_class(link, CLASS_ACTIVE);
        }
        if let Some(link) = dom::query(&doc, &nav_link_selector(id)) {
            dom::add_class(&link, CLASS_ACTIVE);
        }
    });

    if let Some(window) = web::window() {
        let u = update.clone();
        dom::listen(&window, "scroll", move |_| (*u)());
    }
    (*update)();
}

/// Toggle `.navbar.scrolled`, at most once per animation frame.
pub fn init_scroll_effects(document: &web::Document) {
    let (Some(navbar), Some(window)) = (dom::query(document, ".navbar"), web::window()) else {
        return;
    };
    let gate = Rc::new(RefCell::new(FrameGate::default()));
    dom::listen(&window, "scroll", move |_| {
        if !gate.borrow_mut().request() {
            return;
        }
        let navbar = navbar.clone();
        let gate = gate.clone();
        dom::request_animation_frame(move || {
            dom::set_class(&navbar, CLASS_SCROLLED, navbar_scrolled(dom::scroll_y()));
            gate.borrow_mut().release();
        });
    });
}
