#![cfg(target_arch = "wasm32")]

//! Browser tests for the DOM host. Run with `wasm-pack test --headless --firefox`.

use clbt_overlay::catalog::venue_registry;
use clbt_overlay::{InputEvent, OverlayCoordinator, SurfaceHost, SurfaceView};
use clbt_web::DomHost;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(id: &str) -> HtmlElement {
    let doc = document();
    if let Some(existing) = doc.get_element_by_id(id) {
        existing.remove();
    }
    let el: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    el.set_id(id);
    el.style().set_property("display", "none").unwrap();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

fn display(el: &HtmlElement) -> String {
    el.style().get_property_value("display").unwrap()
}

#[wasm_bindgen_test]
fn show_and_hide_follow_dom_contract() {
    let el = mount("testModal");
    let mut host = DomHost::new(document());

    assert!(host.has_element("testModal"));
    host.show("testModal", "flex");
    assert_eq!(display(&el), "flex");
    assert!(el.class_list().contains("active"));

    host.set_z_index("testModal", 1010);
    assert_eq!(el.style().get_property_value("z-index").unwrap(), "1010");

    host.hide("testModal");
    assert_eq!(display(&el), "none");
    assert!(!el.class_list().contains("active"));

    host.show("ghostModal", "flex");
    assert!(!host.has_element("ghostModal"));
}

#[wasm_bindgen_test]
fn scroll_lock_and_home_section() {
    let home = mount("testHome");
    let mut host = DomHost::new(document()).with_home_section(Some("testHome"));
    let body = document().body().unwrap();

    host.set_scroll_locked(true);
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "hidden");
    assert!(body.class_list().contains(DomHost::SCROLL_LOCK_CLASS));
    host.set_scroll_locked(false);
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");
    assert!(!body.class_list().contains(DomHost::SCROLL_LOCK_CLASS));

    host.set_home_visible(false);
    assert_eq!(display(&home), "none");
    host.set_home_visible(true);
    assert_eq!(display(&home), "");
}

#[wasm_bindgen_test]
fn view_containers_swap() {
    let list = mount("testList");
    let map = mount("testMap");
    let views = [
        SurfaceView::new("list", "testList"),
        SurfaceView::new("map", "testMap"),
    ];
    let mut host = DomHost::new(document());

    assert!(host.show_view("testOverlay", &views[1], &views));
    assert_eq!(display(&list), "none");
    assert_eq!(display(&map), "block");
    assert!(map.class_list().contains("active"));

    map.remove();
    assert!(!host.show_view("testOverlay", &views[0], &views));
}

#[wasm_bindgen_test]
fn coordinator_drives_the_document() {
    let registry = venue_registry().unwrap();
    let name = mount("nameModal");
    let area = mount("areaModal");
    let mut c = OverlayCoordinator::new(registry, DomHost::new(document()));

    assert!(c.open("nameModal"));
    assert_eq!(display(&name), "flex");
    assert!(c.open("areaModal"));
    assert_eq!(display(&name), "none");
    assert_eq!(display(&area), "flex");
    assert_eq!(area.style().get_property_value("z-index").unwrap(), "1000");

    assert_eq!(c.handle_input(&InputEvent::Escape), Some("areaModal"));
    assert_eq!(display(&area), "none");
    assert!(!c.scroll_locked());

    assert!(!c.open("breweryModal"), "no element mounted");
}
