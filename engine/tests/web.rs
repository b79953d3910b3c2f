#![cfg(target_arch = "wasm32")]

use ambient_backdrop::{AmbientBackground, GradientBackground};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap().dyn_into::<web_sys::HtmlCanvasElement>().unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn mounts_and_unmounts() {
    let mut background = AmbientBackground::new(canvas()).unwrap();
    assert!(background.is_running());
    background.unmount();
    assert!(!background.is_running());
}

#[wasm_bindgen_test]
fn canvas_is_pinned_behind_content() {
    let canvas = canvas();
    let _background = AmbientBackground::new(canvas.clone()).unwrap();
    let style = canvas.style();
    assert_eq!(style.get_property_value("pointer-events").unwrap(), "none");
    assert_eq!(style.get_property_value("z-index").unwrap(), "-1");
}

#[wasm_bindgen_test]
fn rejects_bad_options() {
    let options = js_sys::JSON::parse(r#"{"dotHue": {"min": 300, "max": 100}}"#).unwrap();
    assert!(AmbientBackground::with_options(canvas(), options, Some(1)).is_err());
}

#[wasm_bindgen_test]
fn attach_cleans_up_its_canvas() {
    let document = web_sys::window().unwrap().document().unwrap();
    let before = document.get_elements_by_tag_name("canvas").length();
    let mut orbs = GradientBackground::attach().unwrap();
    assert!(orbs.is_running());
    assert_eq!(document.get_elements_by_tag_name("canvas").length(), before + 1);
    orbs.unmount();
    assert_eq!(document.get_elements_by_tag_name("canvas").length(), before);
}

#[wasm_bindgen_test]
fn missing_2d_context_leaves_background_off() {
    let canvas = canvas();
    // a canvas bound to another context kind hands out no 2d context
    let _ = canvas.get_context("bitmaprenderer");
    assert!(canvas.get_context("2d").unwrap().is_none());

    let dots = AmbientBackground::new(canvas.clone()).unwrap();
    assert!(!dots.is_running());
    let orbs = GradientBackground::new(canvas.clone()).unwrap();
    assert!(!orbs.is_running());
    assert!(canvas.is_connected());
}

#[wasm_bindgen_test]
fn failed_attach_removes_its_canvas() {
    let document = web_sys::window().unwrap().document().unwrap();
    let before = document.get_elements_by_tag_name("canvas").length();
    let options = js_sys::JSON::parse(r#"{"linkDistance": -1}"#).unwrap();
    assert!(AmbientBackground::attach_with_options(options, Some(1)).is_err());
    assert_eq!(document.get_elements_by_tag_name("canvas").length(), before);
}
