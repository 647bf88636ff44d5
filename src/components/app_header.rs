//! Header Chrome
//!
//! App title plus the "New List" and "Clear Storage" buttons, built with
//! the element factory.

use wasm_bindgen::JsValue;

use crate::context::AppContext;
use crate::dom::ElementSpec;

/// Populate the page header
pub fn mount_header(header: &web_sys::Node, ctx: AppContext) -> Result<(), JsValue> {
    ElementSpec::new("h1").content("ToDo App").build(header)?;

    ElementSpec::new("button")
        .classes(["button", "button--add-list"])
        .content("New List")
        .on("click", move |_| ctx.new_list())
        .build(header)?;

    ElementSpec::new("button")
        .classes(["button", "button--clear-storage"])
        .content("Clear Storage")
        .on("click", move |_| ctx.clear_storage())
        .build(header)?;

    Ok(())
}
