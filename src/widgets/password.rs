// ============================================================================
// PASSWORD WIDGET - Toggle de visibilidad de contraseña
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{get_attribute, get_element_by_id, on_click, query_selector_all, set_text_content};

pub const VISIBLE_ICON: &str = "🙈";
pub const HIDDEN_ICON: &str = "👁";

/// Montar todos los toggles `[data-password-toggle]` de la página.
pub fn mount_password_toggles() -> Result<(), JsValue> {
    for toggle in query_selector_all("[data-password-toggle]")? {
        bind_toggle(&toggle)?;
    }
    Ok(())
}

fn bind_toggle(toggle: &Element) -> Result<(), JsValue> {
    let Some(target_id) = get_attribute(toggle, "data-password-toggle") else {
        return Ok(());
    };
    let Some(input) = get_element_by_id(&target_id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };

    let toggle_el = toggle.clone();
    on_click(toggle, move |_| {
        let revealed = input.type_() == "password";
        input.set_type(if revealed { "text" } else { "password" });
        set_text_content(&toggle_el, if revealed { VISIBLE_ICON } else { HIDDEN_ICON });
    })
}
