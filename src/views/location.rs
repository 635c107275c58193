// ============================================================================
// LOCATION VIEW - Resolución de ubicación al montar la página
// ============================================================================
// Lookup del dispositivo de un solo disparo con fallback manual. La
// confirmación manual es terminal: sobrescribe la ciudad y cierra el
// modal sin re-disparar el lookup.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

use crate::dom::{add_class, get_element_by_id, on_click, remove_class, set_text_content};
use crate::services::geolocation::{request_device_location, DeviceCoords};

pub const STATUS_DETECTED: &str = "Ubicación detectada (aprox).";
pub const STATUS_DENIED: &str = "Sin permisos GPS. Elige tu ciudad manualmente.";
pub const STATUS_UNSUPPORTED: &str = "Este dispositivo no soporta GPS.";

pub struct LocationView;

impl LocationView {
    pub fn mount() -> Result<(), JsValue> {
        // El campo lat es el ancla: sin él, la página no usa geolocalización
        let Some(lat_el) = get_element_by_id("lat") else {
            log::debug!("🧩 Location no montada: la página no lleva geolocalización");
            return Ok(());
        };

        let lng_el = get_element_by_id("lng");
        let city_el = get_element_by_id("cityName");
        let status_el = get_element_by_id("locationStatus");
        let modal_el = get_element_by_id("manualCityModal");
        let save_manual_btn = get_element_by_id("saveManualCity");
        let manual_select = get_element_by_id("manualCity");

        // Confirmación manual: terminal, dirigida por el usuario
        if let (Some(save_btn), Some(select_el)) = (&save_manual_btn, &manual_select) {
            let select_el = select_el.clone();
            let city_el = city_el.clone();
            let status_el = status_el.clone();
            let modal_el = modal_el.clone();

            on_click(save_btn, move |_| {
                let Some(label) = selected_option_label(&select_el) else {
                    return;
                };
                if let Some(city) = &city_el {
                    set_input_value(city, &label);
                }
                set_status(&status_el, &format!("Ubicación manual: {}", label));
                hide_modal(&modal_el);
                log::info!("🏙️ Ciudad manual confirmada: {}", label);
            })?;
        }

        // Lookup del dispositivo: una sola vez, sin reintentos
        let lookup = {
            let status_on_success = status_el.clone();
            let status_on_failure = status_el.clone();
            let modal_on_failure = modal_el.clone();

            request_device_location(
                move |coords: DeviceCoords| {
                    set_input_value(&lat_el, &coords.latitude.to_string());
                    if let Some(lng) = &lng_el {
                        set_input_value(lng, &coords.longitude.to_string());
                    }
                    set_status(&status_on_success, STATUS_DETECTED);
                },
                move || {
                    set_status(&status_on_failure, STATUS_DENIED);
                    show_modal(&modal_on_failure);
                },
            )
        };

        if lookup.is_err() {
            set_status(&status_el, STATUS_UNSUPPORTED);
            show_modal(&modal_el);
        }

        Ok(())
    }
}

/// Etiqueta visible de la opción seleccionada del select manual.
fn selected_option_label(select_el: &Element) -> Option<String> {
    let select = select_el.dyn_ref::<HtmlSelectElement>()?;
    let index = select.selected_index();
    if index < 0 {
        return None;
    }
    let option = select.options().item(index as u32)?;
    let option = option.dyn_ref::<web_sys::HtmlOptionElement>()?;
    Some(option.text())
}

fn set_input_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    }
}

fn set_status(status_el: &Option<Element>, text: &str) {
    if let Some(status) = status_el {
        set_text_content(status, text);
    }
}

fn show_modal(modal_el: &Option<Element>) {
    if let Some(modal) = modal_el {
        let _ = add_class(modal, "show");
    }
}

fn hide_modal(modal_el: &Option<Element>) {
    if let Some(modal) = modal_el {
        let _ = remove_class(modal, "show");
    }
}
