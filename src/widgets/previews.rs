// ============================================================================
// PREVIEWS WIDGET - Previsualización de avatar y portada
// ============================================================================
// Lee el archivo elegido con FileReader y pinta el data URL sin esperar
// al upload.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader, HtmlElement, HtmlImageElement, HtmlInputElement, ProgressEvent};

use crate::dom::{add_class, get_element_by_id, on_change, remove_class};

pub fn mount_previews() -> Result<(), JsValue> {
    bind_avatar_preview()?;
    bind_cover_preview()?;
    Ok(())
}

fn bind_avatar_preview() -> Result<(), JsValue> {
    let Some(input_el) = get_element_by_id("id_avatar") else {
        return Ok(());
    };
    let Some(preview_el) = get_element_by_id("avatarPreview") else {
        return Ok(());
    };
    let Some(input) = input_el.dyn_ref::<HtmlInputElement>().cloned() else {
        return Ok(());
    };
    let fallback_el = get_element_by_id("avatarFallback");

    on_change(&input_el, move |_| {
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let preview_el = preview_el.clone();
        let fallback_el = fallback_el.clone();
        read_as_data_url(&file, move |data_url| {
            if let Some(image) = preview_el.dyn_ref::<HtmlImageElement>() {
                image.set_src(&data_url);
            }
            let _ = remove_class(&preview_el, "d-none");
            if let Some(fallback) = &fallback_el {
                let _ = add_class(fallback, "d-none");
            }
        });
    })
}

fn bind_cover_preview() -> Result<(), JsValue> {
    let Some(input_el) = get_element_by_id("id_cover") else {
        return Ok(());
    };
    let Some(preview_el) = get_element_by_id("coverPreview") else {
        return Ok(());
    };
    let Some(input) = input_el.dyn_ref::<HtmlInputElement>().cloned() else {
        return Ok(());
    };

    on_change(&input_el, move |_| {
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let preview_el = preview_el.clone();
        read_as_data_url(&file, move |data_url| {
            if let Some(cover) = preview_el.dyn_ref::<HtmlElement>() {
                let _ = cover
                    .style()
                    .set_property("background-image", &format!("url('{}')", data_url));
            }
        });
    })
}

/// Leer un archivo como data URL y entregar el resultado al callback.
fn read_as_data_url<F>(file: &File, on_loaded: F)
where
    F: FnOnce(String) + 'static,
{
    let Ok(reader) = FileReader::new() else {
        log::warn!("⚠️ FileReader no disponible");
        return;
    };

    let reader_for_result = reader.clone();
    let onload = Closure::once(move |_event: ProgressEvent| {
        if let Ok(result) = reader_for_result.result() {
            if let Some(data_url) = result.as_string() {
                on_loaded(data_url);
            }
        }
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    if let Err(error) = reader.read_as_data_url(file) {
        log::warn!("⚠️ No se pudo leer el archivo: {:?}", error);
    }
}
