// ============================================================================
// THEME WIDGET - Preferencia claro/oscuro persistida
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::config::THEME_STORAGE_KEY;
use crate::dom::{document, get_element_by_id, on_click};
use crate::utils::storage::{load_string_pref, save_string_pref};

pub const DEFAULT_THEME: &str = "light";

/// Tema siguiente al alternar. Cualquier valor distinto de "dark"
/// (incluido un valor corrupto en storage) alterna hacia "dark".
pub fn next_theme(current: Option<&str>) -> &'static str {
    if current == Some("dark") {
        "light"
    } else {
        "dark"
    }
}

fn set_document_theme(theme: &str) {
    if let Some(root) = document().and_then(|doc| doc.document_element()) {
        let _ = root.set_attribute("data-theme", theme);
    }
}

fn current_document_theme() -> Option<String> {
    document()
        .and_then(|doc| doc.document_element())
        .and_then(|root| root.get_attribute("data-theme"))
}

/// Re-aplicar el tema guardado. Se llama antes de montar cualquier otro
/// componente para que el primer paint ya salga con el tema correcto.
pub fn apply_stored_theme() {
    let theme = load_string_pref(THEME_STORAGE_KEY).unwrap_or_else(|| DEFAULT_THEME.to_string());
    set_document_theme(&theme);
}

/// Atar el toggle si la página lo tiene.
pub fn bind_theme_toggle() -> Result<(), JsValue> {
    let Some(toggle) = get_element_by_id("darkModeToggle") else {
        return Ok(());
    };

    on_click(&toggle, move |_| {
        let current = current_document_theme();
        let next = next_theme(current.as_deref());
        set_document_theme(next);
        if let Err(error) = save_string_pref(THEME_STORAGE_KEY, next) {
            log::warn!("⚠️ No se pudo persistir el tema: {}", error);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alterna_entre_claro_y_oscuro() {
        assert_eq!(next_theme(Some("dark")), "light");
        assert_eq!(next_theme(Some("light")), "dark");
    }

    #[test]
    fn valores_desconocidos_alternan_hacia_oscuro() {
        assert_eq!(next_theme(None), "dark");
        assert_eq!(next_theme(Some("solarized")), "dark");
    }
}
