// ============================================================================
// CSRF - Lectura del token anti-forgery desde las cookies
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::config::CSRF_COOKIE_NAME;
use crate::dom::document;

/// Extraer el valor de una cookie de un string `document.cookie` completo.
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

/// Leer el token anti-CSRF. Vacío si la cookie no existe (el backend
/// rechazará la petición mutante y la UI mostrará el error normal).
pub fn csrf_token() -> String {
    document()
        .and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
        .and_then(|doc| doc.cookie().ok())
        .and_then(|cookies| cookie_value(&cookies, CSRF_COOKIE_NAME))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encuentra_la_cookie_entre_varias() {
        let cookies = "sessionid=abc123; csrftoken=tok-456; lang=es";
        assert_eq!(cookie_value(cookies, "csrftoken"), Some("tok-456".to_string()));
    }

    #[test]
    fn ignora_prefijos_parciales() {
        let cookies = "xcsrftoken=malo; csrftoken=bueno";
        assert_eq!(cookie_value(cookies, "csrftoken"), Some("bueno".to_string()));
    }

    #[test]
    fn sin_cookie_devuelve_none() {
        assert_eq!(cookie_value("sessionid=abc", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }
}
