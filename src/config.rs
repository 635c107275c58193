// ============================================================================
// CONFIG - Configuración en tiempo de compilación y por página
// ============================================================================

use crate::dom::get_element_by_id;

/// URL base del API del planificador.
/// Configurada en tiempo de compilación:
/// - Por defecto: vacía (rutas relativas al mismo origen)
/// - Despliegue separado: via API_BASE_URL env var (ver build.rs / .env)
pub const API_BASE_URL: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => "",
};

pub const GENERATE_PLAN_PATH: &str = "/api/generate-plan/";
pub const SAVE_PLAN_PATH: &str = "/api/save-plan/";
pub const SAVE_PLACE_PATH: &str = "/api/save-place/";
pub const LOGIN_PATH: &str = "/auth/login/";

/// Clave de localStorage para la preferencia de tema.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Cookie y header del token anti-CSRF (convención del backend Django).
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

pub fn like_path(plan_id: &str) -> String {
    format!("/plan/{}/like", plan_id)
}

pub fn toggle_public_path(plan_id: &str) -> String {
    format!("/plan/{}/toggle-public", plan_id)
}

/// Variantes de la página de generación: una sola máquina de estados
/// parametrizada por los campos opcionales presentes en el markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    pub with_geolocation: bool,
    pub with_sharing_toggle: bool,
}

impl PageConfig {
    /// Detectar la variante según los campos ocultos que el servidor renderizó.
    pub fn detect() -> Self {
        Self {
            with_geolocation: get_element_by_id("lat").is_some(),
            with_sharing_toggle: get_element_by_id("isShared").is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_path_interpola_el_id() {
        assert_eq!(like_path("42"), "/plan/42/like");
    }

    #[test]
    fn toggle_public_path_interpola_el_id() {
        assert_eq!(toggle_public_path("abc-1"), "/plan/abc-1/toggle-public");
    }
}
