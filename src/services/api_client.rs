// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP.
// Toda petición es POST con el header anti-CSRF y credenciales same-origin.
// ============================================================================

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::config::{
    like_path, toggle_public_path, API_BASE_URL, CSRF_HEADER_NAME, GENERATE_PLAN_PATH,
    SAVE_PLACE_PATH, SAVE_PLAN_PATH,
};
use crate::models::{ParsedRequest, Place, PlanResponse, PromptRequest, TimeWindow};
use crate::services::csrf::csrf_token;

/// Taxonomía de errores del pipeline. `Validation` nunca llega a la red;
/// `AuthRequired` dispara navegación al login en las acciones de guardado.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("error de transporte: {0}")]
    Transport(String),
    #[error("{0}")]
    Service(String),
    #[error("se requiere iniciar sesión")]
    AuthRequired,
}

impl ApiError {
    /// Mensaje visible para el usuario. Los errores de transporte se
    /// sustituyen por el fallback genérico de la operación; los del
    /// servidor se muestran tal cual.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(message) | ApiError::Service(message) => message.clone(),
            ApiError::Transport(_) | ApiError::AuthRequired => fallback.to_string(),
        }
    }
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Generar un plan a partir del prompt (y geolocalización opcional)
    pub async fn generate_plan(&self, request: &PromptRequest) -> Result<PlanResponse, ApiError> {
        log::info!("🧭 Generando plan ({} caracteres de prompt)", request.prompt.len());
        self.post_json(GENERATE_PLAN_PATH, request).await
    }

    /// Guardar el plan completo. El payload es la última respuesta de
    /// generación extendida con título, ciudad y visibilidad.
    pub async fn save_plan(&self, payload: &serde_json::Value) -> Result<SaveResponse, ApiError> {
        log::info!("💾 Guardando plan completo");
        self.post_json(SAVE_PLAN_PATH, payload).await
    }

    /// Guardar un solo sitio de una franja
    pub async fn save_place(&self, request: &SavePlaceRequest<'_>) -> Result<SaveResponse, ApiError> {
        log::info!("💾 Guardando sitio: {}", request.place.name);
        self.post_json(SAVE_PLACE_PATH, request).await
    }

    /// Alternar "me gusta" de un plan existente
    pub async fn toggle_like(&self, plan_id: &str) -> Result<LikeResponse, ApiError> {
        log::info!("❤️ Alternando like del plan {}", plan_id);
        self.post_empty(&like_path(plan_id)).await
    }

    /// Alternar visibilidad pública de un plan existente
    pub async fn toggle_public(&self, plan_id: &str) -> Result<TogglePublicResponse, ApiError> {
        log::info!("🔗 Alternando visibilidad del plan {}", plan_id);
        self.post_empty(&toggle_public_path(plan_id)).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::post(&url)
            .credentials(RequestCredentials::SameOrigin)
            .header(CSRF_HEADER_NAME, &csrf_token())
            .json(body)
            .map_err(|e| ApiError::Transport(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Network error: {}", e)))?;
        Self::decode(response).await
    }

    async fn post_empty<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::post(&url)
            .credentials(RequestCredentials::SameOrigin)
            .header(CSRF_HEADER_NAME, &csrf_token())
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Network error: {}", e)))?;
        Self::decode(response).await
    }

    /// Mapear una respuesta HTTP a la taxonomía de errores:
    /// 403 → AuthRequired; no-2xx con `{error}` → Service; no-2xx sin
    /// cuerpo usable o cuerpo imparseable → Transport.
    async fn decode<T>(response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status == 403 {
            log::warn!("🔒 HTTP 403: sesión requerida");
            return Err(ApiError::AuthRequired);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Read error: {}", e)))?;

        if !response.ok() {
            if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
                if let Some(message) = body.error {
                    log::error!("❌ Error del servicio (HTTP {}): {}", status, message);
                    return Err(ApiError::Service(message));
                }
            }
            log::error!("❌ HTTP {} sin mensaje de error", status);
            return Err(ApiError::Transport(format!("HTTP {}", status)));
        }

        serde_json::from_str::<T>(&text)
            .map_err(|e| ApiError::Transport(format!("Parse error: {}", e)))
    }
}

/// Payload de guardado de un solo sitio
#[derive(Serialize)]
pub struct SavePlaceRequest<'a> {
    pub prompt: &'a str,
    pub window: &'a TimeWindow,
    pub place: &'a Place,
    pub parsed_request: &'a ParsedRequest,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveResponse {
    pub detail_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    pub likes_count: u32,
    pub liked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TogglePublicResponse {
    pub is_public: bool,
    pub share_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mensaje_del_servidor_se_muestra_verbatim() {
        let err = ApiError::Service("Ciudad fuera de cobertura".to_string());
        assert_eq!(
            err.user_message("No se pudo generar el plan."),
            "Ciudad fuera de cobertura"
        );
    }

    #[test]
    fn transporte_usa_el_fallback_generico() {
        let err = ApiError::Transport("HTTP 502".to_string());
        assert_eq!(
            err.user_message("No se pudo generar el plan."),
            "No se pudo generar el plan."
        );
    }

    #[test]
    fn payload_de_sitio_lleva_las_cuatro_claves() {
        let window = TimeWindow {
            label: "Noche".to_string(),
            start: "19:00".to_string(),
            end: "23:00".to_string(),
            places: vec![],
        };
        let place = Place {
            name: "Mirador".to_string(),
            rating: Some(4.7),
            user_ratings_total: None,
            photo_url: None,
            estimated_cost_cop: None,
            maps_url: "https://maps/x".to_string(),
            address: None,
        };
        let parsed = ParsedRequest {
            city: "Medellín".to_string(),
            mood: "romántico".to_string(),
            group: "pareja".to_string(),
            budget_cop: 150_000,
        };
        let request = SavePlaceRequest {
            prompt: "Plan romántico en Medellín",
            window: &window,
            place: &place,
            parsed_request: &parsed,
        };

        let value = serde_json::to_value(&request).expect("payload serializable");
        let object = value.as_object().expect("objeto JSON");
        assert!(object.contains_key("prompt"));
        assert!(object.contains_key("window"));
        assert!(object.contains_key("place"));
        assert!(object.contains_key("parsed_request"));
        assert_eq!(value["place"]["name"], "Mirador");
        assert_eq!(value["window"]["label"], "Noche");
    }
}
