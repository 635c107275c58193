// ============================================================================
// SAVE VIEWMODEL - Orquestación de guardado de planes y sitios
// ============================================================================
// Una petición mutante autenticada por intento. El resultado se reduce a
// SaveOutcome y la vista lo aplica al control exactamente una vez.
// ============================================================================

use crate::config::LOGIN_PATH;
use crate::models::{PlanResponse, SaveOutcome};
use crate::services::api_client::SavePlaceRequest;
use crate::services::{ApiClient, ApiError};

pub const SAVE_FALLBACK_MESSAGE: &str = "No se pudo guardar.";

#[derive(Clone)]
pub struct SaveViewModel {
    api: ApiClient,
}

impl SaveViewModel {
    pub fn new() -> Self {
        Self {
            api: ApiClient::new(),
        }
    }

    /// Guardar el plan completo: la última respuesta de generación
    /// extendida con título, ciudad, país y visibilidad.
    pub async fn save_plan(&self, plan: &PlanResponse, shared: bool) -> SaveOutcome {
        let payload = save_plan_payload(plan, shared);
        outcome_from(self.api.save_plan(&payload).await)
    }

    /// Guardar un solo sitio, identificado por índices dentro del plan.
    pub async fn save_place(
        &self,
        plan: &PlanResponse,
        window_index: usize,
        place_index: usize,
    ) -> SaveOutcome {
        let Some(window) = plan.time_windows.get(window_index) else {
            return SaveOutcome::Rejected(SAVE_FALLBACK_MESSAGE.to_string());
        };
        let Some(place) = window.places.get(place_index) else {
            return SaveOutcome::Rejected(SAVE_FALLBACK_MESSAGE.to_string());
        };

        let request = SavePlaceRequest {
            prompt: &plan.prompt,
            window,
            place,
            parsed_request: &plan.parsed_request,
        };
        outcome_from(self.api.save_place(&request).await)
    }
}

/// Payload de guardado del plan: el PlanResponse completo más los campos
/// que el backend espera al persistir.
pub fn save_plan_payload(plan: &PlanResponse, shared: bool) -> serde_json::Value {
    let mut payload = match serde_json::to_value(plan) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    payload.insert("title".to_string(), plan.title().into());
    payload.insert("city_name".to_string(), plan.display_city().into());
    payload.insert("country_code".to_string(), plan.country_code().into());
    payload.insert("is_shared".to_string(), shared.into());
    serde_json::Value::Object(payload)
}

/// Reducir el resultado HTTP al outcome que la vista aplica al control.
pub fn outcome_from(result: Result<crate::services::api_client::SaveResponse, ApiError>) -> SaveOutcome {
    match result {
        Ok(response) => SaveOutcome::Saved(response.detail_url),
        Err(ApiError::AuthRequired) => SaveOutcome::AuthRequired,
        Err(error) => SaveOutcome::Rejected(error.user_message(SAVE_FALLBACK_MESSAGE)),
    }
}

/// URL del login con ruta de retorno a la página actual.
pub fn login_redirect_url(next: &str) -> String {
    format!("{}?next={}", LOGIN_PATH, encode_query_value(next))
}

/// Percent-encoding mínimo para el valor del parámetro `next`.
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParsedRequest, Place, ResolvedLocation, TimeWindow};
    use crate::services::api_client::SaveResponse;

    fn plan_con_franja() -> PlanResponse {
        PlanResponse {
            prompt: "Plan romántico en Medellín para el fin de semana".to_string(),
            parsed_request: ParsedRequest {
                city: "Medellín".to_string(),
                mood: "romántico".to_string(),
                group: "pareja".to_string(),
                budget_cop: 150_000,
            },
            resolved_location: Some(ResolvedLocation {
                city_name: "Medellín".to_string(),
                country_code: "CO".to_string(),
            }),
            time_windows: vec![TimeWindow {
                label: "Noche".to_string(),
                start: "19:00".to_string(),
                end: "23:00".to_string(),
                places: vec![Place {
                    name: "Mirador".to_string(),
                    rating: Some(4.7),
                    user_ratings_total: Some(1200),
                    photo_url: None,
                    estimated_cost_cop: Some(80_000),
                    maps_url: "https://maps/x".to_string(),
                    address: None,
                }],
            }],
        }
    }

    #[test]
    fn el_payload_del_plan_extiende_la_respuesta() {
        let payload = save_plan_payload(&plan_con_franja(), true);
        let object = payload.as_object().expect("objeto JSON");

        // Spread del PlanResponse
        assert!(object.contains_key("prompt"));
        assert!(object.contains_key("parsed_request"));
        assert!(object.contains_key("time_windows"));
        // Campos añadidos para persistir
        assert_eq!(payload["title"], "Plan romántico en Medellín");
        assert_eq!(payload["city_name"], "Medellín");
        assert_eq!(payload["country_code"], "CO");
        assert_eq!(payload["is_shared"], true);
    }

    #[test]
    fn sin_ubicacion_resuelta_usa_ciudad_interpretada_y_co() {
        let mut plan = plan_con_franja();
        plan.resolved_location = None;
        let payload = save_plan_payload(&plan, false);

        assert_eq!(payload["city_name"], "Medellín");
        assert_eq!(payload["country_code"], "CO");
        assert_eq!(payload["is_shared"], false);
    }

    #[test]
    fn mapeo_de_resultados_a_outcome() {
        let saved = outcome_from(Ok(SaveResponse {
            detail_url: Some("/plan/7/".to_string()),
        }));
        assert_eq!(saved, SaveOutcome::Saved(Some("/plan/7/".to_string())));

        let auth = outcome_from(Err(ApiError::AuthRequired));
        assert_eq!(auth, SaveOutcome::AuthRequired);

        let rejected = outcome_from(Err(ApiError::Service("Plan duplicado".to_string())));
        assert_eq!(rejected, SaveOutcome::Rejected("Plan duplicado".to_string()));

        let transport = outcome_from(Err(ApiError::Transport("HTTP 500".to_string())));
        assert_eq!(
            transport,
            SaveOutcome::Rejected(SAVE_FALLBACK_MESSAGE.to_string())
        );
    }

    #[test]
    fn la_url_de_login_codifica_la_ruta_de_retorno() {
        assert_eq!(
            login_redirect_url("/planes/nuevo?modo=ai"),
            "/auth/login/?next=%2Fplanes%2Fnuevo%3Fmodo%3Dai"
        );
    }
}
