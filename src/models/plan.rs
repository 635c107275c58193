// ============================================================================
// PLAN MODELS - Petición y respuesta del endpoint de generación
// ============================================================================
// El wire es snake_case, igual que los nombres de campo en Rust.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Petición de generación. Se construye fresca en cada envío del usuario
/// y se descarta al resolver la llamada.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub city_name: Option<String>,
}

/// Interpretación del prompt, devuelta por el servicio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRequest {
    pub city: String,
    pub mood: String,
    pub group: String,
    #[serde(default)]
    pub budget_cop: i64,
}

/// Ciudad resuelta a partir de las coordenadas enviadas; cuando está
/// presente reemplaza la etiqueta de ciudad escrita por el usuario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub city_name: String,
    pub country_code: String,
}

/// Franja horaria del día. El orden de respuesta es el orden de render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub label: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub places: Vec<Place>,
}

/// Sitio recomendado dentro de una franja.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub photo_url: Option<String>,
    pub estimated_cost_cop: Option<i64>,
    pub maps_url: String,
    pub address: Option<String>,
}

/// Respuesta completa del pipeline. Se retiene en memoria solo para
/// alimentar el payload de guardado y se reemplaza entera en cada
/// generación exitosa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub prompt: String,
    pub parsed_request: ParsedRequest,
    pub resolved_location: Option<ResolvedLocation>,
    #[serde(default)]
    pub time_windows: Vec<TimeWindow>,
}

impl PlanResponse {
    /// Ciudad para mostrar: la resuelta por el servicio tiene prioridad
    /// sobre la interpretada del prompt.
    pub fn display_city(&self) -> &str {
        self.resolved_location
            .as_ref()
            .map(|loc| loc.city_name.as_str())
            .unwrap_or(&self.parsed_request.city)
    }

    /// Código de país para el payload de guardado.
    pub fn country_code(&self) -> &str {
        self.resolved_location
            .as_ref()
            .map(|loc| loc.country_code.as_str())
            .unwrap_or("CO")
    }

    /// Título del plan guardado.
    pub fn title(&self) -> String {
        format!("Plan {} en {}", self.parsed_request.mood, self.display_city())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_de_ejemplo() -> PlanResponse {
        serde_json::from_str(
            r#"{
                "prompt": "Plan romántico en Medellín para el fin de semana",
                "parsed_request": {
                    "city": "Medellín",
                    "mood": "romántico",
                    "group": "pareja",
                    "budget_cop": 150000
                },
                "time_windows": [
                    {
                        "label": "Noche",
                        "start": "19:00",
                        "end": "23:00",
                        "places": [
                            {"name": "Mirador", "rating": 4.7, "maps_url": "https://maps/x"}
                        ]
                    }
                ]
            }"#,
        )
        .expect("respuesta de ejemplo válida")
    }

    #[test]
    fn deserializa_la_respuesta_del_servicio() {
        let plan = plan_de_ejemplo();
        assert_eq!(plan.time_windows.len(), 1);
        let window = &plan.time_windows[0];
        assert_eq!(window.label, "Noche");
        assert_eq!(window.start, "19:00");
        assert_eq!(window.places[0].name, "Mirador");
        assert_eq!(window.places[0].rating, Some(4.7));
        assert_eq!(window.places[0].estimated_cost_cop, None);
    }

    #[test]
    fn ciudad_resuelta_tiene_prioridad() {
        let mut plan = plan_de_ejemplo();
        assert_eq!(plan.display_city(), "Medellín");
        assert_eq!(plan.country_code(), "CO");

        plan.resolved_location = Some(ResolvedLocation {
            city_name: "Bogotá".to_string(),
            country_code: "CO".to_string(),
        });
        assert_eq!(plan.display_city(), "Bogotá");
    }

    #[test]
    fn franja_sin_places_deserializa_vacia() {
        let window: TimeWindow = serde_json::from_str(
            r#"{"label": "Tarde", "start": "14:00", "end": "18:00"}"#,
        )
        .expect("franja sin places");
        assert!(window.places.is_empty());
    }

    #[test]
    fn titulo_usa_mood_y_ciudad() {
        let plan = plan_de_ejemplo();
        assert_eq!(plan.title(), "Plan romántico en Medellín");
    }
}
