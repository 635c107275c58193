// ============================================================================
// RESULTS VIEW - Render de la respuesta de generación
// ============================================================================
// Función de PlanResponse a un subárbol DOM con sus handlers de guardado.
// Cada re-render reemplaza el contenido anterior por completo; nunca se
// parchea en sitio. El orden de franjas y sitios es el de la respuesta.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::dom::{append_child, on_click, set_text_content, ElementBuilder};
use crate::models::{Place, PlanResponse, SaveOutcome};
use crate::utils::format::format_cop;
use crate::viewmodels::save_viewmodel::login_redirect_url;
use crate::viewmodels::SaveViewModel;

pub const SAVED_LABEL: &str = "Guardado ✓";
pub const SAVE_ERROR_LABEL: &str = "Error al guardar";
pub const RATING_SENTINEL: &str = "N/A";
pub const COST_SENTINEL: &str = "No disponible";

/// Fases de un control de guardado. Un control es de un solo uso: los
/// clicks con guardado pendiente son no-ops y el éxito lo deja
/// deshabilitado de forma irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SavePhase {
    Ready,
    Pending,
    Done,
}

/// Política al recibir detail_url: el plan completo navega al detalle,
/// el sitio individual agrega un enlace junto al control.
#[derive(Debug, Clone, Copy)]
enum SaveSuccessAction {
    NavigateToDetail,
    AppendDetailLink,
}

/// Línea de rating: sentinela "N/A" explícito cuando no hay rating,
/// nunca string vacío.
pub fn rating_line(place: &Place) -> String {
    let rating = place
        .rating
        .map(|value| value.to_string())
        .unwrap_or_else(|| RATING_SENTINEL.to_string());
    match place.user_ratings_total {
        Some(total) => format!("⭐ {} · {} reseñas", rating, total),
        None => format!("⭐ {}", rating),
    }
}

/// Línea de costo estimado, con sentinela explícito si no hay dato.
pub fn cost_line(place: &Place) -> String {
    match place.estimated_cost_cop {
        Some(cost) => format!("COP {}", format_cop(cost)),
        None => COST_SENTINEL.to_string(),
    }
}

/// Subtítulo del header: mood, grupo y presupuesto agrupado es-CO.
pub fn header_subtitle(plan: &PlanResponse) -> String {
    let parsed = &plan.parsed_request;
    format!(
        "{} · {} · Presupuesto COP {}",
        parsed.mood,
        parsed.group,
        format_cop(parsed.budget_cop)
    )
}

/// Texto de estado de ubicación tras un render exitoso.
pub fn location_status_line(city: &str) -> String {
    format!("Ubicación detectada: {} (aprox.)", city)
}

/// Construir el árbol de resultados completo para un plan.
pub fn render_plan(
    plan: &Rc<PlanResponse>,
    save_vm: &SaveViewModel,
    share_input: Option<HtmlInputElement>,
) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("plan-results").build();

    append_child(&container, &render_header(plan, save_vm, share_input)?)?;
    for (window_index, _) in plan.time_windows.iter().enumerate() {
        append_child(&container, &render_window(plan, window_index, save_vm)?)?;
    }

    Ok(container)
}

/// Header del plan: ciudad, interpretación del prompt y botón de guardado.
fn render_header(
    plan: &Rc<PlanResponse>,
    save_vm: &SaveViewModel,
    share_input: Option<HtmlInputElement>,
) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("glass-card p-3 p-md-4 fade-up mb-3")
        .build();

    let title = ElementBuilder::new("h2")?
        .class("h4 mb-1")
        .text(&format!("Plan en {}", plan.display_city()))
        .build();
    append_child(&card, &title)?;

    let subtitle = ElementBuilder::new("p")?
        .class("text-soft mb-2")
        .text(&header_subtitle(plan))
        .build();
    append_child(&card, &subtitle)?;

    let save_button = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn app-btn app-btn-primary btn-sm js-save-plan")
        .text("Guardar plan")
        .build();
    append_child(&card, &save_button)?;

    // Guardado del plan completo: al recibir detail_url navega al detalle
    {
        let phase = Rc::new(Cell::new(SavePhase::Ready));
        let plan = plan.clone();
        let save_vm = save_vm.clone();
        let button = save_button.clone();

        on_click(&save_button, move |_| {
            if phase.get() != SavePhase::Ready {
                return;
            }
            phase.set(SavePhase::Pending);

            let shared = share_input
                .as_ref()
                .map(|input| input.checked())
                .unwrap_or(false);

            let phase = phase.clone();
            let plan = plan.clone();
            let save_vm = save_vm.clone();
            let button = button.clone();
            spawn_local(async move {
                let outcome = save_vm.save_plan(&plan, shared).await;
                apply_save_outcome(&button, &phase, outcome, SaveSuccessAction::NavigateToDetail);
            });
        })?;
    }

    Ok(card)
}

/// Sección de una franja horaria, con sus sitios en orden de respuesta.
fn render_window(
    plan: &Rc<PlanResponse>,
    window_index: usize,
    save_vm: &SaveViewModel,
) -> Result<Element, JsValue> {
    let window = &plan.time_windows[window_index];

    let section = ElementBuilder::new("section")?
        .class("result-block fade-up")
        .build();

    let title = ElementBuilder::new("h3")?
        .class("h5 mb-2")
        .text(&window.label)
        .build();
    append_child(&section, &title)?;

    let schedule = ElementBuilder::new("span")?
        .class("small text-soft window-schedule")
        .text(&format!("{} – {}", window.start, window.end))
        .build();
    append_child(&section, &schedule)?;

    let row = ElementBuilder::new("div")?.class("row g-3").build();
    for (place_index, _) in window.places.iter().enumerate() {
        append_child(&row, &render_place_card(plan, window_index, place_index, save_vm)?)?;
    }
    append_child(&section, &row)?;

    Ok(section)
}

/// Card de un sitio recomendado.
fn render_place_card(
    plan: &Rc<PlanResponse>,
    window_index: usize,
    place_index: usize,
    save_vm: &SaveViewModel,
) -> Result<Element, JsValue> {
    let place = &plan.time_windows[window_index].places[place_index];

    let column = ElementBuilder::new("div")?
        .class("col-12 col-md-6 col-xl-4")
        .build();

    let card = ElementBuilder::new("article")?
        .class("place-card h-100")
        .build();

    let image = ElementBuilder::new("div")?.class("place-image").build();
    if let Some(photo_url) = &place.photo_url {
        if let Some(html_image) = image.dyn_ref::<HtmlElement>() {
            let _ = html_image.style().set_property(
                "background-image",
                &format!(
                    "linear-gradient(180deg, transparent, rgba(0,0,0,.5)), url('{}')",
                    photo_url
                ),
            );
        }
    }
    append_child(&card, &image)?;

    let body = ElementBuilder::new("div")?.class("p-3").build();

    let name = ElementBuilder::new("h4")?
        .class("h6")
        .text(&place.name)
        .build();
    append_child(&body, &name)?;

    let rating = ElementBuilder::new("p")?
        .class("small text-soft mb-0")
        .text(&rating_line(place))
        .build();
    append_child(&body, &rating)?;

    if let Some(address) = &place.address {
        let address_line = ElementBuilder::new("p")?
            .class("small text-soft mb-0")
            .text(address)
            .build();
        append_child(&body, &address_line)?;
    }

    let cost = ElementBuilder::new("p")?
        .class("small text-soft mb-2")
        .text(&cost_line(place))
        .build();
    append_child(&body, &cost)?;

    let maps_link = ElementBuilder::new("a")?
        .class("small maps-link")
        .attr("href", &place.maps_url)?
        .attr("target", "_blank")?
        .attr("rel", "noopener")?
        .text("Ver en Maps")
        .build();
    append_child(&body, &maps_link)?;

    let save_button = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn app-btn btn-sm js-save-place")
        .text("Guardar")
        .build();
    append_child(&body, &save_button)?;

    append_child(&card, &body)?;
    append_child(&column, &card)?;

    // Guardado de un solo sitio: al recibir detail_url agrega un enlace
    // junto al control, sin navegar
    {
        let phase = Rc::new(Cell::new(SavePhase::Ready));
        let plan = plan.clone();
        let save_vm = save_vm.clone();
        let button = save_button.clone();

        on_click(&save_button, move |_| {
            if phase.get() != SavePhase::Ready {
                return;
            }
            phase.set(SavePhase::Pending);

            let phase = phase.clone();
            let plan = plan.clone();
            let save_vm = save_vm.clone();
            let button = button.clone();
            spawn_local(async move {
                let outcome = save_vm.save_place(&plan, window_index, place_index).await;
                apply_save_outcome(&button, &phase, outcome, SaveSuccessAction::AppendDetailLink);
            });
        })?;
    }

    Ok(column)
}

/// Aplicar el resultado de un guardado al control que lo disparó.
/// Saved se aplica exactamente una vez; AuthRequired navega sin mutar el
/// control; Rejected deja el control habilitado para reintentar.
fn apply_save_outcome(
    control: &Element,
    phase: &Cell<SavePhase>,
    outcome: SaveOutcome,
    action: SaveSuccessAction,
) {
    match outcome {
        SaveOutcome::Saved(detail_url) => {
            phase.set(SavePhase::Done);
            if let Some(button) = control.dyn_ref::<HtmlButtonElement>() {
                button.set_disabled(true);
            }
            set_text_content(control, SAVED_LABEL);
            log::info!("✅ Guardado aplicado al control");

            match (action, detail_url) {
                (SaveSuccessAction::NavigateToDetail, Some(url)) => navigate_to(&url),
                (SaveSuccessAction::AppendDetailLink, Some(url)) => append_detail_link(control, &url),
                _ => {}
            }
        }
        SaveOutcome::AuthRequired => {
            // Sin mutación del control: solo navegación al login con retorno
            phase.set(SavePhase::Ready);
            let next = current_path();
            navigate_to(&login_redirect_url(&next));
        }
        SaveOutcome::Rejected(message) => {
            phase.set(SavePhase::Ready);
            set_text_content(control, SAVE_ERROR_LABEL);
            log::error!("❌ Guardado rechazado: {}", message);
        }
    }
}

fn append_detail_link(control: &Element, url: &str) {
    let link = ElementBuilder::new("a")
        .and_then(|builder| builder.attr("href", url))
        .map(|builder| builder.class("small ms-2 save-detail-link").text("Ver detalle").build());
    if let Ok(link) = link {
        let _ = control.insert_adjacent_element("afterend", &link);
    }
}

fn navigate_to(url: &str) {
    if let Some(window) = crate::dom::window() {
        let _ = window.location().set_href(url);
    }
}

fn current_path() -> String {
    crate::dom::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParsedRequest, ResolvedLocation};

    fn sitio(rating: Option<f64>, cost: Option<i64>) -> Place {
        Place {
            name: "Mirador".to_string(),
            rating,
            user_ratings_total: None,
            photo_url: None,
            estimated_cost_cop: cost,
            maps_url: "https://maps/x".to_string(),
            address: None,
        }
    }

    #[test]
    fn rating_presente_se_muestra_con_estrella() {
        assert_eq!(rating_line(&sitio(Some(4.7), None)), "⭐ 4.7");
    }

    #[test]
    fn rating_ausente_usa_sentinela_na() {
        let line = rating_line(&sitio(None, None));
        assert_eq!(line, "⭐ N/A");
        assert!(!line.contains("undefined"));
    }

    #[test]
    fn rating_con_resenas_incluye_el_conteo() {
        let mut place = sitio(Some(4.2), None);
        place.user_ratings_total = Some(1200);
        assert_eq!(rating_line(&place), "⭐ 4.2 · 1200 reseñas");
    }

    #[test]
    fn costo_presente_se_agrupa_costo_ausente_usa_sentinela() {
        assert_eq!(cost_line(&sitio(None, Some(80_000))), "COP 80.000");
        assert_eq!(cost_line(&sitio(None, None)), "No disponible");
    }

    #[test]
    fn subtitulo_del_header_formatea_el_presupuesto() {
        let plan = PlanResponse {
            prompt: "Plan romántico en Medellín".to_string(),
            parsed_request: ParsedRequest {
                city: "Medellín".to_string(),
                mood: "romántico".to_string(),
                group: "pareja".to_string(),
                budget_cop: 150_000,
            },
            resolved_location: None,
            time_windows: vec![],
        };
        assert_eq!(
            header_subtitle(&plan),
            "romántico · pareja · Presupuesto COP 150.000"
        );
    }

    #[test]
    fn estado_de_ubicacion_usa_la_ciudad_resuelta() {
        let mut plan = PlanResponse {
            prompt: String::new(),
            parsed_request: ParsedRequest {
                city: "Medellín".to_string(),
                mood: String::new(),
                group: String::new(),
                budget_cop: 0,
            },
            resolved_location: Some(ResolvedLocation {
                city_name: "Envigado".to_string(),
                country_code: "CO".to_string(),
            }),
            time_windows: vec![],
        };
        assert_eq!(
            location_status_line(plan.display_city()),
            "Ubicación detectada: Envigado (aprox.)"
        );

        plan.resolved_location = None;
        assert_eq!(
            location_status_line(plan.display_city()),
            "Ubicación detectada: Medellín (aprox.)"
        );
    }
}
