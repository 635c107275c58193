// ============================================================================
// PLANNER VIEW - Wiring del pipeline prompt → resultados
// ============================================================================
// Monta el controlador del ciclo de vida sobre el markup renderizado por el
// servidor. Cada componente recibe sus elementos por ID al construirse; si
// falta alguno esencial la vista no se monta (no-op, sin fallar).
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement, HtmlTextAreaElement};

use crate::config::PageConfig;
use crate::dom::{
    add_class, append_child, get_element_by_id, on_click, on_keydown, remove_class,
    set_inner_html, set_text_content, ElementBuilder,
};
use crate::models::PromptRequest;
use crate::viewmodels::{PlanViewModel, SaveViewModel};
use crate::views::results::{location_status_line, render_plan};

/// Cantidad de cards placeholder durante la carga
const SKELETON_CARD_COUNT: usize = 3;

pub struct PlannerView;

impl PlannerView {
    pub fn mount(config: PageConfig) -> Result<(), JsValue> {
        let (Some(prompt_el), Some(trigger_el), Some(results_root), Some(loading_el)) = (
            get_element_by_id("chatPrompt"),
            get_element_by_id("generatePlanBtn"),
            get_element_by_id("resultsRoot"),
            get_element_by_id("loadingState"),
        ) else {
            log::debug!("🧩 Planner no montado: faltan elementos del pipeline");
            return Ok(());
        };

        let error_el = get_element_by_id("planError");
        let status_el = get_element_by_id("locationStatus");
        let lat_input = config
            .with_geolocation
            .then(|| input_by_id("lat"))
            .flatten();
        let lng_input = config
            .with_geolocation
            .then(|| input_by_id("lng"))
            .flatten();
        let city_input = input_by_id("cityName");
        let share_input = config
            .with_sharing_toggle
            .then(|| input_by_id("isShared"))
            .flatten();

        let plan_vm = PlanViewModel::new();
        let save_vm = SaveViewModel::new();

        let submit: Rc<dyn Fn()> = {
            let prompt_el = prompt_el.clone();
            let trigger_el = trigger_el.clone();
            let results_root = results_root.clone();
            let loading_el = loading_el.clone();

            Rc::new(move || {
                let raw = field_value(&prompt_el);
                hide_error(&error_el);

                // Validating: un prompt corto nunca llega a la red
                let prompt = match plan_vm.validate_prompt(&raw) {
                    Ok(prompt) => prompt,
                    Err(error) => {
                        set_inner_html(&results_root, "");
                        show_error(&error_el, &error.to_string());
                        return;
                    }
                };

                // Loading: deshabilitar el trigger y mostrar el skeleton
                let token = plan_vm.begin_loading();
                set_trigger_disabled(&trigger_el, true);
                show_skeleton(&loading_el);

                let request = PromptRequest {
                    prompt,
                    lat: coord_value(&lat_input),
                    lng: coord_value(&lng_input),
                    city_name: text_value(&city_input),
                };

                let plan_vm = plan_vm.clone();
                let save_vm = save_vm.clone();
                let trigger_el = trigger_el.clone();
                let loading_el = loading_el.clone();
                let results_root = results_root.clone();
                let error_el = error_el.clone();
                let status_el = status_el.clone();
                let share_input = share_input.clone();

                spawn_local(async move {
                    match plan_vm.generate(request).await {
                        Ok(response) => {
                            // Un token obsoleto significa que otro envío es
                            // dueño de la UI: no tocar nada
                            let Some(plan) = plan_vm.complete_success(token, response) else {
                                return;
                            };
                            finish_loading(&trigger_el, &loading_el);
                            set_inner_html(&results_root, "");

                            match render_plan(&plan, &save_vm, share_input) {
                                Ok(tree) => {
                                    let _ = append_child(&results_root, &tree);
                                    if let Some(status) = &status_el {
                                        set_text_content(
                                            status,
                                            &location_status_line(plan.display_city()),
                                        );
                                    }
                                }
                                Err(error) => {
                                    log::error!("❌ Error renderizando resultados: {:?}", error);
                                }
                            }
                        }
                        Err(error) => {
                            let Some(message) = plan_vm.complete_failure(token, &error) else {
                                return;
                            };
                            finish_loading(&trigger_el, &loading_el);
                            set_inner_html(&results_root, "");
                            show_error(&error_el, &message);
                        }
                    }
                });
            })
        };

        // Trigger explícito: click en el botón
        {
            let submit = submit.clone();
            on_click(&trigger_el, move |_| submit())?;
        }

        // Enter sin Shift dentro del prompt también envía;
        // Shift+Enter conserva el salto de línea
        {
            let submit = submit.clone();
            on_keydown(&prompt_el, move |event| {
                if event.key() == "Enter" && !event.shift_key() {
                    event.prevent_default();
                    submit();
                }
            })?;
        }

        log::info!("🧩 Planner montado (geo: {}, compartir: {})", config.with_geolocation, config.with_sharing_toggle);
        Ok(())
    }
}

fn input_by_id(id: &str) -> Option<HtmlInputElement> {
    get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

/// Valor del campo de prompt, sea textarea o input
fn field_value(element: &Element) -> String {
    if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        return textarea.value();
    }
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    String::new()
}

fn coord_value(input: &Option<HtmlInputElement>) -> Option<f64> {
    let value = input.as_ref()?.value();
    value.trim().parse::<f64>().ok()
}

fn text_value(input: &Option<HtmlInputElement>) -> Option<String> {
    let value = input.as_ref()?.value();
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn set_trigger_disabled(trigger: &Element, disabled: bool) {
    if let Some(button) = trigger.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    } else if disabled {
        let _ = trigger.set_attribute("disabled", "disabled");
    } else {
        let _ = trigger.remove_attribute("disabled");
    }
}

/// Mostrar el placeholder de carga: tres cards skeleton
fn show_skeleton(loading_el: &Element) {
    set_inner_html(loading_el, "");
    let _ = remove_class(loading_el, "d-none");
    for _ in 0..SKELETON_CARD_COUNT {
        if let Ok(card) = ElementBuilder::new("div") {
            let card = card.class("glass-card p-3 skeleton-card").build();
            let _ = append_child(loading_el, &card);
        }
    }
}

/// Toda transición terminal pasa por aquí: rehabilitar el trigger y
/// limpiar el indicador de carga, también cuando la red falló.
fn finish_loading(trigger: &Element, loading_el: &Element) {
    set_trigger_disabled(trigger, false);
    let _ = add_class(loading_el, "d-none");
    set_inner_html(loading_el, "");
}

fn show_error(error_el: &Option<Element>, message: &str) {
    if let Some(error_el) = error_el {
        set_text_content(error_el, message);
        let _ = remove_class(error_el, "d-none");
    }
}

fn hide_error(error_el: &Option<Element>) {
    if let Some(error_el) = error_el {
        let _ = add_class(error_el, "d-none");
    }
}
