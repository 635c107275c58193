// ============================================================================
// SOCIAL VIEW - Acciones sobre cards de planes ya renderizadas
// ============================================================================
// Like/unlike y visibilidad pública/privada sobre las cards que el
// servidor ya pintó. Cada control es independiente: un fallo o un
// pendiente en uno no afecta a los demás.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, get_attribute, on_click, query_selector_all, set_text_content, ElementBuilder,
};
use crate::services::{ApiClient, ApiError};
use crate::viewmodels::save_viewmodel::login_redirect_url;

const SHARE_NOTICE_MS: u32 = 6_000;

pub const LIKED_ICON: &str = "❤";
pub const UNLIKED_ICON: &str = "🤍";
pub const MAKE_PRIVATE_LABEL: &str = "Hacer privado";
pub const MAKE_PUBLIC_LABEL: &str = "Hacer público";

pub struct SocialView;

impl SocialView {
    pub fn mount() -> Result<(), JsValue> {
        let api = ApiClient::new();

        let like_buttons = query_selector_all(".js-like-btn")?;
        let visibility_buttons = query_selector_all(".js-visibility-toggle")?;
        if like_buttons.is_empty() && visibility_buttons.is_empty() {
            return Ok(());
        }

        for button in &like_buttons {
            bind_like(&api, button)?;
        }
        for button in &visibility_buttons {
            bind_visibility(&api, button)?;
        }

        log::info!(
            "🧩 Social montada: {} likes, {} toggles de visibilidad",
            like_buttons.len(),
            visibility_buttons.len()
        );
        Ok(())
    }
}

fn bind_like(api: &ApiClient, button: &Element) -> Result<(), JsValue> {
    let Some(plan_id) = get_attribute(button, "data-plan-id") else {
        log::warn!("⚠️ Botón de like sin data-plan-id, se ignora");
        return Ok(());
    };

    let api = api.clone();
    let handler_button = button.clone();
    let pending = Rc::new(Cell::new(false));

    on_click(button, move |_| {
        if pending.get() {
            return;
        }
        pending.set(true);

        let api = api.clone();
        let plan_id = plan_id.clone();
        let button = handler_button.clone();
        let pending = pending.clone();
        spawn_local(async move {
            match api.toggle_like(&plan_id).await {
                Ok(response) => {
                    if let Ok(Some(count)) = button.query_selector(".js-like-count") {
                        set_text_content(&count, &response.likes_count.to_string());
                    }
                    if let Ok(Some(icon)) = button.query_selector(".js-like-icon") {
                        let glyph = if response.liked { LIKED_ICON } else { UNLIKED_ICON };
                        set_text_content(&icon, glyph);
                    }
                }
                Err(ApiError::AuthRequired) => {
                    navigate_to_login();
                }
                Err(error) => {
                    // Scoped al control: no se toca ninguna otra UI
                    log::error!("❌ Like del plan {} falló: {}", plan_id, error);
                }
            }
            pending.set(false);
        });
    })
}

fn bind_visibility(api: &ApiClient, button: &Element) -> Result<(), JsValue> {
    let Some(plan_id) = get_attribute(button, "data-plan-id") else {
        log::warn!("⚠️ Toggle de visibilidad sin data-plan-id, se ignora");
        return Ok(());
    };

    let api = api.clone();
    let handler_button = button.clone();
    let pending = Rc::new(Cell::new(false));

    on_click(button, move |_| {
        if pending.get() {
            return;
        }
        pending.set(true);

        let api = api.clone();
        let plan_id = plan_id.clone();
        let button = handler_button.clone();
        let pending = pending.clone();
        spawn_local(async move {
            match api.toggle_public(&plan_id).await {
                Ok(response) => {
                    let label = if response.is_public {
                        MAKE_PRIVATE_LABEL
                    } else {
                        MAKE_PUBLIC_LABEL
                    };
                    set_text_content(&button, label);

                    if response.is_public {
                        if let Some(share_url) = response.share_url {
                            show_share_notice(&share_url);
                        }
                    }
                }
                Err(ApiError::AuthRequired) => {
                    navigate_to_login();
                }
                Err(error) => {
                    log::error!("❌ Visibilidad del plan {} falló: {}", plan_id, error);
                }
            }
            pending.set(false);
        });
    })
}

/// Aviso transitorio con el enlace compartible; se quita solo.
fn show_share_notice(share_url: &str) {
    let Some(document) = crate::dom::document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    let notice = ElementBuilder::new("div")
        .map(|builder| {
            builder
                .class("share-notice glass-card p-2")
                .text(&format!("Enlace para compartir: {}", share_url))
                .build()
        });
    let Ok(notice) = notice else {
        return;
    };

    if append_child(&body.into(), &notice).is_ok() {
        let to_remove = notice.clone();
        Timeout::new(SHARE_NOTICE_MS, move || {
            to_remove.remove();
        })
        .forget();
    }
}

fn navigate_to_login() {
    if let Some(window) = crate::dom::window() {
        let next = window.location().pathname().unwrap_or_else(|_| "/".to_string());
        let _ = window.location().set_href(&login_redirect_url(&next));
    }
}
