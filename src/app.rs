// ============================================================================
// APP - Montaje de la página
// ============================================================================
// Cada componente recibe sus elementos por ID al construirse y hace no-op
// si la página actual no los tiene. Así el mismo bundle sirve para la
// página de generación, el perfil y los listados de planes.
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::config::PageConfig;
use crate::views::{LocationView, PlannerView, SocialView};
use crate::widgets::{chips, password, previews, theme};

pub struct App;

impl App {
    pub fn mount() -> Result<(), JsValue> {
        // El tema se aplica primero, antes de cualquier interacción
        theme::apply_stored_theme();
        theme::bind_theme_toggle()?;

        let config = PageConfig::detect();
        log::info!(
            "🎬 Montando página (geo: {}, compartir: {})",
            config.with_geolocation,
            config.with_sharing_toggle
        );

        // El resolver de ubicación corre antes que el planner para que los
        // campos ocultos estén poblados al primer envío posible
        LocationView::mount()?;
        PlannerView::mount(config)?;
        SocialView::mount()?;

        chips::mount_chip_boxes()?;
        previews::mount_previews()?;
        password::mount_password_toggles()?;

        Ok(())
    }
}
