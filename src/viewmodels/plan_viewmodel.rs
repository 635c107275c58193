// ============================================================================
// PLAN VIEWMODEL - Ciclo de vida de una generación de plan
// ============================================================================
// Dueño exclusivo de la máquina de estados:
//   Idle → Validating → Loading → {Rendered | Failed} → Idle (re-entrante)
// Una sola generación viva por página. Cada envío captura un token de
// secuencia; una respuesta que llega tarde con un token viejo se descarta
// sin tocar estado ni UI.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::{PlanResponse, PromptRequest};
use crate::services::{ApiClient, ApiError};

/// Longitud mínima del prompt (tras recortar espacios)
pub const MIN_PROMPT_CHARS: usize = 8;

pub const VALIDATION_MESSAGE: &str = "Escribe una descripción más completa.";
pub const GENERATE_FALLBACK_MESSAGE: &str = "No se pudo generar el plan.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Validating,
    Loading,
    Rendered,
    Failed,
}

#[derive(Clone)]
pub struct PlanViewModel {
    api: ApiClient,
    state: Rc<RefCell<LifecycleState>>,
    sequence: Rc<Cell<u64>>,
    latest_plan: Rc<RefCell<Option<Rc<PlanResponse>>>>,
}

impl PlanViewModel {
    pub fn new() -> Self {
        Self {
            api: ApiClient::new(),
            state: Rc::new(RefCell::new(LifecycleState::Idle)),
            sequence: Rc::new(Cell::new(0)),
            latest_plan: Rc::new(RefCell::new(None)),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Última respuesta exitosa, retenida solo para el payload de guardado.
    pub fn latest_plan(&self) -> Option<Rc<PlanResponse>> {
        self.latest_plan.borrow().clone()
    }

    /// Transición Validating: recortar el prompt y rechazar localmente los
    /// demasiado cortos. Un prompt rechazado nunca llega a la red.
    pub fn validate_prompt(&self, raw: &str) -> Result<String, ApiError> {
        *self.state.borrow_mut() = LifecycleState::Validating;

        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_PROMPT_CHARS {
            log::info!("✋ Prompt demasiado corto, no se llama al servicio");
            *self.state.borrow_mut() = LifecycleState::Failed;
            return Err(ApiError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        Ok(trimmed.to_string())
    }

    /// Transición Loading: capturar el token que identifica este envío.
    pub fn begin_loading(&self) -> u64 {
        let token = self.sequence.get() + 1;
        self.sequence.set(token);
        *self.state.borrow_mut() = LifecycleState::Loading;
        log::info!("⏳ Generación #{} en curso", token);
        token
    }

    /// ¿Sigue siendo este el envío vivo?
    pub fn is_current(&self, token: u64) -> bool {
        self.sequence.get() == token
    }

    pub async fn generate(&self, request: PromptRequest) -> Result<PlanResponse, ApiError> {
        self.api.generate_plan(&request).await
    }

    /// Transición Rendered. Devuelve el plan a renderizar, o None si el
    /// token quedó obsoleto (otro envío lo reemplazó mientras esperábamos).
    pub fn complete_success(&self, token: u64, plan: PlanResponse) -> Option<Rc<PlanResponse>> {
        if !self.is_current(token) {
            log::warn!("🗑️ Respuesta tardía del envío #{} descartada", token);
            return None;
        }

        let plan = Rc::new(plan);
        *self.latest_plan.borrow_mut() = Some(plan.clone());
        *self.state.borrow_mut() = LifecycleState::Rendered;
        log::info!("✅ Generación #{} completada: {} franjas", token, plan.time_windows.len());
        Some(plan)
    }

    /// Transición Failed. Devuelve el mensaje a mostrar, o None si el
    /// token quedó obsoleto.
    pub fn complete_failure(&self, token: u64, error: &ApiError) -> Option<String> {
        if !self.is_current(token) {
            log::warn!("🗑️ Fallo tardío del envío #{} descartado", token);
            return None;
        }

        *self.state.borrow_mut() = LifecycleState::Failed;
        log::error!("❌ Generación #{} falló: {}", token, error);
        Some(error.user_message(GENERATE_FALLBACK_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParsedRequest;

    fn plan_minimo() -> PlanResponse {
        PlanResponse {
            prompt: "Plan romántico en Medellín".to_string(),
            parsed_request: ParsedRequest {
                city: "Medellín".to_string(),
                mood: "romántico".to_string(),
                group: "pareja".to_string(),
                budget_cop: 150_000,
            },
            resolved_location: None,
            time_windows: vec![],
        }
    }

    #[test]
    fn prompt_corto_falla_localmente_con_mensaje_fijo() {
        let vm = PlanViewModel::new();
        let result = vm.validate_prompt("  corto ");

        assert_eq!(
            result,
            Err(ApiError::Validation(VALIDATION_MESSAGE.to_string()))
        );
        assert_eq!(vm.state(), LifecycleState::Failed);
    }

    #[test]
    fn la_longitud_cuenta_tras_recortar() {
        let vm = PlanViewModel::new();
        // 7 caracteres rodeados de espacios: inválido
        assert!(vm.validate_prompt("   1234567   ").is_err());
        // 8 caracteres exactos: válido y recortado
        assert_eq!(vm.validate_prompt(" 12345678 "), Ok("12345678".to_string()));
    }

    #[test]
    fn la_longitud_cuenta_caracteres_no_bytes() {
        let vm = PlanViewModel::new();
        assert_eq!(
            vm.validate_prompt("áéíóúñüa"),
            Ok("áéíóúñüa".to_string())
        );
    }

    #[test]
    fn cada_envio_incrementa_el_token() {
        let vm = PlanViewModel::new();
        let first = vm.begin_loading();
        let second = vm.begin_loading();
        assert!(second > first);
        assert!(!vm.is_current(first));
        assert!(vm.is_current(second));
    }

    #[test]
    fn exito_tardio_se_descarta_sin_tocar_estado() {
        let vm = PlanViewModel::new();
        let stale = vm.begin_loading();
        let _fresh = vm.begin_loading();

        assert!(vm.complete_success(stale, plan_minimo()).is_none());
        assert_eq!(vm.state(), LifecycleState::Loading);
        assert!(vm.latest_plan().is_none());
    }

    #[test]
    fn fallo_tardio_se_descarta() {
        let vm = PlanViewModel::new();
        let stale = vm.begin_loading();
        let _fresh = vm.begin_loading();

        let err = ApiError::Transport("HTTP 502".to_string());
        assert!(vm.complete_failure(stale, &err).is_none());
        assert_eq!(vm.state(), LifecycleState::Loading);
    }

    #[test]
    fn exito_vigente_reemplaza_el_plan_entero() {
        let vm = PlanViewModel::new();

        let token = vm.begin_loading();
        let rendered = vm.complete_success(token, plan_minimo());
        assert!(rendered.is_some());
        assert_eq!(vm.state(), LifecycleState::Rendered);

        let mut second_plan = plan_minimo();
        second_plan.parsed_request.city = "Cali".to_string();
        let token = vm.begin_loading();
        vm.complete_success(token, second_plan);

        assert_eq!(vm.latest_plan().unwrap().parsed_request.city, "Cali");
    }

    #[test]
    fn fallo_de_servicio_se_muestra_verbatim_y_transporte_generico() {
        let vm = PlanViewModel::new();

        let token = vm.begin_loading();
        let message = vm
            .complete_failure(token, &ApiError::Service("Sin cobertura".to_string()))
            .unwrap();
        assert_eq!(message, "Sin cobertura");
        assert_eq!(vm.state(), LifecycleState::Failed);

        let token = vm.begin_loading();
        let message = vm
            .complete_failure(token, &ApiError::Transport("timeout".to_string()))
            .unwrap();
        assert_eq!(message, GENERATE_FALLBACK_MESSAGE);
    }
}
