// ============================================================================
// GEOLOCATION - Lectura única de coordenadas del dispositivo
// ============================================================================
// Resolución de un solo disparo al montar la página: sin reintentos
// automáticos. El fallback manual lo maneja la vista (views::location).
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Position, PositionError, PositionOptions};

/// Timeout del lookup del dispositivo
const DEVICE_LOOKUP_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone, Copy)]
pub struct DeviceCoords {
    pub latitude: f64,
    pub longitude: f64,
}

/// Pedir las coordenadas del dispositivo una sola vez, con hint de alta
/// precisión y timeout de 10 segundos.
///
/// `Err` significa dispositivo sin soporte de geolocalización (la vista
/// muestra el fallback manual). El fallo del lookup en sí (permiso
/// denegado, timeout) llega por `on_failure`.
pub fn request_device_location<S, F>(on_success: S, on_failure: F) -> Result<(), JsValue>
where
    S: FnOnce(DeviceCoords) + 'static,
    F: FnOnce() + 'static,
{
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let geolocation = window.navigator().geolocation()?;

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(DEVICE_LOOKUP_TIMEOUT_MS);

    let success = Closure::once(move |position: Position| {
        let coords = position.coords();
        log::info!("📍 Ubicación detectada ({}, {})", coords.latitude(), coords.longitude());
        on_success(DeviceCoords {
            latitude: coords.latitude(),
            longitude: coords.longitude(),
        });
    });

    let failure = Closure::once(move |error: PositionError| {
        log::warn!("⚠️ Lookup de ubicación falló (código {})", error.code());
        on_failure();
    });

    geolocation.get_current_position_with_error_callback_and_options(
        success.as_ref().unchecked_ref(),
        Some(failure.as_ref().unchecked_ref()),
        &options,
    )?;

    success.forget();
    failure.forget();
    Ok(())
}
