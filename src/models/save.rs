// ============================================================================
// SAVE MODELS - Resultado de un intento de guardado
// ============================================================================

/// Resultado de un intento de guardado. Se produce una sola vez por
/// intento y la mutación de UI se aplica exactamente una vez.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Guardado en el servidor; puede traer la URL de detalle.
    Saved(Option<String>),
    /// El servidor exige sesión (HTTP 403): navegar al login, sin tocar
    /// el control que disparó la acción.
    AuthRequired,
    /// Rechazado; el control queda habilitado para reintentar.
    Rejected(String),
}
