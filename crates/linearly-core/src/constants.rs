//! Constantes del motor.

/// Versión lógica del contrato de flows. Participa en el fingerprint de cada
/// `Flow`: cambiar las reglas de inferencia de contratos exige subirla.
pub const CONTRACT_VERSION: &str = "L1.0";
