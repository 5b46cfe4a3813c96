// [libs/domain/protocol/src/errors.rs]
/*!
 * =================================================================
 * APARATO: PROTOCOL FAULT CATALOG (V4.0 - TRIPLE OUTCOME)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: TAXONOMÍA DE FALLOS VISIBLE AL INVOCANTE
 *
 * VISION HIPER-HOLÍSTICA:
 * La verificación distingue tres desenlaces públicos (válido, firma
 * inválida, entrada malformada) y el descifrado distingue texto
 * recuperado, fallo de integridad y entrada malformada. Esa taxonomía
 * se materializa aquí; los fallos aritméticos del estrato L1 se
 * proyectan a la variante pública correcta.
 * =================================================================
 */

use cosign_core_math::prelude::MathError;
use thiserror::Error;

/// Taxonomía de fallos del protocolo colaborativo SM2.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Entrada malformada: longitud errónea, escalar fuera de rango,
    /// punto fuera de la curva o encuadre de criptograma inválido.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(&'static str),

    /// Fallo criptográfico: verificación o MAC sin correspondencia,
    /// inversa de cero, identidad del grupo prohibida, flujo KDF nulo o
    /// agotamiento del límite de reintentos.
    #[error("CRYPTO_FAILURE: {0}")]
    CryptoFailure(&'static str),

    /// La fuente de entropía del sistema rehusó producir octetos.
    #[error("ENTROPY_FAILURE: the operating system refused to produce random octets")]
    EntropyFailure,
}

impl From<MathError> for ProtocolError {
    /**
     * Proyección del catálogo L1 a la taxonomía pública L2.
     *
     * Los fallos de forma (longitud, rango, curva) son entrada
     * malformada; las degeneraciones aritméticas (inversa de cero,
     * identidad prohibida, colapso escalar) son fallos criptográficos.
     */
    fn from(fault: MathError) -> Self {
        match fault {
            MathError::InvalidLength { .. } => {
                ProtocolError::InvalidInput("LENGTH_CONTRACT_VIOLATION")
            }
            MathError::ValueOutOfRange => {
                ProtocolError::InvalidInput("SCALAR_OR_COORDINATE_OVERFLOW")
            }
            MathError::PointNotOnCurve => ProtocolError::InvalidInput("OFF_CURVE_POINT"),
            MathError::InverseOfZero => ProtocolError::CryptoFailure("DIV_ZERO_COLLAPSE"),
            MathError::PointAtInfinity => {
                ProtocolError::CryptoFailure("POINT_AT_INFINITY_FORBIDDEN")
            }
            MathError::ZeroScalar => ProtocolError::InvalidInput("SCALAR_COLLAPSE_TO_ZERO"),
        }
    }
}
