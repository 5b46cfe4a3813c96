// [libs/core/math-engine/src/errors.rs]
/*!
 * =================================================================
 * APARATO: MATH FAULT CATALOG (V4.0 - SM2 ALIGNED)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: CATÁLOGO DE FALLOS ARITMÉTICOS Y GEOMÉTRICOS
 * =================================================================
 */

use thiserror::Error;

/// Catálogo de fallos del motor matemático SM2.
///
/// Cada variante porta un código de fallo nominal en SCREAMING_CASE para
/// permitir el rastreo forense en los estratos superiores.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// El buffer de entrada no tiene la longitud canónica esperada.
    #[error("INVALID_LENGTH: expected {expected} octets, got {got}")]
    InvalidLength {
        /// Longitud canónica requerida por la operación.
        expected: usize,
        /// Longitud real recibida.
        got: usize,
    },

    /// El valor codificado no reside por debajo del módulo correspondiente.
    #[error("VALUE_OUT_OF_RANGE: encoded integer is not below the modulus")]
    ValueOutOfRange,

    /// Se solicitó la inversa modular del elemento nulo.
    #[error("DIV_ZERO_COLLAPSE: modular inverse of zero requested")]
    InverseOfZero,

    /// Las coordenadas no satisfacen la ecuación de Weierstrass de SM2.
    #[error("OFF_CURVE_POINT: coordinates do not satisfy y^2 = x^3 + ax + b")]
    PointNotOnCurve,

    /// El elemento identidad apareció donde el protocolo lo prohíbe.
    #[error("POINT_AT_INFINITY: the identity element is forbidden here")]
    PointAtInfinity,

    /// Un escalar colapsó a cero donde se exige pertenencia a [1, n-1].
    #[error("SCALAR_COLLAPSE_TO_ZERO: zero is forbidden for keys and nonces")]
    ZeroScalar,
}
