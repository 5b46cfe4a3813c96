// [libs/core/math-engine/src/lib.rs]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

/*!
 * =================================================================
 * APARATO: CORE MATH MASTER HUB (V4.2 - SOVEREIGN SYNC)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE PRIMITIVAS SM2/SM3
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. GM STANDARD REGISTRATION: Registra los módulos de campo Fp, anillo
 *    Z_n, leyes de grupo Jacobianas, digest SM3 y derivación KDF de la
 *    familia GB/T 32918 / 32905.
 * 2. NOMINAL PRELUDE ALIGNMENT: Centraliza la exportación de tipos y
 *    motores bajo el preludio soberano para los estratos superiores.
 * 3. CONSTANT TIME DOCTRINE: Ningún módulo de este hub ramifica sobre
 *    material secreto; las selecciones se resuelven por máscara.
 *
 * # Mathematical Proof (Modular Integrity):
 * Este aparato actúa como el nodo raíz del grafo matemático, asegurando
 * que la ley de grupo y la aritmética de campo sean bit-perfectas para
 * todos los consumidores del protocolo colaborativo.
 * =================================================================
 */

/// Operaciones aritméticas U256 crudas de tiempo constante (kernel L1).
pub mod arithmetic;
/// Leyes de grupo Jacobianas y parámetros congelados de la curva SM2.
pub mod curve;
/// Catálogo de fallos aritméticos y geométricos del motor.
pub mod errors;
/// Aritmética de campo modular Fp con reducción Montgomery REDC.
pub mod field;
/// Derivación de claves en modo contador sobre SM3 (GB/T 32918.4).
pub mod kdf;
/// Estructuras de puntos afines y proyectivos.
pub mod point;
/// Aritmética modulo n (orden del subgrupo generado por G).
pub mod scalar;
/// Motor de resumen SM3 (GB/T 32905).
pub mod sm3;

/**
 * PRELUDIO MATEMÁTICO SOBERANO
 *
 * Única autoridad de importación autorizada para los estratos superiores
 * (L2-Protocol). Centraliza la nomenclatura nominal.
 */
pub mod prelude {
    // Kernel U256 de tiempo constante
    pub use crate::arithmetic::{
        add_modular_u256, is_greater_or_equal_u256, limbs_from_be_bytes, limbs_to_be_bytes,
        subtract_modular_u256, U256_BYTE_SIZE, U256_LIMB_COUNT,
    };

    // Estructuras geométricas y de campo
    pub use crate::curve::{CurveParams, Sm2GroupEngine, SM2_CURVE};
    pub use crate::field::{FieldElement, SM2_FIELD_PRIME};
    pub use crate::point::{AffinePoint, JacobianPoint};
    pub use crate::scalar::{Scalar, SM2_CURVE_ORDER};

    // Digest y derivación
    pub use crate::kdf::{derive_key, is_all_zero};
    pub use crate::sm3::{sm3_digest, Sm3Engine, SM3_BLOCK_SIZE, SM3_DIGEST_SIZE};

    // Catálogo de fallos
    pub use crate::errors::MathError;
}
