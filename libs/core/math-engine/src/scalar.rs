// [libs/core/math-engine/src/scalar.rs]
/*!
 * =================================================================
 * APARATO: SCALAR MODULAR ENGINE (V4.1 - ORDER HARDENED)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA MODULO N (ORDEN DE LA CURVA SM2)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FULL RING SUPPORT: Las ecuaciones de firma colaborativa exigen
 *    suma, resta, producto e inversa completas módulo n; todas se
 *    despachan sobre el kernel Montgomery L1.
 * 2. ATOMIC REDUCTION: La reducción k mod n aprovecha que 2n > 2^256,
 *    resolviéndose en una única sustracción condicional por máscara.
 * 3. SECRET HYGIENE: El tipo implementa Zeroize; los estratos superiores
 *    borran nonces y fragmentos de clave antes de liberar su memoria.
 * =================================================================
 */

use crate::arithmetic::{
    add_modular_u256, equals_u256, is_greater_or_equal_u256, is_zero_mask, limbs_from_be_bytes,
    limbs_to_be_bytes, montgomery_reduce_u256, multiply_u256_wide, select_u256, subtract_u256,
    subtract_modular_u256,
};
use crate::errors::MathError;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use zeroize::Zeroize;

/// El orden n del subgrupo generado por G en la curva SM2 recomendada.
/// n = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123
pub const SM2_CURVE_ORDER: [u64; 4] = [
    0x53BBF40939D54123, 0x7203DF6B21C6052B, 0xFFFFFFFFFFFFFFFF, 0xFFFFFFFEFFFFFFFF,
];

/// Constante de Montgomery: m = -n^-1 mod 2^64.
const MONTGOMERY_NEG_INV_N: u64 = 0x327F9E8872350975;

/// Constante R^2 mod n para la transformación al Dominio Montgomery.
const MONTGOMERY_R2_MOD_N: [u64; 4] = [
    0x901192AF7C114F20, 0x3464504ADE6FA2FA, 0x620FC84C3AFFE0D4, 0x1EB5E412A22B3D3B,
];

/// Exponente de Fermat n - 2 para la escalera de inversión.
const FERMAT_EXPONENT_N_MINUS_2: [u64; 4] = [
    0x53BBF40939D54121, 0x7203DF6B21C6052B, 0xFFFFFFFFFFFFFFFF, 0xFFFFFFFEFFFFFFFF,
];

/**
 * Elemento del anillo Z_n.
 *
 * El invariante de construcción garantiza que el valor reside en
 * [0, n-1]; el cero es representable pero los estratos superiores lo
 * prohíben como clave privada o nonce.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scalar {
    /// Palabras de 64 bits que componen el escalar (Little-Endian).
    pub words: [u64; 4],
}

impl Scalar {
    /**
     * Constructor atómico desde un valor de 64 bits.
     */
    #[inline(always)]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self { words: [value, 0, 0, 0] }
    }

    /// El neutro aditivo del anillo.
    #[inline(always)]
    #[must_use]
    pub const fn zero() -> Self {
        Self::from_u64(0)
    }

    /// El neutro multiplicativo del anillo.
    #[inline(always)]
    #[must_use]
    pub const fn one() -> Self {
        Self::from_u64(1)
    }

    /**
     * Construye un escalar a partir de un buffer Big-Endian de 32 bytes,
     * exigiendo pertenencia estricta a [0, n-1].
     *
     * # Errors:
     * Retorna 'ValueOutOfRange' cuando el valor codificado es >= n.
     */
    pub fn from_be_bytes(bytes_input: &[u8; 32]) -> Result<Self, MathError> {
        let candidate_limbs = limbs_from_be_bytes(bytes_input);
        if is_greater_or_equal_u256(&candidate_limbs, &SM2_CURVE_ORDER) {
            return Err(MathError::ValueOutOfRange);
        }
        Ok(Self { words: candidate_limbs })
    }

    /**
     * Construye un escalar reduciendo el buffer módulo n.
     *
     * # Mathematical Proof:
     * Como n > 2^255, todo entero de 256 bits reside en [0, 2n), y una
     * única sustracción condicional (por máscara) completa la reducción.
     * Es la vía canónica para plegar digests e x-coordenadas al anillo.
     */
    #[inline(always)]
    #[must_use]
    pub fn from_be_bytes_reduced(bytes_input: &[u8; 32]) -> Self {
        let candidate_limbs = limbs_from_be_bytes(bytes_input);
        let (reduced_limbs, borrow) = subtract_u256(&candidate_limbs, &SM2_CURVE_ORDER);
        let keep_raw_mask = borrow.wrapping_neg();
        Self { words: select_u256(&candidate_limbs, &reduced_limbs, keep_raw_mask) }
    }

    /**
     * Transforma el escalar en un buffer Big-Endian de 32 bytes.
     */
    #[inline(always)]
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        limbs_to_be_bytes(&self.words)
    }

    // --- INTERFAZ ARITMÉTICA NOMINAL ---

    /// Adición modular: (self + other) mod n.
    #[inline(always)]
    #[must_use]
    pub fn add_modular(&self, other: &Self) -> Self {
        Self { words: add_modular_u256(&self.words, &other.words, &SM2_CURVE_ORDER) }
    }

    /// Sustracción modular: (self - other) mod n.
    #[inline(always)]
    #[must_use]
    pub fn subtract_modular(&self, other: &Self) -> Self {
        Self { words: subtract_modular_u256(&self.words, &other.words, &SM2_CURVE_ORDER) }
    }

    /**
     * Multiplicación modular: (self * other) mod n.
     * Ciclo Montgomery completo, idéntico en forma al motor de campo.
     */
    #[inline(always)]
    #[must_use]
    pub fn multiply_modular(&self, other: &Self) -> Self {
        let alpha_montgomery = self.to_montgomery_domain();
        let beta_montgomery = other.to_montgomery_domain();
        alpha_montgomery
            .multiply_montgomery(&beta_montgomery)
            .from_montgomery_domain()
    }

    /**
     * Inversión modular vía Pequeño Teorema de Fermat: self^(n-2) mod n.
     *
     * # Errors:
     * La inversa del escalar nulo señala 'InverseOfZero'.
     */
    #[instrument(level = "trace", skip(self))]
    pub fn invert(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Err(MathError::InverseOfZero);
        }
        let mut base_montgomery = self.to_montgomery_domain();
        let mut result_montgomery = Scalar::one().to_montgomery_domain();

        for &exponent_word in &FERMAT_EXPONENT_N_MINUS_2 {
            let mut remaining_bits = exponent_word;
            for _ in 0..64 {
                if remaining_bits & 1 == 1 {
                    result_montgomery = result_montgomery.multiply_montgomery(&base_montgomery);
                }
                base_montgomery = base_montgomery.multiply_montgomery(&base_montgomery);
                remaining_bits >>= 1;
            }
        }
        Ok(result_montgomery.from_montgomery_domain())
    }

    // --- MOTOR MONTGOMERY CORE (REDC) ---

    #[inline(always)]
    #[must_use]
    fn to_montgomery_domain(&self) -> Self {
        let r2_constant = Self { words: MONTGOMERY_R2_MOD_N };
        self.multiply_montgomery(&r2_constant)
    }

    #[inline(always)]
    #[must_use]
    fn from_montgomery_domain(&self) -> Self {
        Self {
            words: montgomery_reduce_u256(
                &self.words,
                &[0u64; 4],
                &SM2_CURVE_ORDER,
                MONTGOMERY_NEG_INV_N,
            ),
        }
    }

    #[inline(always)]
    #[must_use]
    fn multiply_montgomery(&self, other: &Self) -> Self {
        let (low_words, high_words) = multiply_u256_wide(&self.words, &other.words);
        Self {
            words: montgomery_reduce_u256(
                &low_words,
                &high_words,
                &SM2_CURVE_ORDER,
                MONTGOMERY_NEG_INV_N,
            ),
        }
    }

    // --- PREDICADOS ---

    /// Determina si el escalar es el neutro aditivo.
    #[inline(always)]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        is_zero_mask(&self.words) == u64::MAX
    }

    /// Igualdad en tiempo constante.
    #[inline(always)]
    #[must_use]
    pub fn constant_time_equals(&self, other: &Self) -> bool {
        equals_u256(&self.words, &other.words)
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.words.zeroize();
    }
}
