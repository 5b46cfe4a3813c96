// [libs/core/math-engine/src/field.rs]
/*!
 * =================================================================
 * APARATO: FINITE FIELD ELEMENT ENGINE (V4.2 - SM2 ZENITH)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA MODULAR Fp DE TIEMPO CONSTANTE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TRUE REDC: Ciclo Montgomery completo sobre el primo recomendado
 *    de GB/T 32918, blindando contra ataques de canal lateral.
 * 2. BRANCHLESS DISCIPLINE: Las sustracciones condicionales y la
 *    selección de resultados se resuelven por máscara en el kernel L1.
 * 3. NOMINAL PURITY: Erradicación total de abreviaciones.
 *
 * # Mathematical Proof (SM2 Field):
 * Opera sobre el cuerpo finito definido por
 * p = 2^256 - 2^224 - 2^96 + 2^64 - 1.
 * La representación interna utiliza 4 palabras de 64 bits en Little-Endian.
 * =================================================================
 */

use crate::arithmetic::{
    add_modular_u256, equals_u256, is_greater_or_equal_u256, is_zero_mask, limbs_from_be_bytes,
    limbs_to_be_bytes, montgomery_reduce_u256, multiply_u256_wide, select_u256,
    subtract_modular_u256,
};
use crate::errors::MathError;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use zeroize::Zeroize;

/// El primo p de la curva SM2 recomendada (GB/T 32918).
/// Representación en palabras de 64 bits (Little-Endian).
pub const SM2_FIELD_PRIME: [u64; 4] = [
    0xFFFFFFFFFFFFFFFF, 0xFFFFFFFF00000000, 0xFFFFFFFFFFFFFFFF, 0xFFFFFFFEFFFFFFFF,
];

/// Constante de Montgomery: m = -p^-1 mod 2^64.
/// Como p ≡ -1 mod 2^64, la constante colapsa a la unidad.
const MONTGOMERY_NEG_INV_P: u64 = 0x0000000000000001;

/// Constante R^2 mod p para la transformación al Dominio Montgomery.
const MONTGOMERY_R2_MOD_P: [u64; 4] = [
    0x0000000200000003, 0x00000002FFFFFFFF, 0x0000000100000001, 0x0000000400000002,
];

/// Exponente de Fermat p - 2, recorrido por la escalera de inversión.
const FERMAT_EXPONENT_P_MINUS_2: [u64; 4] = [
    0xFFFFFFFFFFFFFFFD, 0xFFFFFFFF00000000, 0xFFFFFFFFFFFFFFFF, 0xFFFFFFFEFFFFFFFF,
];

/**
 * Elemento del campo finito Fp.
 * Garantiza que el valor siempre resida en el rango [0, p-1].
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldElement {
    /// Representación interna en 4 palabras de 64 bits (Little-Endian).
    pub words: [u64; 4],
}

impl FieldElement {
    /**
     * Constructor atómico desde un valor escalar de 64 bits.
     */
    #[inline(always)]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self { words: [value, 0, 0, 0] }
    }

    /**
     * Constructor directo desde palabras de 64 bits (Limbs).
     * El invocante garantiza que el valor reside por debajo de p.
     */
    #[inline(always)]
    #[must_use]
    pub const fn from_words(limbs: [u64; 4]) -> Self {
        Self { words: limbs }
    }

    /**
     * Construye un elemento a partir de un buffer Big-Endian de 32 bytes.
     *
     * # Errors:
     * Retorna 'ValueOutOfRange' cuando el valor codificado es >= p; todo
     * punto deserializado del cable debe superar esta barrera.
     */
    pub fn from_be_bytes(bytes_input: &[u8; 32]) -> Result<Self, MathError> {
        let candidate_limbs = limbs_from_be_bytes(bytes_input);
        if is_greater_or_equal_u256(&candidate_limbs, &SM2_FIELD_PRIME) {
            return Err(MathError::ValueOutOfRange);
        }
        Ok(Self { words: candidate_limbs })
    }

    /**
     * Transforma el elemento en un buffer de bytes Big-Endian.
     */
    #[inline(always)]
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        limbs_to_be_bytes(&self.words)
    }

    // --- INTERFAZ ARITMÉTICA NOMINAL ---

    /**
     * Adición Modular: (self + other) mod p.
     */
    #[inline(always)]
    #[must_use]
    pub fn add_modular(&self, other: &Self) -> Self {
        Self { words: add_modular_u256(&self.words, &other.words, &SM2_FIELD_PRIME) }
    }

    /**
     * Sustracción Modular: (self - other) mod p.
     */
    #[inline(always)]
    #[must_use]
    pub fn subtract_modular(&self, other: &Self) -> Self {
        Self { words: subtract_modular_u256(&self.words, &other.words, &SM2_FIELD_PRIME) }
    }

    /**
     * Negación Modular: (p - self) mod p.
     */
    #[inline(always)]
    #[must_use]
    pub fn negate_modular(&self) -> Self {
        Self::from_u64(0).subtract_modular(self)
    }

    /**
     * Multiplicación Modular: (self * other) mod p.
     * Utiliza el ciclo completo Montgomery para máxima seguridad.
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
     * Cuadrado Modular: (self^2) mod p.
     */
    #[inline(always)]
    #[must_use]
    pub fn square_modular(&self) -> Self {
        self.multiply_modular(self)
    }

    // --- MOTOR MONTGOMERY CORE (REDC) ---

    #[inline(always)]
    #[must_use]
    pub(crate) fn to_montgomery_domain(&self) -> Self {
        let r2_constant = Self { words: MONTGOMERY_R2_MOD_P };
        self.multiply_montgomery(&r2_constant)
    }

    #[inline(always)]
    #[must_use]
    pub(crate) fn from_montgomery_domain(&self) -> Self {
        Self {
            words: montgomery_reduce_u256(
                &self.words,
                &[0u64; 4],
                &SM2_FIELD_PRIME,
                MONTGOMERY_NEG_INV_P,
            ),
        }
    }

    #[inline(always)]
    #[must_use]
    pub(crate) fn multiply_montgomery(&self, other: &Self) -> Self {
        let (low_words, high_words) = multiply_u256_wide(&self.words, &other.words);
        Self {
            words: montgomery_reduce_u256(
                &low_words,
                &high_words,
                &SM2_FIELD_PRIME,
                MONTGOMERY_NEG_INV_P,
            ),
        }
    }

    // --- PREDICADOS Y SELECCIÓN ---

    /// Determina si el elemento es el neutro aditivo.
    #[inline(always)]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        is_zero_mask(&self.words) == u64::MAX
    }

    /// Máscara de nulidad (todo-unos cuando el elemento es cero).
    #[inline(always)]
    #[must_use]
    pub fn zero_mask(&self) -> u64 {
        is_zero_mask(&self.words)
    }

    /// Determina la paridad del elemento.
    #[inline(always)]
    #[must_use]
    pub fn is_odd(&self) -> bool {
        (self.words[0] & 1) == 1
    }

    /**
     * Igualdad en tiempo constante (sin cortocircuito por limb).
     */
    #[inline(always)]
    #[must_use]
    pub fn constant_time_equals(&self, other: &Self) -> bool {
        equals_u256(&self.words, &other.words)
    }

    /**
     * Selección condicional por máscara: 'when_set' si la máscara es
     * todo-unos, 'when_clear' en caso contrario.
     */
    #[inline(always)]
    #[must_use]
    pub fn conditional_select(when_set: &Self, when_clear: &Self, mask: u64) -> Self {
        Self { words: select_u256(&when_set.words, &when_clear.words, mask) }
    }

    /**
     * Inversión Modular vía Pequeño Teorema de Fermat.
     *
     * # Mathematical Proof:
     * self^(p-2) ≡ self^-1 mod p. El exponente es una constante pública,
     * por lo que la ramificación sobre sus bits no filtra secretos; la
     * base permanece en el Dominio Montgomery durante toda la escalera.
     *
     * # Errors:
     * La inversa del elemento nulo señala 'InverseOfZero'.
     */
    #[instrument(level = "trace", skip(self))]
    pub fn invert(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Err(MathError::InverseOfZero);
        }
        let mut base_montgomery = self.to_montgomery_domain();
        let mut result_montgomery = FieldElement::from_u64(1).to_montgomery_domain();

        for &exponent_word in &FERMAT_EXPONENT_P_MINUS_2 {
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
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.words.zeroize();
    }
}
