// [libs/core/math-engine/src/arithmetic.rs]
/*!
 * =================================================================
 * APARATO: CORE ARITHMETIC KERNEL (V4.1 - BRANCHLESS MASTER)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: OPERACIONES U256 DE TIEMPO CONSTANTE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BRANCHLESS SOVEREIGNTY: Toda selección condicional se resuelve
 *    mediante máscaras de 64 bits; ninguna rama depende de material
 *    secreto (escalares, coordenadas, acarreos).
 * 2. FIXED SHAPE: Los bucles de acarreo y la reducción Montgomery
 *    ejecutan un número de iteraciones independiente del valor.
 * 3. NOMINAL PURITY: Erradicación total de abreviaciones en la
 *    interfaz pública del kernel.
 *
 * # Mathematical Proof (Representation):
 * Un entero de 256 bits se representa como 4 palabras de 64 bits en
 * orden Little-Endian de limbs; la serialización externa es Big-Endian.
 * =================================================================
 */

/// Longitud canónica de un entero de 256 bits en bytes.
pub const U256_BYTE_SIZE: usize = 32;

/// Cantidad de limbs de 64 bits que componen un entero de 256 bits.
pub const U256_LIMB_COUNT: usize = 4;

/**
 * Suma con acarreo de precisión simple: (a + b + carry_in).
 * Retorna la palabra baja y el acarreo saliente (0 o 1).
 */
#[inline(always)]
#[must_use]
pub const fn add_with_carry(alpha: u64, beta: u64, carry_in: u64) -> (u64, u64) {
    let total = (alpha as u128) + (beta as u128) + (carry_in as u128);
    (total as u64, (total >> 64) as u64)
}

/**
 * Resta con préstamo de precisión simple: (a - b - borrow_in).
 * Retorna la palabra baja y el préstamo saliente (0 o 1).
 */
#[inline(always)]
#[must_use]
pub const fn subtract_with_borrow(alpha: u64, beta: u64, borrow_in: u64) -> (u64, u64) {
    let total = (alpha as u128).wrapping_sub((beta as u128) + (borrow_in as u128));
    (total as u64, ((total >> 64) as u64) & 1)
}

/**
 * Suma de 256 bits con acarreo saliente. Bucle de forma fija.
 */
#[inline(always)]
#[must_use]
pub const fn add_u256(alpha: &[u64; 4], beta: &[u64; 4]) -> ([u64; 4], u64) {
    let mut result_limbs = [0u64; 4];
    let mut carry = 0u64;
    let mut index = 0;
    while index < 4 {
        let (limb, carry_out) = add_with_carry(alpha[index], beta[index], carry);
        result_limbs[index] = limb;
        carry = carry_out;
        index += 1;
    }
    (result_limbs, carry)
}

/**
 * Resta de 256 bits con préstamo saliente. Bucle de forma fija.
 */
#[inline(always)]
#[must_use]
pub const fn subtract_u256(alpha: &[u64; 4], beta: &[u64; 4]) -> ([u64; 4], u64) {
    let mut result_limbs = [0u64; 4];
    let mut borrow = 0u64;
    let mut index = 0;
    while index < 4 {
        let (limb, borrow_out) = subtract_with_borrow(alpha[index], beta[index], borrow);
        result_limbs[index] = limb;
        borrow = borrow_out;
        index += 1;
    }
    (result_limbs, borrow)
}

/**
 * Selección condicional por máscara: retorna 'when_set' si la máscara es
 * todo-unos, 'when_clear' si es todo-ceros.
 *
 * # Mathematical Proof:
 * (x AND mask) OR (y AND NOT mask) materializa un multiplexor sin
 * ramificación; el patrón de accesos a memoria es idéntico en ambos casos.
 */
#[inline(always)]
#[must_use]
pub const fn select_u256(when_set: &[u64; 4], when_clear: &[u64; 4], mask: u64) -> [u64; 4] {
    let mut result_limbs = [0u64; 4];
    let mut index = 0;
    while index < 4 {
        result_limbs[index] = (when_set[index] & mask) | (when_clear[index] & !mask);
        index += 1;
    }
    result_limbs
}

/**
 * Máscara de nulidad: todo-unos cuando el operando es cero.
 */
#[inline(always)]
#[must_use]
pub const fn is_zero_mask(limbs: &[u64; 4]) -> u64 {
    let folded = limbs[0] | limbs[1] | limbs[2] | limbs[3];
    let non_zero_bit = (folded | folded.wrapping_neg()) >> 63;
    (non_zero_bit ^ 1).wrapping_neg()
}

/**
 * Comparación de orden: verdadero cuando alpha >= beta.
 * Se deriva del préstamo de la resta, sin ramas.
 */
#[inline(always)]
#[must_use]
pub const fn is_greater_or_equal_u256(alpha: &[u64; 4], beta: &[u64; 4]) -> bool {
    let (_, borrow) = subtract_u256(alpha, beta);
    borrow == 0
}

/**
 * Igualdad en tiempo constante.
 */
#[inline(always)]
#[must_use]
pub const fn equals_u256(alpha: &[u64; 4], beta: &[u64; 4]) -> bool {
    let folded = (alpha[0] ^ beta[0])
        | (alpha[1] ^ beta[1])
        | (alpha[2] ^ beta[2])
        | (alpha[3] ^ beta[3]);
    folded == 0
}

/**
 * Suma modular: (alpha + beta) mod modulus, con operandos ya reducidos.
 *
 * # Mathematical Proof:
 * La suma cabe en 257 bits; una única sustracción condicional del módulo
 * (seleccionada por máscara a partir de acarreo y préstamo) devuelve el
 * resultado al rango [0, m-1].
 */
#[inline(always)]
#[must_use]
pub const fn add_modular_u256(alpha: &[u64; 4], beta: &[u64; 4], modulus: &[u64; 4]) -> [u64; 4] {
    let (raw_sum, carry) = add_u256(alpha, beta);
    let (reduced, borrow) = subtract_u256(&raw_sum, modulus);
    // Se conserva la suma cruda sólo cuando no hubo acarreo y sí hubo préstamo.
    let keep_raw_mask = ((carry ^ 1) & borrow).wrapping_neg();
    select_u256(&raw_sum, &reduced, keep_raw_mask)
}

/**
 * Resta modular: (alpha - beta) mod modulus, con operandos ya reducidos.
 */
#[inline(always)]
#[must_use]
pub const fn subtract_modular_u256(
    alpha: &[u64; 4],
    beta: &[u64; 4],
    modulus: &[u64; 4],
) -> [u64; 4] {
    let (raw_difference, borrow) = subtract_u256(alpha, beta);
    let (wrapped, _) = add_u256(&raw_difference, modulus);
    let use_wrapped_mask = borrow.wrapping_neg();
    select_u256(&wrapped, &raw_difference, use_wrapped_mask)
}

/**
 * Multiplicación escolar 256x256 -> 512 bits. Bucles de forma fija.
 */
#[must_use]
pub const fn multiply_u256_wide(alpha: &[u64; 4], beta: &[u64; 4]) -> ([u64; 4], [u64; 4]) {
    let mut product_words = [0u64; 8];
    let mut i = 0;
    while i < 4 {
        let mut carry: u128 = 0;
        let mut j = 0;
        while j < 4 {
            let term = (alpha[i] as u128) * (beta[j] as u128)
                + (product_words[i + j] as u128)
                + carry;
            product_words[i + j] = term as u64;
            carry = term >> 64;
            j += 1;
        }
        product_words[i + 4] = carry as u64;
        i += 1;
    }
    let low_words = [product_words[0], product_words[1], product_words[2], product_words[3]];
    let high_words = [product_words[4], product_words[5], product_words[6], product_words[7]];
    (low_words, high_words)
}

/**
 * Reducción Montgomery (REDC) de un producto de 512 bits.
 *
 * # Mathematical Proof:
 * Con m = -modulus^-1 mod 2^64, cada pasada anula el limb bajo del
 * acumulador; tras 4 pasadas el acumulador desplazado equivale a
 * T * R^-1 mod modulus con R = 2^256. Para operandos reducidos el
 * resultado reside en [0, 2m), y una sustracción condicional final
 * (por máscara) lo devuelve a [0, m-1].
 *
 * # Performance:
 * Forma fija: 4 pasadas con propagación de acarreo de longitud constante.
 */
#[must_use]
pub const fn montgomery_reduce_u256(
    low_words: &[u64; 4],
    high_words: &[u64; 4],
    modulus: &[u64; 4],
    modulus_negated_inverse: u64,
) -> [u64; 4] {
    let mut accumulator = [0u64; 9];
    accumulator[0] = low_words[0];
    accumulator[1] = low_words[1];
    accumulator[2] = low_words[2];
    accumulator[3] = low_words[3];
    accumulator[4] = high_words[0];
    accumulator[5] = high_words[1];
    accumulator[6] = high_words[2];
    accumulator[7] = high_words[3];

    let mut i = 0;
    while i < 4 {
        let folding_multiplier = accumulator[i].wrapping_mul(modulus_negated_inverse);
        let mut carry: u128 = 0;

        let mut j = 0;
        while j < 4 {
            let term = (folding_multiplier as u128) * (modulus[j] as u128)
                + (accumulator[i + j] as u128)
                + carry;
            accumulator[i + j] = term as u64;
            carry = term >> 64;
            j += 1;
        }

        // Propagación de acarreo de longitud fija hasta el limb centinela.
        let mut k = i + 4;
        while k < 9 {
            let term = (accumulator[k] as u128) + carry;
            accumulator[k] = term as u64;
            carry = term >> 64;
            k += 1;
        }
        i += 1;
    }

    let folded_words = [accumulator[4], accumulator[5], accumulator[6], accumulator[7]];
    let overflow_bit = accumulator[8];

    let (reduced, borrow) = subtract_u256(&folded_words, modulus);
    let keep_raw_mask = ((overflow_bit ^ 1) & borrow).wrapping_neg();
    select_u256(&folded_words, &reduced, keep_raw_mask)
}

/**
 * Decodifica un buffer Big-Endian de 32 bytes en limbs Little-Endian.
 */
#[inline(always)]
#[must_use]
pub fn limbs_from_be_bytes(bytes_input: &[u8; 32]) -> [u64; 4] {
    let mut limbs_output = [0u64; 4];
    let mut index = 0;
    while index < 4 {
        let byte_start_offset = (3 - index) * 8;
        let mut word_bytes = [0u8; 8];
        word_bytes.copy_from_slice(&bytes_input[byte_start_offset..byte_start_offset + 8]);
        limbs_output[index] = u64::from_be_bytes(word_bytes);
        index += 1;
    }
    limbs_output
}

/**
 * Codifica limbs Little-Endian en un buffer Big-Endian de 32 bytes.
 */
#[inline(always)]
#[must_use]
pub fn limbs_to_be_bytes(limbs_input: &[u64; 4]) -> [u8; 32] {
    let mut bytes_output = [0u8; 32];
    let mut index = 0;
    while index < 4 {
        let byte_start_offset = (3 - index) * 8;
        let word_bytes = limbs_input[index].to_be_bytes();
        bytes_output[byte_start_offset..byte_start_offset + 8].copy_from_slice(&word_bytes);
        index += 1;
    }
    bytes_output
}
