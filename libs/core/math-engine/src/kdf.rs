// [libs/core/math-engine/src/kdf.rs]
/*!
 * =================================================================
 * APARATO: SM2 KEY DERIVATION ENGINE (V4.0 - COUNTER MODE)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: DERIVACIÓN DE CLAVES KDF SEGÚN GB/T 32918.4
 * =================================================================
 */

use crate::sm3::{Sm3Engine, SM3_DIGEST_SIZE};

/**
 * Deriva 'output_octets' bytes de material de clave a partir del secreto
 * compartido Z, concatenando SM3(Z ‖ ct) para ct = 1, 2, 3, … con el
 * contador codificado como entero Big-Endian de 32 bits.
 *
 * El flujo resultante puede ser todo-ceros; el invocante debe tratarlo
 * como señal de reintento o fallo según la operación (ver
 * 'is_all_zero').
 */
#[must_use]
pub fn derive_key(shared_material: &[u8], output_octets: usize) -> Vec<u8> {
    let mut key_stream = Vec::with_capacity(output_octets);
    let mut counter: u32 = 1;

    while key_stream.len() < output_octets {
        let mut engine = Sm3Engine::new();
        engine.absorb(shared_material);
        engine.absorb(&counter.to_be_bytes());
        let chunk = engine.finalize();

        let remaining = output_octets - key_stream.len();
        key_stream.extend_from_slice(&chunk[..remaining.min(SM3_DIGEST_SIZE)]);
        counter = counter.wrapping_add(1);
    }
    key_stream
}

/**
 * Detector de flujo nulo en tiempo constante (plegado OR completo,
 * sin cortocircuito).
 */
#[inline]
#[must_use]
pub fn is_all_zero(buffer: &[u8]) -> bool {
    let folded = buffer.iter().fold(0u8, |acc, &octet| acc | octet);
    folded == 0
}
