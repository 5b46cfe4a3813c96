// [libs/domain/protocol/src/identity.rs]
/*!
 * =================================================================
 * APARATO: IDENTITY HASH ENGINE (V4.0 - Z_A STANDARD)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: PREFIJO DE IDENTIDAD Z_A Y DIGEST DE MENSAJE
 *
 * # Mathematical Proof (Z_A):
 * Z_A = SM3(ENTL ‖ ID ‖ a ‖ b ‖ x_G ‖ y_G ‖ x_A ‖ y_A), donde ENTL es
 * la longitud en bits de la identidad como entero Big-Endian de 16 bits
 * y los seis elementos de campo viajan como 32 octetos Big-Endian.
 * =================================================================
 */

use crate::errors::ProtocolError;
use cosign_core_math::prelude::*;

/// Identidad de usuario por defecto del estándar SM2 (16 octetos ASCII).
pub const DEFAULT_USER_IDENTITY: &[u8; 16] = b"1234567812345678";

/// Longitud máxima de identidad: ENTL debe caber en 16 bits.
const MAX_IDENTITY_OCTETS: usize = 8191;

/**
 * Computa el prefijo de identidad Z_A sobre coordenadas públicas crudas.
 *
 * Acepta coordenadas sin certificar pertenencia a la curva: la vía
 * diagnóstica de 'hash_message' inyecta aquí la clave pública nula.
 */
pub fn compute_za_from_coordinates(
    identity: &[u8],
    public_x_bytes: &[u8; 32],
    public_y_bytes: &[u8; 32],
) -> Result<[u8; SM3_DIGEST_SIZE], ProtocolError> {
    if identity.len() > MAX_IDENTITY_OCTETS {
        return Err(ProtocolError::InvalidInput("IDENTITY_ENTL_OVERFLOW"));
    }
    let identity_bit_length = (identity.len() as u16) * 8;
    let parameters = &*SM2_CURVE;

    let mut engine = Sm3Engine::new();
    engine.absorb(&identity_bit_length.to_be_bytes());
    engine.absorb(identity);
    engine.absorb(&parameters.coefficient_a.to_be_bytes());
    engine.absorb(&parameters.coefficient_b.to_be_bytes());
    engine.absorb(&parameters.generator.x.to_be_bytes());
    engine.absorb(&parameters.generator.y.to_be_bytes());
    engine.absorb(public_x_bytes);
    engine.absorb(public_y_bytes);
    Ok(engine.finalize())
}

/**
 * Computa Z_A para una clave pública certificada.
 */
pub fn compute_za(
    identity: &[u8],
    public_key: &AffinePoint,
) -> Result<[u8; SM3_DIGEST_SIZE], ProtocolError> {
    if public_key.infinity {
        return Err(MathError::PointAtInfinity.into());
    }
    compute_za_from_coordinates(
        identity,
        &public_key.x.to_be_bytes(),
        &public_key.y.to_be_bytes(),
    )
}

/**
 * Digest de mensaje para firma y verificación: e = SM3(Z_A ‖ M).
 */
pub fn message_digest(
    identity: &[u8],
    public_key: &AffinePoint,
    message: &[u8],
) -> Result<[u8; SM3_DIGEST_SIZE], ProtocolError> {
    let identity_prefix = compute_za(identity, public_key)?;
    let mut engine = Sm3Engine::new();
    engine.absorb(&identity_prefix);
    engine.absorb(message);
    Ok(engine.finalize())
}
