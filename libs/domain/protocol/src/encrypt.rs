// [libs/domain/protocol/src/encrypt.rs]
/*!
 * =================================================================
 * APARATO: STANDARD ENCRYPTION ENGINE (V4.1 - GB/T 32918.4)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: CIFRADO Y DESCIFRADO SM2 DE PARTE ÚNICA
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. C1C3C2 ORDER: El criptograma viaja en el orden estándar de 2016;
 *    la longitud de C2 se recupera del encuadre total.
 * 2. KDF RETRY: El flujo de clave todo-ceros invalida el sorteo y
 *    reintenta dentro del límite acotado.
 * 3. TAG DISCIPLINE: La etiqueta C3 se coteja en tiempo constante; la
 *    discordancia es fallo de integridad, nunca pánico.
 * =================================================================
 */

use crate::codec::Sm2Ciphertext;
use crate::errors::ProtocolError;
use crate::rng::{OsScalarSource, ScalarSource, RETRY_BOUND};
use cosign_core_math::prelude::*;
use tracing::{instrument, trace};
use zeroize::Zeroize;

/**
 * Cifra un mensaje bajo la clave pública P usando el CSPRNG del sistema.
 */
pub fn encrypt(public_key: &AffinePoint, message: &[u8]) -> Result<Sm2Ciphertext, ProtocolError> {
    encrypt_with_source(public_key, message, &mut OsScalarSource)
}

/**
 * Cifra un mensaje con una fuente de nonces explícita.
 *
 * # Mathematical Proof:
 * C1 = k·G; (x2, y2) = k·P; t = KDF(x2 ‖ y2, |M|); C2 = M ⊕ t;
 * C3 = SM3(x2 ‖ M ‖ y2). El flujo t todo-ceros reintenta con un nuevo k.
 */
#[instrument(level = "trace", skip_all)]
pub fn encrypt_with_source(
    public_key: &AffinePoint,
    message: &[u8],
    nonce_source: &mut dyn ScalarSource,
) -> Result<Sm2Ciphertext, ProtocolError> {
    if message.is_empty() {
        return Err(ProtocolError::InvalidInput("EMPTY_PLAINTEXT"));
    }
    if public_key.infinity || !Sm2GroupEngine::is_on_curve(public_key) {
        return Err(MathError::PointNotOnCurve.into());
    }

    for attempt_index in 0..RETRY_BOUND {
        let mut ephemeral_nonce = nonce_source.next_scalar()?;

        let ephemeral_point = Sm2GroupEngine::generator_multiply(&ephemeral_nonce).to_affine()?;
        let shared_point = Sm2GroupEngine::scalar_multiply(&ephemeral_nonce, public_key).to_affine()?;
        ephemeral_nonce.zeroize();

        if ephemeral_point.infinity || shared_point.infinity {
            return Err(MathError::PointAtInfinity.into());
        }

        let shared_x_bytes = shared_point.x.to_be_bytes();
        let shared_y_bytes = shared_point.y.to_be_bytes();
        let mut shared_material = [0u8; 64];
        shared_material[..32].copy_from_slice(&shared_x_bytes);
        shared_material[32..].copy_from_slice(&shared_y_bytes);

        let mut key_stream = derive_key(&shared_material, message.len());
        if is_all_zero(&key_stream) {
            trace!(attempt_index, "null KDF stream, resampling ephemeral nonce");
            continue;
        }

        let masked_payload: Vec<u8> = message
            .iter()
            .zip(key_stream.iter())
            .map(|(plain_octet, key_octet)| plain_octet ^ key_octet)
            .collect();
        key_stream.zeroize();

        let mut tag_engine = Sm3Engine::new();
        tag_engine.absorb(&shared_x_bytes);
        tag_engine.absorb(message);
        tag_engine.absorb(&shared_y_bytes);

        return Ok(Sm2Ciphertext {
            ephemeral_point,
            integrity_tag: tag_engine.finalize(),
            masked_payload,
        });
    }
    Err(ProtocolError::CryptoFailure("ENCRYPTION_RETRY_EXHAUSTION"))
}

/**
 * Descifra un criptograma SM2 con la clave privada d.
 *
 * # Mathematical Proof:
 * (x2, y2) = d·C1; t = KDF(x2 ‖ y2, |C2|); M = C2 ⊕ t;
 * SM3(x2 ‖ M ‖ y2) debe coincidir con C3.
 *
 * # Errors:
 * C1 fuera de la curva es entrada malformada (ya rechazada por el
 * códec); identidad del grupo, flujo KDF nulo y discordancia de la
 * etiqueta son fallos criptográficos.
 */
#[instrument(level = "trace", skip_all)]
pub fn decrypt(private_key: &Scalar, ciphertext: &Sm2Ciphertext) -> Result<Vec<u8>, ProtocolError> {
    if private_key.is_zero() {
        return Err(MathError::ZeroScalar.into());
    }
    if ciphertext.masked_payload.is_empty() {
        return Err(ProtocolError::InvalidInput("CIPHERTEXT_FRAMING_UNDERFLOW"));
    }
    if !Sm2GroupEngine::is_on_curve(&ciphertext.ephemeral_point) {
        return Err(MathError::PointNotOnCurve.into());
    }

    let shared_point =
        Sm2GroupEngine::scalar_multiply(private_key, &ciphertext.ephemeral_point).to_affine()?;
    if shared_point.infinity {
        return Err(MathError::PointAtInfinity.into());
    }

    recover_payload(&shared_point, &ciphertext.integrity_tag, &ciphertext.masked_payload)
}

/**
 * Núcleo compartido de recuperación: deriva el flujo, desenmascara y
 * coteja la etiqueta de integridad. Reutilizado por el completado del
 * descifrado colaborativo, donde el punto compartido llega del servidor.
 */
pub(crate) fn recover_payload(
    shared_point: &AffinePoint,
    integrity_tag: &[u8; SM3_DIGEST_SIZE],
    masked_payload: &[u8],
) -> Result<Vec<u8>, ProtocolError> {
    let shared_x_bytes = shared_point.x.to_be_bytes();
    let shared_y_bytes = shared_point.y.to_be_bytes();
    let mut shared_material = [0u8; 64];
    shared_material[..32].copy_from_slice(&shared_x_bytes);
    shared_material[32..].copy_from_slice(&shared_y_bytes);

    let mut key_stream = derive_key(&shared_material, masked_payload.len());
    if is_all_zero(&key_stream) {
        return Err(ProtocolError::CryptoFailure("NULL_KDF_STREAM"));
    }

    let recovered_payload: Vec<u8> = masked_payload
        .iter()
        .zip(key_stream.iter())
        .map(|(masked_octet, key_octet)| masked_octet ^ key_octet)
        .collect();
    key_stream.zeroize();

    let mut tag_engine = Sm3Engine::new();
    tag_engine.absorb(&shared_x_bytes);
    tag_engine.absorb(&recovered_payload);
    tag_engine.absorb(&shared_y_bytes);
    let reconstructed_tag = tag_engine.finalize();

    // Cotejo de etiqueta sin cortocircuito.
    let difference = reconstructed_tag
        .iter()
        .zip(integrity_tag.iter())
        .fold(0u8, |acc, (alpha, beta)| acc | (alpha ^ beta));
    if difference != 0 {
        return Err(ProtocolError::CryptoFailure("INTEGRITY_TAG_MISMATCH"));
    }
    Ok(recovered_payload)
}

/**
 * Variante de octetos crudos del cifrado: clave pública de 64 octetos,
 * criptograma C1 ‖ C3 ‖ C2. Espejo de la superficie FFI histórica.
 */
pub fn encrypt_bytes(public_key_bytes: &[u8], message: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let public_key = crate::codec::decode_point(public_key_bytes)?;
    encrypt(&public_key, message)?.to_wire_bytes()
}

/**
 * Variante de octetos crudos del descifrado.
 */
pub fn decrypt_bytes(
    private_key_bytes: &[u8],
    ciphertext_bytes: &[u8],
) -> Result<Vec<u8>, ProtocolError> {
    let private_key = crate::codec::decode_scalar(private_key_bytes)?;
    let ciphertext = Sm2Ciphertext::from_wire_bytes(ciphertext_bytes)?;
    decrypt(&private_key, &ciphertext)
}
