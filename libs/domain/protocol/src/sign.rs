// [libs/domain/protocol/src/sign.rs]
/*!
 * =================================================================
 * APARATO: STANDARD SIGNATURE ENGINE (V4.3 - GB/T 32918.2)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: FIRMA Y VERIFICACIÓN SM2 DE PARTE ÚNICA
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. BOUNDED RETRY: Los sorteos degenerados (r = 0, r + k = n, s = 0)
 *    reintentan dentro de un bucle acotado; el agotamiento aflora como
 *    fallo criptográfico explícito.
 * 2. DIGEST STRATA: La pareja de nivel digest (sign_digest_with_source,
 *    verify_digest) opera sobre e ya computado, para invocantes que
 *    pre-calculan SM3(Z_A ‖ M); la pareja de nivel mensaje delega en
 *    ella tras derivar el prefijo de identidad.
 * 3. NONCE SEAM: La adquisición del nonce atraviesa 'ScalarSource',
 *    lo que permite certificar los vectores del estándar y los sorteos
 *    degenerados sin tocar la ruta de producción.
 * 4. SECRET HYGIENE: El nonce efímero se borra antes de liberar su
 *    almacenamiento.
 * =================================================================
 */

use crate::codec::Signature;
use crate::errors::ProtocolError;
use crate::identity::message_digest;
use crate::rng::{OsScalarSource, ScalarSource, RETRY_BOUND};
use cosign_core_math::prelude::*;
use tracing::{instrument, trace};
use zeroize::Zeroize;

/**
 * Firma un mensaje con la clave privada d según GB/T 32918.2, usando el
 * CSPRNG del sistema operativo como fuente de nonces.
 */
pub fn sign(
    private_key: &Scalar,
    identity: &[u8],
    message: &[u8],
) -> Result<Signature, ProtocolError> {
    sign_with_source(private_key, identity, message, &mut OsScalarSource)
}

/**
 * Firma un mensaje con una fuente de nonces explícita: deriva la clave
 * pública para el prefijo Z_A, computa e = SM3(Z_A ‖ M) y delega en el
 * estrato de nivel digest.
 */
#[instrument(level = "trace", skip_all)]
pub fn sign_with_source(
    private_key: &Scalar,
    identity: &[u8],
    message: &[u8],
    nonce_source: &mut dyn ScalarSource,
) -> Result<Signature, ProtocolError> {
    if private_key.is_zero() {
        return Err(MathError::ZeroScalar.into());
    }

    let public_key = Sm2GroupEngine::generator_multiply(private_key).to_affine()?;
    if public_key.infinity {
        return Err(MathError::PointAtInfinity.into());
    }
    let digest = message_digest(identity, &public_key, message)?;
    sign_digest_with_source(private_key, &digest, nonce_source)
}

/**
 * Firma un digest de 32 octetos ya computado (e = SM3(Z_A ‖ M)).
 *
 * # Mathematical Proof:
 * (x1, _) = k·G; r = (e + x1) mod n;
 * s = (1 + d)^-1 · (k - r·d) mod n. Los sorteos k con r = 0,
 * r + k ≡ 0 (mod n) o s = 0 se invalidan y se vuelve a sortear, hasta
 * el límite acotado de reintentos.
 */
#[instrument(level = "trace", skip_all)]
pub fn sign_digest_with_source(
    private_key: &Scalar,
    digest: &[u8; SM3_DIGEST_SIZE],
    nonce_source: &mut dyn ScalarSource,
) -> Result<Signature, ProtocolError> {
    if private_key.is_zero() {
        return Err(MathError::ZeroScalar.into());
    }
    let digest_scalar = Scalar::from_be_bytes_reduced(digest);

    // (1 + d)^-1 es invariante entre reintentos.
    let one_plus_key_inverse = Scalar::one().add_modular(private_key).invert()?;

    for attempt_index in 0..RETRY_BOUND {
        let mut ephemeral_nonce = nonce_source.next_scalar()?;

        let nonce_point = Sm2GroupEngine::generator_multiply(&ephemeral_nonce).to_affine()?;
        if nonce_point.infinity {
            ephemeral_nonce.zeroize();
            continue;
        }
        let x1_scalar = Scalar::from_be_bytes_reduced(&nonce_point.x.to_be_bytes());

        // r = (e + x1) mod n
        let component_r = digest_scalar.add_modular(&x1_scalar);
        if component_r.is_zero() || component_r.add_modular(&ephemeral_nonce).is_zero() {
            trace!(attempt_index, "degenerate nonce draw rejected, resampling");
            ephemeral_nonce.zeroize();
            continue;
        }

        // s = (1 + d)^-1 * (k - r*d) mod n
        let r_times_key = component_r.multiply_modular(private_key);
        let nonce_minus_rd = ephemeral_nonce.subtract_modular(&r_times_key);
        let component_s = one_plus_key_inverse.multiply_modular(&nonce_minus_rd);
        ephemeral_nonce.zeroize();

        if component_s.is_zero() {
            trace!(attempt_index, "null signature component, resampling");
            continue;
        }
        return Ok(Signature { r: component_r, s: component_s });
    }
    Err(ProtocolError::CryptoFailure("SIGNATURE_RETRY_EXHAUSTION"))
}

/**
 * Verifica una firma SM2 según GB/T 32918.2: computa e = SM3(Z_A ‖ M)
 * y delega en el estrato de nivel digest.
 */
#[instrument(level = "trace", skip_all)]
pub fn verify(
    public_key: &AffinePoint,
    identity: &[u8],
    message: &[u8],
    signature: &Signature,
) -> Result<(), ProtocolError> {
    if public_key.infinity || !Sm2GroupEngine::is_on_curve(public_key) {
        return Err(MathError::PointNotOnCurve.into());
    }
    let digest = message_digest(identity, public_key, message)?;
    verify_digest(public_key, &digest, signature)
}

/**
 * Verifica una firma contra un digest de 32 octetos ya computado.
 *
 * # Mathematical Proof:
 * t = (r + s) mod n; (x1', _) = s·G + t·P; la firma es válida cuando
 * (e + x1') mod n = r.
 *
 * # Errors:
 * Componentes fuera de [1, n-1] son entrada malformada; t = 0 y la
 * discordancia final son rechazo criptográfico.
 */
#[instrument(level = "trace", skip_all)]
pub fn verify_digest(
    public_key: &AffinePoint,
    digest: &[u8; SM3_DIGEST_SIZE],
    signature: &Signature,
) -> Result<(), ProtocolError> {
    if signature.r.is_zero() || signature.s.is_zero() {
        return Err(ProtocolError::InvalidInput("SIGNATURE_COMPONENT_OUT_OF_RANGE"));
    }
    if public_key.infinity || !Sm2GroupEngine::is_on_curve(public_key) {
        return Err(MathError::PointNotOnCurve.into());
    }
    let digest_scalar = Scalar::from_be_bytes_reduced(digest);

    let combined_t = signature.r.add_modular(&signature.s);
    if combined_t.is_zero() {
        return Err(ProtocolError::CryptoFailure("VERIFICATION_T_COLLAPSE"));
    }

    let s_times_generator = Sm2GroupEngine::generator_multiply(&signature.s);
    let t_times_public = Sm2GroupEngine::scalar_multiply(&combined_t, public_key);
    let verification_point =
        Sm2GroupEngine::add_points(&s_times_generator, &t_times_public).to_affine()?;
    if verification_point.infinity {
        return Err(MathError::PointAtInfinity.into());
    }

    let x1_scalar = Scalar::from_be_bytes_reduced(&verification_point.x.to_be_bytes());
    let reconstructed_r = digest_scalar.add_modular(&x1_scalar);

    if reconstructed_r.constant_time_equals(&signature.r) {
        Ok(())
    } else {
        Err(ProtocolError::CryptoFailure("SIGNATURE_MISMATCH"))
    }
}

/**
 * Variante de octetos crudos: clave privada de 32 octetos, firma de 64,
 * identidad por defecto del estándar. Espejo de la superficie FFI
 * histórica.
 */
pub fn sign_bytes(
    private_key_bytes: &[u8],
    message: &[u8],
) -> Result<[u8; crate::codec::SIGNATURE_OCTETS], ProtocolError> {
    let private_key = crate::codec::decode_scalar(private_key_bytes)?;
    let signature = sign(&private_key, crate::identity::DEFAULT_USER_IDENTITY, message)?;
    Ok(signature.to_wire_bytes())
}

/**
 * Variante de octetos crudos de la verificación: clave pública de 64
 * octetos, firma de 64, identidad por defecto del estándar.
 */
pub fn verify_bytes(
    public_key_bytes: &[u8],
    message: &[u8],
    signature_bytes: &[u8],
) -> Result<(), ProtocolError> {
    let public_key = crate::codec::decode_point(public_key_bytes)?;
    let signature = Signature::from_wire_bytes(signature_bytes)?;
    verify(&public_key, crate::identity::DEFAULT_USER_IDENTITY, message, &signature)
}
