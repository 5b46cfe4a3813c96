// [libs/domain/protocol/src/cosign.rs]
/*!
 * =================================================================
 * APARATO: COLLABORATIVE CLIENT ENGINE (V4.2 - TWO PARTY HALF)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: MITAD CLIENTE DE LA FIRMA Y DESCIFRADO CONJUNTO
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. SPLIT KEY DOCTRINE: La clave conjunta d = ((d1·d2)^-1 - 1) mod n
 *    jamás se materializa; el cliente aporta d1 y k1 y nunca recibe
 *    d2, k2 ni cantidad alguna de la que pudiera recuperarlos.
 * 2. WIRE PARITY: Cada operación consume y produce las formas de cable
 *    de ancho fijo del códec (32/64 octetos), espejo de la superficie
 *    FFI histórica del cliente.
 * 3. SECRET HYGIENE: Fragmentos de clave y nonces se borran antes de
 *    liberar su almacenamiento.
 *
 * # Mathematical Proof (Completion Identity):
 * Con s2 = d2·k3 y s3 = d2·(r + k2) del servidor, el completado
 * s = (d1·k1·s2 + d1·s3 - r) mod n = d1·d2·(k1·k3 + k2 + r) - r
 * coincide con la firma estándar de nonce efectivo k = k1·k3 + k2 bajo
 * la clave conjunta, por lo que cualquier verificador SM2 la acepta.
 * =================================================================
 */

use crate::codec::{
    decode_point, decode_scalar, decode_scalar_relaxed, encode_point, encode_scalar,
    POINT_OCTETS, SCALAR_OCTETS, SIGNATURE_OCTETS, TAG_OCTETS,
};
use crate::context::CoSignContext;
use crate::encrypt::recover_payload;
use crate::errors::ProtocolError;
use crate::identity::compute_za_from_coordinates;
use crate::rng::ScalarSource;
use cosign_core_math::prelude::*;
use tracing::instrument;
use zeroize::Zeroize;

impl CoSignContext {
    /**
     * Genera el fragmento de clave privada del cliente: d1 ∈ [1, n-1].
     * Retorna su codificación Big-Endian de 32 octetos.
     */
    pub fn generate_d1(
        &self,
        entropy_source: &mut dyn ScalarSource,
    ) -> Result<[u8; SCALAR_OCTETS], ProtocolError> {
        let mut key_share = entropy_source.next_scalar()?;
        let encoded_share = encode_scalar(&key_share);
        key_share.zeroize();
        Ok(encoded_share)
    }

    /**
     * Computa la contribución pública del cliente: P1 = d1·G.
     */
    #[instrument(level = "trace", skip_all)]
    pub fn calculate_p1(&self, d1_bytes: &[u8]) -> Result<[u8; POINT_OCTETS], ProtocolError> {
        let mut key_share = decode_scalar(d1_bytes)?;
        let public_share = Sm2GroupEngine::generator_multiply(&key_share).to_affine()?;
        key_share.zeroize();
        encode_point(&public_share)
    }

    /**
     * Preprocesado de firma: sortea k1 ∈ [1, n-1] y computa Q1 = k1·G.
     * Ambos viajan al servidor; el cliente retiene k1 para el completado.
     */
    #[instrument(level = "trace", skip_all)]
    pub fn sign_prepare(
        &self,
        entropy_source: &mut dyn ScalarSource,
    ) -> Result<([u8; SCALAR_OCTETS], [u8; POINT_OCTETS]), ProtocolError> {
        let mut nonce_share = entropy_source.next_scalar()?;
        let nonce_point = Sm2GroupEngine::generator_multiply(&nonce_share).to_affine()?;
        let encoded_nonce = encode_scalar(&nonce_share);
        nonce_share.zeroize();
        Ok((encoded_nonce, encode_point(&nonce_point)?))
    }

    /**
     * Digest de mensaje del protocolo: e = SM3(Z_A ‖ M).
     *
     * Con clave pública conjunta presente (64 octetos), Z_A se computa
     * sobre ella; en su ausencia se usa un marcador de posición nulo.
     * La vía sin clave pública es únicamente diagnóstica: el digest
     * resultante no está ligado a ningún par de claves y no debe
     * firmarse en producción. Los invocantes DEBEN suministrar la clave
     * pública conjunta.
     */
    pub fn hash_message(
        &self,
        message: &[u8],
        joint_public_key: Option<&[u8]>,
    ) -> Result<[u8; SM3_DIGEST_SIZE], ProtocolError> {
        let identity_prefix = match joint_public_key {
            Some(wire_bytes) => {
                let certified_point = decode_point(wire_bytes)?;
                compute_za_from_coordinates(
                    self.signer_identity(),
                    &certified_point.x.to_be_bytes(),
                    &certified_point.y.to_be_bytes(),
                )?
            }
            None => compute_za_from_coordinates(self.signer_identity(), &[0u8; 32], &[0u8; 32])?,
        };

        let mut engine = Sm3Engine::new();
        engine.absorb(&identity_prefix);
        engine.absorb(message);
        Ok(engine.finalize())
    }

    /**
     * Completado de firma del cliente.
     *
     * # Mathematical Proof:
     * s = (d1·k1·s2 + d1·s3 - r) mod n. Los colapsos s = 0 y s = n - r
     * (que harían degenerar la firma estándar equivalente) se rechazan
     * como fallo criptográfico.
     */
    #[instrument(level = "trace", skip_all)]
    pub fn complete_signature(
        &self,
        k1_bytes: &[u8],
        d1_bytes: &[u8],
        r_bytes: &[u8],
        s2_bytes: &[u8],
        s3_bytes: &[u8],
    ) -> Result<[u8; SIGNATURE_OCTETS], ProtocolError> {
        let mut nonce_share = decode_scalar(k1_bytes)?;
        let mut key_share = decode_scalar(d1_bytes)?;
        let component_r = decode_scalar(r_bytes)?;
        let server_s2 = decode_scalar_relaxed(s2_bytes)?;
        let server_s3 = decode_scalar_relaxed(s3_bytes)?;

        // s = d1·k1·s2 + d1·s3 - r (mod n)
        let nonce_term = key_share.multiply_modular(&nonce_share).multiply_modular(&server_s2);
        let key_term = key_share.multiply_modular(&server_s3);
        let component_s = nonce_term.add_modular(&key_term).subtract_modular(&component_r);

        nonce_share.zeroize();
        key_share.zeroize();

        if component_s.is_zero() || component_s.add_modular(&component_r).is_zero() {
            return Err(ProtocolError::CryptoFailure("DEGENERATE_JOINT_SIGNATURE"));
        }

        let mut signature_bytes = [0u8; SIGNATURE_OCTETS];
        signature_bytes[..32].copy_from_slice(&encode_scalar(&component_r));
        signature_bytes[32..].copy_from_slice(&encode_scalar(&component_s));
        Ok(signature_bytes)
    }

    /**
     * Preprocesado de descifrado: T1 = d1^-1 · C1.
     *
     * C1 se valida contra la curva antes de operar; T1 viaja al
     * servidor, que responde T2 = d2^-1·T1 - C1 = d·C1.
     */
    #[instrument(level = "trace", skip_all)]
    pub fn decrypt_prepare(
        &self,
        d1_bytes: &[u8],
        c1_bytes: &[u8],
    ) -> Result<[u8; POINT_OCTETS], ProtocolError> {
        let mut key_share = decode_scalar(d1_bytes)?;
        let ephemeral_point = decode_point(c1_bytes)?;

        let key_share_inverse = key_share.invert()?;
        key_share.zeroize();

        let blinded_point =
            Sm2GroupEngine::scalar_multiply(&key_share_inverse, &ephemeral_point).to_affine()?;
        if blinded_point.infinity {
            return Err(MathError::PointAtInfinity.into());
        }
        encode_point(&blinded_point)
    }

    /**
     * Completado de descifrado: con T2 = (x2, y2) del servidor, deriva
     * t = KDF(x2 ‖ y2, |C2|), desenmascara M = C2 ⊕ t y coteja
     * SM3(x2 ‖ M ‖ y2) contra C3.
     */
    #[instrument(level = "trace", skip_all)]
    pub fn complete_decryption(
        &self,
        t2_bytes: &[u8],
        c3_bytes: &[u8],
        c2_bytes: &[u8],
    ) -> Result<Vec<u8>, ProtocolError> {
        let shared_point = decode_point(t2_bytes)?;
        if c3_bytes.len() != TAG_OCTETS {
            return Err(MathError::InvalidLength {
                expected: TAG_OCTETS,
                got: c3_bytes.len(),
            }
            .into());
        }
        if c2_bytes.is_empty() {
            return Err(ProtocolError::InvalidInput("CIPHERTEXT_FRAMING_UNDERFLOW"));
        }
        let mut integrity_tag = [0u8; TAG_OCTETS];
        integrity_tag.copy_from_slice(c3_bytes);

        recover_payload(&shared_point, &integrity_tag, c2_bytes)
    }
}
