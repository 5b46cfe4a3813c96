// [libs/domain/protocol/src/codec.rs]
/*!
 * =================================================================
 * APARATO: WIRE CODEC ENGINE (V4.1 - FIXED WIDTH)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: FORMAS DE OCTETOS DE ESCALARES, PUNTOS Y CRIPTOGRAMAS
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. FIXED WIDTH DOCTRINE: Escalares en 32 octetos Big-Endian; puntos
 *    en 64 octetos x ‖ y sin prefijo SEC1; firmas en 64 octetos r ‖ s;
 *    criptogramas en C1(64) ‖ C3(32) ‖ C2(|M|).
 * 2. IDENTITY BAN: El punto en el infinito carece de forma de cable y
 *    jamás debe aparecer en él, en ninguna dirección.
 * 3. VALIDATION GATE: Todo punto deserializado del cable atraviesa la
 *    certificación de pertenencia a la curva.
 * =================================================================
 */

use crate::errors::ProtocolError;
use cosign_core_math::prelude::*;
use serde::{Deserialize, Serialize};

/// Longitud de cable de un escalar (Big-Endian, ancho fijo).
pub const SCALAR_OCTETS: usize = 32;

/// Longitud de cable de un punto afín (x ‖ y, sin prefijo).
pub const POINT_OCTETS: usize = 64;

/// Longitud de cable de una firma (r ‖ s).
pub const SIGNATURE_OCTETS: usize = 64;

/// Longitud del componente C3 (etiqueta SM3) de un criptograma.
pub const TAG_OCTETS: usize = SM3_DIGEST_SIZE;

/// Sobrecarga fija de un criptograma: C1(64) + C3(32).
pub const CIPHERTEXT_OVERHEAD: usize = POINT_OCTETS + TAG_OCTETS;

/**
 * Decodifica un escalar de cable exigiendo pertenencia a [1, n-1].
 * Es la vía obligatoria para claves, nonces y componentes de firma.
 */
pub fn decode_scalar(wire_bytes: &[u8]) -> Result<Scalar, ProtocolError> {
    let scalar = decode_scalar_relaxed(wire_bytes)?;
    if scalar.is_zero() {
        return Err(ProtocolError::InvalidInput("SCALAR_COLLAPSE_TO_ZERO"));
    }
    Ok(scalar)
}

/**
 * Decodifica un escalar de cable exigiendo sólo pertenencia a [0, n-1].
 * Reservada para los fragmentos s2/s3 del servidor, cuyo cero es
 * algebraicamente posible y se rechaza más tarde por la ecuación de
 * completado.
 */
pub fn decode_scalar_relaxed(wire_bytes: &[u8]) -> Result<Scalar, ProtocolError> {
    if wire_bytes.len() != SCALAR_OCTETS {
        return Err(MathError::InvalidLength {
            expected: SCALAR_OCTETS,
            got: wire_bytes.len(),
        }
        .into());
    }
    let fixed_bytes: [u8; SCALAR_OCTETS] = wire_bytes.try_into().unwrap();
    Ok(Scalar::from_be_bytes(&fixed_bytes)?)
}

/// Codifica un escalar en su forma de cable de 32 octetos.
#[inline(always)]
#[must_use]
pub fn encode_scalar(scalar: &Scalar) -> [u8; SCALAR_OCTETS] {
    scalar.to_be_bytes()
}

/**
 * Decodifica un punto afín de cable (64 octetos, x ‖ y).
 *
 * # Errors:
 * Longitud errónea y coordenadas >= p son entrada malformada; las
 * coordenadas válidas que no satisfacen la ecuación de Weierstrass
 * también lo son. El buffer todo-ceros cae en esta última barrera,
 * porque (0, 0) no pertenece a la curva SM2 (b != 0).
 */
pub fn decode_point(wire_bytes: &[u8]) -> Result<AffinePoint, ProtocolError> {
    if wire_bytes.len() != POINT_OCTETS {
        return Err(MathError::InvalidLength {
            expected: POINT_OCTETS,
            got: wire_bytes.len(),
        }
        .into());
    }
    let x_bytes: [u8; 32] = wire_bytes[..32].try_into().unwrap();
    let y_bytes: [u8; 32] = wire_bytes[32..].try_into().unwrap();

    let candidate = AffinePoint::from_coordinates(
        FieldElement::from_be_bytes(&x_bytes)?,
        FieldElement::from_be_bytes(&y_bytes)?,
    );
    if !Sm2GroupEngine::is_on_curve(&candidate) {
        return Err(MathError::PointNotOnCurve.into());
    }
    Ok(candidate)
}

/**
 * Codifica un punto afín en su forma de cable de 64 octetos.
 *
 * # Errors:
 * El elemento identidad no es representable en el cable.
 */
pub fn encode_point(point: &AffinePoint) -> Result<[u8; POINT_OCTETS], ProtocolError> {
    if point.infinity {
        return Err(MathError::PointAtInfinity.into());
    }
    let mut wire_bytes = [0u8; POINT_OCTETS];
    wire_bytes[..32].copy_from_slice(&point.x.to_be_bytes());
    wire_bytes[32..].copy_from_slice(&point.y.to_be_bytes());
    Ok(wire_bytes)
}

/**
 * Firma SM2: el par (r, s) con ambos componentes en [1, n-1].
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Componente r de la firma.
    pub r: Scalar,
    /// Componente s de la firma.
    pub s: Scalar,
}

impl Signature {
    /// Serializa la firma en su forma de cable de 64 octetos (r ‖ s).
    #[must_use]
    pub fn to_wire_bytes(&self) -> [u8; SIGNATURE_OCTETS] {
        let mut wire_bytes = [0u8; SIGNATURE_OCTETS];
        wire_bytes[..32].copy_from_slice(&self.r.to_be_bytes());
        wire_bytes[32..].copy_from_slice(&self.s.to_be_bytes());
        wire_bytes
    }

    /**
     * Deserializa una firma de cable, exigiendo r, s en [1, n-1].
     */
    pub fn from_wire_bytes(wire_bytes: &[u8]) -> Result<Self, ProtocolError> {
        if wire_bytes.len() != SIGNATURE_OCTETS {
            return Err(MathError::InvalidLength {
                expected: SIGNATURE_OCTETS,
                got: wire_bytes.len(),
            }
            .into());
        }
        Ok(Self {
            r: decode_scalar(&wire_bytes[..32])?,
            s: decode_scalar(&wire_bytes[32..])?,
        })
    }
}

/**
 * Criptograma SM2 en el orden estándar C1 ‖ C3 ‖ C2 (GB/T 32918.4-2016).
 *
 * La longitud de C2 se recupera de la longitud total; no hay encuadre
 * ASN.1.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sm2Ciphertext {
    /// Punto efímero C1 = k * G.
    pub ephemeral_point: AffinePoint,
    /// Etiqueta de integridad C3 = SM3(x2 ‖ M ‖ y2).
    pub integrity_tag: [u8; TAG_OCTETS],
    /// Texto enmascarado C2 = M ⊕ t.
    pub masked_payload: Vec<u8>,
}

impl Sm2Ciphertext {
    /// Serializa el criptograma: C1(64) ‖ C3(32) ‖ C2(|M|).
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut wire_bytes = Vec::with_capacity(CIPHERTEXT_OVERHEAD + self.masked_payload.len());
        wire_bytes.extend_from_slice(&encode_point(&self.ephemeral_point)?);
        wire_bytes.extend_from_slice(&self.integrity_tag);
        wire_bytes.extend_from_slice(&self.masked_payload);
        Ok(wire_bytes)
    }

    /**
     * Deserializa un criptograma, validando el encuadre y la pertenencia
     * de C1 a la curva.
     */
    pub fn from_wire_bytes(wire_bytes: &[u8]) -> Result<Self, ProtocolError> {
        if wire_bytes.len() <= CIPHERTEXT_OVERHEAD {
            return Err(ProtocolError::InvalidInput("CIPHERTEXT_FRAMING_UNDERFLOW"));
        }
        let ephemeral_point = decode_point(&wire_bytes[..POINT_OCTETS])?;
        let mut integrity_tag = [0u8; TAG_OCTETS];
        integrity_tag.copy_from_slice(&wire_bytes[POINT_OCTETS..CIPHERTEXT_OVERHEAD]);

        Ok(Self {
            ephemeral_point,
            integrity_tag,
            masked_payload: wire_bytes[CIPHERTEXT_OVERHEAD..].to_vec(),
        })
    }
}
