// [libs/domain/protocol/src/rng.rs]
/*!
 * =================================================================
 * APARATO: SCALAR ENTROPY ENGINE (V4.0 - REJECTION SAMPLER)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: ESCALARES UNIFORMES EN [1, n-1] DESDE EL CSPRNG DEL SO
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. REJECTION DISCIPLINE: Cada sorteo de 256 bits se acepta sólo si
 *    reside en [1, n-1]; como n > 2^255, la probabilidad de rechazo por
 *    intento es inferior a 2^-32.
 * 2. TEST SEAM: La costura 'ScalarSource' permite inyectar nonces
 *    deterministas o adversarios en los bancos de certificación sin
 *    tocar las rutas de producción.
 * =================================================================
 */

use crate::errors::ProtocolError;
use cosign_core_math::prelude::*;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

/// Límite compartido de reintentos para sorteos y bucles degenerados.
pub const RETRY_BOUND: usize = 8;

/**
 * Costura de adquisición de escalares para firma, cifrado y protocolo
 * colaborativo. Las implementaciones garantizan pertenencia a [1, n-1].
 */
pub trait ScalarSource {
    /// Produce el siguiente escalar en [1, n-1].
    fn next_scalar(&mut self) -> Result<Scalar, ProtocolError>;
}

/**
 * Fuente de producción: CSPRNG del sistema operativo con muestreo por
 * rechazo.
 */
#[derive(Debug, Default, Clone, Copy)]
pub struct OsScalarSource;

impl ScalarSource for OsScalarSource {
    fn next_scalar(&mut self) -> Result<Scalar, ProtocolError> {
        for _ in 0..RETRY_BOUND {
            let mut draw_bytes = [0u8; 32];
            OsRng
                .try_fill_bytes(&mut draw_bytes)
                .map_err(|_| ProtocolError::EntropyFailure)?;

            let candidate = Scalar::from_be_bytes(&draw_bytes);
            draw_bytes.zeroize();

            match candidate {
                Ok(scalar) if !scalar.is_zero() => return Ok(scalar),
                // Sorteo >= n o nulo: rechazar y volver a sortear.
                _ => continue,
            }
        }
        Err(ProtocolError::EntropyFailure)
    }
}

/**
 * Fuente determinista para bancos de certificación: entrega una lista
 * fija de escalares y falla al agotarse.
 */
#[derive(Debug, Clone)]
pub struct FixedScalarSource {
    queued_scalars: Vec<Scalar>,
    cursor: usize,
}

impl FixedScalarSource {
    /// Construye la fuente con la secuencia exacta de escalares a servir.
    #[must_use]
    pub fn new(queued_scalars: Vec<Scalar>) -> Self {
        Self { queued_scalars, cursor: 0 }
    }
}

impl ScalarSource for FixedScalarSource {
    fn next_scalar(&mut self) -> Result<Scalar, ProtocolError> {
        let scalar = self
            .queued_scalars
            .get(self.cursor)
            .copied()
            .ok_or(ProtocolError::EntropyFailure)?;
        self.cursor += 1;
        Ok(scalar)
    }
}
