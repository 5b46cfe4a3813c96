// [libs/domain/protocol/src/context.rs]
/*!
 * =================================================================
 * APARATO: PROTOCOL CONTEXT HANDLE (V4.0 - STATELESS HOLDER)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: CONFIGURACIÓN OPACA DEL CLIENTE COLABORATIVO
 *
 * VISION HIPER-HOLÍSTICA:
 * El contexto es un soporte delgado de configuración (identidad del
 * firmante), sin estado secreto entre llamadas: cada operación recibe
 * su material secreto fresco, lo que hace local el razonamiento sobre
 * vida útil y borrado. Los parámetros de curva viven en el singleton
 * de proceso del motor L1. Varios contextos pueden usarse en paralelo;
 * el tipo es Send + Sync por construcción.
 * =================================================================
 */

use crate::errors::ProtocolError;
use crate::identity::DEFAULT_USER_IDENTITY;

/// Manija opaca del protocolo colaborativo: sólo configuración.
#[derive(Debug, Clone)]
pub struct CoSignContext {
    signer_identity: Vec<u8>,
}

impl CoSignContext {
    /// Crea un contexto con la identidad por defecto del estándar SM2.
    #[must_use]
    pub fn new() -> Self {
        Self { signer_identity: DEFAULT_USER_IDENTITY.to_vec() }
    }

    /**
     * Crea un contexto con una identidad de firmante explícita.
     *
     * # Errors:
     * La longitud en bits de la identidad debe caber en el campo ENTL
     * de 16 bits.
     */
    pub fn with_identity(identity: impl Into<Vec<u8>>) -> Result<Self, ProtocolError> {
        let signer_identity = identity.into();
        if signer_identity.len() > 8191 {
            return Err(ProtocolError::InvalidInput("IDENTITY_ENTL_OVERFLOW"));
        }
        Ok(Self { signer_identity })
    }

    /// Identidad del firmante configurada en esta manija.
    #[inline(always)]
    #[must_use]
    pub fn signer_identity(&self) -> &[u8] {
        &self.signer_identity
    }
}

impl Default for CoSignContext {
    fn default() -> Self {
        Self::new()
    }
}
