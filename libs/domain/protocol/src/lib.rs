// [libs/domain/protocol/src/lib.rs]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

/*!
 * =================================================================
 * APARATO: PROTOCOL DOMAIN MASTER HUB (V4.1 - CLIENT HALF)
 * CLASIFICACIÓN: DOMAIN PROTOCOL (ESTRATO L2)
 * RESPONSABILIDAD: ORQUESTACIÓN DEL CLIENTE COLABORATIVO SM2
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TWO PARTY SOVEREIGNTY: Registra la mitad cliente del protocolo de
 *    firma y descifrado conjunto sobre clave partida
 *    d = ((d1·d2)^-1 - 1) mod n; la mitad servidor existe sólo a través
 *    de su contrato de cable.
 * 2. STANDARD PARITY: Las operaciones de parte única (firma,
 *    verificación, cifrado, descifrado de GB/T 32918.2/.4) conviven con
 *    las colaborativas y comparten códec, identidad y entropía.
 * 3. RE-ENTRANT DOCTRINE: Todo el estrato es síncrono y re-entrante,
 *    sin estado secreto retenido entre llamadas.
 * =================================================================
 */

/// Formas de cable de ancho fijo: escalares, puntos, firmas y criptogramas.
pub mod codec;
/// Manija opaca de configuración del protocolo.
pub mod context;
/// Mitad cliente del protocolo colaborativo de dos partes.
pub mod cosign;
/// Cifrado y descifrado SM2 estándar (GB/T 32918.4).
pub mod encrypt;
/// Taxonomía de fallos visible al invocante.
pub mod errors;
/// Prefijo de identidad Z_A y digest de mensaje.
pub mod identity;
/// Fuentes de escalares uniformes en [1, n-1].
pub mod rng;
/// Firma y verificación SM2 estándar (GB/T 32918.2).
pub mod sign;

/**
 * PRELUDIO DE PROTOCOLO SOBERANO
 *
 * Superficie de importación única para los consumidores del cliente
 * colaborativo.
 */
pub mod prelude {
    pub use crate::codec::{
        decode_point, decode_scalar, decode_scalar_relaxed, encode_point, encode_scalar,
        Signature, Sm2Ciphertext, CIPHERTEXT_OVERHEAD, POINT_OCTETS, SCALAR_OCTETS,
        SIGNATURE_OCTETS, TAG_OCTETS,
    };
    pub use crate::context::CoSignContext;
    pub use crate::encrypt::{decrypt, decrypt_bytes, encrypt, encrypt_bytes, encrypt_with_source};
    pub use crate::errors::ProtocolError;
    pub use crate::identity::{
        compute_za, compute_za_from_coordinates, message_digest, DEFAULT_USER_IDENTITY,
    };
    pub use crate::rng::{FixedScalarSource, OsScalarSource, ScalarSource, RETRY_BOUND};
    pub use crate::sign::{
        sign, sign_bytes, sign_digest_with_source, sign_with_source, verify, verify_bytes,
        verify_digest,
    };
}
