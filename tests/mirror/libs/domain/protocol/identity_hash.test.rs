// [tests/mirror/libs/domain/protocol/identity_hash.test.rs]
/**
 * =================================================================
 * APARATO: IDENTITY PREFIX CERTIFIER (V4.0 - Z_A VECTORS)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: VALIDACIÓN DE Z_A Y DEL DIGEST DE MENSAJE
 * =================================================================
 */

use cosign_domain_protocol::prelude::*;

const SIGN_VECTOR_PUBLIC_KEY: &str = "09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13";

#[test]
fn certify_za_published_vector() {
    let public_key = decode_point(&hex::decode(SIGN_VECTOR_PUBLIC_KEY).unwrap()).unwrap();
    let identity_prefix = compute_za(DEFAULT_USER_IDENTITY, &public_key).unwrap();
    assert_eq!(
        hex::encode(identity_prefix),
        "b2e14c5c79c6df5b85f4fe7ed8db7a262b9da7e07ccb0ea9f4747b8ccda8a4f3",
        "L2_IDENTITY_FAULT: Z_A drift against GB/T 32918.2-2016"
    );
}

#[test]
fn certify_message_digest_published_vector() {
    let public_key = decode_point(&hex::decode(SIGN_VECTOR_PUBLIC_KEY).unwrap()).unwrap();
    let digest = message_digest(DEFAULT_USER_IDENTITY, &public_key, b"message digest").unwrap();
    assert_eq!(
        hex::encode(digest),
        "f0b43e94ba45accaace692ed534382eb17e6ab5a19ce7b31f4486fdfc0d28640",
        "L2_IDENTITY_FAULT: e = SM3(Z_A ‖ M) drift"
    );
}

#[test]
fn certify_za_legacy_identity_vector() {
    // Clave del ejemplo legado bajo "ALICE123@YAHOO.COM" (ENTL = 0x0090),
    // re-derivada sobre la curva recomendada fija (ver DESIGN.md).
    let public_key = decode_point(
        &hex::decode("d5548c7825cbb56150a3506cd57464af8a1ae0519dfaf3c58221dc810caf28dd921073768fe3d59ce54e79a49445cf73fed23086537027264d168946d479533e")
            .unwrap(),
    )
    .unwrap();
    let identity_prefix = compute_za(b"ALICE123@YAHOO.COM", &public_key).unwrap();
    assert_eq!(
        hex::encode(identity_prefix),
        "e6e831e46d338322f431ed5ac3364483e9372d4b7795ef545d68e91c583a6693",
        "L2_IDENTITY_FAULT: legacy Z_A drift"
    );

    let digest = message_digest(b"ALICE123@YAHOO.COM", &public_key, b"message digest").unwrap();
    assert_eq!(
        hex::encode(digest),
        "10d51cb90c0c0522e94875a2bea7ab72299ebe7192e64efe0573b1c77110e5c9",
        "L2_IDENTITY_FAULT: legacy e drift"
    );
}

#[test]
fn certify_identity_sensitivity() {
    let public_key = decode_point(&hex::decode(SIGN_VECTOR_PUBLIC_KEY).unwrap()).unwrap();
    let default_prefix = compute_za(DEFAULT_USER_IDENTITY, &public_key).unwrap();
    let alice_prefix = compute_za(b"ALICE123@YAHOO.COM", &public_key).unwrap();
    assert_ne!(
        default_prefix, alice_prefix,
        "L2_IDENTITY_FAULT: ENTL/ID must bind the prefix"
    );
}

#[test]
fn certify_hash_message_fallback_contract() {
    let context = CoSignContext::new();
    let public_wire = hex::decode(SIGN_VECTOR_PUBLIC_KEY).unwrap();

    // Con clave pública: paridad con la vía tipada.
    let bound_digest = context
        .hash_message(b"message digest", Some(public_wire.as_slice()))
        .unwrap();
    assert_eq!(
        hex::encode(bound_digest),
        "f0b43e94ba45accaace692ed534382eb17e6ab5a19ce7b31f4486fdfc0d28640"
    );

    // Sin clave pública: la vía diagnóstica usa el marcador nulo y
    // produce un digest distinto, no un pánico.
    let diagnostic_digest = context.hash_message(b"message digest", None).unwrap();
    assert_ne!(bound_digest, diagnostic_digest, "L2_IDENTITY_FAULT: fallback must not alias");

    // Una clave pública malformada se rechaza como entrada inválida.
    let forged_wire = vec![0u8; 64];
    assert!(matches!(
        context.hash_message(b"message digest", Some(forged_wire.as_slice())),
        Err(ProtocolError::InvalidInput(_))
    ));
}

#[test]
fn certify_custom_identity_context() {
    let context = CoSignContext::with_identity(b"ALICE123@YAHOO.COM".to_vec()).unwrap();
    assert_eq!(context.signer_identity(), b"ALICE123@YAHOO.COM");

    // ENTL desbordado: identidad mayor a 8191 octetos.
    assert!(matches!(
        CoSignContext::with_identity(vec![0x41u8; 8192]),
        Err(ProtocolError::InvalidInput(_))
    ));
}
