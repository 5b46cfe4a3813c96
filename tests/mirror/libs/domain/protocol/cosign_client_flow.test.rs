// [tests/mirror/libs/domain/protocol/cosign_client_flow.test.rs]
/**
 * =================================================================
 * APARATO: COLLABORATIVE FLOW CERTIFIER (V4.2 - TWO PARTY)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: FIRMA Y DESCIFRADO CONJUNTO CONTRA EMULACIÓN DE SERVIDOR
 *
 * La mitad servidor vive únicamente en este banco: muestrea (k2, k3),
 * computa Q = k3·Q1 + k2·G, r = (e + Q.x) mod n, s2 = d2·k3,
 * s3 = d2·(r + k2), y en descifrado responde T2 = d2^-1·T1 - C1.
 * =================================================================
 */

use cosign_core_math::prelude::*;
use cosign_domain_protocol::prelude::*;

const VECTOR_D1: &str = "5e12b1d1213c096ab0b57f8e2cf32ed7e4f66e15acb0bf3f1a4db3d2a9e56c81";
const VECTOR_D2: &str = "0b9ba0d2f77e43e2c15f2b0c9d6e1a6b1c9a35014f3a2d9921e06f30c1a00a55";
const VECTOR_K1: &str = "6d54b80deac1bc2159276e27d506861a16680f3ad9c02dccef3cc1fa3cdbe4ce";
const VECTOR_K2: &str = "33c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7";
const VECTOR_K3: &str = "1c9a35014f3a2d9921e06f30c1a00a550b9ba0d2f77e43e2c15f2b0c9d6e1a6b";

/// Clave conjunta publicada por el servidor fuera de banda:
/// P = (d1·d2)^-1·G - G = d·G con d = ((d1·d2)^-1 - 1) mod n.
const VECTOR_JOINT_PUBLIC: &str = "0f7b98c2db07e1d8a239b5eceff99bae14511f43eb525d38202f50debc89bf07af8fb7e521532e98e4a4f93f8ffe310256e0bb07a819a17a6ab36ffea3a0b73c";
const VECTOR_JOINT_PRIVATE: &str =
    "cb198e39fc8e8e7ad49e864e345539265335434c0cbefa4e3555adfc788d63f1";

fn scalar_from_hex(hex_value: &str) -> Scalar {
    Scalar::from_be_bytes(&hex::decode(hex_value).unwrap().as_slice().try_into().unwrap()).unwrap()
}

/// Emulación de la mitad servidor del protocolo de firma.
fn server_sign_half(
    d2: &Scalar,
    k2: &Scalar,
    k3: &Scalar,
    q1_wire: &[u8],
    digest: &[u8; 32],
) -> ([u8; 32], [u8; 32], [u8; 32]) {
    let q1_point = decode_point(q1_wire).unwrap();
    let scaled_q1 = Sm2GroupEngine::scalar_multiply(k3, &q1_point);
    let blinding_point = Sm2GroupEngine::generator_multiply(k2);
    let combined = Sm2GroupEngine::add_points(&scaled_q1, &blinding_point)
        .to_affine()
        .unwrap();

    let digest_scalar = Scalar::from_be_bytes_reduced(digest);
    let x_scalar = Scalar::from_be_bytes_reduced(&combined.x.to_be_bytes());
    let component_r = digest_scalar.add_modular(&x_scalar);

    let server_s2 = d2.multiply_modular(k3);
    let server_s3 = d2.multiply_modular(&component_r.add_modular(k2));
    (component_r.to_be_bytes(), server_s2.to_be_bytes(), server_s3.to_be_bytes())
}

/// Emulación de la mitad servidor del protocolo de descifrado:
/// T2 = d2^-1 · T1 - C1.
fn server_decrypt_half(d2: &Scalar, t1_wire: &[u8], c1_wire: &[u8]) -> [u8; 64] {
    let t1_point = decode_point(t1_wire).unwrap();
    let c1_point = decode_point(c1_wire).unwrap();

    let unblinded = Sm2GroupEngine::scalar_multiply(&d2.invert().unwrap(), &t1_point);
    let negated_c1 = JacobianPoint::from_affine(&c1_point.negate());
    let response = Sm2GroupEngine::add_points(&unblinded, &negated_c1)
        .to_affine()
        .unwrap();
    encode_point(&response).unwrap()
}

#[test]
fn certify_key_share_derivation_vectors() {
    let context = CoSignContext::new();
    let d1_bytes = hex::decode(VECTOR_D1).unwrap();

    let p1_wire = context.calculate_p1(&d1_bytes).unwrap();
    assert_eq!(
        hex::encode(p1_wire),
        "1c4b00465cd512342e75a6e7a0f5461fe43ddf258127e470025fa57293258e60713d42bd7b484a3ec80083ad21eacfb484dfab83f5ced4c5e1c8c4427e27f58c",
        "L2_COSIGN_FAULT: P1 = d1*G drift"
    );

    // La clave conjunta del banco es consistente con los fragmentos:
    // d = ((d1·d2)^-1 - 1) mod n.
    let d1 = scalar_from_hex(VECTOR_D1);
    let d2 = scalar_from_hex(VECTOR_D2);
    let joint_private = d1.multiply_modular(&d2).invert().unwrap().subtract_modular(&Scalar::one());
    assert_eq!(hex::encode(joint_private.to_be_bytes()), VECTOR_JOINT_PRIVATE);

    let joint_public = Sm2GroupEngine::generator_multiply(&joint_private).to_affine().unwrap();
    assert_eq!(hex::encode(encode_point(&joint_public).unwrap()), VECTOR_JOINT_PUBLIC);
}

#[test]
fn certify_generated_shares_are_well_formed() {
    let context = CoSignContext::new();
    let mut entropy_source = OsScalarSource;

    for _ in 0..8 {
        let d1_bytes = context.generate_d1(&mut entropy_source).unwrap();
        // Todo fragmento generado reside en [1, n-1] y produce un P1 válido.
        let decoded = decode_scalar(&d1_bytes).expect("share in [1, n-1]");
        assert!(!decoded.is_zero());
        let p1_wire = context.calculate_p1(&d1_bytes).unwrap();
        assert!(decode_point(&p1_wire).is_ok(), "L2_COSIGN_FAULT: P1 off curve");
    }
}

#[test]
fn certify_collaborative_signature_against_standard_verifier() {
    println!("\n🤝 [PROVING_GROUNDS]: Auditing two-party signature round...");
    let context = CoSignContext::new();
    let message = b"collaborative message";

    let d1_bytes = hex::decode(VECTOR_D1).unwrap();
    let d2 = scalar_from_hex(VECTOR_D2);
    let joint_public_wire = hex::decode(VECTOR_JOINT_PUBLIC).unwrap();

    // 1. Cliente: preparación de firma con k1 determinista.
    let mut nonce_source = FixedScalarSource::new(vec![scalar_from_hex(VECTOR_K1)]);
    let (k1_bytes, q1_wire) = context.sign_prepare(&mut nonce_source).unwrap();
    assert_eq!(
        hex::encode(q1_wire),
        "c804c8cb04b19ea363205b9e2375ca5533f62b18de8b29e8607c1502b23c2399a354d17cdf9844ac83e96df1523ee67982e8d4e370bbf29063462a9168a4330f",
        "L2_COSIGN_FAULT: Q1 = k1*G drift"
    );

    // 2. Cliente: digest con la clave pública conjunta.
    let digest = context
        .hash_message(message, Some(joint_public_wire.as_slice()))
        .unwrap();
    assert_eq!(
        hex::encode(digest),
        "f643647a9a4e8cc8fd8b84a433e5782b3141c62af4864143ee7ee10035a9087f"
    );

    // 3. Servidor: fragmentos (r, s2, s3).
    let (r_bytes, s2_bytes, s3_bytes) = server_sign_half(
        &d2,
        &scalar_from_hex(VECTOR_K2),
        &scalar_from_hex(VECTOR_K3),
        &q1_wire,
        &digest,
    );
    assert_eq!(
        hex::encode(r_bytes),
        "1fb96a17713e032330855f5def95273bb3646bede490541ae5c049a0fac227e2"
    );
    assert_eq!(
        hex::encode(s2_bytes),
        "2c3fd3852fc6e796ddb3918ad8a1b80f4abb92910682b2feffa950b1d823a9e7"
    );
    assert_eq!(
        hex::encode(s3_bytes),
        "fa5c0aa9a9b231e9ea4ef2369f8840714a74efa51d21885eebb06e0e958e3987"
    );

    // 4. Cliente: completado de la firma conjunta.
    let signature_wire = context
        .complete_signature(&k1_bytes, &d1_bytes, &r_bytes, &s2_bytes, &s3_bytes)
        .unwrap();
    assert_eq!(
        hex::encode(&signature_wire[32..]),
        "f790a06107b5168354e408070d5eaad186645a7f6202c534f89ef9dc9b05144f",
        "L2_COSIGN_FAULT: joint s drift"
    );

    // 5. Cualquier verificador SM2 estándar debe aceptarla bajo P.
    verify_bytes(&joint_public_wire, message, &signature_wire)
        .expect("joint signature indistinguishable from single-party SM2");
    println!("   ✅ [SUCCESS]: joint signature verified by the standard path.");
}

#[test]
fn certify_completion_degeneracy_rejections() {
    let context = CoSignContext::new();
    let one_bytes = Scalar::one().to_be_bytes();

    // Con d1 = k1 = s2 = 1: s = 1 + s3 - r. Forzando s3 = r - 1 colapsa s = 0.
    let component_r = Scalar::from_u64(2).to_be_bytes();
    let s3_for_zero = Scalar::one().to_be_bytes();
    assert!(matches!(
        context.complete_signature(&one_bytes, &one_bytes, &component_r, &one_bytes, &s3_for_zero),
        Err(ProtocolError::CryptoFailure(_))
    ));

    // Con s3 = n - 1: s = 1 + (n - 1) - r = -r, es decir s = n - r.
    let order_minus_one = Scalar::zero().subtract_modular(&Scalar::one()).to_be_bytes();
    let any_r = Scalar::from_u64(5).to_be_bytes();
    assert!(matches!(
        context.complete_signature(&one_bytes, &one_bytes, &any_r, &one_bytes, &order_minus_one),
        Err(ProtocolError::CryptoFailure(_))
    ));

    // r fuera de [1, n-1]: entrada malformada antes de operar.
    assert!(matches!(
        context.complete_signature(
            &one_bytes,
            &one_bytes,
            &[0u8; 32],
            &one_bytes,
            &one_bytes
        ),
        Err(ProtocolError::InvalidInput(_))
    ));
}

#[test]
fn certify_collaborative_decryption_roundtrip() {
    println!("\n🔓 [PROVING_GROUNDS]: Auditing two-party decryption round...");
    let context = CoSignContext::new();
    let payload = b"two-party secret payload";

    let d1_bytes = hex::decode(VECTOR_D1).unwrap();
    let d2 = scalar_from_hex(VECTOR_D2);
    let joint_public = decode_point(&hex::decode(VECTOR_JOINT_PUBLIC).unwrap()).unwrap();

    // Cifrado estándar bajo la clave conjunta con nonce determinista.
    let mut nonce_source = FixedScalarSource::new(vec![scalar_from_hex(
        "4df7c5b83945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef",
    )]);
    let ciphertext = encrypt_with_source(&joint_public, payload, &mut nonce_source).unwrap();
    let c1_wire = encode_point(&ciphertext.ephemeral_point).unwrap();
    assert_eq!(
        hex::encode(c1_wire),
        "413fa0153b7f31870001fff053b7dd63c5630d84ff3fa29d2034eb291ef9ac67b90b0636e5a9d27ea8992b2d5e2f55e0b821fe51e8a170d5777334f4747bf81d"
    );

    // 1. Cliente: T1 = d1^-1 · C1.
    let t1_wire = context.decrypt_prepare(&d1_bytes, &c1_wire).unwrap();
    assert_eq!(
        hex::encode(t1_wire),
        "4536491df1b8aca0b11714cbfd78061a5c21aa93d8601721a1dc20b967e17ece6f5b309e127e95370a266c4dc08c729a4e2889082e91f6175215fe79ebeb880e",
        "L2_COSIGN_FAULT: T1 drift"
    );

    // 2. Servidor: T2 = d2^-1 · T1 - C1.
    let t2_wire = server_decrypt_half(&d2, &t1_wire, &c1_wire);
    assert_eq!(
        hex::encode(t2_wire),
        "a81a45ec63312d7a93f4e6b364b46000e149214ab343ec5909fd88a2391a645d69c417a6f9a937e357cb10307595b83e9290faff4cff8e25d2bba5b64c8da52c",
        "L2_COSIGN_FAULT: T2 drift"
    );

    // 3. Cliente: completado del descifrado.
    let recovered = context
        .complete_decryption(&t2_wire, &ciphertext.integrity_tag, &ciphertext.masked_payload)
        .unwrap();
    assert_eq!(recovered, payload.to_vec(), "L2_COSIGN_FAULT: joint plaintext drift");
    println!("   ✅ [SUCCESS]: two-party decryption recovered the plaintext.");
}

#[test]
fn certify_collaborative_decryption_rejections() {
    let context = CoSignContext::new();
    let d1_bytes = hex::decode(VECTOR_D1).unwrap();

    // C1 nulo (punto en el infinito imposible en el cable): malformado.
    assert!(matches!(
        context.decrypt_prepare(&d1_bytes, &[0u8; 64]),
        Err(ProtocolError::InvalidInput(_))
    ));

    // T2 saboteado: expulsado de la curva o etiqueta discordante.
    let joint_public = decode_point(&hex::decode(VECTOR_JOINT_PUBLIC).unwrap()).unwrap();
    let ciphertext = encrypt(&joint_public, b"sabotage target").unwrap();
    let c1_wire = encode_point(&ciphertext.ephemeral_point).unwrap();
    let t1_wire = context.decrypt_prepare(&d1_bytes, &c1_wire).unwrap();
    let d2 = scalar_from_hex(VECTOR_D2);
    let mut t2_wire = server_decrypt_half(&d2, &t1_wire, &c1_wire);
    t2_wire[20] ^= 0xFF;

    let outcome =
        context.complete_decryption(&t2_wire, &ciphertext.integrity_tag, &ciphertext.masked_payload);
    assert!(outcome.is_err(), "L2_COSIGN_FAULT: sabotaged T2 accepted");

    // C3 con longitud no canónica.
    assert!(matches!(
        context.complete_decryption(&t1_wire, &[0u8; 31], &[1u8, 2, 3]),
        Err(ProtocolError::InvalidInput(_))
    ));
}
