// [tests/mirror/libs/domain/protocol/protocol_properties.test.rs]
/**
 * =================================================================
 * APARATO: UNIVERSAL PROPERTY CERTIFIER (V4.0 - PROPTEST)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: PROPIEDADES UNIVERSALES DE FIRMA Y CIFRADO
 * =================================================================
 */

use cosign_core_math::prelude::*;
use cosign_domain_protocol::prelude::*;
use proptest::prelude::*;

fn arbitrary_scalar() -> impl Strategy<Value = Scalar> {
    proptest::array::uniform32(any::<u8>()).prop_filter_map("scalar in [1, n-1]", |draw| {
        let candidate = Scalar::from_be_bytes_reduced(&draw);
        if candidate.is_zero() {
            None
        } else {
            Some(candidate)
        }
    })
}

proptest! {
    // El coste de cada caso domina el presupuesto del banco: la escalera
    // de 256 bits se ejecuta varias veces por viaje redondo.
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn property_sign_verify_roundtrip(
        private_key in arbitrary_scalar(),
        message in proptest::collection::vec(any::<u8>(), 1..256),
    ) {
        let public_key = Sm2GroupEngine::generator_multiply(&private_key)
            .to_affine()
            .unwrap();
        let signature = sign(&private_key, DEFAULT_USER_IDENTITY, &message).unwrap();
        prop_assert!(
            verify(&public_key, DEFAULT_USER_IDENTITY, &message, &signature).is_ok()
        );

        // Escalares generados en rango: r, s ∈ [1, n-1] por construcción.
        prop_assert!(!signature.r.is_zero());
        prop_assert!(!signature.s.is_zero());
    }

    #[test]
    fn property_encrypt_decrypt_roundtrip(
        private_key in arbitrary_scalar(),
        message in proptest::collection::vec(any::<u8>(), 1..128),
    ) {
        let public_key = Sm2GroupEngine::generator_multiply(&private_key)
            .to_affine()
            .unwrap();
        let ciphertext = encrypt(&public_key, &message).unwrap();
        prop_assert_eq!(decrypt(&private_key, &ciphertext).unwrap(), message.clone());

        // El encuadre de cable siempre mide 96 + |M|.
        let wire_bytes = ciphertext.to_wire_bytes().unwrap();
        prop_assert_eq!(wire_bytes.len(), CIPHERTEXT_OVERHEAD + message.len());
        prop_assert_eq!(Sm2Ciphertext::from_wire_bytes(&wire_bytes).unwrap(), ciphertext);
    }

    #[test]
    fn property_scalar_wire_roundtrip(draw in proptest::array::uniform32(any::<u8>())) {
        let reduced = Scalar::from_be_bytes_reduced(&draw);
        let wire_bytes = encode_scalar(&reduced);
        prop_assert_eq!(Scalar::from_be_bytes(&wire_bytes).unwrap(), reduced);
    }
}
