// [tests/mirror/libs/core/math_engine/kdf_derivation.test.rs]
/**
 * =================================================================
 * APARATO: KDF COUNTER-MODE CERTIFIER (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: DERIVACIÓN SM3 EN MODO CONTADOR (GB/T 32918.4)
 * =================================================================
 */

use cosign_core_math::prelude::*;

#[test]
fn certify_first_counter_block_equivalence() {
    // El primer bloque del flujo es exactamente SM3(Z ‖ 0x00000001).
    let derived = derive_key(b"abc", 32);
    let mut engine = Sm3Engine::new();
    engine.absorb(b"abc");
    engine.absorb(&1u32.to_be_bytes());
    assert_eq!(
        derived.as_slice(),
        engine.finalize().as_slice(),
        "L1_KDF_FAULT: counter genesis drift"
    );
    assert_eq!(
        hex::encode(&derived),
        "fe1ea80dac6f100c33537bd24619ec7c72a1e8b1ffeaefb1eb52a37791fdaf61"
    );
}

#[test]
fn certify_truncation_and_extension() {
    // 1 octeto: truncamiento del primer bloque.
    assert_eq!(hex::encode(derive_key(b"abc", 1)), "fe");

    // 33 octetos: el flujo cruza al contador ct = 2.
    assert_eq!(
        hex::encode(derive_key(b"abc", 33)),
        "fe1ea80dac6f100c33537bd24619ec7c72a1e8b1ffeaefb1eb52a37791fdaf619d",
        "L1_KDF_FAULT: second counter block drift"
    );

    // El flujo corto es prefijo del largo.
    let long_stream = derive_key(b"abc", 80);
    let short_stream = derive_key(b"abc", 48);
    assert_eq!(&long_stream[..48], short_stream.as_slice(), "L1_KDF_FAULT: prefix drift");
}

#[test]
fn certify_published_encryption_mask() {
    // Máscara t del vector de cifrado de GB/T 32918.4-2016:
    // Z = x2 ‖ y2 del secreto compartido k·P, klen = |"encryption standard"|.
    let shared_x =
        hex::decode("335e18d751e51f040e27d468138b7ab1dc86ad7f981d7d416222fd6ab3ed230d").unwrap();
    let shared_y =
        hex::decode("ab743ebcfb22d64f7b6ab791f70658f25b48fa93e54064fdbfbed3f0bd847ac9").unwrap();
    let mut shared_material = Vec::new();
    shared_material.extend_from_slice(&shared_x);
    shared_material.extend_from_slice(&shared_y);

    let mask = derive_key(&shared_material, 19);
    assert_eq!(
        hex::encode(&mask),
        "44e60fdbf0bae81437665374bef26749046c9e",
        "L1_KDF_FAULT: published mask drift"
    );

    // M ⊕ t debe reproducir el componente C2 publicado.
    let plaintext = b"encryption standard";
    let masked: Vec<u8> = plaintext
        .iter()
        .zip(mask.iter())
        .map(|(plain_octet, key_octet)| plain_octet ^ key_octet)
        .collect();
    assert_eq!(hex::encode(&masked), "21886ca989ca9c7d58087307ca93092d651efa");
}

#[test]
fn certify_zero_stream_detector() {
    assert!(is_all_zero(&[0u8; 40]));
    assert!(!is_all_zero(&derive_key(b"abc", 32)));
    let mut almost_zero = vec![0u8; 40];
    almost_zero[39] = 1;
    assert!(!is_all_zero(&almost_zero));
}
