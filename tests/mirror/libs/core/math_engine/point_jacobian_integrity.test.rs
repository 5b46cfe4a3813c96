// [tests/mirror/libs/core/math_engine/point_jacobian_integrity.test.rs]
/**
 * =================================================================
 * APARATO: JACOBIAN PROJECTION CERTIFIER (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: VALIDACIÓN DE PROYECCIÓN Y SELECCIÓN DE PUNTOS
 * =================================================================
 */

use cosign_core_math::prelude::*;

#[test]
fn certify_affine_jacobian_roundtrip() {
    let generator = SM2_CURVE.generator;
    let lifted = JacobianPoint::from_affine(&generator);
    assert!(!lifted.is_infinity());
    assert_eq!(
        lifted.to_affine().unwrap(),
        generator,
        "L1_POINT_FAULT: lift/project roundtrip drift"
    );

    // Una proyección con denominador no trivial: 2G vía duplicación
    // tiene Z != 1 y debe proyectar al mismo afín que su forma canónica.
    let doubled = Sm2GroupEngine::double_point(&lifted);
    assert!(!doubled.z.constant_time_equals(&FieldElement::from_u64(1)));
    let doubled_affine = doubled.to_affine().unwrap();
    assert!(Sm2GroupEngine::is_on_curve(&doubled_affine));
}

#[test]
fn certify_identity_projection() {
    let identity = JacobianPoint::infinity();
    assert!(identity.is_infinity());
    assert_eq!(identity.infinity_mask(), u64::MAX);

    let projected = identity.to_affine().unwrap();
    assert!(projected.infinity, "L1_POINT_FAULT: O must project to flagged affine identity");

    // El neutro afín también debe ascender al neutro proyectivo.
    assert!(JacobianPoint::from_affine(&AffinePoint::infinity()).is_infinity());
}

#[test]
fn certify_branchless_point_selection() {
    let generator_jacobian = JacobianPoint::from_affine(&SM2_CURVE.generator);
    let identity = JacobianPoint::infinity();

    let picked_generator =
        JacobianPoint::conditional_select(&generator_jacobian, &identity, u64::MAX);
    assert_eq!(picked_generator, generator_jacobian);

    let picked_identity = JacobianPoint::conditional_select(&generator_jacobian, &identity, 0);
    assert_eq!(picked_identity, identity);
}

#[test]
fn certify_negation_mirror() {
    let generator = SM2_CURVE.generator;
    let mirrored = generator.negate();
    assert!(Sm2GroupEngine::is_on_curve(&mirrored), "L1_POINT_FAULT: -G off curve");
    assert_eq!(mirrored.negate(), generator, "L1_POINT_FAULT: double negation drift");
    assert_eq!(
        mirrored.y,
        generator.y.negate_modular(),
        "L1_POINT_FAULT: negation must mirror y"
    );
}
