// [libs/core/math-engine/src/curve.rs]
/*!
 * =================================================================
 * APARATO: SM2 GROUP LAW ENGINE (V4.3 - CONSTANT LADDER)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: LEYES DE GRUPO PROYECTIVAS PARA LA CURVA SM2
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. A = -3 SPECIALIZATION: La duplicación utiliza la fórmula
 *    dbl-2001-b, válida porque el parámetro a de SM2 es p - 3; la
 *    fórmula absorbe Z = 0 e Y = 0 produciendo Z3 = 0 sin ramas.
 * 2. HAMMING BLINDNESS: La multiplicación escalar ejecuta 256
 *    duplicaciones y 256 adiciones con selección por máscara, de modo
 *    que el número de operaciones de grupo no depende del peso de
 *    Hamming del escalar.
 * 3. FROZEN PARAMETERS: El sexteto (p, a, b, n, Gx, Gy) es un singleton
 *    de proceso inicializado una única vez desde los valores publicados
 *    en GB/T 32918.
 * =================================================================
 */

use crate::field::FieldElement;
use crate::point::{AffinePoint, JacobianPoint};
use crate::scalar::Scalar;
use once_cell::sync::Lazy;
use tracing::instrument;

/// Parámetro a = p - 3 de la curva SM2 recomendada (Little-Endian limbs).
pub const SM2_COEFFICIENT_A: [u64; 4] = [
    0xFFFFFFFFFFFFFFFC, 0xFFFFFFFF00000000, 0xFFFFFFFFFFFFFFFF, 0xFFFFFFFEFFFFFFFF,
];

/// Parámetro b de la curva SM2 recomendada (Little-Endian limbs).
pub const SM2_COEFFICIENT_B: [u64; 4] = [
    0xDDBCBD414D940E93, 0xF39789F515AB8F92, 0x4D5A9E4BCF6509A7, 0x28E9FA9E9D9F5E34,
];

/// Coordenada x del generador G (Little-Endian limbs).
pub const SM2_GENERATOR_X: [u64; 4] = [
    0x715A4589334C74C7, 0x8FE30BBFF2660BE1, 0x5F9904466A39C994, 0x32C4AE2C1F198119,
];

/// Coordenada y del generador G (Little-Endian limbs).
pub const SM2_GENERATOR_Y: [u64; 4] = [
    0x02DF32E52139F0A0, 0xD0A9877CC62A4740, 0x59BDCEE36B692153, 0xBC3736A2F4F6779C,
];

/// El sexteto congelado de parámetros de dominio de la curva SM2.
#[derive(Debug, Clone, Copy)]
pub struct CurveParams {
    /// Coeficiente a de la ecuación de Weierstrass.
    pub coefficient_a: FieldElement,
    /// Coeficiente b de la ecuación de Weierstrass.
    pub coefficient_b: FieldElement,
    /// El punto base G del subgrupo de orden n.
    pub generator: AffinePoint,
}

/// Singleton de proceso con los parámetros recomendados de GB/T 32918.
///
/// Inicialización perezosa única; el bloque es inmutable durante toda la
/// vida del proceso, igual que el contexto global del motor heredado.
pub static SM2_CURVE: Lazy<CurveParams> = Lazy::new(|| CurveParams {
    coefficient_a: FieldElement::from_words(SM2_COEFFICIENT_A),
    coefficient_b: FieldElement::from_words(SM2_COEFFICIENT_B),
    generator: AffinePoint::from_coordinates(
        FieldElement::from_words(SM2_GENERATOR_X),
        FieldElement::from_words(SM2_GENERATOR_Y),
    ),
});

/// Motor unificado para la ejecución de leyes de grupo en coordenadas
/// Jacobianas sobre la curva SM2.
pub struct Sm2GroupEngine;

impl Sm2GroupEngine {
    /**
     * Realiza la adición de un punto Jacobiano (X1, Y1, Z1) y un punto
     * Afín (x2, y2, Z = 1).
     *
     * # Mathematical Proof:
     * Al ser Z2 = 1, la fórmula se optimiza de 11 a 8 multiplicaciones.
     * Los casos singulares se resuelven así: identidad proyectiva en la
     * entrada se corrige por selección de máscara al final; puntos
     * coincidentes delegan en la duplicación; puntos inversos colapsan
     * al identidad.
     */
    #[inline(always)]
    #[must_use]
    pub fn add_mixed(
        point_alpha: &JacobianPoint,
        point_beta_x: &FieldElement,
        point_beta_y: &FieldElement,
    ) -> JacobianPoint {
        // 1. DERIVACIÓN DE COMPONENTES PROYECTIVAS
        // U2 = x2 * Z1^2
        let z1_squared = point_alpha.z.square_modular();
        let projective_u2 = point_beta_x.multiply_modular(&z1_squared);

        // S2 = y2 * Z1^3
        let z1_cubed = point_alpha.z.multiply_modular(&z1_squared);
        let projective_s2 = point_beta_y.multiply_modular(&z1_cubed);

        // 2. CÁLCULO DE DISTANCIAS DE CAMPO
        let horizontal_distance = projective_u2.subtract_modular(&point_alpha.x);
        let vertical_slope = projective_s2.subtract_modular(&point_alpha.y);

        // 3. VALIDACIÓN DE SINGULARIDADES
        if horizontal_distance.is_zero() && !point_alpha.is_infinity() {
            if vertical_slope.is_zero() {
                // Los puntos colisionan en el plano: duplicación técnica.
                return Self::double_point(point_alpha);
            }
            // Puntos inversos: el resultado es la identidad.
            return JacobianPoint::infinity();
        }

        // 4. GENERACIÓN DE COORDENADAS RESULTANTES (X3, Y3, Z3)
        let distance_squared = horizontal_distance.square_modular();
        let distance_cubed = distance_squared.multiply_modular(&horizontal_distance);
        let intermediate_v = point_alpha.x.multiply_modular(&distance_squared);

        // X3 = R^2 - H^3 - 2V
        let slope_squared = vertical_slope.square_modular();
        let intermediate_v_doubled = intermediate_v.add_modular(&intermediate_v);
        let output_x = slope_squared
            .subtract_modular(&distance_cubed)
            .subtract_modular(&intermediate_v_doubled);

        // Y3 = R * (V - X3) - Y1 * H^3
        let v_minus_x3 = intermediate_v.subtract_modular(&output_x);
        let slope_times_difference = vertical_slope.multiply_modular(&v_minus_x3);
        let y1_times_h_cubed = point_alpha.y.multiply_modular(&distance_cubed);
        let output_y = slope_times_difference.subtract_modular(&y1_times_h_cubed);

        // Z3 = Z1 * H
        let output_z = point_alpha.z.multiply_modular(&horizontal_distance);

        let formula_result = JacobianPoint { x: output_x, y: output_y, z: output_z };

        // 5. CORRECCIÓN DE IDENTIDAD POR MÁSCARA (sin ramificación secreta)
        let beta_lifted = JacobianPoint::from_affine_coordinates(point_beta_x, point_beta_y);
        JacobianPoint::conditional_select(&beta_lifted, &formula_result, point_alpha.infinity_mask())
    }

    /**
     * Adición Jacobiana general: P + Q.
     *
     * # Performance:
     * Proyecta Q al plano afín (una inversión) y delega en la adición
     * mixta; reservada para rutas de verificación con datos públicos.
     */
    #[must_use]
    pub fn add_points(point_alpha: &JacobianPoint, point_beta: &JacobianPoint) -> JacobianPoint {
        if point_beta.is_infinity() {
            return *point_alpha;
        }
        if point_alpha.is_infinity() {
            return *point_beta;
        }
        // Con Z != 0 la proyección afín es infalible.
        let beta_affine = match point_beta.to_affine() {
            Ok(affine) => affine,
            Err(_) => return *point_alpha,
        };
        Self::add_mixed(point_alpha, &beta_affine.x, &beta_affine.y)
    }

    /**
     * Duplicación Jacobiana especializada para a = -3 (fórmula dbl-2001-b).
     *
     * # Mathematical Proof:
     * alpha = 3(X - Z^2)(X + Z^2) = 3X^2 + aZ^4 con a = -3.
     * Z3 = (Y + Z)^2 - gamma - delta = 2YZ, que colapsa a 0 tanto para
     * Z = 0 como para Y = 0: la identidad y la 2-torsión quedan
     * absorbidas por la propia fórmula, sin ramificación.
     */
    #[inline(always)]
    #[must_use]
    pub fn double_point(point: &JacobianPoint) -> JacobianPoint {
        // delta = Z^2, gamma = Y^2, beta = X * gamma
        let delta = point.z.square_modular();
        let gamma = point.y.square_modular();
        let beta = point.x.multiply_modular(&gamma);

        // alpha = 3 * (X - delta) * (X + delta)
        let x_minus_delta = point.x.subtract_modular(&delta);
        let x_plus_delta = point.x.add_modular(&delta);
        let alpha_base = x_minus_delta.multiply_modular(&x_plus_delta);
        let alpha = alpha_base.add_modular(&alpha_base).add_modular(&alpha_base);

        // X3 = alpha^2 - 8 * beta
        let beta_doubled = beta.add_modular(&beta);
        let beta_quadrupled = beta_doubled.add_modular(&beta_doubled);
        let beta_octupled = beta_quadrupled.add_modular(&beta_quadrupled);
        let output_x = alpha.square_modular().subtract_modular(&beta_octupled);

        // Z3 = (Y + Z)^2 - gamma - delta
        let y_plus_z = point.y.add_modular(&point.z);
        let output_z = y_plus_z
            .square_modular()
            .subtract_modular(&gamma)
            .subtract_modular(&delta);

        // Y3 = alpha * (4*beta - X3) - 8 * gamma^2
        let gamma_squared = gamma.square_modular();
        let gamma_squared_doubled = gamma_squared.add_modular(&gamma_squared);
        let gamma_squared_quadrupled = gamma_squared_doubled.add_modular(&gamma_squared_doubled);
        let gamma_squared_octupled = gamma_squared_quadrupled.add_modular(&gamma_squared_quadrupled);
        let four_beta_minus_x3 = beta_quadrupled.subtract_modular(&output_x);
        let output_y = alpha
            .multiply_modular(&four_beta_minus_x3)
            .subtract_modular(&gamma_squared_octupled);

        JacobianPoint { x: output_x, y: output_y, z: output_z }
    }

    /**
     * ESCALERA ESCALAR DE FORMA FIJA: k * P.
     *
     * # Mathematical Proof:
     * Recorrido izquierda-a-derecha sobre los 256 bits del escalar con
     * adición incondicional y selección del resultado por máscara
     * (adición fantasma cuando el bit es 0). k ≡ 0 mod n o P = O
     * producen la identidad.
     *
     * # Performance:
     * Coste fijo de 256 duplicaciones + 256 adiciones mixtas,
     * independiente del valor del escalar.
     */
    #[instrument(level = "trace", skip_all)]
    #[must_use]
    pub fn scalar_multiply(scalar: &Scalar, point: &AffinePoint) -> JacobianPoint {
        if point.infinity {
            return JacobianPoint::infinity();
        }

        let scalar_bytes = scalar.to_be_bytes();
        let mut accumulator = JacobianPoint::infinity();

        for &scalar_byte in scalar_bytes.iter() {
            for bit_position in (0..8).rev() {
                accumulator = Self::double_point(&accumulator);
                let candidate = Self::add_mixed(&accumulator, &point.x, &point.y);
                let bit_mask = (((scalar_byte >> bit_position) & 1) as u64).wrapping_neg();
                accumulator = JacobianPoint::conditional_select(&candidate, &accumulator, bit_mask);
            }
        }
        accumulator
    }

    /**
     * Multiplicación de base fija: k * G sobre el generador del singleton.
     */
    #[inline(always)]
    #[must_use]
    pub fn generator_multiply(scalar: &Scalar) -> JacobianPoint {
        Self::scalar_multiply(scalar, &SM2_CURVE.generator)
    }

    /**
     * Certifica la pertenencia de un punto afín a la curva SM2.
     *
     * # Mathematical Proof:
     * Evalúa y^2 ≡ x^3 + ax + b (mod p). El identidad del grupo se
     * considera miembro; la capa de códec es quien prohíbe su forma de
     * cable. Las coordenadas >= p ya fueron rechazadas en la
     * deserialización de campo.
     */
    #[must_use]
    pub fn is_on_curve(point: &AffinePoint) -> bool {
        if point.infinity {
            return true;
        }
        let parameters = &*SM2_CURVE;
        let y_squared = point.y.square_modular();
        let x_cubed = point.x.square_modular().multiply_modular(&point.x);
        let a_times_x = parameters.coefficient_a.multiply_modular(&point.x);
        let right_hand_side = x_cubed.add_modular(&a_times_x).add_modular(&parameters.coefficient_b);
        y_squared.constant_time_equals(&right_hand_side)
    }
}
