// [libs/core/math-engine/src/point.rs]
/*!
 * =================================================================
 * APARATO: GEOMETRIC POINT ENGINE (V4.1 - JACOBIAN SOVEREIGN)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ESTRUCTURAS DE PUNTOS AFINES Y PROYECTIVOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. IMPLICIT IDENTITY: El elemento neutro se codifica como Z = 0 en el
 *    plano proyectivo, permitiendo que las leyes de grupo lo absorban
 *    sin ramificación secreta.
 * 2. NOMINAL SYNC: Sincronización absoluta con el estándar Big-Endian
 *    del motor de campo modular Fp.
 *
 * # Mathematical Proof (Jacobian Projection):
 * Un punto (X, Y, Z) representa el punto afín (X/Z^2, Y/Z^3) cuando
 * Z != 0. La transición al plano afín preserva la integridad de los
 * 256 bits de cada coordenada.
 * =================================================================
 */

use crate::errors::MathError;
use crate::field::FieldElement;

/// Punto afín de la curva SM2, con indicador explícito de identidad.
///
/// La serialización de cable (64 octetos, x ‖ y) nunca transporta el
/// elemento identidad; el indicador existe sólo para el álgebra interna.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffinePoint {
    /// Coordenada x en Fp.
    pub x: FieldElement,
    /// Coordenada y en Fp.
    pub y: FieldElement,
    /// Indicador del elemento identidad del grupo.
    pub infinity: bool,
}

impl AffinePoint {
    /// Construye un punto afín finito desde sus coordenadas.
    #[inline(always)]
    #[must_use]
    pub const fn from_coordinates(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y, infinity: false }
    }

    /// Retorna el elemento identidad del grupo.
    #[inline(always)]
    #[must_use]
    pub const fn infinity() -> Self {
        Self {
            x: FieldElement::from_u64(0),
            y: FieldElement::from_u64(0),
            infinity: true,
        }
    }

    /// Refleja el punto sobre el eje x: (x, -y).
    #[inline(always)]
    #[must_use]
    pub fn negate(&self) -> Self {
        Self { x: self.x, y: self.y.negate_modular(), infinity: self.infinity }
    }
}

/// Punto de la curva SM2 en coordenadas Jacobianas.
///
/// Z = 0 codifica el elemento identidad; la representación canónica del
/// neutro es (1, 1, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JacobianPoint {
    /// Coordenada X en el espacio proyectivo.
    pub x: FieldElement,
    /// Coordenada Y en el espacio proyectivo.
    pub y: FieldElement,
    /// Coordenada Z (denominador compartido) en el espacio proyectivo.
    pub z: FieldElement,
}

impl JacobianPoint {
    /**
     * Asciende un punto afín al espacio Jacobiano con denominador Z = 1.
     */
    #[inline(always)]
    #[must_use]
    pub fn from_affine(point: &AffinePoint) -> Self {
        if point.infinity {
            return Self::infinity();
        }
        Self { x: point.x, y: point.y, z: FieldElement::from_u64(1) }
    }

    /**
     * Asciende coordenadas afines crudas al espacio Jacobiano.
     */
    #[inline(always)]
    #[must_use]
    pub fn from_affine_coordinates(x: &FieldElement, y: &FieldElement) -> Self {
        Self { x: *x, y: *y, z: FieldElement::from_u64(1) }
    }

    /**
     * Retorna el punto en el infinito (Identidad del Grupo).
     */
    #[inline(always)]
    #[must_use]
    pub const fn infinity() -> Self {
        Self {
            x: FieldElement::from_u64(1),
            y: FieldElement::from_u64(1),
            z: FieldElement::from_u64(0),
        }
    }

    /// Determina si el punto es el elemento identidad.
    #[inline(always)]
    #[must_use]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Máscara de identidad (todo-unos cuando Z = 0).
    #[inline(always)]
    #[must_use]
    pub fn infinity_mask(&self) -> u64 {
        self.z.zero_mask()
    }

    /**
     * Selección condicional por máscara sobre las tres coordenadas.
     * Multiplexor sin ramificación para la escalera escalar.
     */
    #[inline(always)]
    #[must_use]
    pub fn conditional_select(when_set: &Self, when_clear: &Self, mask: u64) -> Self {
        Self {
            x: FieldElement::conditional_select(&when_set.x, &when_clear.x, mask),
            y: FieldElement::conditional_select(&when_set.y, &when_clear.y, mask),
            z: FieldElement::conditional_select(&when_set.z, &when_clear.z, mask),
        }
    }

    /**
     * Proyecta el punto Jacobiano al plano afín (X/Z^2, Y/Z^3).
     *
     * # Performance:
     * Requiere una inversión modular costosa; debe invocarse una única
     * vez al final de cada cadena de operaciones de grupo.
     *
     * # Errors:
     * Propaga el fallo de inversión del motor de campo; con Z != 0 la
     * inversión nunca falla, y Z = 0 proyecta al identidad afín.
     */
    pub fn to_affine(&self) -> Result<AffinePoint, MathError> {
        if self.is_infinity() {
            return Ok(AffinePoint::infinity());
        }
        let z_inverse = self.z.invert()?;
        let z_inverse_squared = z_inverse.square_modular();
        let z_inverse_cubed = z_inverse_squared.multiply_modular(&z_inverse);

        Ok(AffinePoint::from_coordinates(
            self.x.multiply_modular(&z_inverse_squared),
            self.y.multiply_modular(&z_inverse_cubed),
        ))
    }
}

impl Default for JacobianPoint {
    /// Inicializa el punto Jacobiano como el elemento neutro por defecto.
    fn default() -> Self {
        Self::infinity()
    }
}
