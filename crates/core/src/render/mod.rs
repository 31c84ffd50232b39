//! Interface to the vector-graphics collaborator.
//!
//! The tree is drawn by an external SVG layer; this module pins down the
//! small surface the pipeline relies on — by-id element lookup, reading a
//! transform, and animating towards a transform — plus the affine matrix
//! type those operations exchange. The [`headless`] backend implements the
//! same surface in memory for the demo binary and the tests.

use std::future::Future;
use std::time::Duration;

use crate::Result;

pub mod headless;

/// SVG-style 2D affine transform `[a b c d e f]`, column vectors
/// `(a b)`, `(c d)` and translation `(e f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Composes `self * other`; `other` applies first.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Post-multiplies a rotation of `angle` degrees about the pivot
    /// `(cx, cy)`, matching how the SVG layer rotates an element in its
    /// local coordinates.
    pub fn rotate(&mut self, angle: f32, cx: f32, cy: f32) {
        let radians = angle.to_radians();
        let (sin, cos) = radians.sin_cos();
        let rotation = Matrix {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: cx - cos * cx + sin * cy,
            f: cy - sin * cx - cos * cy,
        };
        *self = self.multiply(&rotation);
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Easing curve for an animation phase. The swing only ever uses linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
}

/// A transformable element resolved from the loaded vector document.
pub trait LeafHandle: Send + Sync {
    /// Current transform of the element.
    fn transform(&self) -> Matrix;

    /// Animates the element's transform to `target` over `duration`. The
    /// future resolves once the backend reports the phase complete and errs
    /// if the backend rejects it.
    fn animate(
        &self,
        target: Matrix,
        duration: Duration,
        easing: Easing,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// The loaded vector document, able to resolve elements by id.
pub trait SvgDocument {
    type Handle: LeafHandle;

    fn select(&self, id: &str) -> Option<Self::Handle>;
}
