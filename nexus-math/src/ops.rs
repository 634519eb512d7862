//! Transform composition, projection, and inversion
//!
//! The free functions write into a caller-provided output so the hot decode
//! path never allocates. Outputs are taken as `&mut` while inputs are shared
//! borrows, so an output can never alias an input.
//!
//! None of these functions validate their inputs. A zero `w` during
//! projection or a zero determinant during inversion yields infinity/NaN in
//! the output rather than an error.

use crate::types::{Matrix4, Vector3};

/// Transform point `v` (with `w = 1`) by `m` and apply the perspective divide
///
/// `w = m[3]*x + m[7]*y + m[11]*z + m[15]` and each of `x`, `y`, `z` in the
/// result is divided by it.
#[inline]
pub fn transform_vector(m: &Matrix4, v: &Vector3, r: &mut Vector3) {
    let m = &m.0;
    let [x, y, z] = v.0;

    let w = m[3] * x + m[7] * y + m[11] * z + m[15];

    r.0 = [
        (m[0] * x + m[4] * y + m[8] * z + m[12]) / w,
        (m[1] * x + m[5] * y + m[9] * z + m[13]) / w,
        (m[2] * x + m[6] * y + m[10] * z + m[14]) / w,
    ];
}

/// Matrix product `r = a * b`
///
/// Column `c` of `r` is `a` applied to column `c` of `b`.
#[inline]
pub fn multiply(a: &Matrix4, b: &Matrix4, r: &mut Matrix4) {
    let (a, b) = (&a.0, &b.0);
    for col in 0..4 {
        for row in 0..4 {
            r.0[col * 4 + row] = a[row] * b[col * 4]
                + a[4 + row] * b[col * 4 + 1]
                + a[8 + row] * b[col * 4 + 2]
                + a[12 + row] * b[col * 4 + 3];
        }
    }
}

/// 2x2 minors of the top two rows (`s`) and bottom two rows (`c`)
///
/// Every 3x3 cofactor and the determinant are sums of products of one `s`
/// and one `c` term (Laplace expansion along the first two rows).
#[inline]
fn minors(m: &Matrix4) -> ([f64; 6], [f64; 6]) {
    let m = &m.0;
    // a{row}{col}
    let (a00, a10, a20, a30) = (m[0], m[1], m[2], m[3]);
    let (a01, a11, a21, a31) = (m[4], m[5], m[6], m[7]);
    let (a02, a12, a22, a32) = (m[8], m[9], m[10], m[11]);
    let (a03, a13, a23, a33) = (m[12], m[13], m[14], m[15]);

    let s = [
        a00 * a11 - a10 * a01,
        a00 * a12 - a10 * a02,
        a00 * a13 - a10 * a03,
        a01 * a12 - a11 * a02,
        a01 * a13 - a11 * a03,
        a02 * a13 - a12 * a03,
    ];
    let c = [
        a20 * a31 - a30 * a21,
        a20 * a32 - a30 * a22,
        a20 * a33 - a30 * a23,
        a21 * a32 - a31 * a22,
        a21 * a33 - a31 * a23,
        a22 * a33 - a32 * a23,
    ];
    (s, c)
}

#[inline]
fn det_from_minors(s: &[f64; 6], c: &[f64; 6]) -> f64 {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
}

/// Determinant of `m`
pub fn determinant(m: &Matrix4) -> f64 {
    let (s, c) = minors(m);
    det_from_minors(&s, &c)
}

/// Inverse of `m` by cofactor expansion, written into `t`
///
/// The adjugate is scaled by `1 / det(m)`. A singular `m` is not rejected:
/// the scale becomes infinite and `t` fills with infinity/NaN.
pub fn invert(m: &Matrix4, t: &mut Matrix4) {
    let (s, c) = minors(m);
    let det = det_from_minors(&s, &c);
    if det == 0.0 {
        tracing::trace!("inverting singular matrix, result is non-finite");
    }
    let inv = 1.0 / det;

    let m = &m.0;
    let (a00, a10, a20, a30) = (m[0], m[1], m[2], m[3]);
    let (a01, a11, a21, a31) = (m[4], m[5], m[6], m[7]);
    let (a02, a12, a22, a32) = (m[8], m[9], m[10], m[11]);
    let (a03, a13, a23, a33) = (m[12], m[13], m[14], m[15]);

    t.0 = [
        // column 0
        (a11 * c[5] - a12 * c[4] + a13 * c[3]) * inv,
        (-a10 * c[5] + a12 * c[2] - a13 * c[1]) * inv,
        (a10 * c[4] - a11 * c[2] + a13 * c[0]) * inv,
        (-a10 * c[3] + a11 * c[1] - a12 * c[0]) * inv,
        // column 1
        (-a01 * c[5] + a02 * c[4] - a03 * c[3]) * inv,
        (a00 * c[5] - a02 * c[2] + a03 * c[1]) * inv,
        (-a00 * c[4] + a01 * c[2] - a03 * c[0]) * inv,
        (a00 * c[3] - a01 * c[1] + a02 * c[0]) * inv,
        // column 2
        (a31 * s[5] - a32 * s[4] + a33 * s[3]) * inv,
        (-a30 * s[5] + a32 * s[2] - a33 * s[1]) * inv,
        (a30 * s[4] - a31 * s[2] + a33 * s[0]) * inv,
        (-a30 * s[3] + a31 * s[1] - a32 * s[0]) * inv,
        // column 3
        (-a21 * s[5] + a22 * s[4] - a23 * s[3]) * inv,
        (a20 * s[5] - a22 * s[2] + a23 * s[1]) * inv,
        (-a20 * s[4] + a21 * s[2] - a23 * s[0]) * inv,
        (a20 * s[3] - a21 * s[1] + a22 * s[0]) * inv,
    ];
}

// =============================================================================
// Value-returning forms
// =============================================================================

impl Matrix4 {
    /// Project `v` through this transform (see [`transform_vector`])
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let mut r = Vector3::ZERO;
        transform_vector(self, &v, &mut r);
        r
    }

    /// Inverse of this transform (see [`invert`])
    pub fn inverse(&self) -> Matrix4 {
        let mut t = Matrix4::ZERO;
        invert(self, &mut t);
        t
    }

    /// Determinant of this transform
    pub fn determinant(&self) -> f64 {
        determinant(self)
    }
}

impl core::ops::Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut r = Matrix4::ZERO;
        multiply(&self, &rhs, &mut r);
        r
    }
}
