//! Matrix and vector value types
//!
//! Both types are POD newtypes over `f64` arrays so decoded buffers can be
//! viewed in place with `bytemuck` and stored in config files with `serde`.

use bytemuck::{Pod, Zeroable};
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// 4x4 homogeneous transform (column-major, 16 doubles)
///
/// Element `(row, col)` lives at index `col * 4 + row`:
///
/// ```text
/// [ 0  4  8 12 ]
/// [ 1  5  9 13 ]
/// [ 2  6 10 14 ]
/// [ 3  7 11 15 ]
/// ```
///
/// No identity or invertibility invariant is enforced. `Default` is the zero
/// matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(transparent)]
pub struct Matrix4(pub [f64; 16]);

impl Matrix4 {
    /// Identity transform
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// All-zero matrix
    pub const ZERO: Self = Self([0.0; 16]);

    /// Create from a column-major array
    pub const fn from_cols_array(cols: [f64; 16]) -> Self {
        Self(cols)
    }

    /// Create from 16 column-major `f32` values, widening each to `f64`
    ///
    /// Streamed transforms are stored as single-precision floats.
    pub fn from_f32_cols(cols: [f32; 16]) -> Self {
        Self(cols.map(f64::from))
    }

    /// Identity with translation column `(tx, ty, tz)`
    pub const fn from_translation(t: Vector3) -> Self {
        let [tx, ty, tz] = t.0;
        Self([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            tx, ty, tz, 1.0,
        ])
    }

    /// Non-uniform scale along each axis
    pub const fn from_scale(s: Vector3) -> Self {
        let [sx, sy, sz] = s.0;
        Self([
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Column-major element array
    #[inline]
    pub fn as_array(&self) -> &[f64; 16] {
        &self.0
    }

    /// Element at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..4`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < 4 && col < 4, "matrix index ({row}, {col}) out of range");
        self.0[col * 4 + row]
    }

    /// Column `col` as `[x, y, z, w]`
    ///
    /// # Panics
    ///
    /// Panics if `col` is not in `0..4`.
    #[inline]
    pub fn col(&self, col: usize) -> [f64; 4] {
        assert!(col < 4, "matrix column {col} out of range");
        let c = &self.0[col * 4..col * 4 + 4];
        [c[0], c[1], c[2], c[3]]
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[row * 4 + col] = self.0[col * 4 + row];
            }
        }
        Self(out)
    }

    /// Whether every element is finite
    ///
    /// Inverting a singular matrix or projecting with `w == 0` produces
    /// non-finite values; callers that cull degenerate geometry check here.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// 3D point (implicitly `w = 1` when transformed)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(transparent)]
pub struct Vector3(pub [f64; 3]);

impl Vector3 {
    pub const ZERO: Self = Self([0.0; 3]);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0[2]
    }

    #[inline]
    pub fn as_array(&self) -> &[f64; 3] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

// =============================================================================
// glam interop
// =============================================================================

impl From<DMat4> for Matrix4 {
    fn from(m: DMat4) -> Self {
        Self(m.to_cols_array())
    }
}

impl From<Matrix4> for DMat4 {
    fn from(m: Matrix4) -> Self {
        DMat4::from_cols_array(&m.0)
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self(v.to_array())
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::from_array(v.0)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_layout() {
        let m = Matrix4::IDENTITY;
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(m.get(row, col), expected);
            }
        }
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Matrix4::default(), Matrix4::ZERO);
        assert_eq!(Vector3::default(), Vector3::ZERO);
    }

    #[test]
    fn test_translation_column() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.col(3), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m.get(0, 3), 1.0);
        assert_eq!(m.get(3, 0), 0.0);
    }

    #[test]
    fn test_from_f32_cols_widens() {
        let mut cols = [0.0f32; 16];
        cols[0] = 0.1;
        cols[15] = 1.0;
        let m = Matrix4::from_f32_cols(cols);
        assert_eq!(m.0[0], 0.1f32 as f64);
        assert_eq!(m.0[15], 1.0);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix4::from_cols_array(core::array::from_fn(|i| i as f64));
        let t = m.transpose();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(t.get(row, col), m.get(col, row));
            }
        }
        assert_eq!(t.transpose(), m);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        Matrix4::IDENTITY.get(4, 0);
    }

    #[test]
    fn test_glam_roundtrip_keeps_column_major() {
        let m = Matrix4::from_translation(Vector3::new(4.0, 5.0, 6.0));
        let g: DMat4 = m.into();
        assert_eq!(g.w_axis.x, 4.0);
        assert_eq!(g.w_axis.y, 5.0);
        assert_eq!(g.w_axis.z, 6.0);
        assert_eq!(Matrix4::from(g), m);

        let v: DVec3 = Vector3::new(1.0, 2.0, 3.0).into();
        assert_eq!(Vector3::from(v), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_pod_cast_from_f64_buffer() {
        let raw: [f64; 16] = Matrix4::IDENTITY.0;
        let m: &Matrix4 = bytemuck::cast_ref(&raw);
        assert_eq!(*m, Matrix4::IDENTITY);

        let v = Vector3::new(1.0, 0.0, 0.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[..8], &1.0f64.to_ne_bytes());
    }

    #[test]
    #[should_panic(expected = "matrix column 4 out of range")]
    fn test_col_out_of_range() {
        Matrix4::IDENTITY.col(4);
    }

    #[test]
    fn test_toml_roundtrip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Placement {
            model: Matrix4,
            origin: Vector3,
        }

        let placement = Placement {
            model: Matrix4::from_translation(Vector3::new(1.5, -2.0, 0.25)),
            origin: Vector3::new(0.5, 4.0, -8.0),
        };
        let text = toml::to_string(&placement).unwrap();
        assert!(text.contains("origin"));
        assert_eq!(toml::from_str::<Placement>(&text).unwrap(), placement);
    }

    #[test]
    fn test_is_finite() {
        assert!(Matrix4::IDENTITY.is_finite());
        let mut m = Matrix4::IDENTITY;
        m.0[5] = f64::NAN;
        assert!(!m.is_finite());
        assert!(!Vector3::new(f64::INFINITY, 0.0, 0.0).is_finite());
    }
}
