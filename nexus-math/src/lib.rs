//! Nexus-Math: 4x4 homogeneous transforms for streamed 3D models
//!
//! Decoded transforms are composed and applied to points to move them between
//! coordinate spaces (object space to world space to screen space). All
//! arithmetic is `f64` to keep cofactor-expansion error small.
//!
//! # Layout
//!
//! [`Matrix4`] stores 16 doubles in column-major order, so the translation
//! lives in elements 12..15 and the homogeneous row in 3, 7, 11, 15.
//! [`Vector3`] is a point with an implicit `w = 1`.
//!
//! # Operations
//!
//! - [`transform_vector`]: `M * (x, y, z, 1)` followed by the perspective divide
//! - [`multiply`]: `A * B`
//! - [`invert`]: cofactor-expansion inverse
//! - [`determinant`]
//!
//! Each takes its output by `&mut` so callers can reuse storage. Matching
//! value-returning methods live on [`Matrix4`], and `Matrix4` implements `Mul`.
//!
//! # Degenerate input
//!
//! Nothing here returns an error. Projecting a point whose `w` is zero, or
//! inverting a singular matrix, produces infinity/NaN components; callers that
//! need to cull such geometry check [`Matrix4::is_finite`] /
//! [`Vector3::is_finite`] on the result.
//!
//! # Usage
//!
//! ```
//! use nexus_math::{Matrix4, Vector3, multiply, transform_vector};
//!
//! let model = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
//! let scale = Matrix4::from_scale(Vector3::new(2.0, 2.0, 2.0));
//!
//! let mut combined = Matrix4::ZERO;
//! multiply(&model, &scale, &mut combined);
//!
//! let mut out = Vector3::ZERO;
//! transform_vector(&combined, &Vector3::new(1.0, 1.0, 1.0), &mut out);
//! assert_eq!(out, Vector3::new(3.0, 4.0, 5.0));
//! ```

mod ops;
mod types;

pub use ops::{determinant, invert, multiply, transform_vector};
pub use types::{Matrix4, Vector3};
