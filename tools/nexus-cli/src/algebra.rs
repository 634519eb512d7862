//! Transform, invert, and multiply commands

use anyhow::{Context, Result, bail, ensure};
use clap::Args;
use nexus_binary::ByteCursor;
use nexus_math::{Matrix4, Vector3, invert, multiply, transform_vector};
use std::path::PathBuf;

use crate::print_matrix;

/// Where a matrix comes from: literal values or 16 `f32` in a binary file
#[derive(Args, Clone, Debug, Default)]
pub struct MatrixSource {
    /// 16 column-major values, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub matrix: Vec<f64>,

    /// Binary file holding the matrix as 16 little-endian f32
    #[arg(long, conflicts_with = "matrix")]
    pub from: Option<PathBuf>,

    /// Byte offset of the matrix within --from
    #[arg(long, default_value_t = 0)]
    pub at: usize,
}

impl MatrixSource {
    /// Resolve to a matrix
    pub fn load(&self) -> Result<Matrix4> {
        match &self.from {
            Some(path) => {
                let data = std::fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let mut cursor = ByteCursor::with_offset(&data, self.at)?;
                let cols = cursor
                    .read_f32_array::<16>()
                    .with_context(|| format!("No matrix at offset {} in {}", self.at, path.display()))?;
                Ok(Matrix4::from_f32_cols(cols))
            }
            None => parse_matrix(&self.matrix),
        }
    }
}

/// Interpret 16 values as a column-major matrix
pub fn parse_matrix(values: &[f64]) -> Result<Matrix4> {
    if values.is_empty() {
        bail!("No matrix given (pass --matrix or --from)");
    }
    let cols: [f64; 16] = values
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected 16 matrix values, got {}", values.len()))?;
    Ok(Matrix4::from_cols_array(cols))
}

/// Interpret 3 values as a point
pub fn parse_point(values: &[f64]) -> Result<Vector3> {
    ensure!(
        values.len() == 3,
        "Expected 3 point values, got {}",
        values.len()
    );
    Ok(Vector3::new(values[0], values[1], values[2]))
}

/// Arguments for the transform command
#[derive(Args)]
pub struct TransformArgs {
    #[command(flatten)]
    pub source: MatrixSource,

    /// Point to transform as x,y,z
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub point: Vec<f64>,
}

/// Arguments for the invert command
#[derive(Args)]
pub struct InvertArgs {
    #[command(flatten)]
    pub source: MatrixSource,
}

/// Arguments for the multiply command
#[derive(Args)]
pub struct MultiplyArgs {
    /// Left-hand matrix, 16 column-major values
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub lhs: Vec<f64>,

    /// Right-hand matrix, 16 column-major values
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub rhs: Vec<f64>,
}

/// Execute the transform command
pub fn transform(args: TransformArgs) -> Result<()> {
    let m = args.source.load()?;
    let v = parse_point(&args.point)?;

    let mut r = Vector3::ZERO;
    transform_vector(&m, &v, &mut r);
    if !r.is_finite() {
        tracing::warn!("Projected point is not finite (w = 0)");
    }

    println!("{} {} {}", r.x(), r.y(), r.z());
    Ok(())
}

/// Execute the invert command
pub fn invert_matrix(args: InvertArgs) -> Result<()> {
    let m = args.source.load()?;

    let mut t = Matrix4::ZERO;
    invert(&m, &mut t);
    let det = m.determinant();
    if !t.is_finite() {
        tracing::warn!("Matrix is singular (det = {det}), inverse is not finite");
    }

    println!("det = {det}");
    print_matrix(&t);
    Ok(())
}

/// Execute the multiply command
pub fn multiply_matrices(args: MultiplyArgs) -> Result<()> {
    let a = parse_matrix(&args.lhs).context("Invalid --lhs")?;
    let b = parse_matrix(&args.rhs).context("Invalid --rhs")?;

    let mut r = Matrix4::ZERO;
    multiply(&a, &b, &mut r);

    print_matrix(&r);
    Ok(())
}
