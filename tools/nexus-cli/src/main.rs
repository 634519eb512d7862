//! Nexus CLI - inspect streamed 3D model buffers and transforms
//!
//! # Commands
//!
//! - `nexus decode` - Dump little-endian fields from a binary file
//! - `nexus transform` - Project a point through a 4x4 transform
//! - `nexus invert` - Invert a 4x4 transform
//! - `nexus multiply` - Compose two 4x4 transforms
//!
//! # Usage
//!
//! ```bash
//! # Read a header with an explicit field list
//! nexus decode model.bin --field u32 --field u32 --field mat4
//!
//! # Read fields described by a layout file
//! nexus decode model.bin --layout header.toml
//!
//! # Project the origin through the matrix stored at byte 8
//! nexus transform --from model.bin --at 8 --point 0,0,0
//! ```
//!
//! Matrices are column-major. Set `RUST_LOG=debug` for decode diagnostics.

mod algebra;
mod decode;
mod layout;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nexus_math::Matrix4;

/// Nexus CLI - inspect streamed 3D model buffers and transforms
#[derive(Parser)]
#[command(name = "nexus")]
#[command(about = "Inspect streamed 3D model buffers and transforms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump little-endian fields from a binary file
    Decode(decode::DecodeArgs),

    /// Project a point through a 4x4 transform (with perspective divide)
    Transform(algebra::TransformArgs),

    /// Invert a 4x4 transform
    Invert(algebra::InvertArgs),

    /// Compose two 4x4 transforms (lhs * rhs)
    Multiply(algebra::MultiplyArgs),
}

/// Print a matrix as four rows
pub(crate) fn print_matrix(m: &Matrix4) {
    for row in 0..4 {
        println!(
            "  [{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
            m.get(row, 0),
            m.get(row, 1),
            m.get(row, 2),
            m.get(row, 3)
        );
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(args) => decode::execute(args),
        Commands::Transform(args) => algebra::transform(args),
        Commands::Invert(args) => algebra::invert_matrix(args),
        Commands::Multiply(args) => algebra::multiply_matrices(args),
    }
}
