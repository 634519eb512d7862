//! Decode command - dump fields from a binary buffer

use anyhow::{Context, Result, bail};
use clap::Args;
use nexus_binary::{ByteCursor, CursorError};
use nexus_math::Matrix4;
use std::fmt;
use std::path::PathBuf;

use crate::layout::{FieldKind, FieldSpec, Layout};
use crate::print_matrix;

/// Arguments for the decode command
#[derive(Args)]
pub struct DecodeArgs {
    /// Binary file to decode
    pub file: PathBuf,

    /// TOML layout describing the fields to read
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Field kinds to read in order (u16, u32, u64, f32, mat4, skip:<n>).
    /// Replaces the layout's field list when given.
    #[arg(long = "field", value_name = "KIND")]
    pub fields: Vec<FieldKind>,

    /// Start offset in bytes (overrides the layout's offset)
    #[arg(long)]
    pub offset: Option<usize>,
}

/// A decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    Mat4(Matrix4),
    Skipped(usize),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::U16(v) => write!(f, "{v}"),
            FieldValue::U32(v) => write!(f, "{v}"),
            FieldValue::U64(v) => write!(f, "{v}"),
            FieldValue::F32(v) => write!(f, "{v}"),
            FieldValue::Mat4(_) => write!(f, "<4x4>"),
            FieldValue::Skipped(n) => write!(f, "({n} bytes)"),
        }
    }
}

/// A field together with where it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub offset: usize,
    pub name: Option<String>,
    pub kind: FieldKind,
    pub value: FieldValue,
}

/// Read a single field at the cursor
pub fn read_field(cursor: &mut ByteCursor<'_>, kind: FieldKind) -> Result<FieldValue, CursorError> {
    Ok(match kind {
        FieldKind::U16 => FieldValue::U16(cursor.read_u16()?),
        FieldKind::U32 => FieldValue::U32(cursor.read_u32()?),
        FieldKind::U64 => FieldValue::U64(cursor.read_u64()?),
        FieldKind::F32 => FieldValue::F32(cursor.read_f32()?),
        FieldKind::Mat4 => FieldValue::Mat4(Matrix4::from_f32_cols(cursor.read_f32_array::<16>()?)),
        FieldKind::Skip(n) => {
            cursor.skip(n)?;
            FieldValue::Skipped(n)
        }
    })
}

/// Decode every field of `layout` from `data`
///
/// Stops at the first field that runs past the end of the buffer.
pub fn decode_layout(data: &[u8], layout: &Layout) -> Result<Vec<DecodedField>> {
    let mut cursor = ByteCursor::with_offset(data, layout.offset)?;
    let needed = layout.byte_len();
    if needed > cursor.remaining() {
        tracing::warn!(
            "Layout needs {} bytes but only {} remain after offset {}",
            needed,
            cursor.remaining(),
            layout.offset
        );
    }
    let mut decoded = Vec::with_capacity(layout.fields.len());

    for (index, field) in layout.fields.iter().enumerate() {
        let offset = cursor.offset();
        let value = read_field(&mut cursor, field.kind).with_context(|| {
            format!(
                "Field {} ({}) failed",
                index,
                field.name.as_deref().unwrap_or("unnamed")
            )
        })?;
        decoded.push(DecodedField {
            offset,
            name: field.name.clone(),
            kind: field.kind,
            value,
        });
    }

    tracing::debug!(
        fields = decoded.len(),
        consumed = cursor.offset() - layout.offset,
        remaining = cursor.remaining(),
        "decode finished"
    );
    Ok(decoded)
}

/// Build the effective layout from a layout file and command-line overrides
fn resolve_layout(args: &DecodeArgs) -> Result<Layout> {
    let mut layout = match &args.layout {
        Some(path) => Layout::load(path)?,
        None => Layout::default(),
    };
    if !args.fields.is_empty() {
        layout.fields = args.fields.iter().copied().map(FieldSpec::from).collect();
    }
    if let Some(offset) = args.offset {
        layout.offset = offset;
    }
    if layout.fields.is_empty() {
        bail!("No fields to decode (pass --layout or --field)");
    }
    Ok(layout)
}

/// Execute the decode command
pub fn execute(args: DecodeArgs) -> Result<()> {
    let layout = resolve_layout(&args)?;
    let data = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    tracing::info!(
        "Decoding {} field(s) from {} ({} bytes)",
        layout.fields.len(),
        args.file.display(),
        data.len()
    );

    for field in decode_layout(&data, &layout)? {
        let name = field.name.as_deref().unwrap_or("-");
        println!("0x{:08X}  {:<20} {:<8} {}", field.offset, name, field.kind, field.value);
        if let FieldValue::Mat4(m) = &field.value {
            print_matrix(m);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&7u16.to_le_bytes());
        data.extend_from_slice(&[0xAA, 0xBB]);
        data.extend_from_slice(&(u64::MAX - 1).to_le_bytes());
        data.extend_from_slice(&1.5f32.to_le_bytes());
        for v in Matrix4::IDENTITY.0 {
            data.extend_from_slice(&(v as f32).to_le_bytes());
        }
        data
    }

    fn layout(kinds: &[FieldKind]) -> Layout {
        Layout {
            offset: 0,
            fields: kinds.iter().copied().map(FieldSpec::from).collect(),
        }
    }

    #[test]
    fn test_decode_layout_values_and_offsets() {
        let data = header_bytes();
        let fields = decode_layout(
            &data,
            &layout(&[
                FieldKind::U32,
                FieldKind::U16,
                FieldKind::Skip(2),
                FieldKind::U64,
                FieldKind::F32,
                FieldKind::Mat4,
            ]),
        )
        .unwrap();

        let offsets: Vec<usize> = fields.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, vec![0, 4, 6, 8, 16, 20]);
        assert_eq!(fields[0].value, FieldValue::U32(3));
        assert_eq!(fields[1].value, FieldValue::U16(7));
        assert_eq!(fields[2].value, FieldValue::Skipped(2));
        assert_eq!(fields[3].value, FieldValue::U64(u64::MAX - 1));
        assert_eq!(fields[4].value, FieldValue::F32(1.5));
        assert_eq!(fields[5].value, FieldValue::Mat4(Matrix4::IDENTITY));
    }

    #[test]
    fn test_decode_layout_with_offset() {
        let data = header_bytes();
        let layout = Layout {
            offset: 4,
            fields: vec![FieldKind::U16.into()],
        };
        let fields = decode_layout(&data, &layout).unwrap();
        assert_eq!(fields[0].offset, 4);
        assert_eq!(fields[0].value, FieldValue::U16(7));
    }

    #[test]
    fn test_decode_layout_truncated() {
        let data = [1u8, 0, 0];
        let err = decode_layout(&data, &layout(&[FieldKind::U16, FieldKind::U32])).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Field 1"));
        assert!(message.contains("exceeds buffer length 3"));
    }

    #[test]
    fn test_decode_layout_exact_fit() {
        let data = header_bytes();
        let kinds = [
            FieldKind::U32,
            FieldKind::U16,
            FieldKind::Skip(2),
            FieldKind::U64,
            FieldKind::F32,
            FieldKind::Mat4,
        ];
        assert_eq!(layout(&kinds).byte_len(), data.len());
        assert!(decode_layout(&data, &layout(&kinds)).is_ok());

        let mut longer = layout(&kinds);
        longer.fields.push(FieldKind::U16.into());
        assert_eq!(longer.byte_len(), data.len() + 2);
        let err = decode_layout(&data, &longer).unwrap_err();
        assert!(format!("{err:#}").contains("Field 6"));
    }

    #[test]
    fn test_decode_layout_offset_past_end() {
        let layout = Layout {
            offset: 10,
            fields: vec![FieldKind::U16.into()],
        };
        assert!(decode_layout(&[0u8; 4], &layout).is_err());
    }

    #[test]
    fn test_resolve_layout_requires_fields() {
        let args = DecodeArgs {
            file: PathBuf::from("model.bin"),
            layout: None,
            fields: Vec::new(),
            offset: None,
        };
        assert!(resolve_layout(&args).is_err());
    }

    #[test]
    fn test_resolve_layout_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, "offset = 8\n[[fields]]\nkind = \"u32\"\n").unwrap();

        let args = DecodeArgs {
            file: PathBuf::from("model.bin"),
            layout: Some(path),
            fields: vec![FieldKind::F32, FieldKind::F32],
            offset: Some(2),
        };
        let layout = resolve_layout(&args).unwrap();
        assert_eq!(layout.offset, 2);
        assert_eq!(layout.fields.len(), 2);
        assert_eq!(layout.fields[0].kind, FieldKind::F32);
    }

    #[test]
    fn test_execute_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, header_bytes()).unwrap();

        let args = DecodeArgs {
            file: path,
            layout: None,
            fields: vec![FieldKind::U32, FieldKind::U16],
            offset: None,
        };
        execute(args).unwrap();
    }
}
