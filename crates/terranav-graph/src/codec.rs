//! Binary graph persistence.
//!
//! [`GraphEncoder`] and [`GraphDecoder`] store a graph as its
//! [`GraphSnapshot`] in a compact little-endian format.
//!
//! ## Wire format
//!
//! ```text
//! [magic: b"TNAV"]
//! [version: u16 LE]
//! [resolution: u8]  (1, 2, 4, 8 or 16)
//! [columns: u32 LE]
//! [rows: u32 LE]
//! [cell_size: 3 x f32 LE]
//! for each node, row-major:
//!   [attributes: u8] [neighbours: u8] [height: f32 LE]
//! ```

use std::io::{self, Read, Write};

use glam::Vec3;

use crate::config::Resolution;
use crate::error::CodecError;
use crate::graph::GridGraph;
use crate::snapshot::GraphSnapshot;

const MAGIC: [u8; 4] = *b"TNAV";
const VERSION: u16 = 1;
/// Bytes per serialized node: attributes(1) + neighbours(1) + height(4) = 6
const NODE_SIZE: usize = 6;
/// Upper bound on decoded node count; larger headers are treated as corrupt.
const MAX_NODES: u64 = 1 << 26;

// ---------------------------------------------------------------------------
// GraphEncoder
// ---------------------------------------------------------------------------

/// Encodes [`GridGraph`]s to a byte-oriented writer.
pub struct GraphEncoder<W: Write> {
    writer: W,
}

impl<W: Write> GraphEncoder<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single graph.
    pub fn encode(&mut self, graph: &GridGraph) -> std::io::Result<()> {
        let s = graph.to_snapshot();

        self.writer.write_all(&MAGIC)?;
        self.writer.write_all(&VERSION.to_le_bytes())?;
        self.writer.write_all(&[s.resolution.factor() as u8])?;
        self.writer.write_all(&s.columns.to_le_bytes())?;
        self.writer.write_all(&s.rows.to_le_bytes())?;
        for v in s.cell_size.to_array() {
            self.writer.write_all(&v.to_le_bytes())?;
        }

        let mut buf = Vec::with_capacity(s.attributes.len() * NODE_SIZE);
        for i in 0..s.attributes.len() {
            buf.push(s.attributes[i]);
            buf.push(s.neighbours[i]);
            buf.extend_from_slice(&s.heights[i].to_le_bytes());
        }
        self.writer.write_all(&buf)?;
        self.writer.flush()
    }

    /// Consume the encoder and return the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

// ---------------------------------------------------------------------------
// GraphDecoder
// ---------------------------------------------------------------------------

/// Decodes [`GridGraph`]s from a byte-oriented reader.
pub struct GraphDecoder<R: Read> {
    reader: R,
}

impl<R: Read> GraphDecoder<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the next graph.
    pub fn decode(&mut self) -> Result<GridGraph, CodecError> {
        let snapshot = self.decode_snapshot()?;
        Ok(GridGraph::from_snapshot(&snapshot)?)
    }

    /// Read the next graph without validating or assembling it.
    pub fn decode_snapshot(&mut self) -> Result<GraphSnapshot, CodecError> {
        let mut magic = [0u8; 4];
        self.reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(CodecError::BadMagic);
        }
        let version = u16::from_le_bytes(self.read_array()?);
        if version != VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }
        let [res] = self.read_array::<1>()?;
        let resolution =
            Resolution::try_from(u32::from(res)).map_err(|_| CodecError::InvalidResolution(res))?;
        let columns = u32::from_le_bytes(self.read_array()?);
        let rows = u32::from_le_bytes(self.read_array()?);
        if u64::from(columns) * u64::from(rows) > MAX_NODES {
            return Err(CodecError::TooLarge { columns, rows });
        }
        let cell_size = Vec3::new(
            f32::from_le_bytes(self.read_array()?),
            f32::from_le_bytes(self.read_array()?),
            f32::from_le_bytes(self.read_array()?),
        );

        // Grow with the input rather than trusting the header's size.
        let len = columns as usize * rows as usize;
        let expected = len * NODE_SIZE;
        let mut body = Vec::new();
        (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut body)?;
        if body.len() != expected {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }

        let mut attributes = Vec::with_capacity(len);
        let mut neighbours = Vec::with_capacity(len);
        let mut heights = Vec::with_capacity(len);
        for chunk in body.chunks_exact(NODE_SIZE) {
            attributes.push(chunk[0]);
            neighbours.push(chunk[1]);
            heights.push(f32::from_le_bytes([chunk[2], chunk[3], chunk[4], chunk[5]]));
        }

        Ok(GraphSnapshot {
            resolution,
            columns,
            rows,
            cell_size,
            attributes,
            neighbours,
            heights,
        })
    }

    fn read_array<const N: usize>(&mut self) -> std::io::Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }
}
