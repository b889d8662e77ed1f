//! Binary encoding of rule trees.
//!
//! An [`Ast`](crate::Ast) is stored as a 32-byte fixed header followed by a
//! bincode-encoded payload.
//!
//! ## Wire Format
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic bytes: b"RAST"
//! 4       2     Format version (u16, little-endian)
//! 6       2     Engine version (u16, little-endian)
//! 8       4     Flags (u32, reserved)
//! 12      4     Payload length in bytes (u32, little-endian)
//! 16      16    BLAKE3 hash of the payload (truncated to 16 bytes)
//! 32..    var   Bincode-encoded payload
//! ```
//!
//! ## Versioning
//!
//! The format version in the header must match exactly. If it does not,
//! decoding fails immediately with [`DeserializeError::IncompatibleVersion`].
//! The engine version is informational only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse::split_condition;
use crate::{Ast, LogicalOp, Node};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MAGIC: &[u8; 4] = b"RAST";
const FORMAT_VERSION: u16 = 1;
const ENGINE_VERSION: u16 = 1;
const HEADER_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when encoding an [`Ast`](crate::Ast) to bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode rule tree: {0}")]
    Encode(#[from] bincode::error::EncodeError),
}

/// Errors that can occur when decoding an [`Ast`](crate::Ast) from bytes.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("not an encoded rule tree: invalid magic bytes")]
    BadMagic,

    #[error("incompatible format version: blob is v{blob}, engine supports v{supported}")]
    IncompatibleVersion { blob: u16, supported: u16 },

    #[error("integrity check failed: BLAKE3 checksum mismatch")]
    ChecksumMismatch,

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("failed to decode payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("validation failed: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Serialized type hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SerializedAst {
    metadata: AstMetadata,
    root: Option<SerializedNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AstMetadata {
    leaf_count: usize,
    depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum SerializedNode {
    Operand(String),
    And(Box<SerializedNode>, Box<SerializedNode>),
    Or(Box<SerializedNode>, Box<SerializedNode>),
}

// ---------------------------------------------------------------------------
// Node conversion
// ---------------------------------------------------------------------------

fn serialize_node(node: &Node) -> SerializedNode {
    match node {
        Node::Operand(text) => SerializedNode::Operand(text.clone()),
        Node::Operator { op, left, right } => {
            let left = Box::new(serialize_node(left));
            let right = Box::new(serialize_node(right));
            match op {
                LogicalOp::And => SerializedNode::And(left, right),
                LogicalOp::Or => SerializedNode::Or(left, right),
            }
        }
    }
}

fn deserialize_node(node: SerializedNode) -> Node {
    match node {
        SerializedNode::Operand(text) => Node::Operand(text),
        SerializedNode::And(left, right) => {
            Node::join(LogicalOp::And, deserialize_node(*left), deserialize_node(*right))
        }
        SerializedNode::Or(left, right) => {
            Node::join(LogicalOp::Or, deserialize_node(*left), deserialize_node(*right))
        }
    }
}

fn ast_to_serialized(ast: &Ast) -> SerializedAst {
    SerializedAst {
        metadata: AstMetadata {
            leaf_count: ast.conditions().len(),
            depth: ast.depth(),
        },
        root: ast.root().map(serialize_node),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(ser: &SerializedAst) -> Result<(), DeserializeError> {
    let mut leaves = 0;
    let depth = match &ser.root {
        Some(root) => validate_node(root, &mut leaves)?,
        None => 0,
    };
    if leaves != ser.metadata.leaf_count {
        return Err(DeserializeError::Validation(format!(
            "metadata declares {} conditions, tree holds {leaves}",
            ser.metadata.leaf_count
        )));
    }
    if depth != ser.metadata.depth {
        return Err(DeserializeError::Validation(format!(
            "metadata declares depth {}, tree has depth {depth}",
            ser.metadata.depth
        )));
    }
    Ok(())
}

/// Returns the depth of `node`.
fn validate_node(node: &SerializedNode, leaves: &mut usize) -> Result<usize, DeserializeError> {
    match node {
        SerializedNode::Operand(text) => {
            split_condition(text).map_err(|e| DeserializeError::Validation(e.to_string()))?;
            *leaves += 1;
            Ok(1)
        }
        SerializedNode::And(left, right) | SerializedNode::Or(left, right) => {
            let left = validate_node(left, leaves)?;
            let right = validate_node(right, leaves)?;
            Ok(1 + left.max(right))
        }
    }
}

// ---------------------------------------------------------------------------
// Header I/O
// ---------------------------------------------------------------------------

fn write_header(buf: &mut Vec<u8>, payload: &[u8]) {
    let hash = blake3::hash(payload);
    let hash_bytes = hash.as_bytes();

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&ENGINE_VERSION.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // flags (reserved)
    #[allow(clippy::cast_possible_truncation)] // rule trees never approach 4 GiB
    let payload_len = payload.len() as u32;
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(&hash_bytes[..16]);
}

#[allow(clippy::cast_possible_truncation)] // HEADER_SIZE is 32, always fits in u32
fn read_header(bytes: &[u8]) -> Result<(u16, u32, [u8; 16]), DeserializeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DeserializeError::LengthMismatch {
            expected: HEADER_SIZE as u32,
            actual: bytes.len(),
        });
    }

    if &bytes[0..4] != MAGIC {
        return Err(DeserializeError::BadMagic);
    }

    let format_version = u16::from_le_bytes([bytes[4], bytes[5]]);
    // bytes[6..8] is engine_version (informational), bytes[8..12] is flags
    let payload_len = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

    let mut hash = [0u8; 16];
    hash.copy_from_slice(&bytes[16..32]);

    Ok((format_version, payload_len, hash))
}

// ---------------------------------------------------------------------------
// Public encode/decode
// ---------------------------------------------------------------------------

pub(crate) fn encode(ast: &Ast) -> Result<Vec<u8>, SerializeError> {
    let serialized = ast_to_serialized(ast);
    let payload = bincode::serde::encode_to_vec(&serialized, bincode::config::standard())?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    write_header(&mut buf, &payload);
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Ast, DeserializeError> {
    let (format_version, payload_len, stored_hash) = read_header(bytes)?;

    if format_version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            blob: format_version,
            supported: FORMAT_VERSION,
        });
    }

    let payload_end = HEADER_SIZE + payload_len as usize;
    if bytes.len() < payload_end {
        return Err(DeserializeError::LengthMismatch {
            expected: payload_len,
            actual: bytes.len() - HEADER_SIZE,
        });
    }
    let payload = &bytes[HEADER_SIZE..payload_end];

    let computed_hash = blake3::hash(payload);
    if computed_hash.as_bytes()[..16] != stored_hash {
        return Err(DeserializeError::ChecksumMismatch);
    }

    let (serialized, _): (SerializedAst, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;

    validate(&serialized)?;
    Ok(Ast::from(serialized.root.map(deserialize_node)))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
