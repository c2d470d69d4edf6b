use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by matrix access, graph construction and input loading.
///
/// Running out of selectable scores during a matching call is not an error;
/// strategies complete the assignment and return normally.
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("vertex {vertex} out of bounds for graph with {len} vertices")]
    VertexOutOfBounds { vertex: usize, len: usize },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("matrix dimensions {rows}x{cols} overflow usize")]
    SizeOverflow { rows: usize, cols: usize },

    #[error("graph-1 vertex {vertex} is already assigned")]
    AlreadyAssigned { vertex: usize },

    #[error("graph-2 vertex {vertex} is already a target")]
    TargetInUse { vertex: usize },

    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlignError>;
