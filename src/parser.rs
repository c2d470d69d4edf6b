use crate::dense::DenseMatrix;
use crate::sparse::{packed_len, SymSparseMatrix, DEFAULT_ENTRY};
use crate::{AlignError, Result};
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{digit1, multispace0},
    combinator::{map_res, value},
    multi::many0,
    number::complete::double,
    sequence::{pair, preceded, tuple},
    IResult,
};
use std::path::Path;

/// Parse a single unsigned integer after optional whitespace
fn parse_usize(input: &str) -> IResult<&str, usize> {
    preceded(multispace0, map_res(digit1, |s: &str| s.parse::<usize>()))(input)
}

/// Parse a real score after optional whitespace; `-inf` marks an invalidated cell
fn parse_score(input: &str) -> IResult<&str, f64> {
    preceded(
        multispace0,
        alt((
            value(f64::NEG_INFINITY, tag_no_case("-infinity")),
            value(f64::NEG_INFINITY, tag_no_case("-inf")),
            double,
        )),
    )(input)
}

/// Parse the `N N edge_count` header of the edge-list format
fn sparse_header(input: &str) -> IResult<&str, (usize, usize, usize)> {
    tuple((parse_usize, parse_usize, parse_usize))(input)
}

/// Parse 1-based `(i, j)` pairs until input runs out
fn edge_pairs(input: &str) -> IResult<&str, Vec<(usize, usize)>> {
    many0(pair(parse_usize, parse_usize))(input)
}

fn parse_error(err: nom::Err<nom::error::Error<&str>>) -> AlignError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let near: String = e.input.chars().take(20).collect();
            AlignError::Parse(format!("{:?} near {:?}", e.code, near))
        }
        nom::Err::Incomplete(_) => AlignError::Parse("incomplete input".to_string()),
    }
}

/// Anything left after optional whitespace is an error.
fn expect_end(rest: &str) -> Result<()> {
    let rest = rest.trim_start();
    if rest.is_empty() {
        Ok(())
    } else {
        let near: String = rest.chars().take(20).collect();
        Err(AlignError::Parse(format!("unexpected trailing input {:?}", near)))
    }
}

/// Parse the edge-list format: `N`, `N` again, an edge count (not checked),
/// then 1-based `i j` pairs. Every pair stores weight 1 at `(i-1, j-1)`.
pub fn parse_sparse(input: &str) -> Result<SymSparseMatrix> {
    let (rest, (n, m, _edge_count)) = sparse_header(input).map_err(parse_error)?;
    if n != m {
        return Err(AlignError::NotSquare { rows: n, cols: m });
    }
    packed_len(n)?;

    let (rest, edges) = edge_pairs(rest).map_err(parse_error)?;
    expect_end(rest)?;

    let mut matrix = SymSparseMatrix::new(n);
    for (i, j) in edges {
        for vertex in [i, j] {
            if vertex == 0 || vertex > n {
                return Err(AlignError::VertexOutOfBounds { vertex, len: n });
            }
        }
        matrix.insert(i - 1, j - 1, DEFAULT_ENTRY)?;
    }
    Ok(matrix)
}

/// Parse a dense score matrix: `R C` followed by `R * C` row-major reals.
pub fn parse_dense(input: &str) -> Result<DenseMatrix> {
    let (rest, (rows, cols)) = pair(parse_usize, parse_usize)(input).map_err(parse_error)?;
    let (rest, values) = many0(parse_score)(rest).map_err(parse_error)?;
    expect_end(rest)?;

    let expected = rows
        .checked_mul(cols)
        .ok_or(AlignError::SizeOverflow { rows, cols })?;
    if values.len() != expected {
        return Err(AlignError::DimensionMismatch {
            expected,
            found: values.len(),
        });
    }
    Ok(DenseMatrix::from_fn(rows, cols, |r, c| values[r * cols + c]))
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AlignError::FileNotFound(path.to_path_buf()),
        _ => AlignError::Io(e),
    })
}

/// Load an edge-list file into a sparse symmetric matrix
pub fn load_sparse(path: &Path) -> Result<SymSparseMatrix> {
    parse_sparse(&read_input(path)?)
}

/// Load a dense score matrix file
pub fn load_dense(path: &Path) -> Result<DenseMatrix> {
    parse_dense(&read_input(path)?)
}
