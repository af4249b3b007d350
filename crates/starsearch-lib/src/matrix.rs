//! Loader for whitespace-delimited cost matrices.
//!
//! The first line lists one short code per column, optionally preceded by a
//! corner label. Every following non-blank line holds a city name and one
//! cell per column. A cell is either a non-negative integer or the
//! [`NO_EDGE_TOKEN`] placeholder.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{CityTitle, Cost, Graph, NO_EDGE};

/// Cell placeholder meaning "no direct edge".
pub const NO_EDGE_TOKEN: &str = "-";

/// Read and parse a matrix file.
pub fn load_graph(path: &Path) -> Result<Graph> {
    if !path.is_file() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    let graph = parse_matrix(&contents)?;
    debug!(
        path = %path.display(),
        cities = graph.len(),
        "loaded cost matrix"
    );
    Ok(graph)
}

/// Parse matrix text into a [`Graph`].
pub fn parse_matrix(input: &str) -> Result<Graph> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(Error::EmptyMatrix)?;
    let header: Vec<&str> = header.split_whitespace().collect();
    let rows: Vec<(usize, Vec<&str>)> = lines
        .map(|(number, line)| (number, line.split_whitespace().collect()))
        .collect();

    let codes = match header.len() {
        n if n == rows.len() + 1 => &header[1..],
        _ => &header[..],
    };
    if codes.len() != rows.len() {
        return Err(Error::TitleCountMismatch {
            codes: codes.len(),
            rows: rows.len(),
        });
    }

    let len = codes.len();
    let mut titles = Vec::with_capacity(len);
    let mut matrix = Vec::with_capacity(len);
    for ((number, tokens), code) in rows.into_iter().zip(codes) {
        let (name, cells) = tokens
            .split_first()
            .ok_or(Error::MatrixShape {
                line: number,
                expected: len,
                found: 0,
            })?;
        if cells.len() != len {
            return Err(Error::MatrixShape {
                line: number,
                expected: len,
                found: cells.len(),
            });
        }

        let row = cells
            .iter()
            .map(|token| parse_cell(number, token))
            .collect::<Result<Vec<_>>>()?;
        titles.push(CityTitle::new(*name, *code));
        matrix.push(row);
    }

    Graph::new(titles, matrix)
}

fn parse_cell(line: usize, token: &str) -> Result<Cost> {
    if token == NO_EDGE_TOKEN {
        return Ok(NO_EDGE);
    }
    token.parse::<Cost>().map_err(|_| Error::MatrixParse {
        line,
        token: token.to_string(),
    })
}
