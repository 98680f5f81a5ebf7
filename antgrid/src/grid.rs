//! Dot-map text codec.
//!
//! A dot map is the on-disk form of an antenna map:
//!
//! ```text
//! ..A.
//! ....
//! .A.B
//! ```
//!
//! Every line is a row, blank ones included, and both `\n` and `\r\n` line
//! endings are accepted.

use std::{fs, path::Path};

use crate::{
    coord::Coord,
    error::{GridError, Result},
};

/// Character used for an empty cell.
pub const EMPTY_CELL: char = '.';

/// Character used to mark effect positions on a rendered map.
pub const EFFECT_MARK: char = '#';

/// Largest row or column accepted for a new antenna.
pub const MAX_COORD: i32 = 1 << 16;

/// Largest number of cells [`render`] will allocate.
pub const MAX_RENDER_CELLS: usize = 1 << 24;

/// Returns true if `c` denotes an antenna on a dot map.
pub fn is_antenna(c: char) -> bool {
    c.is_ascii_graphic() && c != EMPTY_CELL
}

/// Parses a dot map into `(frequency, position)` pairs in row-major order.
pub fn parse_cells(text: &str) -> Vec<(char, Coord)> {
    let mut cells = Vec::new();
    for (row, line) in text.lines().map(|l| l.trim_end_matches('\r')).enumerate() {
        for (col, c) in line.chars().enumerate() {
            if is_antenna(c) {
                cells.push((c, Coord::new(row as i32, col as i32)));
            }
        }
    }
    trace!("parsed {} antenna cells", cells.len());
    cells
}

/// Renders cells onto the smallest grid covering them.
///
/// Cells with a negative component cannot be placed and are skipped. When
/// two cells share a position, the later one wins. An empty input renders
/// an empty string.
///
/// # Errors
///
/// Returns [`GridError::InvalidArgument`] when the grid would exceed
/// [`MAX_RENDER_CELLS`].
pub fn render<I>(cells: I) -> Result<String>
where
    I: IntoIterator<Item = (char, Coord)>,
{
    let cells: Vec<_> = cells
        .into_iter()
        .filter(|(_, pos)| pos.is_non_negative())
        .collect();

    let Some(max_row) = cells.iter().map(|(_, p)| p.row).max() else {
        return Ok(String::new());
    };
    let max_col = cells.iter().map(|(_, p)| p.col).max().unwrap_or(0);
    let rows = max_row as usize + 1;
    let cols = max_col as usize + 1;
    if rows.checked_mul(cols).is_none_or(|n| n > MAX_RENDER_CELLS) {
        return Err(GridError::invalid(format!(
            "{rows}x{cols} map exceeds {MAX_RENDER_CELLS} cells"
        )));
    }

    let mut matrix = vec![vec![EMPTY_CELL; cols]; rows];
    for (c, pos) in cells {
        matrix[pos.row as usize][pos.col as usize] = c;
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for line in matrix {
        out.extend(line);
        out.push('\n');
    }
    Ok(out)
}

/// Reads a map file into a string.
pub fn read_map(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    debug!("reading map {}", path.display());
    fs::read_to_string(path).map_err(|e| GridError::io(path, e))
}

/// Writes `content` to `path`, replacing any existing file.
pub fn write_text(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    debug!("writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content).map_err(|e| GridError::io(path, e))
}
