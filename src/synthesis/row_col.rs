// Row/column encoding: a color number names the row and column it is drawn
// along, counting from 1.

use super::dsl::{BACKGROUND, Grid, first_foreground, grid_dimensions, unique_colors};
use super::strategy::{Pattern, Strategy};

pub struct RowColumn;

fn full_rows(grid: &Grid, color: u8) -> usize {
    grid.iter().filter(|row| row.iter().all(|&v| v == color)).count()
}

fn full_columns(grid: &Grid, color: u8) -> usize {
    let (_, cols) = grid_dimensions(grid);
    (0..cols).filter(|&c| grid.iter().all(|row| row[c] == color)).count()
}

/// True when `output` has exactly one full row and one full column in the
/// first foreground color of `input`.
pub fn shows_cross(input: &Grid, output: &Grid) -> bool {
    let Some(color) = first_foreground(input) else { return false };
    full_rows(output, color) == 1 && full_columns(output, color) == 1
}

/// Blank canvas where each color C of `grid` paints row C-1 and column C-1.
/// Colors are painted in ascending order, so higher colors win overlaps.
/// Indices past the grid edge are skipped.
pub fn encode_rows_columns(grid: &Grid) -> Option<Grid> {
    let (rows, cols) = grid_dimensions(grid);
    let mut result = vec![vec![BACKGROUND; cols]; rows];
    let mut drawn = false;
    for color in unique_colors(grid) {
        let index = color as usize - 1;
        if index < rows {
            result[index].iter_mut().for_each(|v| *v = color);
            drawn = true;
        }
        if index < cols {
            for row in result.iter_mut() {
                row[index] = color;
            }
            drawn = true;
        }
    }
    drawn.then_some(result)
}

impl Strategy for RowColumn {
    fn name(&self) -> &'static str { "row_column" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        let fires = !train.is_empty() && train.iter().all(|(i, o)| shows_cross(i, o));
        fires.then_some(Pattern::RowColumn)
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        match pattern {
            Pattern::RowColumn => encode_rows_columns(grid),
            _ => None,
        }
    }
}
