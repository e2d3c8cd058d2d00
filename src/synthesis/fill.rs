// Region fill: background cells are filled by one of a small set of rules.
//
// Candidate rules come from the first training pair (the first changed cell
// gives the fill color, the input colors give the possible keys) and a rule
// is kept only when it reproduces every training output exactly.

use super::dsl::{BACKGROUND, Grid, components_of_color, grid_dimensions, neighbors4, unique_colors};
use super::strategy::{Pattern, Strategy, shapes_preserved};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillColor {
    Constant(u8),
    /// First foreground color met along the line being filled.
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillRule {
    /// Every row holding foreground.
    Rows(FillColor),
    /// Every column holding foreground.
    Columns(FillColor),
    /// Background regions touching the grid edge.
    BorderRegions(u8),
    /// Background regions cut off from the grid edge.
    EnclosedRegions(u8),
    /// Background regions next to a cell of `key`.
    KeyedRegions { key: u8, fill: u8 },
}

pub struct RegionFill;

fn fill_line(cells: &mut [&mut u8], color: FillColor) {
    let Some(source) = cells.iter().map(|v| **v).find(|&v| v != BACKGROUND) else { return };
    let color = match color {
        FillColor::Constant(c) => c,
        FillColor::Source => source,
    };
    for v in cells.iter_mut() {
        if **v == BACKGROUND {
            **v = color;
        }
    }
}

fn fill_regions(grid: &Grid, fill: u8, keep: impl Fn(&[(usize, usize)]) -> bool) -> Grid {
    let mut result = grid.clone();
    for region in components_of_color(grid, BACKGROUND) {
        if keep(&region.cells) {
            for &(r, c) in &region.cells {
                result[r][c] = fill;
            }
        }
    }
    result
}

/// Applies `rule` to `grid`. Only background cells change.
pub fn apply_rule(grid: &Grid, rule: &FillRule) -> Grid {
    let (rows, cols) = grid_dimensions(grid);
    match *rule {
        FillRule::Rows(color) => {
            let mut result = grid.clone();
            for row in result.iter_mut() {
                let mut cells: Vec<&mut u8> = row.iter_mut().collect();
                fill_line(&mut cells, color);
            }
            result
        }
        FillRule::Columns(color) => {
            let mut result = grid.clone();
            for c in 0..cols {
                let mut cells: Vec<&mut u8> = result.iter_mut().map(|row| &mut row[c]).collect();
                fill_line(&mut cells, color);
            }
            result
        }
        FillRule::BorderRegions(fill) => fill_regions(grid, fill, |cells| {
            cells.iter().any(|&(r, c)| r == 0 || c == 0 || r + 1 == rows || c + 1 == cols)
        }),
        FillRule::EnclosedRegions(fill) => fill_regions(grid, fill, |cells| {
            cells.iter().all(|&(r, c)| r > 0 && c > 0 && r + 1 < rows && c + 1 < cols)
        }),
        FillRule::KeyedRegions { key, fill } => fill_regions(grid, fill, |cells| {
            cells.iter().any(|&(r, c)| neighbors4(r, c, rows, cols).any(|(nr, nc)| grid[nr][nc] == key))
        }),
    }
}

/// Rules worth trying for a pair, most specific shape of change first.
fn candidates(input: &Grid, output: &Grid) -> Vec<FillRule> {
    let changed = input
        .iter()
        .flatten()
        .zip(output.iter().flatten())
        .find(|(a, b)| a != b);
    let Some((&before, &fill)) = changed else { return Vec::new() };
    if before != BACKGROUND { return Vec::new(); }

    let mut rules = vec![
        FillRule::Rows(FillColor::Constant(fill)),
        FillRule::Rows(FillColor::Source),
        FillRule::Columns(FillColor::Constant(fill)),
        FillRule::Columns(FillColor::Source),
        FillRule::BorderRegions(fill),
        FillRule::EnclosedRegions(fill),
    ];
    rules.extend(unique_colors(input).into_iter().map(|key| FillRule::KeyedRegions { key, fill }));
    rules
}

impl Strategy for RegionFill {
    fn name(&self) -> &'static str { "region_fill" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        let (first_in, first_out) = train.first()?;
        if !shapes_preserved(train) { return None; }
        candidates(first_in, first_out)
            .into_iter()
            .find(|rule| train.iter().all(|(i, o)| apply_rule(i, rule) == *o))
            .map(|rule| Pattern::RegionFill { rule })
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        match pattern {
            Pattern::RegionFill { rule } => Some(apply_rule(grid, rule)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosed_region_detected() {
        let input = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let mut output = input.clone();
        output[2][2] = 4;
        let pattern = RegionFill.detect(&[(input, output)]).unwrap();
        assert_eq!(pattern, Pattern::RegionFill { rule: FillRule::EnclosedRegions(4) });

        let test = vec![
            vec![2, 2, 2, 0],
            vec![2, 0, 2, 0],
            vec![2, 0, 2, 0],
            vec![2, 2, 2, 0],
        ];
        let result = RegionFill.apply(&pattern, &test).unwrap();
        assert_eq!(result[1][1], 4);
        assert_eq!(result[2][1], 4);
        assert_eq!(result[0][3], 0);
    }

    #[test]
    fn rows_take_source_color() {
        let input = vec![
            vec![0, 2, 0],
            vec![0, 0, 0],
            vec![3, 0, 0],
        ];
        let output = vec![
            vec![2, 2, 2],
            vec![0, 0, 0],
            vec![3, 3, 3],
        ];
        assert_eq!(
            RegionFill.detect(&[(input, output)]),
            Some(Pattern::RegionFill { rule: FillRule::Rows(FillColor::Source) })
        );
    }

    #[test]
    fn columns_constant_color() {
        let grid = vec![
            vec![0, 0, 0],
            vec![6, 0, 0],
            vec![0, 0, 6],
        ];
        let expected = vec![
            vec![8, 0, 8],
            vec![6, 0, 8],
            vec![8, 0, 6],
        ];
        assert_eq!(apply_rule(&grid, &FillRule::Columns(FillColor::Constant(8))), expected);
    }

    #[test]
    fn keyed_regions() {
        let input = vec![
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![1, 1, 1, 1, 1],
            vec![0, 0, 1, 0, 0],
            vec![0, 5, 1, 0, 0],
        ];
        let output = vec![
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![1, 1, 1, 1, 1],
            vec![5, 5, 1, 0, 0],
            vec![5, 5, 1, 0, 0],
        ];
        assert_eq!(
            RegionFill.detect(&[(input, output)]),
            Some(Pattern::RegionFill { rule: FillRule::KeyedRegions { key: 5, fill: 5 } })
        );
    }

    #[test]
    fn every_pair_must_agree() {
        let a = vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]];
        let b = vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]];
        let train = vec![
            (a.clone(), apply_rule(&a, &FillRule::BorderRegions(3))),
            (b.clone(), apply_rule(&b, &FillRule::BorderRegions(7))),
        ];
        assert_eq!(RegionFill.detect(&train), None);
    }

    #[test]
    fn rejects_foreground_changes_and_reshapes() {
        let input = vec![vec![1, 0], vec![0, 0]];
        assert_eq!(RegionFill.detect(&[(input.clone(), vec![vec![2, 0], vec![0, 0]])]), None);
        assert_eq!(RegionFill.detect(&[(input.clone(), vec![vec![1, 0]])]), None);
        assert_eq!(RegionFill.detect(&[(input.clone(), input)]), None);
    }
}
