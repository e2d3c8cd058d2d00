// Frame drawing, two variants.
//
// ComponentFrame: every same-colored component gets a one-cell outline in a
// fixed frame color, painted only over background.
// BoundingFrame: the output is blank except for the outline of the bounding
// box around all input foreground.

use super::dsl::{
    BACKGROUND, Grid, components_of_color, count_foreground, dominant_color, foreground_bbox,
    grid_dimensions, unique_colors,
};
use super::strategy::{Pattern, Strategy, shapes_preserved};

/// Inclusive rectangle (min_r, min_c, max_r, max_c).
type Rect = (usize, usize, usize, usize);

/// Cells on the border of `rect`, top and bottom rows first.
fn outline_cells(rect: Rect) -> Vec<(usize, usize)> {
    let (r0, c0, r1, c1) = rect;
    let mut cells = Vec::new();
    for c in c0..=c1 {
        cells.push((r0, c));
        cells.push((r1, c));
    }
    for r in r0..=r1 {
        cells.push((r, c0));
        cells.push((r, c1));
    }
    cells
}

// --- Variant A: outline each component ---

pub struct ComponentFrame {
    pub frame_color: u8,
}

/// Outlines the bounding box of every component, grown by one cell and
/// clamped to the grid, without touching existing foreground.
pub fn frame_components(grid: &Grid, frame_color: u8) -> Grid {
    let (rows, cols) = grid_dimensions(grid);
    let mut result = grid.clone();
    if rows == 0 || cols == 0 { return result; }
    for color in unique_colors(grid) {
        for comp in components_of_color(grid, color) {
            let rect = (
                comp.min_r.saturating_sub(1),
                comp.min_c.saturating_sub(1),
                (comp.max_r + 1).min(rows - 1),
                (comp.max_c + 1).min(cols - 1),
            );
            for (r, c) in outline_cells(rect) {
                if result[r][c] == BACKGROUND {
                    result[r][c] = frame_color;
                }
            }
        }
    }
    result
}

impl Strategy for ComponentFrame {
    fn name(&self) -> &'static str { "component_frame" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        let fires = train.iter().any(|(input, output)| {
            output.iter().flatten().any(|&c| c == self.frame_color)
                && count_foreground(output) > count_foreground(input)
        });
        fires.then_some(Pattern::ComponentFrame { frame_color: self.frame_color })
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        match pattern {
            Pattern::ComponentFrame { frame_color } => Some(frame_components(grid, *frame_color)),
            _ => None,
        }
    }
}

// --- Variant B: one outline around all foreground ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxColor {
    /// Same color in every training output.
    Constant(u8),
    /// The most frequent foreground color of the grid being framed.
    InputDominant,
}

pub struct BoundingFrame;

/// Blank canvas with the outline of the foreground bounding box in `color`.
pub fn draw_bounding_frame(grid: &Grid, color: u8) -> Option<Grid> {
    let (rows, cols) = grid_dimensions(grid);
    let rect = foreground_bbox(grid)?;
    let mut result = vec![vec![BACKGROUND; cols]; rows];
    for (r, c) in outline_cells(rect) {
        result[r][c] = color;
    }
    Some(result)
}

/// Color of the frame in `output` when it is exactly the outline of the
/// foreground box of `input`.
fn frame_color_of(input: &Grid, output: &Grid) -> Option<u8> {
    let (r0, c0, _, _) = foreground_bbox(input)?;
    let color = output[r0][c0];
    if color == BACKGROUND { return None; }
    let expected = draw_bounding_frame(input, color)?;
    (expected == *output).then_some(color)
}

impl Strategy for BoundingFrame {
    fn name(&self) -> &'static str { "bounding_frame" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        if train.is_empty() || !shapes_preserved(train) { return None; }
        let mut colors = Vec::with_capacity(train.len());
        for (input, output) in train {
            colors.push(frame_color_of(input, output)?);
        }
        let from_input = train
            .iter()
            .zip(&colors)
            .all(|((input, _), &c)| dominant_color(input) == Some(c));
        let color = if from_input {
            BoxColor::InputDominant
        } else if colors.iter().all(|&c| c == colors[0]) {
            BoxColor::Constant(colors[0])
        } else {
            return None;
        };
        Some(Pattern::BoundingFrame { color })
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        let Pattern::BoundingFrame { color } = pattern else { return None };
        let color = match color {
            BoxColor::Constant(c) => *c,
            BoxColor::InputDominant => dominant_color(grid)?,
        };
        draw_bounding_frame(grid, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_each_component() {
        let input = vec![
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 1, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 2, 2],
        ];
        let expected = vec![
            vec![4, 4, 4, 0, 0, 0],
            vec![4, 1, 4, 0, 0, 0],
            vec![4, 4, 4, 0, 0, 0],
            vec![0, 0, 0, 4, 4, 4],
            vec![0, 0, 0, 4, 2, 2],
        ];
        assert_eq!(frame_components(&input, 4), expected);
    }

    #[test]
    fn frame_never_overwrites_foreground() {
        let input = vec![
            vec![1, 0, 0],
            vec![0, 0, 3],
            vec![0, 0, 0],
        ];
        let result = frame_components(&input, 4);
        assert_eq!(result[0][0], 1);
        assert_eq!(result[1][2], 3);
        assert_eq!(result[1][1], 4);
    }

    #[test]
    fn component_frame_detection() {
        let strategy = ComponentFrame { frame_color: 4 };
        let input = vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]];
        let output = frame_components(&input, 4);
        assert_eq!(
            strategy.detect(&[(input.clone(), output)]),
            Some(Pattern::ComponentFrame { frame_color: 4 })
        );
        // growth without the frame color does not count
        let other = vec![vec![6, 6, 6], vec![6, 1, 6], vec![6, 6, 6]];
        assert_eq!(strategy.detect(&[(input, other)]), None);
    }

    #[test]
    fn bounding_frame_single_component() {
        let input = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 7, 7, 0, 0],
            vec![0, 7, 7, 7, 0],
            vec![0, 0, 7, 7, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let expected = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 7, 7, 7, 0],
            vec![0, 7, 0, 7, 0],
            vec![0, 7, 7, 7, 0],
            vec![0, 0, 0, 0, 0],
        ];
        assert_eq!(draw_bounding_frame(&input, 7), Some(expected));
    }

    #[test]
    fn bounding_frame_color_from_input() {
        let train_in = vec![
            vec![0, 0, 0, 0],
            vec![0, 2, 0, 0],
            vec![0, 0, 2, 0],
            vec![0, 0, 0, 0],
        ];
        let train_out = draw_bounding_frame(&train_in, 2).unwrap();
        let pattern = BoundingFrame.detect(&[(train_in, train_out)]).unwrap();
        assert_eq!(pattern, Pattern::BoundingFrame { color: BoxColor::InputDominant });

        let test = vec![
            vec![5, 0, 0],
            vec![0, 0, 0],
            vec![0, 0, 5],
        ];
        let result = BoundingFrame.apply(&pattern, &test).unwrap();
        assert_eq!(result, vec![vec![5, 5, 5], vec![5, 0, 5], vec![5, 5, 5]]);
    }

    #[test]
    fn bounding_frame_constant_color() {
        let a = vec![vec![0, 0, 0], vec![0, 1, 1], vec![0, 1, 0]];
        let b = vec![vec![3, 0, 0], vec![0, 0, 0], vec![0, 0, 3]];
        let train = vec![
            (a.clone(), draw_bounding_frame(&a, 8).unwrap()),
            (b.clone(), draw_bounding_frame(&b, 8).unwrap()),
        ];
        assert_eq!(
            BoundingFrame.detect(&train),
            Some(Pattern::BoundingFrame { color: BoxColor::Constant(8) })
        );
    }

    #[test]
    fn bounding_frame_rejects_other_outputs() {
        let input = vec![vec![0, 1], vec![0, 0]];
        let output = vec![vec![1, 1], vec![0, 0]];
        assert_eq!(BoundingFrame.detect(&[(input, output)]), None);
        assert_eq!(draw_bounding_frame(&vec![vec![0, 0]], 3), None);
    }
}
