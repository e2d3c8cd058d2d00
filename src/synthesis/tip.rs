// Tip reflection: the extremity of each shape moves to the opposite side of
// the shape's base.

use super::dsl::{BACKGROUND, Grid, components_of_color, find_base, find_tip, grid_dimensions, unique_colors};
use super::strategy::{Pattern, Strategy};

pub struct TipReflection {
    /// Fraction of training pairs that must show evidence.
    pub evidence_ratio: f64,
}

/// True when some input component changed size between input and output
/// while having an identifiable tip. Components are matched per color by
/// discovery order, and only when both sides have the same count.
pub fn has_tip_evidence(input: &Grid, output: &Grid) -> bool {
    for color in unique_colors(input) {
        let before = components_of_color(input, color);
        let after = components_of_color(output, color);
        if before.len() != after.len() { continue; }
        for (a, b) in before.iter().zip(&after) {
            if a.area() != b.area() && find_tip(&a.cells).is_some() {
                return true;
            }
        }
    }
    false
}

/// Mirrors each component's tip through its base. Components whose mirrored
/// position falls outside the grid are left alone.
pub fn reflect_tips(grid: &Grid) -> Grid {
    let (rows, cols) = grid_dimensions(grid);
    let mut result = grid.clone();
    for color in unique_colors(grid) {
        for comp in components_of_color(grid, color) {
            if comp.area() < 2 { continue; }
            let (Some(tip), Some(base)) = (find_tip(&comp.cells), find_base(&comp.cells)) else {
                continue;
            };
            let dr = tip.0 as i64 - base.0 as i64;
            let dc = tip.1 as i64 - base.1 as i64;
            let nr = base.0 as i64 - dr;
            let nc = base.1 as i64 - dc;
            if nr < 0 || nc < 0 || nr >= rows as i64 || nc >= cols as i64 { continue; }
            result[tip.0][tip.1] = BACKGROUND;
            result[nr as usize][nc as usize] = color;
        }
    }
    result
}

impl Strategy for TipReflection {
    fn name(&self) -> &'static str { "tip_reflection" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        let evidence = train.iter().filter(|(i, o)| has_tip_evidence(i, o)).count();
        let accepted = evidence > 0 && evidence as f64 >= train.len() as f64 * self.evidence_ratio;
        accepted.then_some(Pattern::TipReflection)
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        match pattern {
            Pattern::TipReflection => Some(reflect_tips(grid)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> TipReflection {
        TipReflection { evidence_ratio: 0.8 }
    }

    #[test]
    fn reflects_tip_through_base() {
        // T shape: base at the junction (1,2), tip at (0,2) is the first
        // degree-1 pixel in scan order
        let grid = vec![
            vec![0, 0, 6, 0, 0],
            vec![0, 6, 6, 6, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let expected = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 6, 6, 6, 0],
            vec![0, 0, 6, 0, 0],
        ];
        assert_eq!(reflect_tips(&grid), expected);
    }

    #[test]
    fn out_of_bounds_edit_is_skipped() {
        let grid = vec![
            vec![0, 0, 6, 0, 0],
            vec![0, 6, 6, 6, 0],
        ];
        assert_eq!(reflect_tips(&grid), grid);
    }

    #[test]
    fn single_pixels_untouched() {
        let grid = vec![vec![1, 0, 2]];
        assert_eq!(reflect_tips(&grid), grid);
    }

    #[test]
    fn one_bad_component_does_not_block_others() {
        let grid = vec![
            vec![0, 0, 6, 0, 0],
            vec![0, 6, 6, 6, 0],
            vec![0, 0, 0, 0, 0],
            vec![3, 0, 0, 0, 0],
            vec![3, 3, 0, 0, 0],
        ];
        let result = reflect_tips(&grid);
        // the L's tip would land below the last row
        assert_eq!(result[3][0], 3);
        assert_eq!(result[4][0], 3);
        assert_eq!(result[4][1], 3);
        assert_eq!(result[0][2], 0);
        assert_eq!(result[2][2], 6);
    }

    #[test]
    fn detection_threshold() {
        let input = vec![
            vec![0, 0, 6, 0, 0],
            vec![0, 6, 6, 6, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let grown = vec![
            vec![0, 0, 6, 0, 0],
            vec![0, 6, 6, 6, 0],
            vec![0, 0, 6, 0, 0],
        ];
        let still = input.clone();
        assert!(has_tip_evidence(&input, &grown));
        assert!(!has_tip_evidence(&input, &still));

        let four_of_five: Vec<(Grid, Grid)> = (0..5)
            .map(|i| (input.clone(), if i == 0 { still.clone() } else { grown.clone() }))
            .collect();
        assert_eq!(strategy().detect(&four_of_five), Some(Pattern::TipReflection));

        let three_of_five: Vec<(Grid, Grid)> = (0..5)
            .map(|i| (input.clone(), if i < 2 { still.clone() } else { grown.clone() }))
            .collect();
        assert_eq!(strategy().detect(&three_of_five), None);
    }
}
