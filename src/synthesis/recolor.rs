// Color remap: each input color is replaced by the color most of its cells
// take in the output.

use super::dsl::{BACKGROUND, Grid, same_shape};
use super::strategy::{Pattern, Strategy};

pub type ColorTable = [Option<u8>; 10];

pub struct ColorRemap;

/// Mapping voted from one pair. `None` when the shapes differ, a background
/// cell gains a color, or a color is out of range.
pub fn pair_mapping(input: &Grid, output: &Grid) -> Option<ColorTable> {
    if !same_shape(input, output) { return None; }
    let mut votes = [[0usize; 10]; 10];
    for (&a, &b) in input.iter().flatten().zip(output.iter().flatten()) {
        if a > 9 || b > 9 { return None; }
        if a == BACKGROUND {
            if b != BACKGROUND { return None; }
            continue;
        }
        votes[a as usize][b as usize] += 1;
    }

    let mut table = [None; 10];
    for (color, counts) in votes.iter().enumerate() {
        let (target, &n) = counts.iter().enumerate().rev().max_by_key(|&(_, &n)| n)?;
        if n > 0 {
            table[color] = Some(target as u8);
        }
    }
    Some(table)
}

/// Merges per-pair tables. Pairs must agree on every color they share, and
/// the merged table must reproduce every training output.
pub fn learn_table(train: &[(Grid, Grid)]) -> Option<ColorTable> {
    let mut table: ColorTable = [None; 10];
    for (input, output) in train {
        let pair = pair_mapping(input, output)?;
        for (slot, found) in table.iter_mut().zip(pair) {
            match (*slot, found) {
                (Some(a), Some(b)) if a != b => return None,
                (None, Some(b)) => *slot = Some(b),
                _ => {}
            }
        }
    }
    let remaps = table
        .iter()
        .enumerate()
        .any(|(from, to)| matches!(to, Some(t) if *t as usize != from));
    if !remaps { return None; }
    let reproduces = train.iter().all(|(input, output)| remap(input, &table) == *output);
    reproduces.then_some(table)
}

/// Replaces mapped colors; background and unmapped colors stay.
pub fn remap(grid: &Grid, table: &ColorTable) -> Grid {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|&v| match table.get(v as usize) {
                    Some(Some(to)) if v != BACKGROUND => *to,
                    _ => v,
                })
                .collect()
        })
        .collect()
}

impl Strategy for ColorRemap {
    fn name(&self) -> &'static str { "color_remap" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        if train.is_empty() { return None; }
        learn_table(train).map(|table| Pattern::ColorRemap { table })
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        match pattern {
            Pattern::ColorRemap { table } => Some(remap(grid, table)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learns_across_pairs() {
        let train = vec![
            (vec![vec![1, 0], vec![0, 3]], vec![vec![2, 0], vec![0, 4]]),
            (vec![vec![3, 3], vec![0, 0]], vec![vec![4, 4], vec![0, 0]]),
        ];
        let pattern = ColorRemap.detect(&train).unwrap();
        let test = vec![vec![3, 1, 7], vec![0, 0, 1]];
        assert_eq!(
            ColorRemap.apply(&pattern, &test),
            Some(vec![vec![4, 2, 7], vec![0, 0, 2]])
        );
    }

    #[test]
    fn majority_vote_per_color() {
        let table = pair_mapping(&vec![vec![1, 1, 1]], &vec![vec![2, 2, 5]]).unwrap();
        assert_eq!(table[1], Some(2));
        // tie goes to the lower color
        let table = pair_mapping(&vec![vec![1, 1]], &vec![vec![6, 5]]).unwrap();
        assert_eq!(table[1], Some(5));
    }

    #[test]
    fn conflicting_pairs_rejected() {
        let train = vec![
            (vec![vec![1]], vec![vec![2]]),
            (vec![vec![1]], vec![vec![3]]),
        ];
        assert_eq!(ColorRemap.detect(&train), None);
    }

    #[test]
    fn many_to_one_vote_must_reproduce_outputs() {
        // 1 and 2 both vote for 1, which flattens the grid instead of
        // reproducing the output
        let train = vec![(
            vec![vec![1, 1, 2], vec![0, 0, 0], vec![2, 1, 1]],
            vec![vec![2, 1, 1], vec![0, 0, 0], vec![1, 1, 2]],
        )];
        assert_eq!(learn_table(&train), None);
        assert_eq!(ColorRemap.detect(&train), None);
    }

    #[test]
    fn identity_rejected() {
        let g = vec![vec![1, 0], vec![0, 2]];
        assert_eq!(ColorRemap.detect(&[(g.clone(), g)]), None);
    }

    #[test]
    fn background_must_stay_background() {
        let input = vec![vec![1, 0]];
        let output = vec![vec![2, 2]];
        assert_eq!(pair_mapping(&input, &output), None);
        assert_eq!(pair_mapping(&input, &vec![vec![2], vec![0]]), None);
    }
}
