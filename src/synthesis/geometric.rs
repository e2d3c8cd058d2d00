// Whole-grid geometric transforms: flips, quarter turns and transpose.
//
// The detector tests every transform on every training pair and votes;
// a symmetric grid may back several transforms in the same pair.

use super::dsl::{Grid, grid_dimensions};
use super::strategy::{Pattern, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    FlipV,
    FlipH,
    FlipBoth,
    /// Quarter turn counter-clockwise.
    Rot90,
    Rot180,
    /// Quarter turn clockwise.
    Rot270,
    Transpose,
}

impl Transform {
    /// Fixed check order; earlier entries win vote ties.
    pub const ALL: [Transform; 7] = [
        Transform::FlipV,
        Transform::FlipH,
        Transform::FlipBoth,
        Transform::Rot90,
        Transform::Rot180,
        Transform::Rot270,
        Transform::Transpose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Transform::FlipV => "flip_v",
            Transform::FlipH => "flip_h",
            Transform::FlipBoth => "flip_both",
            Transform::Rot90 => "rot90",
            Transform::Rot180 => "rot180",
            Transform::Rot270 => "rot270",
            Transform::Transpose => "transpose",
        }
    }

    pub fn apply(self, grid: &Grid) -> Grid {
        match self {
            Transform::FlipV => flip_v(grid),
            Transform::FlipH => flip_h(grid),
            Transform::FlipBoth => flip_v(&flip_h(grid)),
            Transform::Rot90 => rotate_ccw(grid),
            Transform::Rot180 => rotate_cw(&rotate_cw(grid)),
            Transform::Rot270 => rotate_cw(grid),
            Transform::Transpose => transpose(grid),
        }
    }
}

pub fn rotate_cw(g: &Grid) -> Grid {
    if g.is_empty() { return g.clone(); }
    let (rows, cols) = grid_dimensions(g);
    (0..cols).map(|c| (0..rows).rev().map(|r| g[r][c]).collect()).collect()
}

pub fn rotate_ccw(g: &Grid) -> Grid {
    if g.is_empty() { return g.clone(); }
    let (rows, cols) = grid_dimensions(g);
    (0..cols).rev().map(|c| (0..rows).map(|r| g[r][c]).collect()).collect()
}

pub fn flip_h(g: &Grid) -> Grid {
    g.iter().map(|row| row.iter().rev().cloned().collect()).collect()
}

pub fn flip_v(g: &Grid) -> Grid {
    g.iter().rev().cloned().collect()
}

pub fn transpose(g: &Grid) -> Grid {
    if g.is_empty() { return g.clone(); }
    let cols = g[0].len();
    (0..cols).map(|c| g.iter().map(|row| row[c]).collect()).collect()
}

/// Transform backed by the most training pairs, if any pair matches at all.
pub fn vote_transform(train: &[(Grid, Grid)]) -> Option<Transform> {
    let mut votes = [0usize; Transform::ALL.len()];
    for (input, output) in train {
        for (i, t) in Transform::ALL.iter().enumerate() {
            if t.apply(input) == *output {
                votes[i] += 1;
            }
        }
    }
    let mut best: Option<(usize, usize)> = None;
    for (i, &n) in votes.iter().enumerate() {
        if n > 0 && best.map_or(true, |(_, bn)| n > bn) {
            best = Some((i, n));
        }
    }
    best.map(|(i, _)| Transform::ALL[i])
}

pub struct Geometric;

impl Strategy for Geometric {
    fn name(&self) -> &'static str { "geometric" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        vote_transform(train).map(|transform| Pattern::Geometric { transform })
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        match pattern {
            Pattern::Geometric { transform } => Some(transform.apply(grid)),
            _ => None,
        }
    }
}
