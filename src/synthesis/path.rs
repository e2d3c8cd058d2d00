// Shortest path between two marker colors.
//
// The trail is found with a uniform-cost search over 4-neighbors. Every cell
// that is not background or one of the two markers blocks movement. Costs are
// all 1, so the result is a breadth-first shortest path; ties resolve by heap
// order on (distance, row, col) and neighbor order right, left, down, up.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::dsl::{BACKGROUND, Grid, count_color, first_position, grid_dimensions};
use super::strategy::{Pattern, Strategy};

const STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub struct ShortestPath {
    pub start: u8,
    pub end: u8,
}

/// Cells of one shortest path from `from` to `to`, both included, or `None`
/// when `to` is unreachable.
pub fn shortest_path(
    grid: &Grid,
    from: (usize, usize),
    to: (usize, usize),
    passable: impl Fn(u8) -> bool,
) -> Option<Vec<(usize, usize)>> {
    let (rows, cols) = grid_dimensions(grid);
    let mut parent: Vec<Vec<Option<(usize, usize)>>> = vec![vec![None; cols]; rows];
    let mut seen = vec![vec![false; cols]; rows];
    let mut heap = BinaryHeap::new();
    seen[from.0][from.1] = true;
    heap.push(Reverse((0usize, from.0, from.1)));

    while let Some(Reverse((dist, r, c))) = heap.pop() {
        if (r, c) == to {
            let mut path = vec![to];
            let mut cur = to;
            while let Some(prev) = parent[cur.0][cur.1] {
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            return Some(path);
        }
        for (dr, dc) in STEPS {
            let nr = r as i32 + dr;
            let nc = c as i32 + dc;
            if nr < 0 || nr >= rows as i32 || nc < 0 || nc >= cols as i32 { continue; }
            let (nr, nc) = (nr as usize, nc as usize);
            if seen[nr][nc] || !passable(grid[nr][nc]) { continue; }
            seen[nr][nc] = true;
            parent[nr][nc] = Some((r, c));
            heap.push(Reverse((dist + 1, nr, nc)));
        }
    }
    None
}

/// Paints a shortest start-to-end trail in the start color.
pub fn connect_markers(grid: &Grid, start: u8, end: u8) -> Option<Grid> {
    let from = first_position(grid, start)?;
    let to = first_position(grid, end)?;
    let path = shortest_path(grid, from, to, |v| v == BACKGROUND || v == start || v == end)?;
    let mut result = grid.clone();
    for (r, c) in path {
        result[r][c] = start;
    }
    Some(result)
}

impl Strategy for ShortestPath {
    fn name(&self) -> &'static str { "shortest_path" }

    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern> {
        let fires = train.iter().any(|(input, output)| {
            first_position(input, self.start).is_some()
                && first_position(input, self.end).is_some()
                && count_color(output, self.start) > count_color(input, self.start)
        });
        fires.then_some(Pattern::ShortestPath { start: self.start, end: self.end })
    }

    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid> {
        match pattern {
            Pattern::ShortestPath { start, end } => connect_markers(grid, *start, *end),
            _ => None,
        }
    }
}
