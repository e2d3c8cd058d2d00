// Grid primitives shared by every strategy: the grid type, 4-connected
// component labeling and the tip/base finders used on component pixel sets.

pub type Grid = Vec<Vec<u8>>;

pub const BACKGROUND: u8 = 0;

const NEIGHBORS4: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A maximal 4-connected group of same-colored cells.
/// `cells` is kept in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    pub id: usize,
    pub cells: Vec<(usize, usize)>,
    pub color: u8,
    pub min_r: usize,
    pub min_c: usize,
    pub max_r: usize,
    pub max_c: usize,
}

impl Component {
    pub fn from_cells(id: usize, mut cells: Vec<(usize, usize)>, color: u8) -> Self {
        cells.sort_unstable();
        let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
        let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
        let max_r = cells.iter().map(|&(r, _)| r).max().unwrap_or(0);
        let max_c = cells.iter().map(|&(_, c)| c).max().unwrap_or(0);
        Self { id, cells, color, min_r, min_c, max_r, max_c }
    }

    pub fn width(&self) -> usize { self.max_c - self.min_c + 1 }
    pub fn height(&self) -> usize { self.max_r - self.min_r + 1 }
    pub fn area(&self) -> usize { self.cells.len() }
}

/// Result of one labeling pass. `labels[r][c]` is 0 for cells outside the
/// foreground, otherwise the 1-based id of the cell's component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeling {
    pub labels: Vec<Vec<usize>>,
    pub count: usize,
}

/// Labels the cells accepted by `foreground` into 4-connected, same-colored
/// components. Ids follow first discovery in a row-major scan.
pub fn label<F>(grid: &Grid, foreground: F) -> Labeling
where
    F: Fn(u8) -> bool,
{
    let (rows, cols) = grid_dimensions(grid);
    let mut labels = vec![vec![0usize; cols]; rows];
    let mut count = 0;

    for r in 0..rows {
        for c in 0..cols {
            if labels[r][c] != 0 || !foreground(grid[r][c]) { continue; }
            count += 1;
            let color = grid[r][c];
            let mut stack = vec![(r, c)];
            labels[r][c] = count;
            while let Some((cr, cc)) = stack.pop() {
                for (nr, nc) in neighbors4(cr, cc, rows, cols) {
                    if labels[nr][nc] == 0 && grid[nr][nc] == color && foreground(grid[nr][nc]) {
                        labels[nr][nc] = count;
                        stack.push((nr, nc));
                    }
                }
            }
        }
    }
    Labeling { labels, count }
}

/// Components of all non-background cells, in id order.
pub fn components(grid: &Grid) -> Vec<Component> {
    collect_components(grid, &label(grid, |v| v != BACKGROUND))
}

/// Components of the cells holding exactly `color`, in id order.
pub fn components_of_color(grid: &Grid, color: u8) -> Vec<Component> {
    collect_components(grid, &label(grid, |v| v == color))
}

fn collect_components(grid: &Grid, labeling: &Labeling) -> Vec<Component> {
    let mut cells: Vec<Vec<(usize, usize)>> = vec![Vec::new(); labeling.count];
    let mut colors = vec![BACKGROUND; labeling.count];
    for (r, row) in labeling.labels.iter().enumerate() {
        for (c, &id) in row.iter().enumerate() {
            if id == 0 { continue; }
            cells[id - 1].push((r, c));
            colors[id - 1] = grid[r][c];
        }
    }
    cells
        .into_iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (cells, color))| Component::from_cells(i + 1, cells, color))
        .collect()
}

pub(crate) fn neighbors4(r: usize, c: usize, rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
    NEIGHBORS4.iter().filter_map(move |&(dr, dc)| {
        let nr = r as i32 + dr;
        let nc = c as i32 + dc;
        if nr >= 0 && nr < rows as i32 && nc >= 0 && nc < cols as i32 {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    })
}

fn degrees(pixels: &[(usize, usize)]) -> Vec<usize> {
    let set: rustc_hash::FxHashSet<(usize, usize)> = pixels.iter().copied().collect();
    pixels
        .iter()
        .map(|&(r, c)| {
            NEIGHBORS4
                .iter()
                .filter(|&&(dr, dc)| {
                    let nr = r as i64 + dr as i64;
                    let nc = c as i64 + dc as i64;
                    nr >= 0 && nc >= 0 && set.contains(&(nr as usize, nc as usize))
                })
                .count()
        })
        .collect()
}

/// Pixel with the fewest in-set 4-neighbors, or `None` when even that pixel
/// has more than two (solid blobs). Ties go to the earliest pixel in `pixels`.
pub fn find_tip(pixels: &[(usize, usize)]) -> Option<(usize, usize)> {
    let degrees = degrees(pixels);
    let mut best: Option<(usize, usize)> = None;
    for (i, &d) in degrees.iter().enumerate() {
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    match best {
        Some((i, d)) if d <= 2 => Some(pixels[i]),
        _ => None,
    }
}

/// Pixel with the most in-set 4-neighbors; ties go to the earliest pixel.
pub fn find_base(pixels: &[(usize, usize)]) -> Option<(usize, usize)> {
    let degrees = degrees(pixels);
    let mut best: Option<(usize, usize)> = None;
    for (i, &d) in degrees.iter().enumerate() {
        if best.map_or(true, |(_, bd)| d > bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| pixels[i])
}

// --- Grid helpers ---

pub fn grid_dimensions(grid: &Grid) -> (usize, usize) {
    if grid.is_empty() { (0, 0) } else { (grid.len(), grid[0].len()) }
}

pub fn is_rectangular(grid: &Grid) -> bool {
    match grid.first() {
        Some(first) => !first.is_empty() && grid.iter().all(|row| row.len() == first.len()),
        None => false,
    }
}

/// Distinct non-background colors, ascending.
pub fn unique_colors(grid: &Grid) -> Vec<u8> {
    let mut seen = [false; 256];
    for row in grid {
        for &c in row {
            seen[c as usize] = true;
        }
    }
    (1..=255u8).filter(|&c| seen[c as usize]).collect()
}

pub fn count_foreground(grid: &Grid) -> usize {
    grid.iter().flatten().filter(|&&c| c != BACKGROUND).count()
}

pub fn count_color(grid: &Grid, color: u8) -> usize {
    grid.iter().flatten().filter(|&&c| c == color).count()
}

/// First cell holding `color` in row-major order.
pub fn first_position(grid: &Grid, color: u8) -> Option<(usize, usize)> {
    grid.iter().enumerate().find_map(|(r, row)| {
        row.iter().position(|&c| c == color).map(|c| (r, c))
    })
}

/// Color of the first non-background cell in row-major order.
pub fn first_foreground(grid: &Grid) -> Option<u8> {
    grid.iter().flatten().copied().find(|&c| c != BACKGROUND)
}

/// Inclusive (min_r, min_c, max_r, max_c) of all non-background cells.
pub fn foreground_bbox(grid: &Grid) -> Option<(usize, usize, usize, usize)> {
    let mut bbox: Option<(usize, usize, usize, usize)> = None;
    for (r, row) in grid.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            if v == BACKGROUND { continue; }
            bbox = Some(match bbox {
                None => (r, c, r, c),
                Some((r0, c0, r1, c1)) => (r0.min(r), c0.min(c), r1.max(r), c1.max(c)),
            });
        }
    }
    bbox
}

/// Most frequent non-background color; ties go to the lower color.
pub fn dominant_color(grid: &Grid) -> Option<u8> {
    let mut counts = [0usize; 256];
    for &c in grid.iter().flatten() {
        counts[c as usize] += 1;
    }
    counts[BACKGROUND as usize] = 0;
    let (color, &n) = counts.iter().enumerate().rev().max_by_key(|&(_, &n)| n)?;
    if n == 0 { None } else { Some(color as u8) }
}

pub fn same_shape(a: &Grid, b: &Grid) -> bool {
    grid_dimensions(a) == grid_dimensions(b)
}
