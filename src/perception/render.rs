// Grid visualization with the standard 10-color ARC palette.

use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use image::{Rgb, RgbImage};
use log::debug;

use crate::perception::grid::ArcTask;
use crate::synthesis::dsl::{Grid, grid_dimensions};
use crate::synthesis::strategy::Solver;

pub const PALETTE: [[u8; 3]; 10] = [
    [0x00, 0x00, 0x00], // black
    [0x00, 0x74, 0xD9], // blue
    [0xFF, 0x41, 0x36], // red
    [0x2E, 0xCC, 0x40], // green
    [0xFF, 0xDC, 0x00], // yellow
    [0xAA, 0xAA, 0xAA], // grey
    [0xF0, 0x12, 0xBE], // fuchsia
    [0xFF, 0x85, 0x1B], // orange
    [0x7F, 0xDB, 0xFF], // aqua
    [0x87, 0x0C, 0x25], // maroon
];

/// Palette entry for a color; out-of-range colors render white.
pub fn rgb(color: u8) -> [u8; 3] {
    PALETTE.get(color as usize).copied().unwrap_or([0xFF, 0xFF, 0xFF])
}

/// One line per row, two block characters per cell.
pub fn render_ansi(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid {
        for &v in row {
            let [r, g, b] = rgb(v);
            out.push_str(&"██".truecolor(r, g, b).to_string());
        }
        out.push('\n');
    }
    out
}

/// Raster with `cell` x `cell` pixels per grid cell.
pub fn to_image(grid: &Grid, cell: u32) -> RgbImage {
    let (rows, cols) = grid_dimensions(grid);
    let cell = cell.max(1);
    let (width, height) = (cols as u32 * cell, rows as u32 * cell);
    RgbImage::from_fn(width, height, |x, y| {
        Rgb(rgb(grid[(y / cell) as usize][(x / cell) as usize]))
    })
}

/// Writes `grid` as a PNG, creating the parent directory if needed.
pub fn save_png(grid: &Grid, cell: u32, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    to_image(grid, cell)
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Writes every grid of a task as `<id>_<split><i>_<role>.png` under
/// `out_dir`. With a solver, each test input also gets a `_prediction.png`.
pub fn write_task_pngs(
    task: &ArcTask,
    solver: Option<&Solver>,
    out_dir: &Path,
    cell: u32,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut emit = |name: String, grid: &Grid| -> anyhow::Result<()> {
        let path = out_dir.join(format!("{}_{}.png", task.id, name));
        save_png(grid, cell, &path)?;
        debug!("wrote {}", path.display());
        written.push(path);
        Ok(())
    };
    for (i, ex) in task.train.iter().enumerate() {
        emit(format!("train{}_input", i), &ex.input)?;
        if let Some(out) = &ex.output {
            emit(format!("train{}_output", i), out)?;
        }
    }
    let train = task.train_pairs();
    for (i, ex) in task.test.iter().enumerate() {
        emit(format!("test{}_input", i), &ex.input)?;
        if let Some(out) = &ex.output {
            emit(format!("test{}_output", i), out)?;
        }
        if let Some(solver) = solver {
            emit(format!("test{}_prediction", i), &solver.solve(&train, &ex.input))?;
        }
    }
    Ok(written)
}
