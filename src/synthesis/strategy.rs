// Strategy dispatch.
//
// Each strategy pairs a detector (reads every training pair, extracts the
// parameters of one transformation hypothesis) with an applier (replays the
// parametrized transformation on an unseen grid). The solver walks its
// strategies in priority order and keeps the first prediction that differs
// from the test input; if none does, the input comes back unchanged.

use log::{debug, info};

use super::dsl::{Grid, is_rectangular, same_shape};
use super::fill::{FillRule, RegionFill};
use super::frame::{BoundingFrame, BoxColor, ComponentFrame};
use super::geometric::{Geometric, Transform};
use super::path::ShortestPath;
use super::recolor::ColorRemap;
use super::row_col::RowColumn;
use super::tip::TipReflection;
use crate::core::{ArcError, Result, SolverConfig};

/// Parameters extracted by a detector, consumed by the matching applier.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    ComponentFrame { frame_color: u8 },
    BoundingFrame { color: BoxColor },
    ShortestPath { start: u8, end: u8 },
    TipReflection,
    RowColumn,
    RegionFill { rule: FillRule },
    ColorRemap { table: [Option<u8>; 10] },
    Geometric { transform: Transform },
}

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Inspects all training pairs; `None` when the pattern is absent.
    fn detect(&self, train: &[(Grid, Grid)]) -> Option<Pattern>;

    /// Applies a pattern produced by `detect`. `None` means not applicable
    /// to this grid.
    fn apply(&self, pattern: &Pattern, grid: &Grid) -> Option<Grid>;
}

pub struct Solver {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(&SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: &SolverConfig) -> Self {
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(ComponentFrame { frame_color: config.frame_color }),
            Box::new(ShortestPath { start: config.path_start, end: config.path_end }),
            Box::new(TipReflection { evidence_ratio: config.tip_evidence_ratio }),
            Box::new(RowColumn),
            Box::new(RegionFill),
            Box::new(BoundingFrame),
            Box::new(ColorRemap),
            Box::new(Geometric),
        ];
        Self { strategies }
    }

    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn solve(&self, train: &[(Grid, Grid)], test: &Grid) -> Grid {
        self.solve_traced(train, test).0
    }

    /// Like `solve`, also naming the strategy whose prediction was kept.
    pub fn solve_traced(&self, train: &[(Grid, Grid)], test: &Grid) -> (Grid, Option<&'static str>) {
        if train.is_empty() {
            return (test.clone(), None);
        }
        for strategy in &self.strategies {
            let Some(pattern) = strategy.detect(train) else { continue };
            debug!("{}: detected {:?}", strategy.name(), pattern);
            match strategy.apply(&pattern, test) {
                Some(result) if !is_rectangular(&result) => {
                    debug!("{}: discarded non-rectangular result", strategy.name());
                }
                Some(result) if result != *test => {
                    info!("{}: accepted", strategy.name());
                    return (result, Some(strategy.name()));
                }
                Some(_) => debug!("{}: no change on test input", strategy.name()),
                None => debug!("{}: not applicable to test input", strategy.name()),
            }
        }
        debug!("no strategy changed the input, returning it unchanged");
        (test.clone(), None)
    }

    /// Validates every grid before solving. Malformed grids are the only
    /// condition reported as an error.
    pub fn try_solve(&self, train: &[(Grid, Grid)], test: &Grid) -> Result<Grid> {
        for (i, (input, output)) in train.iter().enumerate() {
            check_grid(input, &format!("train[{}].input", i))?;
            check_grid(output, &format!("train[{}].output", i))?;
        }
        check_grid(test, "test input")?;
        Ok(self.solve(train, test))
    }
}

fn check_grid(grid: &Grid, what: &str) -> Result<()> {
    if !is_rectangular(grid) {
        return Err(ArcError::MalformedGrid(format!("{} is empty or not rectangular", what)));
    }
    if let Some(&c) = grid.iter().flatten().find(|&&c| c > 9) {
        return Err(ArcError::MalformedGrid(format!("{} holds color {} outside 0..=9", what, c)));
    }
    Ok(())
}

/// Solves with the default strategy order and sentinels.
pub fn solve(train: &[(Grid, Grid)], test: &Grid) -> Grid {
    Solver::default().solve(train, test)
}

/// True when every pair keeps its grid shape.
pub(crate) fn shapes_preserved(train: &[(Grid, Grid)]) -> bool {
    train.iter().all(|(i, o)| same_shape(i, o))
}
