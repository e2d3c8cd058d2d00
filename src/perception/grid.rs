// Task loading and prediction writing.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};

use crate::core::{ArcError, Result};
use crate::synthesis::dsl::{Grid, is_rectangular};

#[derive(Debug, Clone)]
pub struct ArcTask {
    pub id: String,
    pub train: Vec<ArcExample>,
    pub test: Vec<ArcExample>,
}

/// Test examples may omit `output`; it is ground truth only.
#[derive(Debug, Clone, Serialize)]
pub struct ArcExample {
    pub input: Grid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Grid>,
}

impl ArcTask {
    pub fn train_pairs(&self) -> Vec<(Grid, Grid)> {
        self.train
            .iter()
            .filter_map(|ex| ex.output.clone().map(|out| (ex.input.clone(), out)))
            .collect()
    }
}

pub fn load_arc_task(path: impl AsRef<Path>) -> anyhow::Result<ArcTask> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading task {}", path.display()))?;
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();
    let task = parse_task(&id, &content).with_context(|| format!("parsing task {}", path.display()))?;
    Ok(task)
}

/// Parses and validates a task document.
pub fn parse_task(id: &str, content: &str) -> Result<ArcTask> {
    let raw: Value = serde_json::from_str(content)?;
    let train = raw
        .get("train")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ArcError::MissingKey("train".into()))?;
    let test = raw
        .get("test")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ArcError::MissingKey("test".into()))?;

    let mut task = ArcTask { id: id.to_string(), train: Vec::new(), test: Vec::new() };
    for (i, ex) in train.iter().enumerate() {
        let input = parse_grid(ex.get("input"), &format!("train[{}].input", i))?;
        let output = parse_grid(ex.get("output"), &format!("train[{}].output", i))?;
        task.train.push(ArcExample { input, output: Some(output) });
    }
    for (i, ex) in test.iter().enumerate() {
        let input = parse_grid(ex.get("input"), &format!("test[{}].input", i))?;
        let output = match ex.get("output") {
            Some(v) => Some(parse_grid(Some(v), &format!("test[{}].output", i))?),
            None => None,
        };
        task.test.push(ArcExample { input, output });
    }
    if task.test.is_empty() {
        return Err(ArcError::InvalidTask("no test inputs".into()));
    }
    Ok(task)
}

/// Reads a JSON grid: rectangular, at least 1x1, colors in 0..=9.
pub fn parse_grid(val: Option<&Value>, what: &str) -> Result<Grid> {
    let val = val.ok_or_else(|| ArcError::MissingKey(what.to_string()))?;
    let malformed = |reason: &str| ArcError::MalformedGrid(format!("{}: {}", what, reason));
    let rows = val.as_array().ok_or_else(|| malformed("not a list of rows"))?;
    let mut grid = Grid::with_capacity(rows.len());
    for row in rows {
        let cells = row.as_array().ok_or_else(|| malformed("row is not a list"))?;
        let mut out = Vec::with_capacity(cells.len());
        for cell in cells {
            match cell.as_u64() {
                Some(v) if v <= 9 => out.push(v as u8),
                _ => return Err(malformed(&format!("bad cell {}", cell))),
            }
        }
        grid.push(out);
    }
    if !is_rectangular(&grid) {
        return Err(malformed("empty or not rectangular"));
    }
    Ok(grid)
}

/// Task-shaped record holding one prediction.
pub fn prediction_record(task: &ArcTask, test_index: usize, prediction: &Grid) -> Value {
    let input = task.test.get(test_index).map(|ex| ex.input.clone()).unwrap_or_default();
    json!({
        "train": task.train,
        "test": [{ "input": input, "output": prediction }],
    })
}

pub fn write_prediction(
    path: impl AsRef<Path>,
    task: &ArcTask,
    test_index: usize,
    prediction: &Grid,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let record = prediction_record(task, test_index, prediction);
    let text = serde_json::to_string(&record)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn grid_to_string(grid: &Grid) -> String {
    grid.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
