// Scoring predictions against ground truth.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use log::warn;
use serde_json::Value;

use crate::perception::grid::parse_grid;
use crate::perception::submission::GUESS_SUFFIX;
use crate::synthesis::dsl::{Grid, grid_dimensions};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridScore {
    pub exact: bool,
    /// Share of matching cells over the top-left min(height) x min(width)
    /// overlap; `None` when the overlap is empty.
    pub pixel_ratio: Option<f64>,
}

pub fn score_grid(pred: &Grid, truth: &Grid) -> GridScore {
    let (ph, pw) = grid_dimensions(pred);
    let (th, tw) = grid_dimensions(truth);
    let (h, w) = (ph.min(th), pw.min(tw));
    let pixel_ratio = if h == 0 || w == 0 {
        None
    } else {
        let matching = (0..h)
            .flat_map(|r| (0..w).map(move |c| (r, c)))
            .filter(|&(r, c)| pred[r].get(c) == truth[r].get(c))
            .count();
        Some(matching as f64 / (h * w) as f64)
    };
    GridScore { exact: pred == truth, pixel_ratio }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    pub correct: usize,
    pub total: usize,
    /// Mean pixel ratio over tasks with both a prediction and ground truth.
    pub pixel_correctness: f64,
    pub incorrect: Vec<String>,
}

impl Scoreboard {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.correct as f64 / self.total as f64 }
    }

    pub fn print(&self) {
        println!("=== Evaluation ===");
        println!("Task-level accuracy: {} / {} = {:.2}%", self.correct, self.total, self.accuracy() * 100.0);
        println!("Pixel correctness: {:.2}%", self.pixel_correctness * 100.0);
    }
}

/// Scores every ground-truth task. A task with no prediction, or an empty
/// one, counts as incorrect and is left out of pixel correctness.
pub fn score_predictions(
    predictions: &BTreeMap<String, Grid>,
    truth: &BTreeMap<String, Grid>,
) -> Scoreboard {
    let mut board = Scoreboard::default();
    let mut ratios = Vec::new();
    for (id, expected) in truth {
        board.total += 1;
        let pred = match predictions.get(id) {
            Some(p) if !p.is_empty() => p,
            _ => {
                warn!("no prediction for {}", id);
                board.incorrect.push(id.clone());
                continue;
            }
        };
        let score = score_grid(pred, expected);
        if score.exact {
            board.correct += 1;
        } else {
            board.incorrect.push(id.clone());
        }
        if let Some(r) = score.pixel_ratio {
            ratios.push(r);
        }
    }
    if !ratios.is_empty() {
        board.pixel_correctness = ratios.iter().sum::<f64>() / ratios.len() as f64;
    }
    board
}

/// `test[0].output` of each file in `dir` whose name ends in `suffix`, keyed
/// by the name without the suffix. Unreadable files are skipped with a
/// warning.
pub fn load_outputs(dir: &Path, suffix: &str, skip_guesses: bool) -> anyhow::Result<BTreeMap<String, Grid>> {
    let mut outputs = BTreeMap::new();
    let entries = std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else { continue };
        let Some(id) = name.strip_suffix(suffix) else { continue };
        if skip_guesses && name.ends_with(GUESS_SUFFIX) { continue; }
        match read_first_output(&path) {
            Ok(grid) => {
                outputs.insert(id.to_string(), grid);
            }
            Err(e) => warn!("skipping {}: {:#}", path.display(), e),
        }
    }
    Ok(outputs)
}

fn read_first_output(path: &Path) -> anyhow::Result<Grid> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    Ok(parse_grid(value["test"][0].get("output"), "test[0].output")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        let g = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(score_grid(&g, &g), GridScore { exact: true, pixel_ratio: Some(1.0) });
    }

    #[test]
    fn cropped_ratio_on_shape_mismatch() {
        let pred = vec![vec![1, 2, 9], vec![3, 0, 9]];
        let truth = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        let score = score_grid(&pred, &truth);
        assert!(!score.exact);
        assert_eq!(score.pixel_ratio, Some(0.75));
    }

    #[test]
    fn aggregate() {
        let mut truth = BTreeMap::new();
        truth.insert("a".to_string(), vec![vec![1, 1]]);
        truth.insert("b".to_string(), vec![vec![2, 2]]);
        truth.insert("c".to_string(), vec![vec![3]]);
        let mut preds = BTreeMap::new();
        preds.insert("a".to_string(), vec![vec![1, 1]]);
        preds.insert("b".to_string(), vec![vec![2, 0]]);

        let board = score_predictions(&preds, &truth);
        assert_eq!(board.correct, 1);
        assert_eq!(board.total, 3);
        assert_eq!(board.incorrect, vec!["b".to_string(), "c".to_string()]);
        assert!((board.pixel_correctness - 0.75).abs() < 1e-9);
        assert!((board.accuracy() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn loads_predictions_and_truth() {
        let dir = tempfile::tempdir().unwrap();
        let record = r#"{"train": [], "test": [{"input": [[0]], "output": [[4, 4]]}]}"#;
        std::fs::write(dir.path().join("t1_guess.json"), record).unwrap();
        std::fs::write(dir.path().join("t1.json"), record).unwrap();
        std::fs::write(dir.path().join("t2.json"), r#"{"train": [], "test": [{"input": [[0]]}]}"#).unwrap();

        let preds = load_outputs(dir.path(), GUESS_SUFFIX, false).unwrap();
        assert_eq!(preds.keys().collect::<Vec<_>>(), vec!["t1"]);
        let truth = load_outputs(dir.path(), ".json", true).unwrap();
        assert_eq!(truth.get("t1"), Some(&vec![vec![4, 4]]));
        assert!(!truth.contains_key("t2"));
        assert_eq!(score_predictions(&preds, &truth).correct, 1);
    }

    #[test]
    fn empty_truth() {
        let board = score_predictions(&BTreeMap::new(), &BTreeMap::new());
        assert_eq!(board.accuracy(), 0.0);
        assert_eq!(board.pixel_correctness, 0.0);
    }
}
