// Batch runner.
// Loads every task in a directory, solves them in parallel, optionally writes
// one prediction file per task and reports per-strategy counts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::arc::{ArcResult, solve_arc_task};
use crate::perception::grid::{load_arc_task, write_prediction};
use crate::perception::submission::GUESS_SUFFIX;
use crate::synthesis::strategy::Solver;

#[derive(Debug, Default)]
pub struct RunOptions {
    pub limit: Option<usize>,
    /// Where `<task>_guess.json` files go; nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    pub progress: bool,
}

#[derive(Debug)]
pub struct BenchmarkReport {
    pub total_tasks: usize,
    pub solved: usize,
    /// Tasks whose test outputs were all known.
    pub scored: usize,
    /// Tasks some strategy changed, whether or not it was right.
    pub answered: usize,
    pub load_failures: usize,
    pub elapsed_ms: u64,
    pub by_strategy: Vec<(String, usize)>,
    pub per_task: Vec<TaskReport>,
}

#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task_id: String,
    pub solved: bool,
    pub method: &'static str,
    pub elapsed_ms: u64,
}

/// `*.json` task files in `dir`, skipping earlier predictions, sorted by name.
pub fn task_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading task directory {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "json"))
        .filter(|p| !p.to_string_lossy().ends_with(GUESS_SUFFIX))
        .collect();
    paths.sort();
    Ok(paths)
}

pub fn run_benchmark(dir: &Path, solver: &Solver, options: &RunOptions) -> anyhow::Result<BenchmarkReport> {
    let mut paths = task_files(dir)?;
    if let Some(max) = options.limit {
        paths.truncate(max);
    }
    if let Some(out) = &options.output_dir {
        std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    }

    let bar = if options.progress {
        ProgressBar::new(paths.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] Tasks: [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = Instant::now();
    let outcomes: Vec<Option<(ArcResult, u64)>> = paths
        .par_iter()
        .map(|path| {
            let outcome = run_one(path, solver, options);
            bar.inc(1);
            outcome
        })
        .collect();
    bar.finish_and_clear();

    let load_failures = outcomes.iter().filter(|o| o.is_none()).count();
    let results: Vec<(ArcResult, u64)> = outcomes.into_iter().flatten().collect();
    let report = build_report(&results, load_failures, start.elapsed().as_millis() as u64);
    info!("{} tasks, {} solved, {} load failures", report.total_tasks, report.solved, load_failures);
    Ok(report)
}

fn run_one(path: &Path, solver: &Solver, options: &RunOptions) -> Option<(ArcResult, u64)> {
    let task = match load_arc_task(path) {
        Ok(t) => t,
        Err(e) => {
            warn!("skipping {}: {:#}", path.display(), e);
            return None;
        }
    };
    let start = Instant::now();
    let result = solve_arc_task(solver, &task);
    let elapsed = start.elapsed().as_millis() as u64;

    if let (Some(out), Some(prediction)) = (&options.output_dir, result.predictions.first()) {
        let target = out.join(format!("{}{}", task.id, GUESS_SUFFIX));
        if let Err(e) = write_prediction(&target, &task, 0, prediction) {
            warn!("{}: {:#}", task.id, e);
        }
    }
    Some((result, elapsed))
}

fn build_report(results: &[(ArcResult, u64)], load_failures: usize, elapsed_ms: u64) -> BenchmarkReport {
    let mut strategy_counts: FxHashMap<&'static str, usize> = Default::default();
    let mut per_task = Vec::with_capacity(results.len());
    for (result, ms) in results {
        let solved = result.solved();
        *strategy_counts.entry(result.method()).or_default() += 1;
        per_task.push(TaskReport {
            task_id: result.task_id.clone(),
            solved,
            method: result.method(),
            elapsed_ms: *ms,
        });
    }

    let mut by_strategy: Vec<(String, usize)> =
        strategy_counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    by_strategy.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    BenchmarkReport {
        total_tasks: per_task.len(),
        solved: per_task.iter().filter(|t| t.solved).count(),
        scored: results.iter().filter(|(r, _)| r.has_ground_truth()).count(),
        answered: per_task.iter().filter(|t| t.method != "fallback").count(),
        load_failures,
        elapsed_ms,
        by_strategy,
        per_task,
    }
}

impl BenchmarkReport {
    pub fn score(&self) -> f64 {
        if self.scored == 0 { 0.0 } else { self.solved as f64 / self.scored as f64 }
    }

    pub fn strategy_counts(&self) -> BTreeMap<&str, usize> {
        self.by_strategy.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    pub fn print_summary(&self) {
        println!("=== ARC Run Results ===");
        println!("Tasks: {} | Solved: {}/{} | Score: {:.1}%",
            self.total_tasks, self.solved, self.scored, self.score() * 100.0);
        println!("Answered: {} | Load failures: {} | Time: {}ms",
            self.answered, self.load_failures, self.elapsed_ms);
        println!("\nBy strategy:");
        for (name, count) in &self.by_strategy {
            println!("  {}: {}", name, count);
        }
    }

    pub fn print_detail(&self) {
        self.print_summary();
        println!("\nPer-task detail:");
        for t in &self.per_task {
            let status = if t.solved { "OK" } else { "--" };
            println!("  [{}] {} | strategy={} time={}ms", status, t.task_id, t.method, t.elapsed_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATION: &str = r#"{
        "train": [{"input": [[1, 0], [0, 0]], "output": [[0, 0], [0, 1]]}],
        "test": [{"input": [[2, 0], [0, 3]], "output": [[3, 0], [0, 2]]}]
    }"#;

    const UNSOLVED: &str = r#"{
        "train": [{"input": [[1, 1], [0, 1]], "output": [[7, 0]]}],
        "test": [{"input": [[5, 0], [0, 5]], "output": [[7, 0]]}]
    }"#;

    #[test]
    fn runs_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), ROTATION).unwrap();
        std::fs::write(dir.path().join("b.json"), UNSOLVED).unwrap();
        std::fs::write(dir.path().join("c.json"), "{broken").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let out = dir.path().join("out");

        let options = RunOptions { limit: None, output_dir: Some(out.clone()), progress: false };
        let report = run_benchmark(dir.path(), &Solver::default(), &options).unwrap();
        assert_eq!(report.total_tasks, 2);
        assert_eq!(report.solved, 1);
        assert_eq!(report.scored, 2);
        assert_eq!(report.load_failures, 1);
        assert_eq!(report.answered, 1);
        assert_eq!(report.strategy_counts().get("geometric"), Some(&1));
        assert_eq!(report.strategy_counts().get("fallback"), Some(&1));
        assert!((report.score() - 0.5).abs() < 1e-9);

        assert!(out.join("a_guess.json").exists());
        assert!(out.join("b_guess.json").exists());
        // guesses in the task directory are not picked up as tasks
        assert_eq!(task_files(&out).unwrap().len(), 0);
    }

    #[test]
    fn limit_truncates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), ROTATION).unwrap();
        std::fs::write(dir.path().join("b.json"), ROTATION).unwrap();
        let options = RunOptions { limit: Some(1), ..Default::default() };
        let report = run_benchmark(dir.path(), &Solver::default(), &options).unwrap();
        assert_eq!(report.total_tasks, 1);
        assert_eq!(report.per_task[0].task_id, "a");
    }

    #[test]
    fn missing_directory_is_error() {
        let result = run_benchmark(Path::new("/nonexistent/dir"), &Solver::default(), &RunOptions::default());
        assert!(result.is_err());
    }
}
