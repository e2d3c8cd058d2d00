use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use arc_rules::bench::metrics::{load_outputs, score_predictions};
use arc_rules::bench::runner::{run_benchmark, RunOptions};
use arc_rules::perception::grid::{grid_to_string, load_arc_task, write_prediction};
use arc_rules::perception::render::{render_ansi, write_task_pngs};
use arc_rules::perception::submission::{verify_dir, GUESS_SUFFIX};
use arc_rules::{Solver, SolverConfig};

#[derive(Parser)]
#[command(name = "arc-rules", version, about = "Rule-based ARC grid puzzle solver")]
struct Cli {
    /// JSON solver config; defaults apply to missing fields
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one task file and print the predictions
    Solve {
        task: PathBuf,
        /// Write the first prediction as a task-shaped record
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Solve every task in a directory
    Run {
        dir: PathBuf,
        /// Directory for <task>_guess.json files
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print one line per task
        #[arg(short, long)]
        detail: bool,
        #[arg(short, long)]
        quiet: bool,
    },
    /// Score <task>_guess.json predictions against <task>.json ground truth
    Score { predictions: PathBuf, truth: PathBuf },
    /// Check the format of every prediction file in a directory
    Verify { dir: PathBuf },
    /// Render a task and the solver's answer in the terminal
    Show { task: PathBuf },
    /// Write a task's grids, and the solver's predictions, as PNG files
    Png {
        task: PathBuf,
        out_dir: PathBuf,
        /// Pixels per grid cell
        #[arg(long, default_value_t = 20)]
        cell: u32,
        /// Skip the solver and write only the task's own grids
        #[arg(long)]
        no_predict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SolverConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => SolverConfig::default(),
    };
    let solver = Solver::new(&config);

    match cli.command {
        Command::Solve { task, output } => solve(&solver, &task, output.as_deref()),
        Command::Run { dir, output, limit, detail, quiet } => {
            let options = RunOptions { limit, output_dir: output, progress: !quiet };
            let report = run_benchmark(&dir, &solver, &options)?;
            if detail { report.print_detail() } else { report.print_summary() }
            Ok(())
        }
        Command::Score { predictions, truth } => {
            let preds = load_outputs(&predictions, GUESS_SUFFIX, false)?;
            let truth = load_outputs(&truth, ".json", true)?;
            let board = score_predictions(&preds, &truth);
            for id in &board.incorrect {
                println!("  incorrect: {}", id);
            }
            board.print();
            Ok(())
        }
        Command::Verify { dir } => verify(&dir),
        Command::Show { task } => show(&solver, &task),
        Command::Png { task, out_dir, cell, no_predict } => {
            let task = load_arc_task(&task)?;
            let solver = (!no_predict).then_some(&solver);
            let written = write_task_pngs(&task, solver, &out_dir, cell)?;
            println!("wrote {} images to {}", written.len(), out_dir.display());
            Ok(())
        }
    }
}

fn solve(solver: &Solver, path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let task = load_arc_task(path)?;
    let train = task.train_pairs();
    let mut first = None;
    for (i, ex) in task.test.iter().enumerate() {
        let (prediction, strategy) = solver.solve_traced(&train, &ex.input);
        println!("test {} ({}):", i, strategy.unwrap_or("fallback"));
        println!("{}", grid_to_string(&prediction));
        first.get_or_insert(prediction);
    }
    if let (Some(out), Some(prediction)) = (output, first) {
        write_prediction(out, &task, 0, &prediction)?;
        println!("wrote {}", out.display());
    }
    Ok(())
}

fn verify(dir: &Path) -> anyhow::Result<()> {
    let checks = verify_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    let valid = checks.iter().filter(|c| c.is_valid()).count();
    println!("Valid files: {}/{}", valid, checks.len());
    for check in &checks {
        match check.shape {
            Some((h, w)) if check.is_valid() => println!("  ok  {} ({}x{})", check.path.display(), h, w),
            _ => {
                println!("  bad {}", check.path.display());
                for e in &check.errors {
                    println!("      {}", e);
                }
            }
        }
    }
    if valid != checks.len() {
        bail!("{} invalid prediction files", checks.len() - valid);
    }
    Ok(())
}

fn show(solver: &Solver, path: &Path) -> anyhow::Result<()> {
    let task = load_arc_task(path)?;
    for (i, ex) in task.train.iter().enumerate() {
        println!("train {} input:", i);
        print!("{}", render_ansi(&ex.input));
        if let Some(out) = &ex.output {
            println!("train {} output:", i);
            print!("{}", render_ansi(out));
        }
    }
    let train = task.train_pairs();
    for (i, ex) in task.test.iter().enumerate() {
        println!("test {} input:", i);
        print!("{}", render_ansi(&ex.input));
        let (prediction, strategy) = solver.solve_traced(&train, &ex.input);
        println!("test {} prediction ({}):", i, strategy.unwrap_or("fallback"));
        print!("{}", render_ansi(&prediction));
    }
    Ok(())
}
