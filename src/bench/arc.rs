use crate::perception::grid::ArcTask;
use crate::synthesis::dsl::Grid;
use crate::synthesis::strategy::Solver;

#[derive(Debug, Clone)]
pub struct ArcResult {
    pub task_id: String,
    /// One prediction per test input.
    pub predictions: Vec<Grid>,
    /// Accepted strategy per test input, `None` on fallback.
    pub strategies: Vec<Option<&'static str>>,
    /// Per test input: `Some(true)` when it matches the known output.
    pub correct: Vec<Option<bool>>,
}

impl ArcResult {
    /// Every test output is known and matched.
    pub fn solved(&self) -> bool {
        !self.correct.is_empty() && self.correct.iter().all(|c| *c == Some(true))
    }

    pub fn has_ground_truth(&self) -> bool {
        self.correct.iter().any(|c| c.is_some())
    }

    pub fn method(&self) -> &'static str {
        self.strategies.iter().flatten().next().copied().unwrap_or("fallback")
    }
}

pub fn solve_arc_task(solver: &Solver, task: &ArcTask) -> ArcResult {
    let train = task.train_pairs();
    let mut result = ArcResult {
        task_id: task.id.clone(),
        predictions: Vec::with_capacity(task.test.len()),
        strategies: Vec::with_capacity(task.test.len()),
        correct: Vec::with_capacity(task.test.len()),
    };
    for ex in &task.test {
        let (prediction, strategy) = solver.solve_traced(&train, &ex.input);
        result.correct.push(ex.output.as_ref().map(|truth| *truth == prediction));
        result.predictions.push(prediction);
        result.strategies.push(strategy);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::grid::parse_task;

    #[test]
    fn solves_rotation_task() {
        let task = parse_task(
            "rot",
            r#"{
                "train": [{"input": [[1, 0], [0, 0]], "output": [[0, 0], [0, 1]]}],
                "test": [{"input": [[2, 0], [0, 3]], "output": [[3, 0], [0, 2]]}]
            }"#,
        )
        .unwrap();
        let result = solve_arc_task(&Solver::default(), &task);
        assert_eq!(result.predictions, vec![vec![vec![3, 0], vec![0, 2]]]);
        assert!(result.solved());
        assert_eq!(result.method(), "geometric");
    }

    #[test]
    fn unknown_truth_is_not_solved() {
        let task = parse_task(
            "open",
            r#"{"train": [], "test": [{"input": [[5]]}]}"#,
        )
        .unwrap();
        let result = solve_arc_task(&Solver::default(), &task);
        assert_eq!(result.predictions, vec![vec![vec![5]]]);
        assert!(!result.solved());
        assert!(!result.has_ground_truth());
        assert_eq!(result.method(), "fallback");
    }
}
