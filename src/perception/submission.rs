// Format checks for prediction files.

use std::path::{Path, PathBuf};

use serde_json::Value;

pub const GUESS_SUFFIX: &str = "_guess.json";

/// Format problems of one prediction record; empty when it is well formed.
pub fn verify_prediction(value: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    if value.get("train").is_none() {
        errors.push("missing 'train' key".to_string());
    }
    let Some(test) = value.get("test") else {
        errors.push("missing 'test' key".to_string());
        return errors;
    };
    let Some(test) = test.as_array() else {
        errors.push("'test' is not a list".to_string());
        return errors;
    };
    let Some(first) = test.first() else {
        errors.push("empty 'test' list".to_string());
        return errors;
    };
    if first.get("input").is_none() {
        errors.push("missing 'input' in test[0]".to_string());
        return errors;
    }
    match first.get("output") {
        None => errors.push("missing 'output' in test[0]".to_string()),
        Some(output) => {
            if let Err(e) = output_shape(output) {
                errors.push(e);
            }
        }
    }
    errors
}

/// (rows, cols) of a prediction output, or why it is not a 2-D grid.
pub fn output_shape(output: &Value) -> Result<(usize, usize), String> {
    let rows = output.as_array().ok_or("output is not a list")?;
    if rows.is_empty() {
        return Err("output is empty".into());
    }
    let mut width = None;
    for row in rows {
        let cells = row.as_array().ok_or("output is not a 2-D list")?;
        if cells.iter().any(|c| !c.is_u64()) {
            return Err("output holds a non-integer cell".into());
        }
        match width {
            None => width = Some(cells.len()),
            Some(w) if w != cells.len() => return Err("output rows differ in length".into()),
            Some(_) => {}
        }
    }
    Ok((rows.len(), width.unwrap_or(0)))
}

#[derive(Debug)]
pub struct FileCheck {
    pub path: PathBuf,
    pub shape: Option<(usize, usize)>,
    pub errors: Vec<String>,
}

impl FileCheck {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn verify_file(path: &Path) -> FileCheck {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read: {}", e))
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| format!("invalid JSON: {}", e)));
    let (shape, errors) = match parsed {
        Ok(value) => {
            let errors = verify_prediction(&value);
            let shape = value["test"][0].get("output").and_then(|o| output_shape(o).ok());
            (shape, errors)
        }
        Err(e) => (None, vec![e]),
    };
    FileCheck { path: path.to_path_buf(), shape, errors }
}

/// Checks every `*_guess.json` file in `dir`, sorted by name.
pub fn verify_dir(dir: &Path) -> std::io::Result<Vec<FileCheck>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.file_name().and_then(|n| n.to_str()).map_or(false, |n| n.ends_with(GUESS_SUFFIX)))
        .collect();
    paths.sort();
    Ok(paths.iter().map(|p| verify_file(p)).collect())
}
