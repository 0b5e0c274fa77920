//! Task start delays from a WRENCH execution dump.
//!
//! WRENCH records, per task, when the whole task started (including input
//! staging) and when computation started. The gap between the two is the
//! time a task spent waiting on data.

use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExecutionDump {
    workflow_execution: WorkflowExecution,
}

#[derive(Debug, Deserialize)]
struct WorkflowExecution {
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    task_id: String,
    compute: Interval,
    whole_task: Interval,
}

#[derive(Debug, Deserialize)]
struct Interval {
    start: f64,
}

/// Start times of one task and the delay between them
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStartDelay {
    pub task_id: String,
    pub compute_start: f64,
    pub whole_task_start: f64,
    /// `compute_start - whole_task_start`
    pub difference: f64,
}

/// Extract per-task delays from the JSON text of an execution dump
pub fn task_start_delays(json: &str) -> Result<Vec<TaskStartDelay>> {
    let dump: ExecutionDump =
        serde_json::from_str(json).context("Failed to extract data from JSON file")?;

    Ok(dump
        .workflow_execution
        .tasks
        .into_iter()
        .map(|task| TaskStartDelay {
            difference: task.compute.start - task.whole_task.start,
            compute_start: task.compute.start,
            whole_task_start: task.whole_task.start,
            task_id: task.task_id,
        })
        .collect())
}

/// Load an execution dump and extract per-task delays
pub fn task_start_delays_from_file(path: &Path) -> Result<Vec<TaskStartDelay>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load JSON data from {}", path.display()))?;
    task_start_delays(&json)
        .with_context(|| format!("Invalid WRENCH execution dump {}", path.display()))
}

/// Human-readable block for one task
pub fn format_delay(delay: &TaskStartDelay) -> String {
    format!(
        "Task ID: {}\nCompute Start Time: {}\nWhole Task Start Time: {}\nDifference: {}\n",
        delay.task_id, delay.compute_start, delay.whole_task_start, delay.difference
    )
}
