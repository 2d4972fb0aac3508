use super::DiagnosticsError;
use crate::api::types::{LogFileEntry, Task, TaskState};
use flate2::read::MultiGzDecoder;
use std::collections::BTreeSet;
use std::io::Read;
use std::thread;

/// Case-insensitive substrings that mark a log line as failure-relevant.
/// Matching is deliberately loose and over-flags.
pub const FAILURE_MARKERS: &[&str] = &["fail", "error", "exception"];

/// Source of raw (gzip-compressed) log file bytes for one attempt.
pub trait RawLogSource: Sync {
    type Error: std::fmt::Display;

    fn fetch_raw(&self, file_name: &str) -> Result<Vec<u8>, Self::Error>;
}

impl<F, E> RawLogSource for F
where
    F: Fn(&str) -> Result<Vec<u8>, E> + Sync,
    E: std::fmt::Display,
{
    type Error = E;

    fn fetch_raw(&self, file_name: &str) -> Result<Vec<u8>, E> {
        self(file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    pub task_name: String,
    pub file_name: String,
    pub text: String,
    pub flagged: bool,
}

/// Outcome for a single matched log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTaskLog {
    pub task_name: String,
    pub file_name: String,
    pub lines: Result<Vec<AnnotatedLine>, DiagnosticsError>,
}

pub fn is_flagged_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    FAILURE_MARKERS.iter().any(|marker| lower.contains(marker))
}

pub fn flag_lines(task_name: &str, file_name: &str, text: &str) -> Vec<AnnotatedLine> {
    text.lines()
        .map(|line| AnnotatedLine {
            task_name: task_name.to_string(),
            file_name: file_name.to_string(),
            text: line.to_string(),
            flagged: is_flagged_line(line),
        })
        .collect()
}

/// Log files are gzip streams, possibly several members concatenated.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn decompress_log(file_name: &str, compressed: &[u8]) -> Result<String, DiagnosticsError> {
    let mut decoded = Vec::new();
    MultiGzDecoder::new(compressed)
        .read_to_end(&mut decoded)
        .map_err(|e| DiagnosticsError::LogDecompression {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(String::from_utf8_lossy(&decoded).into_owned())
}

pub fn failed_task_names(tasks: &[Task]) -> BTreeSet<&str> {
    tasks
        .iter()
        .filter(|task| task.state == TaskState::Error)
        .map(|task| task.full_name.as_str())
        .collect()
}

/// Log index entries belonging to error-state tasks, in index order.
pub fn matching_log_files<'a>(
    tasks: &[Task],
    log_index: &'a [LogFileEntry],
) -> Vec<&'a LogFileEntry> {
    let failed = failed_task_names(tasks);
    if failed.is_empty() {
        return Vec::new();
    }
    log_index
        .iter()
        .filter(|entry| failed.contains(entry.task_name.as_str()))
        .collect()
}

fn fetch_and_decompress<S: RawLogSource>(
    source: &S,
    file_name: &str,
) -> Result<String, DiagnosticsError> {
    let compressed = source
        .fetch_raw(file_name)
        .map_err(|e| DiagnosticsError::LogFetch {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        })?;
    decompress_log(file_name, &compressed)
}

/// Fetches every matched file concurrently and waits for all of them. A
/// failing file does not stop the others; its error is kept in its own slot.
pub fn collect_failed_task_logs<S: RawLogSource>(
    tasks: &[Task],
    log_index: &[LogFileEntry],
    source: &S,
) -> Vec<FailedTaskLog> {
    let matched = matching_log_files(tasks, log_index);
    if matched.is_empty() {
        return Vec::new();
    }

    let decoded: Vec<Result<String, DiagnosticsError>> = thread::scope(|scope| {
        let handles = matched
            .iter()
            .map(|entry| scope.spawn(move || fetch_and_decompress(source, &entry.file_name)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .zip(matched.iter())
            .map(|(handle, entry)| {
                handle.join().unwrap_or_else(|_| {
                    Err(DiagnosticsError::LogFetch {
                        file_name: entry.file_name.clone(),
                        reason: "fetch worker panicked".to_string(),
                    })
                })
            })
            .collect()
    });

    matched
        .into_iter()
        .zip(decoded)
        .map(|(entry, text)| FailedTaskLog {
            task_name: entry.task_name.clone(),
            file_name: entry.file_name.clone(),
            lines: text.map(|text| flag_lines(&entry.task_name, &entry.file_name, &text)),
        })
        .collect()
}

/// Aggregate form of [`collect_failed_task_logs`]: all lines in file order,
/// or the first per-file failure in file order once every fetch has settled.
pub fn correlate_failed_logs<S: RawLogSource>(
    tasks: &[Task],
    log_index: &[LogFileEntry],
    source: &S,
) -> Result<Vec<AnnotatedLine>, DiagnosticsError> {
    let mut lines = Vec::new();
    for log in collect_failed_task_logs(tasks, log_index, source) {
        lines.extend(log.lines?);
    }
    Ok(lines)
}
