//! Attempt diagnostics: task hierarchy layout, retry/resume payloads and
//! failed-task log correlation. Nothing in here talks to the network
//! directly; collaborators are passed in.

pub mod error;
pub mod failure_logs;
pub mod resume;
pub mod task_tree;

pub use error::DiagnosticsError;
pub use failure_logs::{
    collect_failed_task_logs, correlate_failed_logs, decompress_log, flag_lines, is_flagged_line,
    AnnotatedLine, FailedTaskLog, RawLogSource,
};
pub use resume::{compose_retry_payload, AttemptCreationPayload, ResumeDescriptor, ResumeIntent};
pub use task_tree::{build_display_order, DisplayEntry, ForestLayout, TaskForest};
