use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn shell_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/shell.log")
}

pub fn append_shell_log(state_root: &Path, level: &str, event: &str, message: &str) {
    let payload = serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "level": level,
        "event": event,
        "message": message,
    });

    let Ok(line) = serde_json::to_string(&payload) else {
        return;
    };

    let path = shell_log_path(state_root);
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

#[cfg(test)]
mod tests {
    use super::{append_shell_log, shell_log_path};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn append_shell_log_writes_one_json_object_per_line() {
        let dir = tempdir().expect("tempdir");
        append_shell_log(dir.path(), "warn", "task_tree.unreachable", "task 7");
        append_shell_log(dir.path(), "error", "command.failed", "boom");

        let raw = fs::read_to_string(shell_log_path(dir.path())).expect("log");
        let events = raw
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("json line"))
            .collect::<Vec<_>>();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "task_tree.unreachable");
        assert_eq!(events[1]["level"], "error");
        assert!(events[0]["timestamp"].as_str().is_some());
    }
}
