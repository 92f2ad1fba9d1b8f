use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "taskpin", version, about = "Terminal task list with pinned tasks")]
pub struct Config {
    /// JSON file the tasks are loaded from and saved to
    #[arg(long = "file", value_name = "PATH", default_value = "tasks.json")]
    pub task_file: PathBuf,

    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output goes here since the terminal is taken by the UI
    #[arg(long = "log-file", value_name = "PATH", default_value = "taskpin.log")]
    pub log_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults() {
        let config = Config::try_parse_from(["taskpin"]).unwrap();
        assert_eq!(config.task_file, PathBuf::from("tasks.json"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, PathBuf::from("taskpin.log"));
    }

    #[rstest]
    fn overrides() {
        let config = Config::try_parse_from([
            "taskpin",
            "--file",
            "/tmp/mine.json",
            "--log-level",
            "taskpin=debug",
            "--log-file",
            "/tmp/taskpin.log",
        ])
        .unwrap();
        assert_eq!(config.task_file, PathBuf::from("/tmp/mine.json"));
        assert_eq!(config.log_level, "taskpin=debug");
        assert_eq!(config.log_file, PathBuf::from("/tmp/taskpin.log"));
    }
}
