//! Settings for the host that runs the profiler.
//!
//! The profiler is launched by the editor integration, not by this crate.
//! `ProfilerSettings` is the value that integration passes around instead
//! of keeping settings in global state. The parsing and analysis code never
//! reads it.

use serde::Deserialize;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::time::Duration;

use crate::analysis::DEFAULT_NUM_STDDEV;
use crate::domain::ConfigError;

#[cfg(windows)]
const SEARCH_PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const SEARCH_PATH_SEPARATOR: &str = ":";

/// Profiler invocation and polling settings.
///
/// Deserialized from the editor's JSON settings file; missing keys fall back
/// to the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfilerSettings {
    /// Python interpreter used to run the profiler
    pub python: String,

    /// Path to the `kernprof` script
    pub kernprof: String,

    /// Extra module search path appended after the script's directory
    pub pythonpath: String,

    /// Give up on the profiler after this many seconds
    pub poll_timeout_seconds: u64,

    /// Seconds between checks on the running profiler
    pub poll_sleep_seconds: u64,

    /// Standard deviations above the mean for a line to count as hot
    pub num_stddev: f64,
}

impl Default for ProfilerSettings {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
            kernprof: "kernprof.py".to_string(),
            pythonpath: String::new(),
            poll_timeout_seconds: 60,
            poll_sleep_seconds: 1,
            num_stddev: DEFAULT_NUM_STDDEV,
        }
    }
}

impl ProfilerSettings {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be read or is not valid
    /// settings JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json { path: path.display().to_string(), source })
    }

    /// Command line that profiles `script` line by line and prints the
    /// report to stdout without keeping the raw results file.
    #[must_use]
    pub fn profiler_command(&self, script: &Path) -> Vec<OsString> {
        vec![
            OsString::from(&self.python),
            OsString::from(&self.kernprof),
            OsString::from("-lbv"),
            OsString::from("-o"),
            OsString::from("/dev/null"),
            script.as_os_str().to_os_string(),
        ]
    }

    /// Module search path for the profiled script.
    ///
    /// Unsaved buffers have no directory; they get `pythonpath` alone.
    #[must_use]
    pub fn search_path(&self, script_dir: Option<&Path>) -> OsString {
        match script_dir {
            Some(dir) => {
                let mut path = dir.as_os_str().to_os_string();
                path.push(SEARCH_PATH_SEPARATOR);
                path.push(&self.pythonpath);
                path
            }
            None => OsString::from(&self.pythonpath),
        }
    }

    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_seconds)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_sleep_seconds)
    }
}

/// Quote one argument for a POSIX shell, leaving plain words untouched.
///
/// Non-UTF-8 bytes are shown lossily; the result is meant for display.
#[must_use]
pub fn shell_quote(arg: &OsStr) -> Cow<'_, str> {
    let text = arg.to_string_lossy();
    let plain = !text.is_empty()
        && text.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '+' | '@'));
    if plain {
        text
    } else {
        Cow::Owned(format!("'{}'", text.replace('\'', r"'\''")))
    }
}

/// Render an argv as a copy-pasteable shell command line.
#[must_use]
pub fn shell_command_line(argv: &[OsString]) -> String {
    argv.iter().map(|arg| shell_quote(arg)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ProfilerSettings::default();
        assert_eq!(settings.python, "python");
        assert_eq!(settings.kernprof, "kernprof.py");
        assert_eq!(settings.poll_timeout(), Duration::from_secs(60));
        assert_eq!(settings.poll_interval(), Duration::from_secs(1));
        assert_eq!(settings.num_stddev, 1.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"python": "/usr/bin/python3", "poll_timeout_seconds": 5}}"#).unwrap();

        let settings = ProfilerSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.python, "/usr/bin/python3");
        assert_eq!(settings.poll_timeout_seconds, 5);
        assert_eq!(settings.kernprof, "kernprof.py");
        assert_eq!(settings.poll_sleep_seconds, 1);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ProfilerSettings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = ProfilerSettings::from_file("/nonexistent/hotline.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/hotline.json"));
    }

    #[test]
    fn test_profiler_command() {
        let settings = ProfilerSettings::default();
        let argv = settings.profiler_command(Path::new("/tmp/demo.py"));
        assert_eq!(argv, vec!["python", "kernprof.py", "-lbv", "-o", "/dev/null", "/tmp/demo.py"]);
    }

    #[test]
    fn test_search_path() {
        let settings = ProfilerSettings { pythonpath: "/opt/lib".to_string(), ..ProfilerSettings::default() };
        assert_eq!(settings.search_path(None), "/opt/lib");
        let joined = settings.search_path(Some(Path::new("/src")));
        assert_eq!(joined, OsString::from(format!("/src{SEARCH_PATH_SEPARATOR}/opt/lib")));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote(OsStr::new("/tmp/demo.py")), "/tmp/demo.py");
        assert_eq!(shell_quote(OsStr::new("/tmp/my demo.py")), "'/tmp/my demo.py'");
        assert_eq!(shell_quote(OsStr::new("it's.py")), r"'it'\''s.py'");
        assert_eq!(shell_quote(OsStr::new("")), "''");
    }

    #[test]
    fn test_shell_command_line_quotes_script_with_spaces() {
        let settings = ProfilerSettings::default();
        let argv = settings.profiler_command(Path::new("/tmp/my demo.py"));
        assert_eq!(shell_command_line(&argv), "python kernprof.py -lbv -o /dev/null '/tmp/my demo.py'");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_script_path_is_kept_exactly() {
        use std::os::unix::ffi::OsStrExt;

        let script = Path::new(OsStr::from_bytes(b"/tmp/caf\xe9.py"));
        let argv = ProfilerSettings::default().profiler_command(script);
        assert_eq!(argv[5].as_bytes(), b"/tmp/caf\xe9.py");
    }
}
