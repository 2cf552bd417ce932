//! Per-run logger with file output and a tail buffer.
//!
//! Each generation run gets its own logger that:
//! - Writes to a dedicated timestamped log file
//! - Maintains a tail buffer of tool output for error diagnosis

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, MessagePrefix};
use crate::generator::{format_directives_pretty, GeneratorInvocation};

/// Per-run logger writing to a dedicated file.
#[derive(Debug)]
pub struct RunLogger {
    /// Run name for identification.
    run_name: String,
    /// Path to log file.
    log_path: PathBuf,
    /// File writer (buffered).
    file_writer: Mutex<Option<BufWriter<File>>>,
    /// Logging configuration.
    config: LogConfig,
    /// Tail buffer of recent tool output lines.
    tail_buffer: Mutex<VecDeque<String>>,
}

impl RunLogger {
    /// Create a new run logger.
    ///
    /// The log file is named after the run with a timestamp, so
    /// repeated runs do not clobber each other's logs.
    pub fn new(
        run_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
    ) -> std::io::Result<Self> {
        let run_name = run_name.into();
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!(
            "{}_{}.log",
            sanitize_filename(&run_name),
            timestamp
        ));

        let file = File::create(&log_path)?;
        let file_writer = BufWriter::new(file);

        Ok(Self {
            run_name,
            log_path,
            file_writer: Mutex::new(Some(file_writer)),
            config,
            tail_buffer: Mutex::new(VecDeque::with_capacity(100)),
        })
    }

    /// Get the run name.
    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        let formatted = self.format_message(message);
        self.output(&formatted);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        let msg = MessagePrefix::Warning.format(message);
        self.log(LogLevel::Warn, &msg);
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        let msg = MessagePrefix::Error.format(message);
        self.log(LogLevel::Error, &msg);
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        let msg = MessagePrefix::Command.format(command);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        let msg = MessagePrefix::Phase.format(phase_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a validation message.
    pub fn validation(&self, message: &str) {
        let msg = MessagePrefix::Validation.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        let msg = MessagePrefix::Success.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Log one line of tool output (stdout/stderr of the generator).
    ///
    /// Lines go to the file and to the tail buffer, which keeps the
    /// most recent `error_tail` lines for error display.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }

        let prefix = if is_stderr { "[stderr] " } else { "" };
        let msg = format!("{}{}", prefix, line);
        self.output(&self.format_message(&msg));
    }

    /// Show the tail buffer (typically after an error).
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }

        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in buffer.iter() {
            self.output(&self.format_message(line));
        }
    }

    /// Get the current tail buffer contents.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Log the composed invocation in readable form.
    pub fn log_directives_pretty(&self, invocation: &GeneratorInvocation) {
        self.info("--- schemagen directives ---");
        for line in format_directives_pretty(invocation).lines() {
            self.info(line);
        }
        self.info("----------------------------");
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the logger and release the file handle.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    /// Format a message with timestamp (if enabled).
    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            let timestamp = Local::now().format("%H:%M:%S");
            format!("[{}] {}", timestamp, message)
        } else {
            message.to_string()
        }
    }

    /// Write a formatted message to the file.
    fn output(&self, formatted: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", formatted);
        }
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a string to be safe for use as a filename.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
