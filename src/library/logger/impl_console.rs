use crate::library::logger::interface::{join_namespace, Level, Logger};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_line(&self, level: Level, message: &str) -> String {
        let local_time = Utc::now().with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!("[{}] {} {}: {}", formatted, level.as_str(), namespace, message),
            None => format!("[{}] {} {}", formatted, level.as_str(), message),
        }
    }
}

impl Logger for LoggerConsole {
    fn log(&self, level: Level, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let line = self.format_line(level, message);
        // stdout belongs to the console frontend
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", line)?;
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole {
            namespace: Some(join_namespace(self.namespace.as_deref(), namespace)),
            timezone: self.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_includes_level_and_namespace() {
        let timezone = chrono::FixedOffset::east_opt(0).unwrap();
        let logger = LoggerConsole {
            namespace: Some("app:effect".to_string()),
            timezone,
        };

        let line = logger.format_line(Level::Warn, "hello");

        assert!(line.starts_with('['));
        assert!(line.ends_with("] WARN app:effect: hello"));
    }

    #[test]
    fn test_with_namespace_nests() {
        assert_eq!(join_namespace(None, "app"), "app");
        assert_eq!(join_namespace(Some("app"), "effect"), "app:effect");
    }
}
