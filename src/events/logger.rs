//! Event logger - writes drained bus events to an .evlog file

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::bus::EventBus;
use super::format::serialize_event;
use super::types::GameEvent;
use crate::tuning::SceneTuning;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            config,
        }
    }

    /// Start a new log session and log the scene config
    pub fn start_session(&mut self, tuning: &SceneTuning) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!("Event logging started: {} (session: {})", path.display(), &self.session_id[..8]);

                self.log(0, &GameEvent::SessionStart {
                    session_id: self.session_id.clone(),
                    timestamp: chrono::Local::now().to_rfc3339(),
                });
                self.log(0, &GameEvent::Config(tuning.clone()));
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    /// Log an event
    pub fn log(&mut self, time_ms: u32, event: &GameEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };

        if let Err(e) = writeln!(writer, "{}", serialize_event(time_ms, event)) {
            warn!("Failed to write event: {}", e);
        }
    }

    /// Flush buffered lines to disk
    pub fn end_session(&mut self) {
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    /// True once a session file is open
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        self.end_session();
    }
}

/// Drain the bus into the event log each frame
pub fn flush_event_bus(mut bus: ResMut<EventBus>, mut logger: ResMut<EventLogger>) {
    for event in bus.drain() {
        logger.log(event.time_ms, &event.event);
    }
    bus.clear_processed();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logger_stays_inactive() {
        let mut logger = EventLogger::new(EventLogConfig {
            enabled: false,
            ..Default::default()
        });
        logger.start_session(&SceneTuning::default());
        assert!(!logger.is_active());
        assert!(logger.session_id.is_empty());
        // Logging without a writer is a no-op
        logger.log(10, &GameEvent::SpawnSkipped { ball: 1 });
    }

    #[test]
    fn test_session_writes_header_and_events() {
        let log_dir = std::env::temp_dir().join(format!("rollball-evlog-{}", Uuid::new_v4()));
        let mut logger = EventLogger::new(EventLogConfig {
            log_dir: log_dir.clone(),
            enabled: true,
        });
        logger.start_session(&SceneTuning::default());
        assert!(logger.is_active());
        logger.log(40, &GameEvent::SpawnSkipped { ball: 7 });
        logger.end_session();
        assert!(!logger.is_active());

        let file = std::fs::read_dir(&log_dir).unwrap().next().unwrap().unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("T:00000|SE|"));
        assert!(lines[1].starts_with("T:00000|CF|"));
        assert_eq!(lines[2], serialize_event(40, &GameEvent::SpawnSkipped { ball: 7 }));

        std::fs::remove_dir_all(&log_dir).unwrap();
    }
}
