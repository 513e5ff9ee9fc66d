//! Scene event bus and compact event log
//!
//! Spawning and despawning systems emit events to the EventBus; the
//! EventLogger (when present) drains the bus into an .evlog file.

mod bus;
mod format;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use format::{parse_event, serialize_event};
pub use logger::{EventLogConfig, EventLogger, flush_event_bus};
pub use types::{GameEvent, entity_id};
