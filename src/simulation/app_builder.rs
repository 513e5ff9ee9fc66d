//! Headless App Builder
//!
//! Builds a windowless Bevy app with fixed frame time for scenario tests and tools.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::constants::PHYSICS_HZ;
use crate::events::EventBus;
use crate::input::InputSource;
use crate::plugin::RollballPlugin;
use crate::tuning::SceneTuning;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    tuning: SceneTuning,
    minimal_threads: bool,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            tuning: SceneTuning::default(),
            minimal_threads: false,
        }
    }

    /// Use this tuning, clamped the same way a loaded config file is
    pub fn with_tuning(mut self, tuning: SceneTuning) -> Self {
        self.tuning = tuning.validated();
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Frame duration every `app.update()` advances time by: one physics tick
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / PHYSICS_HZ)
    }

    /// Build the app with minimal plugins and the gameplay plugin.
    ///
    /// Device capture is off: callers write `BallInput` themselves
    /// (in `RollballSystems::Input`) and spawn their own entities.
    pub fn build(self) -> App {
        let frame = self.frame_duration();
        let mut app = App::new();

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(frame))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));
        }

        app.add_plugins(bevy::transform::TransformPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));

        app.insert_resource(self.tuning.input_source());
        app.insert_resource(EventBus::new());
        app.insert_resource(self.tuning);
        app.add_plugins(RollballPlugin {
            capture_devices: false,
        });

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::BallInput;
    use crate::lifetime::DespawnSchedule;

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new().build();
        assert!(app.world().contains_resource::<BallInput>());
        assert!(app.world().contains_resource::<DespawnSchedule>());
        assert!(app.world().contains_resource::<EventBus>());
    }

    #[test]
    fn test_builder_uses_tuning_input_source() {
        let tuning = SceneTuning {
            input_source: Some(InputSource::Accelerometer),
            ..Default::default()
        };
        let app = HeadlessAppBuilder::new()
            .with_tuning(tuning)
            .with_minimal_threads()
            .build();
        assert_eq!(
            *app.world().resource::<InputSource>(),
            InputSource::Accelerometer
        );
    }

    #[test]
    fn test_builder_validates_tuning() {
        let tuning = SceneTuning {
            spawn_lifetime: -0.5,
            smooth_speed: f32::NAN,
            ..Default::default()
        };
        let app = HeadlessAppBuilder::new().with_tuning(tuning).build();
        let tuning = app.world().resource::<SceneTuning>();
        assert_eq!(tuning.spawn_lifetime, 0.0);
        assert_eq!(tuning.smooth_speed, crate::constants::CAMERA_SMOOTH_SPEED);
    }

    #[test]
    fn test_frame_duration() {
        let builder = HeadlessAppBuilder::new();
        assert_eq!(builder.frame_duration(), Duration::from_millis(20));
    }
}
