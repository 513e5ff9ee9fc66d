//! Rollball - a torque-driven ball with a smoothed follow camera, built with Bevy
//!
//! Main entry point: argument parsing, config loading, and app setup.
//!
//! Flags:
//!   --input desktop|accelerometer   Override the input source for this platform
//!   --no-template                   Run without a spawn template (action only warns)
//!   --follow-rotation               Make the camera look at the ball
//!   --config <path>                 Scene tuning file (default config/scene_tuning.json)
//!   --no-log                        Skip the .evlog session file

use bevy::prelude::*;
use rollball::{
    EventBus, EventLogConfig, EventLogger, InputSource, RollballPlugin, SCENE_TUNING_FILE, SceneTuning,
    constants::DEFAULT_BACKGROUND_COLOR, world::setup_scene,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1).cloned())
        .unwrap_or_else(|| SCENE_TUNING_FILE.to_string());

    let mut tuning = SceneTuning::load_or_default(&config_path);

    if let Some(name) = args
        .iter()
        .position(|a| a == "--input")
        .and_then(|i| args.get(i + 1))
    {
        match InputSource::from_str(name) {
            Some(source) => tuning.input_source = Some(source),
            None => warn!("Unknown input source '{}', keeping {}", name, tuning.input_source().name()),
        }
    }
    if args.iter().any(|a| a == "--no-template") {
        tuning.spawn_template = false;
    }
    if args.iter().any(|a| a == "--follow-rotation") {
        tuning.follow_rotation = true;
    }

    let input_source = tuning.input_source();

    let mut logger = EventLogger::new(EventLogConfig {
        enabled: !args.iter().any(|a| a == "--no-log"),
        ..default()
    });
    logger.start_session(&tuning);

    let mut app = App::new();
    if logger.is_active() {
        app.insert_resource(logger);
    } else {
        // Nothing drains the bus without a session file
        app.insert_resource(EventBus::disabled());
    }

    app
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rollball".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(DEFAULT_BACKGROUND_COLOR))
        .insert_resource(input_source)
        .insert_resource(tuning)
        .add_plugins(RollballPlugin::default())
        .add_systems(Startup, (log_input_source, setup_scene))
        .run();
}

fn log_input_source(source: Res<InputSource>) {
    info!("Input source: {}", source.name());
}
