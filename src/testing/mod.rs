//! Scenario testing system for deterministic gameplay testing
//!
//! Provides infrastructure for running scripted input tests against
//! headless simulation to verify camera, torque, and spawning behavior.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
pub use input::{ScriptedInputs, scripted_input_injection};
pub use parser::{
    ExpectedEvent, FrameInput, StateAssertion, TestDefinition, TestExpectations, TestSetup,
};
pub use runner::{TestResult, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";
