//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                                # Run all scenarios
//!   cargo run --bin test-scenarios -- camera/                     # Run one category
//!   cargo run --bin test-scenarios -- spawning/spawn_while_held   # Run one scenario
//!   cargo run --bin test-scenarios -- --verbose                   # Expected/actual on failure

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rollball::testing::{SCENARIOS_DIR, TestResult, parser::parse_test_file, runner::run_test};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let filter = args.iter().find(|a| !a.starts_with('-')).cloned();

    let base = Path::new(SCENARIOS_DIR);
    let mut scenarios = Vec::new();
    collect_scenarios(base, &mut scenarios);
    scenarios.retain(|path| {
        let rel = path.strip_prefix(base).unwrap_or(path).to_string_lossy();
        filter.as_deref().is_none_or(|f| rel.contains(f))
    });
    scenarios.sort();

    if scenarios.is_empty() {
        println!("No scenarios found under {}", SCENARIOS_DIR);
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        return ExitCode::FAILURE;
    }

    println!("Scenario Tests ({})", scenarios.len());
    println!("==============\n");

    let (mut passed, mut failed, mut errors) = (0, 0, 0);

    for path in &scenarios {
        let label = path
            .strip_prefix(base)
            .unwrap_or(path)
            .with_extension("")
            .to_string_lossy()
            .to_string();

        let result = match parse_test_file(path) {
            Ok(def) => run_test(&def),
            Err(message) => TestResult::Error { message },
        };

        match &result {
            TestResult::Pass { .. } => passed += 1,
            TestResult::Fail { .. } => failed += 1,
            TestResult::Error { .. } => errors += 1,
        }
        print_result(&label, &result, verbose);
    }

    println!("\n==============");
    println!("Results: {} passed, {} failed, {} errors", passed, failed, errors);

    if failed > 0 || errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn collect_scenarios(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_scenarios(&path, out);
        } else if path.extension().is_some_and(|e| e == "toml") {
            out.push(path);
        }
    }
}

fn print_result(label: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(44usize.saturating_sub(label.len()).max(1));

    match result {
        TestResult::Pass { frames } => println!("  {} {} PASS ({} frames)", label, dots, frames),
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", label, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", label, dots);
            println!("    {}", message);
        }
    }
}
