//! Fuzz test runner
//!
//! `FuzzConfig` feeds proptest; `FuzzRunner` drives deterministic sweeps where
//! each case is derived from its index rather than a random strategy.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Fuzz test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzConfig {
    /// Number of test cases to run
    pub cases: u32,
    /// Maximum shrink iterations on failure
    pub max_shrink_iters: u32,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            cases: 1_000,
            max_shrink_iters: 1_000,
        }
    }
}

impl FuzzConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cases(mut self, n: u32) -> Self {
        self.cases = n;
        self
    }

    pub fn max_shrink_iters(mut self, n: u32) -> Self {
        self.max_shrink_iters = n;
        self
    }

    /// Generate proptest config from this
    pub fn to_proptest_config(&self) -> proptest::test_runner::Config {
        let mut config = proptest::test_runner::Config::default();
        config.cases = self.cases;
        config.max_shrink_iters = self.max_shrink_iters;
        config
    }
}

// ============================================================================
// Results
// ============================================================================

/// Result of a fuzz test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzResult {
    pub name: String,
    pub cases_run: u64,
    pub cases_passed: u64,
    pub cases_failed: u64,
    pub duration_ms: u64,
    /// Failure messages, first ten only
    pub failures: Vec<String>,
    pub passed: bool,
}

const MAX_RECORDED_FAILURES: usize = 10;

impl FuzzResult {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cases_run: 0,
            cases_passed: 0,
            cases_failed: 0,
            duration_ms: 0,
            failures: Vec::new(),
            passed: true,
        }
    }

    pub fn record_pass(&mut self) {
        self.cases_run += 1;
        self.cases_passed += 1;
    }

    pub fn record_fail(&mut self, message: String) {
        self.cases_run += 1;
        self.cases_failed += 1;
        self.passed = false;
        if self.failures.len() < MAX_RECORDED_FAILURES {
            self.failures.push(message);
        }
    }

    pub fn finalize(&mut self, duration: Duration) {
        self.duration_ms = duration.as_millis() as u64;
    }

    /// Log a one-line summary
    pub fn log_summary(&self) {
        if self.passed {
            info!(
                "{}: {} cases passed in {} ms",
                self.name, self.cases_run, self.duration_ms
            );
        } else {
            warn!(
                "{}: {}/{} cases failed, first: {}",
                self.name,
                self.cases_failed,
                self.cases_run,
                self.failures.first().map(String::as_str).unwrap_or("<none>")
            );
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Runs indexed sweeps and keeps their results
pub struct FuzzRunner {
    config: FuzzConfig,
    results: Vec<FuzzResult>,
}

impl FuzzRunner {
    pub fn new(config: FuzzConfig) -> Self {
        Self {
            config,
            results: Vec::new(),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(FuzzConfig::default())
    }

    /// Call `test_fn` with every case index in `0..cases`
    pub fn run<F>(&mut self, name: &str, test_fn: F) -> &FuzzResult
    where
        F: Fn(u64) -> Result<(), String>,
    {
        let mut result = FuzzResult::new(name);
        let start = Instant::now();

        for i in 0..u64::from(self.config.cases) {
            match test_fn(i) {
                Ok(()) => result.record_pass(),
                Err(msg) => result.record_fail(format!("case {}: {}", i, msg)),
            }
        }

        result.finalize(start.elapsed());
        result.log_summary();
        let index = self.results.len();
        self.results.push(result);
        &self.results[index]
    }

    pub fn results(&self) -> &[FuzzResult] {
        &self.results
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Export results to JSON
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.results)
    }
}
