use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenarios::ScenarioKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    /// Outcome label per passing iteration, e.g. `victory` or `stranded`.
    pub outcomes: Vec<String>,
    #[serde(with = "duration_ms")]
    pub average_duration: Duration,
}

pub struct ScenarioRunner {
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub async fn run_scenario(
        &self,
        kind: ScenarioKind,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        log::info!(
            "Running {} over {} seed(s), {iterations} iteration(s) each",
            kind.key(),
            seeds.len()
        );
        let mut results = Vec::new();
        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {seed})",
                    kind.key().bright_white()
                );
            }
            results.push(self.run_seed(kind, seed, iterations).await);
        }
        results
    }

    async fn run_seed(&self, kind: ScenarioKind, seed: u64, iterations: usize) -> ScenarioResult {
        let mut failures = Vec::new();
        let mut outcomes = Vec::new();
        let mut durations = Vec::new();

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let start = Instant::now();
            match kind.run(iteration_seed).await {
                Ok(summary) => {
                    let duration = start.elapsed();
                    durations.push(duration);
                    log::debug!(
                        "{} seed {iteration_seed} finished as {} after {} steps",
                        kind.key(),
                        summary.outcome(),
                        summary.steps
                    );
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{iterations} passed ({duration:?}) role:{} flights:{} parts:{} outcome:{}",
                            i + 1,
                            summary.role,
                            summary.flights,
                            summary.parts_collected,
                            summary.outcome()
                        );
                    }
                    outcomes.push(summary.outcome());
                }
                Err(err) => {
                    let message = format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1);
                    log::warn!("{} failed: {message}", kind.key());
                    if self.verbose {
                        println!("  ❌ {}", message.red());
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if durations.is_empty() {
            Duration::ZERO
        } else {
            durations.iter().sum::<Duration>() / u32::try_from(durations.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: kind.key().to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: durations.len(),
            failures,
            outcomes,
            average_duration,
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(millis.max(0.0) / 1000.0))
    }
}
