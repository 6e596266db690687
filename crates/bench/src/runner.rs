//! The execution loop.

use tracing::{debug, info};

use guardmark_core::{prompts::WARMUP_PROMPT, BenchmarkRun, Invoker, Result, RunConfig};

use crate::plan::CallPlan;
use crate::progress::ProgressSink;

/// Drives a benchmark run to completion, one call at a time.
pub struct Runner<I> {
    invoker: I,
}

impl<I: Invoker> Runner<I> {
    /// Wrap an invoker.
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    /// Execute the full plan for `config` and return the recorded run.
    ///
    /// Only configuration validation can fail; a call that errors is
    /// recorded with its error text and the run continues, so one flaky
    /// round trip never costs the rest of the samples. When warm-up is
    /// enabled, each selected variant gets one unrecorded call first to
    /// absorb connection setup, and warm-up failures are ignored.
    pub async fn run(&self, config: RunConfig, progress: &dyn ProgressSink) -> Result<BenchmarkRun> {
        config.validate()?;
        let plan = CallPlan::build(&config);
        let total = plan.len();
        info!(
            label = %config.label,
            calls = total,
            variants = plan.variants().len(),
            "starting benchmark run"
        );

        if config.warmup {
            for &variant in plan.variants() {
                progress.warmup(variant);
                let result = self.invoker.invoke(variant, WARMUP_PROMPT).await;
                if let Some(error) = &result.error {
                    debug!(variant = %variant, error = %error, "warm-up call failed");
                }
            }
        }

        let mut run = BenchmarkRun::new(config);
        for (position, call) in plan.calls().iter().enumerate() {
            let prompt = &run.config.prompts[call.prompt_index];
            let result = self.invoker.invoke(call.variant, prompt).await;
            progress.call_finished(position + 1, total, &result);
            run.record(result);
        }
        run.finish();
        progress.finished();

        info!(recorded = run.total_recorded(), "benchmark run finished");
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use guardmark_core::{InvocationResult, Variant, DEFAULT_MODEL_ID, DEFAULT_REGION};

    use super::*;
    use crate::progress::NullProgress;

    /// Records every call it sees and fails the prompts it is told to.
    #[derive(Default)]
    struct ScriptedInvoker {
        calls: Mutex<Vec<(Variant, String)>>,
        fail_prompts: Vec<String>,
    }

    impl ScriptedInvoker {
        fn failing(prompts: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_prompts: prompts.iter().map(|p| p.to_string()).collect(),
            }
        }

        fn calls(&self) -> Vec<(Variant, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Invoker for ScriptedInvoker {
        async fn invoke(&self, variant: Variant, prompt: &str) -> InvocationResult {
            self.calls.lock().unwrap().push((variant, prompt.to_string()));
            if self.fail_prompts.iter().any(|p| p == prompt) {
                InvocationResult::builder(prompt, variant)
                    .error("injected failure")
                    .build()
            } else {
                InvocationResult::builder(prompt, variant)
                    .latency_ms(10.0)
                    .build()
            }
        }
    }

    struct CountingSink {
        seen: Mutex<Vec<(usize, usize)>>,
        done: Mutex<usize>,
    }

    impl ProgressSink for CountingSink {
        fn call_finished(&self, completed: usize, total: usize, _result: &InvocationResult) {
            self.seen.lock().unwrap().push((completed, total));
        }

        fn finished(&self) {
            *self.done.lock().unwrap() += 1;
        }
    }

    fn config(prompts: &[&str], iterations: u32, variants: Vec<Variant>) -> RunConfig {
        RunConfig {
            label: "runner test".to_string(),
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: None,
            guardrail: None,
            prompt_set: "general".to_string(),
            prompts: prompts.iter().map(|p| p.to_string()).collect(),
            iterations,
            variants,
            max_tokens: 64,
            temperature: 0.0,
            top_p: None,
            warmup: false,
        }
    }

    #[tokio::test]
    async fn test_records_iterations_for_every_prompt_and_variant() {
        let runner = Runner::new(ScriptedInvoker::default());
        let config = config(
            &["alpha", "beta"],
            3,
            vec![Variant::Baseline, Variant::LocalFilter],
        );

        let run = runner.run(config, &NullProgress).await.unwrap();

        assert_eq!(run.total_recorded(), 12);
        assert_eq!(run.results_for(Variant::Baseline).len(), 6);
        assert_eq!(run.results_for(Variant::LocalFilter).len(), 6);
        assert!(run.results_for(Variant::Guardrail).is_empty());
        assert!(run.finished_at >= run.started_at);
    }

    #[tokio::test]
    async fn test_calls_follow_plan_order() {
        let invoker = ScriptedInvoker::default();
        let runner = Runner::new(invoker);
        let config = config(
            &["alpha", "beta"],
            2,
            vec![Variant::Baseline, Variant::LocalFilter],
        );

        runner.run(config, &NullProgress).await.unwrap();

        let calls = runner.invoker.calls();
        let expected = [
            (Variant::Baseline, "alpha"),
            (Variant::LocalFilter, "alpha"),
            (Variant::Baseline, "alpha"),
            (Variant::LocalFilter, "alpha"),
            (Variant::Baseline, "beta"),
            (Variant::LocalFilter, "beta"),
            (Variant::Baseline, "beta"),
            (Variant::LocalFilter, "beta"),
        ];
        assert_eq!(calls.len(), expected.len());
        for (actual, (variant, prompt)) in calls.iter().zip(expected) {
            assert_eq!(actual.0, variant);
            assert_eq!(actual.1, prompt);
        }
    }

    #[tokio::test]
    async fn test_failures_are_recorded_not_fatal() {
        let runner = Runner::new(ScriptedInvoker::failing(&["beta"]));
        let config = config(&["alpha", "beta"], 2, vec![Variant::Baseline]);

        let run = runner.run(config, &NullProgress).await.unwrap();

        let results = run.results_for(Variant::Baseline);
        assert_eq!(results.len(), 4);
        let failed: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();
        assert_eq!(failed.len(), 2);
        assert!(failed.iter().all(|r| r.prompt_label == "beta"));
        assert!(failed
            .iter()
            .all(|r| r.error.as_deref() == Some("injected failure")));
    }

    #[tokio::test]
    async fn test_warmup_hits_each_variant_once_and_is_not_recorded() {
        let invoker = ScriptedInvoker::default();
        let runner = Runner::new(invoker);
        let mut config = config(
            &["alpha"],
            1,
            vec![Variant::Guardrail, Variant::Baseline],
        );
        config.guardrail = Some(guardmark_core::GuardrailConfig {
            identifier: "gr-1".to_string(),
            version: "1".to_string(),
        });
        config.warmup = true;

        let run = runner.run(config, &NullProgress).await.unwrap();

        let calls = runner.invoker.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], (Variant::Baseline, WARMUP_PROMPT.to_string()));
        assert_eq!(calls[1], (Variant::Guardrail, WARMUP_PROMPT.to_string()));
        assert_eq!(run.total_recorded(), 2);
        assert!(run
            .results_for(Variant::Baseline)
            .iter()
            .all(|r| r.prompt_label != WARMUP_PROMPT));
    }

    #[tokio::test]
    async fn test_warmup_failure_is_ignored() {
        let runner = Runner::new(ScriptedInvoker::failing(&[WARMUP_PROMPT]));
        let mut config = config(&["alpha"], 1, vec![Variant::Baseline]);
        config.warmup = true;

        let run = runner.run(config, &NullProgress).await.unwrap();

        assert_eq!(run.total_recorded(), 1);
        assert!(run.results_for(Variant::Baseline)[0].is_success());
    }

    #[tokio::test]
    async fn test_invalid_config_aborts_before_any_call() {
        let invoker = ScriptedInvoker::default();
        let runner = Runner::new(invoker);
        let mut config = config(&["alpha"], 1, vec![Variant::Baseline]);
        config.iterations = 0;

        let outcome = runner.run(config, &NullProgress).await;

        assert!(outcome.is_err());
        assert!(runner.invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_progress_sink_sees_every_timed_call() {
        let runner = Runner::new(ScriptedInvoker::default());
        let sink = CountingSink {
            seen: Mutex::new(Vec::new()),
            done: Mutex::new(0),
        };
        let config = config(&["alpha", "beta"], 2, vec![Variant::Baseline]);

        runner.run(config, &sink).await.unwrap();

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen.first(), Some(&(1, 4)));
        assert_eq!(seen.last(), Some(&(4, 4)));
        assert_eq!(*sink.done.lock().unwrap(), 1);
    }
}
