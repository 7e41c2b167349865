// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runs the readers-writers demonstrations with tracing output.
//!
//! Three runs go in order: the classic run, the contended run (two readers
//! against five writers) and the shared database run. Verbosity follows
//! `RUST_LOG` (default `info`); `RUST_LOG=debug` also shows readers and
//! writers parking inside the lock.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use readers_writers::ConfigError;
    use readers_writers::config::{DatabaseDemoConfig, DemoConfig};
    use readers_writers::demo::{run_classic, run_database_demo};
    use readers_writers::logger::TracingLogger;
    use readers_writers::random::UniformRandom;
    use std::process::ExitCode;
    use std::sync::Arc;
    use tracing_subscriber::EnvFilter;

    pub fn main() -> ExitCode {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_ids(true)
            .with_target(false)
            .compact()
            .init();

        match run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(error = %err, "demo aborted");
                ExitCode::FAILURE
            }
        }
    }

    fn classic(
        name: &str,
        config: &DemoConfig,
        logger: &Arc<TracingLogger>,
    ) -> Result<(), ConfigError> {
        let random = UniformRandom::new(config.min_operations, config.max_operations)?;
        let random = Arc::new(random);
        let report = run_classic(config, Arc::clone(logger), random)?;
        tracing::info!(
            reads = report.reads,
            writes = report.writes,
            final_value = report.final_value,
            "{name} run finished"
        );
        Ok(())
    }

    fn run() -> Result<(), ConfigError> {
        let logger = Arc::new(TracingLogger);

        classic("classic", &DemoConfig::default(), &logger)?;
        classic("contended", &DemoConfig::contended(), &logger)?;

        let database = DatabaseDemoConfig::default();
        let random = UniformRandom::new(database.min_operations, database.max_operations)?;
        let random = Arc::new(random);
        let report = run_database_demo(&database, logger, random)?;
        tracing::info!(
            reads = report.reads,
            writes = report.writes,
            records = report.final_value,
            "database run finished"
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

// The drivers spawn OS threads and draw from an OS random source.
#[cfg(target_arch = "wasm32")]
fn main() {}
