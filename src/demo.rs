// SPDX-License-Identifier: MIT OR Apache-2.0
//! Demonstration drivers.
//!
//! Two workloads exercise [`ReadersWriters`] with real threads:
//!
//! - [`run_classic`]: a handful of readers and writers hammer a single integer
//!   through [`read_resource`](ReadersWriters::read_resource) and
//!   [`write_resource`](ReadersWriters::write_resource).
//! - [`run_database_demo`]: readers and writers share a [`SharedDatabase`] of
//!   string records, start on a common signal and stop on a timer.
//!
//! Both take their logger and random generator from the caller.

use crate::config::{AccessTiming, DatabaseDemoConfig, DemoConfig};
use crate::error::ConfigError;
use crate::lock::ReadersWriters;
use crate::logger::{LogLevel, Logger};
use crate::platform::pause;
use crate::random::RandomGenerator;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    pub reads: u64,
    pub writes: u64,
    /// Resource value (classic run) or record count (database run) at the end.
    pub final_value: i64,
}

fn join_all(handles: Vec<thread::JoinHandle<()>>) {
    for handle in handles {
        if let Err(panic) = handle.join() {
            std::panic::resume_unwind(panic);
        }
    }
}

/// Runs readers and writers against one shared integer.
///
/// Writer `w` stores `w * 100 + i` on its `i`-th write, so the final value
/// tells which writer went last.
pub fn run_classic<L, G>(
    config: &DemoConfig,
    logger: Arc<L>,
    random: Arc<G>,
) -> Result<DemoReport, ConfigError>
where
    L: Logger + 'static,
    G: RandomGenerator + 'static,
{
    config.validate()?;
    let rw = Arc::new(ReadersWriters::with_timing(0i64, config.timing));
    let reads = Arc::new(AtomicU64::new(0));
    let writes = Arc::new(AtomicU64::new(0));
    let (min, max) = (config.min_operations, config.max_operations);

    logger.log(
        LogLevel::Info,
        &format!("Starting {} threads", config.readers + config.writers),
    );

    let mut handles = Vec::with_capacity(config.readers + config.writers);
    for reader_id in 0..config.readers {
        let (rw, logger, random, reads) = (
            Arc::clone(&rw),
            Arc::clone(&logger),
            Arc::clone(&random),
            Arc::clone(&reads),
        );
        let pause_between = config.read_pause;
        handles.push(thread::spawn(move || {
            logger.log(LogLevel::Info, &format!("Reader {reader_id} started"));
            let count = random.number().clamp(min, max);
            for _ in 0..count {
                rw.read_resource(&*logger);
                reads.fetch_add(1, Ordering::Relaxed);
                pause(pause_between);
            }
            logger.log(
                LogLevel::Info,
                &format!("Reader {reader_id} finished after {count} reads"),
            );
        }));
    }
    for writer_id in 0..config.writers {
        let (rw, logger, random, writes) = (
            Arc::clone(&rw),
            Arc::clone(&logger),
            Arc::clone(&random),
            Arc::clone(&writes),
        );
        let pause_between = config.write_pause;
        handles.push(thread::spawn(move || {
            logger.log(LogLevel::Info, &format!("Writer {writer_id} started"));
            let count = random.number().clamp(min, max);
            for i in 0..count {
                rw.write_resource(writer_id as i64 * 100 + i as i64, &*logger);
                writes.fetch_add(1, Ordering::Relaxed);
                pause(pause_between);
            }
            logger.log(
                LogLevel::Info,
                &format!("Writer {writer_id} finished after {count} writes"),
            );
        }));
    }
    join_all(handles);

    logger.log(LogLevel::Info, "All threads completed");
    let final_value = *rw.read();
    Ok(DemoReport {
        reads: reads.load(Ordering::Relaxed),
        writes: writes.load(Ordering::Relaxed),
        final_value,
    })
}

/// A list of string records behind a [`ReadersWriters`] lock.
///
/// ```
/// use readers_writers::demo::SharedDatabase;
/// use readers_writers::logger::MemoryLogger;
///
/// let db = SharedDatabase::new();
/// let logger = MemoryLogger::new();
/// db.add_record("first", &logger);
/// assert_eq!(db.get_record(0, &logger).as_deref(), Some("first"));
/// assert_eq!(db.get_record(5, &logger), None);
/// assert_eq!(db.get_record_count(&logger), 1);
/// ```
#[derive(Debug)]
pub struct SharedDatabase {
    records: ReadersWriters<Vec<String>>,
}

impl Default for SharedDatabase {
    fn default() -> Self {
        SharedDatabase::new()
    }
}

impl SharedDatabase {
    /// An empty database whose accesses do not linger on the lock.
    pub fn new() -> Self {
        SharedDatabase::with_timing(AccessTiming::immediate())
    }

    /// An empty database whose accesses hold the lock for the given times.
    pub fn with_timing(timing: AccessTiming) -> Self {
        SharedDatabase {
            records: ReadersWriters::with_timing(Vec::new(), timing),
        }
    }

    /// Appends a record under the write lock.
    pub fn add_record<L: Logger + ?Sized>(&self, record: impl Into<String>, logger: &L) {
        let record = record.into();
        let mut records = self.records.write();
        logger.log(
            LogLevel::Info,
            &format!("Added record {}: {record}", records.len()),
        );
        records.push(record);
        pause(self.records.timing().write_hold);
    }

    /// Returns a copy of the record at `index`, or `None` with a warning.
    pub fn get_record<L: Logger + ?Sized>(&self, index: usize, logger: &L) -> Option<String> {
        let records = self.records.read();
        pause(self.records.timing().read_hold);
        match records.get(index) {
            Some(record) => {
                logger.log(
                    LogLevel::Info,
                    &format!("Read record at index {index}: {record}"),
                );
                Some(record.clone())
            }
            None => {
                logger.log(
                    LogLevel::Warning,
                    &format!("Invalid record index: {index}"),
                );
                None
            }
        }
    }

    /// Number of records, read under the read lock.
    pub fn get_record_count<L: Logger + ?Sized>(&self, logger: &L) -> usize {
        let count = {
            let records = self.records.read();
            pause(self.records.timing().read_hold);
            records.len()
        };
        logger.log(LogLevel::Info, &format!("Current record count: {count}"));
        count
    }
}

/// How often a worker checks the start flag.
const START_POLL: Duration = Duration::from_millis(1);

/// Blocks until `started` is raised.
///
/// A worker that dies before this point leaves nobody stuck: the caller
/// raises the flag on its own schedule and sees the panic on join.
fn wait_for_start(started: &AtomicBool) {
    while !started.load(Ordering::Acquire) {
        pause(START_POLL);
    }
}

/// Runs readers and writers against a [`SharedDatabase`] for a fixed time.
///
/// Workers come up first and wait for a common start signal; after
/// `run_time` a stop flag ends every worker at its next operation boundary.
/// A panicking worker is re-raised on the calling thread.
pub fn run_database_demo<L, G>(
    config: &DatabaseDemoConfig,
    logger: Arc<L>,
    random: Arc<G>,
) -> Result<DemoReport, ConfigError>
where
    L: Logger + 'static,
    G: RandomGenerator + 'static,
{
    config.validate()?;
    logger.log(LogLevel::Info, "Starting shared database example");

    let db = Arc::new(SharedDatabase::with_timing(config.timing));
    for i in 0..config.initial_records {
        db.add_record(format!("Initial record {i}"), &*logger);
    }

    let started = Arc::new(AtomicBool::new(false));
    let done = Arc::new(AtomicBool::new(false));
    let reads = Arc::new(AtomicU64::new(0));
    let writes = Arc::new(AtomicU64::new(0));
    let (min, max) = (config.min_operations, config.max_operations);

    let mut handles = Vec::with_capacity(config.readers + config.writers);
    for writer_id in 0..config.writers {
        let (db, logger, random, started, done, writes) = (
            Arc::clone(&db),
            Arc::clone(&logger),
            Arc::clone(&random),
            Arc::clone(&started),
            Arc::clone(&done),
            Arc::clone(&writes),
        );
        let divisor = config.writer_pause_divisor.max(1);
        handles.push(thread::spawn(move || {
            logger.log(LogLevel::Info, &format!("Writer {writer_id} waiting to start"));
            wait_for_start(&started);
            let operations = random.number().clamp(min, max);
            logger.log(
                LogLevel::Info,
                &format!("Writer {writer_id} starting with {operations} operations"),
            );
            for op in 0..operations {
                if done.load(Ordering::Acquire) {
                    break;
                }
                db.add_record(format!("Record from writer {writer_id}, op {op}"), &*logger);
                writes.fetch_add(1, Ordering::Relaxed);
                pause(random_pause(&*random, divisor));
            }
            logger.log(LogLevel::Info, &format!("Writer {writer_id} finished"));
        }));
    }
    for reader_id in 0..config.readers {
        let (db, logger, random, started, done, reads) = (
            Arc::clone(&db),
            Arc::clone(&logger),
            Arc::clone(&random),
            Arc::clone(&started),
            Arc::clone(&done),
            Arc::clone(&reads),
        );
        let divisor = config.reader_pause_divisor.max(1);
        handles.push(thread::spawn(move || {
            logger.log(LogLevel::Info, &format!("Reader {reader_id} waiting to start"));
            wait_for_start(&started);
            let operations = random.number().clamp(min, max);
            logger.log(
                LogLevel::Info,
                &format!("Reader {reader_id} starting with {operations} operations"),
            );
            for op in 0..operations {
                if done.load(Ordering::Acquire) {
                    break;
                }
                let count = db.get_record_count(&*logger);
                reads.fetch_add(1, Ordering::Relaxed);
                if count > 0 {
                    let index = (random.number() % count as u64) as usize;
                    if let Some(record) = db.get_record(index, &*logger) {
                        reads.fetch_add(1, Ordering::Relaxed);
                        logger.log(
                            LogLevel::Info,
                            &format!("Reader {reader_id}, op {op}: read record {index}: {record}"),
                        );
                    }
                }
                pause(random_pause(&*random, divisor));
            }
            logger.log(LogLevel::Info, &format!("Reader {reader_id} finished"));
        }));
    }

    pause(config.settle);
    logger.log(LogLevel::Info, "Signaling all threads to start");
    started.store(true, Ordering::Release);

    logger.log(
        LogLevel::Info,
        &format!("Running for {:?}", config.run_time),
    );
    pause(config.run_time);
    logger.log(LogLevel::Info, "Signaling threads to finish");
    done.store(true, Ordering::Release);
    join_all(handles);

    let count = db.get_record_count(&*logger);
    logger.log(
        LogLevel::Info,
        &format!("Final database has {count} records"),
    );
    Ok(DemoReport {
        reads: reads.load(Ordering::Relaxed),
        writes: writes.load(Ordering::Relaxed),
        final_value: count as i64,
    })
}

/// `random / divisor` seconds.
fn random_pause<G: RandomGenerator + ?Sized>(random: &G, divisor: u32) -> Duration {
    Duration::from_secs(random.number()) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryLogger;
    use crate::random::UniformRandom;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::mpsc;

    struct Fixed(u64);

    impl RandomGenerator for Fixed {
        fn number(&self) -> u64 {
            self.0
        }
    }

    /// Panics on one exact message, records everything else.
    struct FailOn(&'static str, MemoryLogger);

    impl Logger for FailOn {
        fn log(&self, level: LogLevel, message: &str) {
            if message == self.0 {
                panic!("logger failed on {message:?}");
            }
            self.1.log(level, message);
        }
    }

    fn quick_classic() -> DemoConfig {
        DemoConfig {
            readers: 3,
            writers: 2,
            min_operations: 2,
            max_operations: 4,
            read_pause: Duration::from_millis(1),
            write_pause: Duration::from_millis(1),
            timing: AccessTiming::new(Duration::from_millis(2), Duration::from_millis(3)),
        }
    }

    #[test]
    fn classic_run_counts_every_operation() {
        let logger = Arc::new(MemoryLogger::new());
        let report =
            run_classic(&quick_classic(), Arc::clone(&logger), Arc::new(Fixed(3))).unwrap();

        assert_eq!(report.reads, 9);
        assert_eq!(report.writes, 6);
        // the last write of either writer
        assert!([2, 102].contains(&report.final_value), "{report:?}");
        assert_eq!(logger.count(LogLevel::Warning), 0);
        assert!(logger.contains("Reader 2 finished after 3 reads"));
        assert!(logger.contains("Writer 1 finished after 3 writes"));
    }

    #[test]
    fn classic_run_with_uniform_random() {
        let logger = Arc::new(MemoryLogger::new());
        let random = Arc::new(UniformRandom::new(2, 4).unwrap());
        let report = run_classic(&quick_classic(), logger, random).unwrap();
        assert!((6..=12).contains(&report.reads));
        assert!((4..=8).contains(&report.writes));
    }

    #[test]
    fn contended_run_counts_every_operation() {
        let config = DemoConfig {
            read_pause: Duration::ZERO,
            write_pause: Duration::ZERO,
            timing: AccessTiming::immediate(),
            ..DemoConfig::contended()
        };
        let logger = Arc::new(MemoryLogger::new());
        let report = run_classic(&config, Arc::clone(&logger), Arc::new(Fixed(1))).unwrap();

        // Fixed(1) is clamped up to three operations per thread
        assert_eq!(report.reads, 6);
        assert_eq!(report.writes, 15);
        assert!([2, 102, 202, 302, 402].contains(&report.final_value), "{report:?}");
        assert!(logger.contains("Starting 7 threads"));
        assert!(logger.contains("Writer 4 finished after 3 writes"));
    }

    #[test]
    fn classic_run_rejects_empty_config() {
        let config = DemoConfig {
            readers: 0,
            writers: 0,
            ..quick_classic()
        };
        let result = run_classic(&config, Arc::new(MemoryLogger::new()), Arc::new(Fixed(1)));
        assert_eq!(result, Err(ConfigError::NoThreads));
    }

    #[test]
    fn database_warns_on_invalid_index() {
        let db = SharedDatabase::new();
        let logger = MemoryLogger::new();
        db.add_record("only", &logger);
        assert_eq!(db.get_record(1, &logger), None);
        assert_eq!(logger.count(LogLevel::Warning), 1);
        assert!(logger.contains("Invalid record index: 1"));
    }

    #[test]
    fn database_run_keeps_all_records() {
        let config = DatabaseDemoConfig {
            readers: 4,
            writers: 2,
            initial_records: 5,
            min_operations: 2,
            max_operations: 2,
            settle: Duration::from_millis(10),
            run_time: Duration::from_millis(200),
            // random 0 → no pause between operations
            writer_pause_divisor: 20,
            reader_pause_divisor: 30,
            timing: AccessTiming::immediate(),
        };
        let logger = Arc::new(MemoryLogger::new());
        let report = run_database_demo(&config, Arc::clone(&logger), Arc::new(Fixed(0))).unwrap();

        // Fixed(0) is clamped up to two operations per worker
        assert_eq!(report.writes, 4);
        assert_eq!(report.final_value, 9);
        assert!(logger.contains("Final database has 9 records"));
        assert!(logger.contains("Record from writer 1, op 1"));
        assert_eq!(logger.count(LogLevel::Warning), 0);
    }

    #[test]
    fn database_run_reraises_worker_panic_before_start() {
        let config = DatabaseDemoConfig {
            readers: 2,
            writers: 1,
            initial_records: 1,
            min_operations: 1,
            max_operations: 1,
            settle: Duration::from_millis(10),
            run_time: Duration::from_millis(20),
            writer_pause_divisor: 20,
            reader_pause_divisor: 30,
            timing: AccessTiming::immediate(),
        };
        let logger = Arc::new(FailOn("Writer 0 waiting to start", MemoryLogger::new()));

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                run_database_demo(&config, logger, Arc::new(Fixed(0)))
            }));
            tx.send(outcome.is_err()).unwrap();
        });
        let panicked = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("database run hung after a worker panic");
        assert!(panicked);
    }
}
