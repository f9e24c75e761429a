use std::cell::Cell;
use std::collections::HashMap;
use std::path::PathBuf;

use prime_sieve_bench::bench::{run_for_duration, BenchmarkRun, Clock, MonotonicClock};
use prime_sieve_bench::config::{load_config, load_config_or_default, save_config, Config};
use prime_sieve_bench::engine_types::SieveError;
use prime_sieve_bench::output::write_report;
use prime_sieve_bench::sieve::PrimeSieve;
use prime_sieve_bench::verify::HistoricalPrimeCounts;

/// 呼ばれるたびに `step` 秒ずつ進むテスト用クロック。
struct SteppingClock {
    now: Cell<f64>,
    step: f64,
}

impl SteppingClock {
    fn new(step: f64) -> Self {
        Self {
            now: Cell::new(0.0),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now_secs(&self) -> f64 {
        let t = self.now.get();
        self.now.set(t + self.step);
        t
    }
}

fn finished_run(limit: usize, passes: u64, elapsed_secs: f64) -> BenchmarkRun {
    let mut sieve = PrimeSieve::new(limit).unwrap();
    sieve.run();
    BenchmarkRun {
        passes,
        elapsed_secs,
        sieve,
    }
}

fn render(run: &BenchmarkRun, show_results: bool) -> String {
    let mut buf: Vec<u8> = Vec::new();
    write_report(&mut buf, run, show_results, &HistoricalPrimeCounts).expect("write to Vec");
    String::from_utf8(buf).expect("report is UTF-8")
}

fn temp_settings_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("prime-sieve-bench-{}-{name}.toml", std::process::id()))
}

/// 締め切りはパス間でだけ確認される: 開始 0 秒、各パス後に 1, 2, 3 秒と読まれ 3 パスで止まる。
#[test]
fn passes_stop_at_first_check_past_deadline() {
    let clock = SteppingClock::new(1.0);
    let run = run_for_duration(3.0, 1_000, &clock).unwrap();

    assert_eq!(run.passes, 3);
    assert_eq!(run.elapsed_secs, 4.0);
    assert_eq!(run.average_secs(), 4.0 / 3.0);
    assert_eq!(run.sieve.count_primes(), 168);
}

#[test]
fn zero_duration_still_runs_one_pass() {
    let clock = SteppingClock::new(0.5);
    let run = run_for_duration(0.0, 100, &clock).unwrap();
    assert_eq!(run.passes, 1);
    assert!(run.sieve.validate(&HistoricalPrimeCounts));
}

#[test]
fn real_clock_run_is_valid() {
    let run = run_for_duration(0.05, 10_000, &MonotonicClock::new()).unwrap();
    assert!(run.passes >= 1);
    assert!(run.elapsed_secs >= 0.05);
    assert!(run.sieve.validate(&HistoricalPrimeCounts));
}

#[test]
fn invalid_inputs_are_rejected_before_running() {
    let clock = SteppingClock::new(1.0);
    assert_eq!(
        run_for_duration(1.0, 1, &clock).unwrap_err(),
        SieveError::InvalidArgument { limit: 1 }
    );
    assert_eq!(
        run_for_duration(-1.0, 100, &clock).unwrap_err(),
        SieveError::InvalidDuration(-1.0)
    );
    assert!(matches!(
        run_for_duration(f64::NAN, 100, &clock),
        Err(SieveError::InvalidDuration(_))
    ));
    assert_eq!(clock.now.get(), 0.0, "clock must not be read for rejected input");
}

#[test]
fn report_lists_primes_when_requested() {
    let run = finished_run(10, 4, 2.0);
    let expected = "2, 3, 5, 7, \n\
                    Passes: 4, Time: 2, Avg: 0.5, Limit: 10, Count: 4, Valid: true\n\
                    \n\
                    davepl;4;2;1;algorithm=base,faithful=yes\n";
    assert_eq!(render(&run, true), expected);
}

#[test]
fn report_without_results_starts_with_blank_line() {
    let run = finished_run(1_000_000, 20, 5.0);
    let expected = "\n\
                    Passes: 20, Time: 5, Avg: 0.25, Limit: 1000000, Count: 78498, Valid: true\n\
                    \n\
                    davepl;20;5;1;algorithm=base,faithful=yes\n";
    assert_eq!(render(&run, false), expected);
}

/// 奇数の素数を上限にしても件数の自己チェックは通り、表にないので Valid は false。
#[test]
fn report_for_untabled_odd_prime_limit() {
    let run = finished_run(11, 1, 1.5);
    let report = render(&run, true);
    assert!(report.starts_with("2, 3, 5, 7, \n"), "{report}");
    assert!(report.contains("Limit: 11, Count: 4, Valid: false"), "{report}");
}

#[test]
fn report_uses_supplied_reference_table() {
    let run = finished_run(50, 1, 1.0);
    let table: HashMap<usize, usize> = [(50, 15)].into_iter().collect();
    let mut buf: Vec<u8> = Vec::new();
    write_report(&mut buf, &run, false, &table).unwrap();
    let report = String::from_utf8(buf).unwrap();
    assert!(report.contains("Count: 15, Valid: true"), "{report}");
}

#[test]
fn config_round_trips_through_toml() {
    let path = temp_settings_path("round-trip");
    let cfg = Config {
        limit: 10_000,
        duration_secs: 0.25,
        show_results: true,
    };
    save_config(&cfg, &path).unwrap();
    let loaded = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, cfg);
}

#[test]
fn missing_config_fields_fall_back_to_defaults() {
    let path = temp_settings_path("partial");
    std::fs::write(&path, "limit = 100\n").unwrap();
    let loaded = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.limit, 100);
    assert_eq!(loaded.duration_secs, 5.0);
    assert!(!loaded.show_results);
}

#[test]
fn absent_config_file_yields_defaults() {
    let path = temp_settings_path("absent");
    let cfg = load_config_or_default(&path).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.limit, 1_000_000);
    assert!(!path.exists(), "loading defaults must not create the file");
}

#[test]
fn malformed_config_is_an_error() {
    let path = temp_settings_path("malformed");
    std::fs::write(&path, "limit = \"lots\"\n").unwrap();
    let result = load_config(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}
