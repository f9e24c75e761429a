use std::time::Instant;

use crate::engine_types::{SieveError, SieveResult, MIN_LIMIT};
use crate::sieve::PrimeSieve;

/// 単調増加する時刻源。経過時間は 2 回の `now_secs` の差で求める。
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// `std::time::Instant` による実時間クロック。生成時点を 0 秒とする。
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// 一定時間ぶんのベンチマーク結果。
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    /// 完了したパス数（1 以上）。
    pub passes: u64,
    /// 最初のパス開始から最後のパス終了までの実測秒数。
    pub elapsed_secs: f64,
    /// 最後のパスで使った篩。レポート用。
    pub sieve: PrimeSieve,
}

impl BenchmarkRun {
    /// 1 パスあたりの平均秒数。
    pub fn average_secs(&self) -> f64 {
        self.elapsed_secs / self.passes as f64
    }
}

/// `duration_secs` 秒が経過するまで、篩の生成と実行を繰り返す。
///
/// - 締め切りはパスとパスの間でだけ確認する。締め切り前に始まったパスは最後まで走る。
/// - レポート用の篩を必ず残すため、`duration_secs` が 0 でも最低 1 パスは実行する。
/// - パスごとに新しい `PrimeSieve` を作り、前のパスの状態は一切引き継がない。
pub fn run_for_duration(
    duration_secs: f64,
    limit: usize,
    clock: &impl Clock,
) -> SieveResult<BenchmarkRun> {
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return Err(SieveError::InvalidDuration(duration_secs));
    }
    if limit < MIN_LIMIT {
        return Err(SieveError::InvalidArgument { limit });
    }

    log::info!("Benchmarking sieve up to {limit} for {duration_secs} s");

    let start = clock.now_secs();
    let mut passes = 0u64;

    let sieve = loop {
        let mut sieve = PrimeSieve::new(limit)?;
        sieve.run();
        passes += 1;
        log::trace!("Pass {passes} finished");

        if clock.now_secs() - start >= duration_secs {
            break sieve;
        }
    };

    let elapsed_secs = clock.now_secs() - start;
    log::info!(
        "Benchmark finished: {passes} passes in {elapsed_secs:.3} s ({:.6} s/pass)",
        elapsed_secs / passes as f64
    );

    Ok(BenchmarkRun {
        passes,
        elapsed_secs,
        sieve,
    })
}
