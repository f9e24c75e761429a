use std::io::{self, Write};

use crate::bench::BenchmarkRun;
use crate::verify::PrimeCountReference;

/// 機械可読行の先頭に付けるラベル。
pub const RESULT_LABEL: &str = "davepl";

/// 機械可読行の末尾に付けるアルゴリズム情報（スレッド数は常に 1）。
pub const RESULT_TAGS: &str = "algorithm=base,faithful=yes";

/// ベンチマーク結果をテキストで書き出す。
///
/// 出力の形:
/// - `show_results` のとき `2, 3, 5, ..., ` の素数行（末尾の改行のみのときは空行）
/// - `Passes: .., Time: .., Avg: .., Limit: .., Count: .., Valid: ..` の要約行
/// - 空行
/// - `davepl;<passes>;<elapsed>;1;algorithm=base,faithful=yes` の機械可読行
///
/// # Panics
///
/// 奇数の走査で数えた個数（+1 は 2 の分）が `count_primes()` と一致しない場合。
/// ビットのインデックス計算が壊れていることを意味するので、そのまま止める。
pub fn write_report<W, R>(
    out: &mut W,
    run: &BenchmarkRun,
    show_results: bool,
    reference: &R,
) -> io::Result<()>
where
    W: Write + ?Sized,
    R: PrimeCountReference + ?Sized,
{
    let sieve = &run.sieve;
    let limit = sieve.limit();

    // 偶数は保持していないので 2 だけは特別扱い
    if show_results {
        write!(out, "2, ")?;
    }

    let mut count = 1usize;
    for n in (3..limit).step_by(2) {
        if sieve.bit_at(n) {
            if show_results {
                write!(out, "{n}, ")?;
            }
            count += 1;
        }
    }

    assert_eq!(
        count,
        sieve.count_primes(),
        "scanned prime count disagrees with stored bit count for limit {limit}"
    );

    writeln!(out)?;
    writeln!(
        out,
        "Passes: {}, Time: {}, Avg: {}, Limit: {}, Count: {}, Valid: {}",
        run.passes,
        run.elapsed_secs,
        run.average_secs(),
        limit,
        count,
        sieve.validate(reference)
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{RESULT_LABEL};{};{};1;{RESULT_TAGS}",
        run.passes, run.elapsed_secs
    )?;
    out.flush()
}
