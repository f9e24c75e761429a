use std::error::Error;

// 篩本体（`sieve`）とベンチマークハーネス（`bench`）で共有するエラー型と進捗情報の定義。
//
// - `SieveError` は入力に起因する失敗だけを表します。
// - 偶数ビットのクリアや件数の不整合はアルゴリズムの欠陥なので、エラーではなく panic で止めます。

/// 篩が扱える最小の上限値。
pub const MIN_LIMIT: usize = 2;

/// 篩とハーネスが返すエラー。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SieveError {
    #[error("limit must be at least 2 (got {limit})")]
    InvalidArgument { limit: usize },

    #[error("benchmark duration must be a finite, non-negative number of seconds (got {0})")]
    InvalidDuration(f64),
}

/// 篩コアの結果型。
pub type SieveResult<T> = Result<T, SieveError>;

/// 設定ファイルの読み書きやレポート出力など、外側の処理で使う結果型。
///
/// - エラーは `Send + Sync` な Box でラップされ、`SieveError` も I/O エラーも同じく `?` で伝播できます。
pub type PrimeResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// 篩処理の進捗情報。
///
/// `PrimeSieve::run_with_progress` が因数 1 つ分の合成数を消し終えるたびに 1 回報告します。
/// - `factor` はその回に使った因数（常に奇数）。
/// - `live_count` はその時点の `count_primes()` の値で、報告をまたいで増えることはありません。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SieveProgress {
    pub factor: usize,
    pub live_count: usize,
}
