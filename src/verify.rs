use std::collections::HashMap;

/// 既知の素数個数表。`(limit, limit 未満の素数の個数)`。
///
/// 出典: 標準的な素数表 / OEIS A006880
pub const PRIME_COUNTS: &[(usize, usize)] = &[
    (10, 4),
    (100, 25),
    (1_000, 168),
    (10_000, 1_229),
    (100_000, 9_592),
    (1_000_000, 78_498),
    (10_000_000, 664_579),
    (100_000_000, 5_761_455),
];

/// 「上限 N に対する既知の素数個数」を引く参照表。
///
/// `PrimeSieve::validate` はこのトレイト越しに照合するため、テストでは任意の表を差し込めます。
pub trait PrimeCountReference {
    /// `limit` 未満の素数の個数。データがなければ None。
    fn known_count(&self, limit: usize) -> Option<usize>;
}

/// `PRIME_COUNTS` を引く組み込みの参照表。
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoricalPrimeCounts;

impl PrimeCountReference for HistoricalPrimeCounts {
    fn known_count(&self, limit: usize) -> Option<usize> {
        PRIME_COUNTS
            .iter()
            .find(|&&(n, _)| n == limit)
            .map(|&(_, count)| count)
    }
}

impl PrimeCountReference for HashMap<usize, usize> {
    fn known_count(&self, limit: usize) -> Option<usize> {
        self.get(&limit).copied()
    }
}
