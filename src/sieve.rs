use bitvec::prelude::*;

use crate::engine_types::{SieveError, SieveProgress, SieveResult, MIN_LIMIT};
use crate::verify::PrimeCountReference;

/// 奇数のみを保持するエラトステネスの篩。
///
/// ストレージの契約:
/// - `bits[i]` は奇数 `2 * i + 1` が素数候補かどうかを表します（メモリ使用量 1/2）。
/// - インデックス 0 は値 1 に対応し、消されることはありませんが素数として数えることもありません。
/// - 偶数は保持せず、常に素数ではないものとして扱います（2 は呼び出し側で特別扱い）。
///
/// 1 回のベンチマークパスごとに新しく作り、`run` を 1 回だけ呼んで捨てる前提です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSieve {
    limit: usize,
    bits: BitVec,
}

impl PrimeSieve {
    /// `limit` 未満の素数を求める篩を作る。ビット配列はすべて 1（素数候補）で初期化される。
    pub fn new(limit: usize) -> SieveResult<Self> {
        if limit < MIN_LIMIT {
            return Err(SieveError::InvalidArgument { limit });
        }

        let len = (limit + 1) / 2;
        log::debug!("Allocating odd-only sieve: limit={limit}, slots={len}");
        Ok(Self {
            limit,
            bits: bitvec![1; len],
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// ビット配列のスロット数（`floor((limit + 1) / 2)`）。
    pub fn storage_len(&self) -> usize {
        self.bits.len()
    }

    /// 生のビット配列（読み取り専用）。
    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    /// `n` が素数候補として残っているか。偶数は状態に関係なく常に false。
    #[inline]
    pub fn bit_at(&self, n: usize) -> bool {
        if n % 2 == 0 {
            return false;
        }
        self.bits.get(n / 2).is_some_and(|b| *b)
    }

    /// 奇数 `n` を合成数として消す。
    ///
    /// # Panics
    ///
    /// `n` が偶数の場合。篩は偶数を消す必要がないので、呼ばれた時点でロジックが壊れている。
    #[inline]
    pub fn clear_bit(&mut self, n: usize) {
        assert!(n % 2 == 1, "attempted to clear even value {n}; evens are never stored");
        self.bits.set(n / 2, false);
    }

    /// 篩を実行する。
    pub fn run(&mut self) {
        self.eliminate(|_, _| {});
        log::debug!("Sieve up to {} finished", self.limit);
    }

    /// 篩を実行し、因数 1 つ分を処理するたびに `progress_cb` へ進捗を報告する。
    ///
    /// 報告のたびに `count_primes` を数え直すため `run` より遅い。ベンチマークのパスでは使わないこと。
    pub fn run_with_progress(&mut self, mut progress_cb: impl FnMut(SieveProgress)) {
        self.eliminate(|sieve, factor| {
            progress_cb(SieveProgress {
                factor,
                live_count: sieve.count_primes(),
            })
        });
        log::debug!("Sieve up to {} finished", self.limit);
    }

    fn eliminate(&mut self, mut on_factor: impl FnMut(&Self, usize)) {
        let q = (self.limit as f64).sqrt();
        let mut factor = 3;

        while (factor as f64) < q {
            factor = self.next_factor(factor);

            // factor * 2 は偶数なので factor * 3 から始め、奇数倍だけを踏むよう factor * 2 ずつ進める
            let step = factor * 2;
            let mut multiple = factor * 3;
            while multiple < self.limit {
                self.clear_bit(multiple);
                multiple += step;
            }

            on_factor(self, factor);
            factor += 2;
        }
    }

    /// `from` 自身を含め、`from` 以上で最初に残っている候補。見つからなければ `from` のまま。
    fn next_factor(&self, from: usize) -> usize {
        (from..self.limit)
            .step_by(2)
            .find(|&n| self.bit_at(n))
            .unwrap_or(from)
    }

    /// `limit` 未満の素数の個数（ただし 2 は常に数えるので、`limit == 2` では 1）。
    ///
    /// 2 の分の 1 と、`[3, limit)` に残っている奇数の個数の和。
    /// 値 1 のスロット（インデックス 0）と、奇数 `limit` 自身のスロットは数えない。
    pub fn count_primes(&self) -> usize {
        let end = self.limit / 2;
        1 + self.bits[1..end].count_ones()
    }

    /// `limit` 未満の素数を昇順に返す。2 を先頭に、以降は `[3, limit)` の奇数。
    pub fn primes(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(2).chain(
            (3..self.limit)
                .step_by(2)
                .filter(move |&n| self.bit_at(n)),
        )
    }

    /// 既知の素数個数と照合する。
    ///
    /// `reference` に `limit` のデータがない場合も false を返すため、false を「不一致」と決めつけないこと。
    pub fn validate<R>(&self, reference: &R) -> bool
    where
        R: PrimeCountReference + ?Sized,
    {
        match reference.known_count(self.limit) {
            Some(expected) => expected == self.count_primes(),
            None => false,
        }
    }
}
