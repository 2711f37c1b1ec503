//! Solver tuning knobs
//!
//! All tuning is explicit: callers build a `SolverConfig` and pass it in.

/// Rounding, caching and candidate-pool limits shared by the scorers
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Decimal digits kept in positional frequency tables (default: 5)
    pub frequency_decimals: u32,

    /// Decimal digits kept in word and elimination scores (default: 3)
    pub score_decimals: u32,

    /// Remaining-candidate counts at or below this skip the memo cache (default: 15)
    pub cache_bypass_threshold: usize,

    /// Default size of novelty-ranked candidate pools (default: 12973)
    pub wordlist_limit: usize,

    /// Sizing of elimination candidate pools by remaining options
    pub auto_limit: AutoLimit,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            frequency_decimals: 5,
            score_decimals: 3,
            cache_bypass_threshold: 15,
            wordlist_limit: 12_973,
            auto_limit: AutoLimit::default(),
        }
    }
}

/// Picks how many candidate guesses an elimination ranking evaluates
///
/// The ranking is quadratic in the remaining options, so in slow mode the
/// pool shrinks as options grow to keep a run near `budget_seconds`.
#[derive(Debug, Clone)]
pub struct AutoLimit {
    /// Candidate guesses evaluated per second against a single option
    pub words_per_second: usize,

    /// Target wall time for one ranking in slow mode
    pub budget_seconds: usize,

    /// Scale the pool by option count instead of using `words_per_second` flat
    pub slow: bool,
}

impl Default for AutoLimit {
    fn default() -> Self {
        Self {
            words_per_second: 14_000,
            budget_seconds: 20,
            slow: false,
        }
    }
}

impl AutoLimit {
    /// Candidate pool size for `options` remaining candidates
    ///
    /// Rounded up to the next thousand in slow mode.
    #[must_use]
    pub fn limit_for(&self, options: usize) -> usize {
        if !self.slow {
            return self.words_per_second;
        }
        let budget = self.words_per_second * self.budget_seconds;
        let raw = budget.div_ceil(options.max(1));
        let limit = raw.div_ceil(1000) * 1000;
        log::info!("Using auto limit {limit} with {options} options");
        limit
    }
}

/// Round `value` to `decimals` digits after the point
#[inline]
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
