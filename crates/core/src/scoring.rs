//! Scoring module - points for cleared rows and the score-driven tick rate
//!
//! - A lock that clears `n` rows scores `n^2 * 100`.
//! - Each tick while accelerating scores 1 point.
//! - The tick interval shrinks with the score:
//!   `INITIAL_TICK_MS / (score + 1)^TICK_DECAY + MINIMUM_TICK_MS`.

use crate::types::{
    INITIAL_TICK_MS, MINIMUM_TICK_MS, SCORE_PER_ACCELERATED_TICK, SCORE_PER_ROW,
    SCORE_ROW_EXPONENT, TICK_DECAY,
};

/// Points for a single lock that cleared `rows` rows.
pub fn calculate_rows_score(rows: u32) -> u32 {
    rows.saturating_pow(SCORE_ROW_EXPONENT)
        .saturating_mul(SCORE_PER_ROW)
}

/// Points for one accelerated tick.
pub fn calculate_accelerated_tick_score() -> u32 {
    SCORE_PER_ACCELERATED_TICK
}

/// Milliseconds between gravity ticks at `score` when not accelerating.
pub fn get_tick_interval_ms(score: u32) -> u32 {
    let decayed = INITIAL_TICK_MS / (score as f64 + 1.0).powf(TICK_DECAY);
    decayed as u32 + MINIMUM_TICK_MS
}
