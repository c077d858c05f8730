/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Time-derived id that is strictly greater than `previous`
///
/// Uses the current millisecond timestamp and bumps past `previous` when two
/// ids are requested within the same millisecond (or the clock went back).
pub fn next_time_id(previous: Option<u64>) -> u64 {
    let now = now_millis().max(0) as u64;
    match previous {
        Some(prev) if now <= prev => prev + 1,
        _ => now,
    }
}
