//! Query bounds shared by the append-only logs.

/// Upper bound on the number of records a single recency query returns
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Clamp a caller-supplied limit to [`MAX_QUERY_LIMIT`]
pub fn clamp_limit(limit: usize) -> usize {
    limit.min(MAX_QUERY_LIMIT)
}
