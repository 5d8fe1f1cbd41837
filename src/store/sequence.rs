//! Sequential plant ID allocation.
//!
//! A new plant gets one more than the highest `plant_id` handed out so far,
//! or `1` for an empty collection. Both stores perform the read and the
//! increment as one atomic step so concurrent inserts never share an ID.

/// Next identifier after `current_max`.
pub fn next_plant_id(current_max: Option<i64>) -> i64 {
    current_max.map_or(1, |max| max + 1)
}

/// Advances the counter row and returns the allocated ID.
///
/// The row lock taken by the upsert serializes concurrent allocations, and
/// `GREATEST` keeps the counter ahead of rows inserted before it existed.
pub(crate) const NEXT_PLANT_ID_SQL: &str = r#"
INSERT INTO plant_id_counter (name, value)
VALUES ('plants', (SELECT COALESCE(MAX(plant_id), 0) + 1 FROM plants))
ON CONFLICT (name) DO UPDATE
SET value = GREATEST(plant_id_counter.value, (SELECT COALESCE(MAX(plant_id), 0) FROM plants)) + 1
RETURNING value
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_plant_id() {
        assert_eq!(next_plant_id(None), 1);
        assert_eq!(next_plant_id(Some(1)), 2);
        assert_eq!(next_plant_id(Some(41)), 42);
    }
}
