//! Pluralization helpers for log lines and diagnostics.

/// Return "s" suffix for plural counts
///
/// - `plural_s(0)` -> `"s"` (0 columns)
/// - `plural_s(1)` -> `""` (1 column)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(1, "column")` -> `"1 column"`
/// - `plural_count(3, "error")` -> `"3 errors"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "value"), "0 values");
        assert_eq!(plural_count(1, "value"), "1 value");
        assert_eq!(plural_count(12, "row"), "12 rows");
    }
}
