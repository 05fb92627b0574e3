/// Upper bound for any list query issued from the CLI.
pub const MAX_LIMIT: u32 = 1_000;

/// Row limit for a list command: `--limit` on the subcommand, then the global
/// `--limit`, then the configured default. Zero means "use the default", and
/// anything above [`MAX_LIMIT`] is capped.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, configured: u32) -> u32 {
    local
        .or(global)
        .filter(|limit| *limit > 0)
        .unwrap_or(configured)
        .min(MAX_LIMIT)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{MAX_LIMIT, effective_limit};

    #[rstest]
    #[case(Some(5), Some(10), 5)]
    #[case(None, Some(10), 10)]
    #[case(None, None, 50)]
    #[case(Some(0), Some(10), 50)]
    #[case(Some(50_000), None, MAX_LIMIT)]
    fn precedence_and_bounds(
        #[case] local: Option<u32>,
        #[case] global: Option<u32>,
        #[case] expected: u32,
    ) {
        assert_eq!(effective_limit(local, global, 50), expected);
    }
}
