//! ID prefix constants.
//!
//! Every row id is `{prefix}-{8 hex chars}`, generated by the database layer
//! (`HlmDb::generate_id`). The prefix makes ids self-describing in audit output.

pub const PREFIX_CLIENT: &str = "cli";
pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_SERVICE: &str = "svc";
pub const PREFIX_PROFILE: &str = "prf";
pub const PREFIX_USER_ROLE: &str = "rol";
pub const PREFIX_TRANSACTION: &str = "fin";
pub const PREFIX_ATTENDANCE: &str = "att";
pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_NOTIFICATION: &str = "ntf";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_SESSION: &str = "ses";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_CLIENT,
    PREFIX_PROJECT,
    PREFIX_TASK,
    PREFIX_SERVICE,
    PREFIX_PROFILE,
    PREFIX_USER_ROLE,
    PREFIX_TRANSACTION,
    PREFIX_ATTENDANCE,
    PREFIX_AUDIT,
    PREFIX_NOTIFICATION,
    PREFIX_USER,
    PREFIX_SESSION,
];

/// Check whether `id` has the shape `{prefix}-{8 hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for prefix in ALL_PREFIXES {
            assert!(seen.insert(prefix), "duplicate prefix {prefix}");
        }
    }

    #[test]
    fn has_prefix_checks_shape() {
        assert!(has_prefix("tsk-a3f8b2c1", PREFIX_TASK));
        assert!(!has_prefix("tsk-a3f8b2c", PREFIX_TASK));
        assert!(!has_prefix("cli-a3f8b2c1", PREFIX_TASK));
        assert!(!has_prefix("tsk-zzzzzzzz", PREFIX_TASK));
    }
}
