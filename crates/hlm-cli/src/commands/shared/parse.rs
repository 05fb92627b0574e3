use chrono::NaiveDate;
use hlm_core::enums::ApprovalStatus;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_optional_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

/// Parse an approval state. Accepts `pl review`, `pl-review` and `pl_review`.
pub fn parse_approval(raw: &str) -> anyhow::Result<ApprovalStatus> {
    let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
    normalized
        .parse()
        .map_err(|error| anyhow::anyhow!("invalid approval '{raw}': {error}"))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}' (expected YYYY-MM-DD): {error}"))
}

pub fn parse_optional_date(raw: Option<&str>, field: &str) -> anyhow::Result<Option<NaiveDate>> {
    raw.map(|value| parse_date(value, field)).transpose()
}

#[cfg(test)]
mod tests {
    use hlm_core::enums::{ApprovalStatus, AttendanceStatus, Role};

    use super::{parse_approval, parse_date, parse_enum, parse_optional_enum};

    #[test]
    fn parses_snake_case_enum() {
        let status: AttendanceStatus = parse_enum("wfh", "status").expect("status should parse");
        assert_eq!(status, AttendanceStatus::Wfh);
    }

    #[test]
    fn approval_accepts_cli_friendly_spellings() {
        for raw in ["client review", "client-review", "Client_Review"] {
            assert_eq!(
                parse_approval(raw).expect("approval should parse"),
                ApprovalStatus::ClientReview
            );
        }
        assert!(parse_approval("approved").is_err());
    }

    #[test]
    fn parses_hyphenated_alias() {
        let role: Role = parse_enum("super-admin", "role").expect("role should parse");
        assert_eq!(role, Role::SuperAdmin);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<AttendanceStatus>("holiday", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'holiday'"));
    }

    #[test]
    fn missing_optional_enum_is_none() {
        let parsed: Option<Role> = parse_optional_enum(None, "role").expect("none is fine");
        assert!(parsed.is_none());
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("2026-10-19", "date").is_ok());
        let err = parse_date("19/10/2026", "date").expect_err("should fail");
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
