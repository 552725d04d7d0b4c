pub mod auth;
pub mod events;
pub mod meta;
pub mod tasks;

use chrono::NaiveDate;
use planner_core::PlannerError;

/// Parse a `YYYY-MM-DD` query/body value.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, PlannerError> {
    s.parse()
        .map_err(|_| PlannerError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso() {
        assert_eq!(
            parse_date("2024-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("June 1st").unwrap_err(),
            PlannerError::InvalidDate(_)
        ));
    }
}
