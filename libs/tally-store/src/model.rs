//! Calculation record model

use chrono::{DateTime, Local};
use tally_engine::{format_value, Operator};

/// Timestamp pattern for record keys: fixed-width, lexicographically
/// sortable, second resolution
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Format an instant as a record key, e.g. `20250520143055`
pub fn format_timestamp(instant: DateTime<Local>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// One completed arithmetic operation.
///
/// Created when a calculation succeeds, immutable thereafter. The
/// formatted timestamp is the record's unique key; two calculations
/// completing in the same second collide and the later insert is
/// rejected by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRecord {
    pub timestamp: String,
    pub operand1: f64,
    pub operator: Operator,
    pub operand2: f64,
    pub result: f64,
}

impl CalculationRecord {
    /// Record stamped with the given instant
    pub fn at(
        instant: DateTime<Local>,
        operand1: f64,
        operator: Operator,
        operand2: f64,
        result: f64,
    ) -> Self {
        Self {
            timestamp: format_timestamp(instant),
            operand1,
            operator,
            operand2,
            result,
        }
    }

    /// Record stamped with the current local time
    pub fn now(operand1: f64, operator: Operator, operand2: f64, result: f64) -> Self {
        Self::at(Local::now(), operand1, operator, operand2, result)
    }

    /// History line rendering:
    /// `<timestamp> - <operand1> <operator> <operand2> = <result>`
    pub fn to_line(&self) -> String {
        format!(
            "{} - {} {} {} = {}",
            self.timestamp,
            format_value(self.operand1),
            self.operator,
            format_value(self.operand2),
            format_value(self.result)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 5, 20, 14, 30, 55).unwrap()
    }

    #[test]
    fn timestamp_is_fixed_width_and_sortable() {
        let ts = format_timestamp(fixed_instant());
        assert_eq!(ts, "20250520143055");
        assert_eq!(ts.len(), 14);
    }

    #[test]
    fn line_rendering_matches_contract() {
        let record = CalculationRecord::at(fixed_instant(), 12.0, Operator::Add, 3.0, 15.0);
        assert_eq!(record.to_line(), "20250520143055 - 12.0 + 3.0 = 15.0");
    }
}
