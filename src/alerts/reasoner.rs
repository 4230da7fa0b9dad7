//! Evaluates an ordered threshold rule table against a record's raw values.

use crate::records::SessionRecord;
use serde::{Deserialize, Serialize};

pub const NO_SUSPICIOUS_ACTIVITY: &str = "No suspicious activity detected";

const REASON_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Comparison {
    Gt(f64),
    Lt(f64),
    Eq(f64),
}

impl Comparison {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Comparison::Gt(t) => value > t,
            Comparison::Lt(t) => value < t,
            Comparison::Eq(t) => value == t,
        }
    }
}

/// One predicate: `field <comparison>` → `reason`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub field: String,
    pub comparison: Comparison,
    pub reason: String,
}

impl AlertRule {
    pub fn new(field: impl Into<String>, comparison: Comparison, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            comparison,
            reason: reason.into(),
        }
    }

    /// Reason text when the rule fires. A field that is absent or non-numeric never fires.
    pub fn evaluate(&self, record: &SessionRecord) -> Option<&str> {
        let value = record.number(&self.field)?;
        self.comparison.matches(value).then_some(self.reason.as_str())
    }

    /// Stock rule table, in evaluation order
    pub fn defaults() -> Vec<AlertRule> {
        vec![
            AlertRule::new("network_packet_size", Comparison::Gt(1000.0), "Large network packet size"),
            AlertRule::new("failed_logins", Comparison::Gt(3.0), "Multiple failed login attempts"),
            AlertRule::new("ip_reputation_score", Comparison::Lt(20.0), "Low IP reputation score"),
            AlertRule::new("unusual_time_access", Comparison::Eq(1.0), "Access at unusual time"),
        ]
    }
}

pub struct AlertReasoner {
    rules: Vec<AlertRule>,
}

impl Default for AlertReasoner {
    fn default() -> Self {
        Self::new(AlertRule::defaults())
    }
}

impl AlertReasoner {
    pub fn new(rules: Vec<AlertRule>) -> Self {
        Self { rules }
    }

    /// Matching reasons joined in rule order, or the no-activity sentinel.
    pub fn reason_for(&self, record: &SessionRecord) -> String {
        let reasons: Vec<&str> = self.rules.iter().filter_map(|r| r.evaluate(record)).collect();
        if reasons.is_empty() {
            NO_SUSPICIOUS_ACTIVITY.to_string()
        } else {
            reasons.join(REASON_SEPARATOR)
        }
    }

    pub fn reasons(&self, records: &[SessionRecord]) -> Vec<String> {
        records.iter().map(|r| self.reason_for(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_absent_and_non_numeric_fields() {
        let r = SessionRecord::new("S9")
            .with_text("network_packet_size", "huge")
            .with_number("failed_logins", 9.0);
        assert_eq!(AlertReasoner::default().reason_for(&r), "Multiple failed login attempts");
    }

    #[test]
    fn thresholds_are_strict() {
        let r = SessionRecord::new("S0")
            .with_number("network_packet_size", 1000.0)
            .with_number("failed_logins", 3.0)
            .with_number("ip_reputation_score", 20.0)
            .with_number("unusual_time_access", 0.0);
        assert_eq!(AlertReasoner::default().reason_for(&r), NO_SUSPICIOUS_ACTIVITY);
    }
}
