//! Rule-based alert reasons. Independent of the classifier: a row can be flagged by the
//! model with no matching rule, and the other way round.

mod reasoner;

pub use reasoner::{AlertReasoner, AlertRule, Comparison, NO_SUSPICIOUS_ACTIVITY};
