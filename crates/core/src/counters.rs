//! The denormalized `recommendation_count` on a query.
//!
//! Each recommendation that references a query earns it exactly one unit of
//! credit. Counts are adjusted only by recommendation create/delete and are
//! floored at zero.

/// A single adjustment to a query's recommendation count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterDelta {
    /// A recommendation was created.
    Credit,
    /// A recommendation was deleted.
    Debit,
}

impl CounterDelta {
    /// Signed amount added to the stored count.
    pub fn amount(self) -> i32 {
        match self {
            CounterDelta::Credit => 1,
            CounterDelta::Debit => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_and_debit_cancel_out() {
        assert_eq!(CounterDelta::Credit.amount() + CounterDelta::Debit.amount(), 0);
    }

    #[test]
    fn debit_is_a_single_unit() {
        assert_eq!(CounterDelta::Debit.amount(), -1);
    }
}
