//! Visibility policy for the free-consultation promo.
//!
//! The predicate is owned by the server; the client caches the decision
//! for the component's lifetime and re-evaluates only when asked (e.g.
//! after the booking dialog closes). While the check is pending nothing
//! is rendered, and a failed check fails closed.

use contracts::scheduling::FirstInvoiceCheck;

use crate::shared::api_client::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eligibility {
    #[default]
    Unknown,
    Eligible,
    NotEligible,
}

impl Eligibility {
    /// Eligible when this would accompany the user's first invoice, or
    /// when they have not yet booked a consultation call.
    pub fn decide(check: &FirstInvoiceCheck) -> Self {
        if check.is_first_invoice || !check.has_ca_booking {
            Eligibility::Eligible
        } else {
            Eligibility::NotEligible
        }
    }

    /// Settle a server response. Failure means not eligible: the promo
    /// is suppressed and the failure is logged, not toasted.
    pub fn settle(result: Result<FirstInvoiceCheck, RequestError>) -> Self {
        match result {
            Ok(check) => Self::decide(&check),
            Err(e) => {
                log::warn!("eligibility check failed, promo stays hidden: {}", e);
                Eligibility::NotEligible
            }
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(is_first_invoice: bool, total_invoices: u32, has_ca_booking: bool) -> FirstInvoiceCheck {
        FirstInvoiceCheck {
            is_first_invoice,
            total_invoices,
            has_ca_booking,
        }
    }

    #[test]
    fn first_invoice_without_booking_is_eligible() {
        assert_eq!(
            Eligibility::decide(&check(true, 1, false)),
            Eligibility::Eligible
        );
    }

    #[test]
    fn repeat_user_with_booking_is_not_eligible() {
        assert_eq!(
            Eligibility::decide(&check(false, 12, true)),
            Eligibility::NotEligible
        );
    }

    #[test]
    fn either_branch_of_the_or_suffices() {
        // First invoice but already booked.
        assert_eq!(
            Eligibility::decide(&check(true, 1, true)),
            Eligibility::Eligible
        );
        // Not the first invoice but never booked.
        assert_eq!(
            Eligibility::decide(&check(false, 5, false)),
            Eligibility::Eligible
        );
    }

    #[test]
    fn failed_check_fails_closed() {
        let settled = Eligibility::settle(Err(RequestError::Unexpected(
            "network unreachable".to_string(),
        )));
        assert_eq!(settled, Eligibility::NotEligible);
        assert!(!settled.is_shown());
    }

    #[test]
    fn unknown_renders_nothing() {
        assert!(!Eligibility::Unknown.is_shown());
    }
}
