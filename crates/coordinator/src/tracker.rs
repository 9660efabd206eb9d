//! Responder reaction state machine.

use chrono::{DateTime, Utc};

use dispatch_core::{DeliveryState, ResponderAssignment, TransitionError};

/// An accepted delivery-state transition, ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedTransition {
    /// The state the assignment moves to.
    pub state: DeliveryState,
    /// When the transition was accepted.
    pub response_time: DateTime<Utc>,
}

/// Transition authority for responder assignments.
///
/// The only legal path is `notified -> enroute -> on-site -> completed`,
/// entered at `notified` by fan-out and strictly advancing from there.
/// Rejected requests have no side effect; escalation timing (deciding *when*
/// an unresponsive assignment should be chased) belongs to an external
/// reminder job, not here.
#[derive(Debug, Default)]
pub struct ResponderTracker;

impl ResponderTracker {
    /// Validate a requested transition against an assignment's current state.
    ///
    /// Every accepted transition is timestamped.
    pub fn advance(
        assignment: &ResponderAssignment,
        requested: DeliveryState,
    ) -> Result<AcceptedTransition, TransitionError> {
        let state = assignment.delivery_state.advance_to(requested)?;
        Ok(AcceptedTransition {
            state,
            response_time: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::Channel;

    fn assignment(state: DeliveryState) -> ResponderAssignment {
        ResponderAssignment {
            responder_id: "clinic-a".to_string(),
            channel: Channel::Sms,
            delivery_state: state,
            accepted: true,
            provider_ref: None,
            outcome_error: None,
            notified_at: Utc::now(),
            response_time: None,
        }
    }

    #[test]
    fn test_forward_transitions_accepted() {
        let a = assignment(DeliveryState::Notified);
        let t = ResponderTracker::advance(&a, DeliveryState::Enroute).unwrap();
        assert_eq!(t.state, DeliveryState::Enroute);

        // Skipping ahead is still strictly forward.
        let t = ResponderTracker::advance(&a, DeliveryState::Completed).unwrap();
        assert_eq!(t.state, DeliveryState::Completed);
    }

    #[test]
    fn test_backward_rejected_no_side_effect() {
        let a = assignment(DeliveryState::Completed);
        let err = ResponderTracker::advance(&a, DeliveryState::Enroute).unwrap_err();
        assert_eq!(err.from, "completed");
        assert_eq!(err.to, "enroute");
        // The assignment itself is untouched.
        assert_eq!(a.delivery_state, DeliveryState::Completed);
    }

    #[test]
    fn test_repeat_rejected() {
        let a = assignment(DeliveryState::OnSite);
        assert!(ResponderTracker::advance(&a, DeliveryState::OnSite).is_err());
    }

    #[test]
    fn test_transition_is_timestamped() {
        let before = Utc::now();
        let a = assignment(DeliveryState::Notified);
        let t = ResponderTracker::advance(&a, DeliveryState::OnSite).unwrap();
        assert!(t.response_time >= before);
    }
}
