//! Fuzz target for the event reaction Policy
//!
//! Ensure arbitrary session event sequences keep the policy consistent
//!
//! # Strategy
//!
//! - Event sequences: every session event kind in arbitrary order
//! - Wire values: coordinator statuses and friend relationships decoded from
//!   raw bytes, including unknown values
//! - Readiness model: track the flag the way the dispatcher would
//!
//! # Invariants
//!
//! - Only log-on failures and fatal errors terminate
//! - Readiness always equals what the last welcome, status or log-on implied
//! - Every log-on requests coordinator tasks exactly once
//! - Only incoming friend requests are accepted
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use partybot_app::{BotAction, Policy, SessionState};
use partybot_core::{
    CoordinatorStatus, DOTA2_APP_ID, FriendRelationship, FriendStateEvent, InboundEvent, SteamId,
};

#[derive(Debug, Clone, Arbitrary)]
enum EventOp {
    Connected,
    LoggedOn,
    LogOnFailed { reason: String },
    FatalError { reason: String },
    LoggedOff { reason: String },
    Disconnected,
    Welcome,
    Status { old: u8, new: u8 },
    Chat { from: u32, message: String },
    Friend { account: u32, relationship: u8 },
    Error { message: String },
}

fn to_event(op: EventOp) -> Option<InboundEvent> {
    let event = match op {
        EventOp::Connected => InboundEvent::Connected,
        EventOp::LoggedOn => InboundEvent::LoggedOn,
        EventOp::LogOnFailed { reason } => InboundEvent::LogOnFailed { reason },
        EventOp::FatalError { reason } => InboundEvent::FatalError { reason },
        EventOp::LoggedOff { reason } => InboundEvent::LoggedOff { reason },
        EventOp::Disconnected => InboundEvent::Disconnected,
        EventOp::Welcome => InboundEvent::CoordinatorWelcome,
        EventOp::Status { old, new } => InboundEvent::CoordinatorStatusChanged {
            old: CoordinatorStatus::from_u8(old)?,
            new: CoordinatorStatus::from_u8(new)?,
        },
        EventOp::Chat { from, message } => {
            InboundEvent::ChatMessage { from: SteamId::from_account_id(from), message }
        }
        EventOp::Friend { account, relationship } => InboundEvent::FriendState(FriendStateEvent {
            steam_id: SteamId::from_account_id(account),
            relationship: FriendRelationship::from_u8(relationship)?,
        }),
        EventOp::Error { message } => InboundEvent::Error { message },
    };
    Some(event)
}

fuzz_target!(|ops: Vec<EventOp>| {
    let mut policy = Policy::new(DOTA2_APP_ID);
    let mut ready = false;
    let mut launches = 0u64;

    // Unknown wire values are dropped before they reach the policy.
    for event in ops.into_iter().filter_map(to_event) {
        let actions = policy.react(&event);

        let terminated = actions.iter().any(|a| matches!(a, BotAction::Terminate { .. }));
        assert_eq!(terminated, event.is_fatal(), "terminate mismatch for {event:?}");

        for action in &actions {
            match action {
                BotAction::SetCoordinatorReady(value) => ready = *value,
                BotAction::LaunchCoordinatorTasks => launches += 1,
                BotAction::AcceptFriend { steam_id } => {
                    let InboundEvent::FriendState(friend) = &event else {
                        panic!("AcceptFriend from non-friend event {event:?}");
                    };
                    assert_eq!(friend.relationship, FriendRelationship::RequestRecipient);
                    assert_eq!(friend.steam_id, *steam_id);
                }
                _ => {}
            }
        }

        match &event {
            InboundEvent::LoggedOn => {
                assert!(!ready);
                assert_eq!(policy.session_state(), SessionState::LoggedOn);
            }
            InboundEvent::CoordinatorWelcome => assert!(ready),
            InboundEvent::CoordinatorStatusChanged { new, .. } => {
                assert_eq!(ready, new.has_session());
            }
            InboundEvent::Disconnected => {
                assert_eq!(policy.session_state(), SessionState::Disconnected);
            }
            _ => {}
        }
    }

    assert_eq!(launches, policy.log_on_count());
});
