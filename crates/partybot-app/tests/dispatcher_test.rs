//! Dispatcher tests.
//!
//! Drive the dispatcher with event sequences against the simulated
//! collaborators and check what it asked the network to do.

use std::{sync::Arc, time::Duration};

use partybot_app::{BotContext, BotError, Dispatcher, SessionState};
use partybot_core::{
    BotConfig, CacheObjectType, CoordinatorStatus, Credentials, FriendRelationship,
    FriendStateEvent, InboundEvent, PersonaState, SteamId,
};
use partybot_harness::{CoordinatorCall, SessionCall, SimCoordinator, SimSession};
use tokio::sync::mpsc;

struct Fixture {
    session: Arc<SimSession>,
    coordinator: Arc<SimCoordinator>,
    dispatcher: Dispatcher<SimSession, SimCoordinator>,
}

fn fixture() -> Fixture {
    fixture_with(BotConfig::new(Credentials::new("bot", "hunter2")))
}

fn fixture_with(config: BotConfig) -> Fixture {
    let session = Arc::new(SimSession::new());
    let coordinator = Arc::new(SimCoordinator::new());
    let ctx = BotContext::new(config, Arc::clone(&session), Arc::clone(&coordinator));

    Fixture { session, coordinator, dispatcher: Dispatcher::new(ctx) }
}

fn status(old: CoordinatorStatus, new: CoordinatorStatus) -> InboundEvent {
    InboundEvent::CoordinatorStatusChanged { old, new }
}

fn friend(account: u32, relationship: FriendRelationship) -> InboundEvent {
    InboundEvent::FriendState(FriendStateEvent {
        steam_id: SteamId::from_account_id(account),
        relationship,
    })
}

/// Let spawned coordinator tasks run up to their next await point.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn log_on_sequence_ends_ready() {
    let mut f = fixture();

    for event in [
        InboundEvent::Connected,
        InboundEvent::LoggedOn,
        status(CoordinatorStatus::HaveSession, CoordinatorStatus::NoSession),
        status(CoordinatorStatus::NoSession, CoordinatorStatus::HaveSession),
    ] {
        f.dispatcher.dispatch(&event).unwrap();
    }

    assert!(f.dispatcher.context().tracker.is_ready());
    assert_eq!(f.session.log_on_count(), 1);
    assert_eq!(f.dispatcher.session_state(), SessionState::LoggedOn);
    assert!(f.dispatcher.tasks_launched());
}

#[tokio::test(start_paused = true)]
async fn log_on_declares_presence_and_game() {
    let mut f = fixture();

    f.dispatcher.dispatch(&InboundEvent::Connected).unwrap();
    f.dispatcher.dispatch(&InboundEvent::LoggedOn).unwrap();

    assert_eq!(
        f.session.calls(),
        vec![
            SessionCall::LogOn { username: "bot".into() },
            SessionCall::SetPersonaState(PersonaState::Online),
            SessionCall::SetGamesPlayed(570),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn logged_on_resets_readiness() {
    let mut f = fixture();

    f.dispatcher.dispatch(&InboundEvent::CoordinatorWelcome).unwrap();
    assert!(f.dispatcher.context().tracker.is_ready());

    f.dispatcher.dispatch(&InboundEvent::LoggedOn).unwrap();
    assert!(!f.dispatcher.context().tracker.is_ready());
}

#[tokio::test(start_paused = true)]
async fn repeated_log_on_launches_tasks_once() {
    let mut f = fixture();

    f.dispatcher.dispatch(&InboundEvent::LoggedOn).unwrap();
    settle().await;
    f.dispatcher.dispatch(&InboundEvent::LoggedOn).unwrap();
    settle().await;

    assert_eq!(
        f.coordinator.count(|c| *c == CoordinatorCall::Subscribe(CacheObjectType::PartyInvite)),
        1
    );
    assert_eq!(f.coordinator.subscriber_count(CacheObjectType::PartyInvite), 1);

    // A single heartbeat: one hello per interval, not two.
    let before = f.coordinator.hello_count();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(f.coordinator.hello_count() - before, 3);
}

#[tokio::test(start_paused = true)]
async fn unvalidated_zero_interval_still_probes() {
    let config = BotConfig {
        heartbeat_interval: Duration::ZERO,
        ..BotConfig::new(Credentials::new("bot", "hunter2"))
    };
    let mut f = fixture_with(config);

    f.dispatcher.dispatch(&InboundEvent::LoggedOn).unwrap();
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    assert_eq!(f.coordinator.hello_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn friend_request_is_accepted_once() {
    let mut f = fixture();

    f.dispatcher.dispatch(&friend(42, FriendRelationship::RequestRecipient)).unwrap();

    assert_eq!(f.session.calls(), vec![SessionCall::AddFriend(SteamId::from_account_id(42))]);
}

#[tokio::test(start_paused = true)]
async fn other_friend_states_make_no_calls() {
    let mut f = fixture();

    for relationship in [
        FriendRelationship::None,
        FriendRelationship::Blocked,
        FriendRelationship::RequestInitiator,
        FriendRelationship::Friend,
        FriendRelationship::Ignored,
        FriendRelationship::IgnoredFriend,
    ] {
        f.dispatcher.dispatch(&friend(42, relationship)).unwrap();
    }

    assert!(f.session.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn collaborator_failures_do_not_stop_dispatch() {
    let mut f = fixture();
    f.session.fail_requests(true);

    f.dispatcher.dispatch(&InboundEvent::Connected).unwrap();
    f.dispatcher.dispatch(&InboundEvent::LoggedOn).unwrap();
    f.dispatcher.dispatch(&friend(7, FriendRelationship::RequestRecipient)).unwrap();

    assert_eq!(f.session.calls().len(), 4);
    assert!(f.dispatcher.tasks_launched());
}

#[tokio::test(start_paused = true)]
async fn fatal_event_stops_the_loop() {
    let f = fixture();
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(InboundEvent::Connected).unwrap();
    tx.send(InboundEvent::LogOnFailed { reason: "InvalidPassword".into() }).unwrap();
    tx.send(InboundEvent::Connected).unwrap();

    let result = f.dispatcher.run(rx).await;

    assert!(matches!(result, Err(BotError::Fatal { ref reason }) if reason.contains("InvalidPassword")));
    // The second Connected was never processed.
    assert_eq!(f.session.log_on_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn non_fatal_events_run_until_stream_ends() {
    let f = fixture();
    let (tx, rx) = mpsc::unbounded_channel();

    for event in [
        InboundEvent::Error { message: "transient".into() },
        InboundEvent::LoggedOff { reason: "LoggedInElsewhere".into() },
        InboundEvent::Disconnected,
        InboundEvent::ChatMessage { from: SteamId::from_account_id(1), message: "hi".into() },
        InboundEvent::Connected,
    ] {
        tx.send(event).unwrap();
    }
    drop(tx);

    let result = f.dispatcher.run(rx).await;

    assert_eq!(result, Err(BotError::EventStreamClosed));
    assert_eq!(f.session.log_on_count(), 1);
}
