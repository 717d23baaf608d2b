//! End-to-end bot scenarios over the simulated network.
//!
//! Each test runs the complete [`Bot`] (startup, dispatcher, heartbeat and
//! invite responder) against a [`SimNetwork`] on a paused tokio clock.

use std::{sync::Arc, time::Duration};

use partybot_app::{Bot, BotError};
use partybot_core::{
    BotConfig, CacheObjectType, ChatChannelType, ConfigError, Credentials, InboundEvent,
    PartyInvite, PersonaState, SessionClient, SteamId,
};
use partybot_harness::{
    CoordinatorCall, LogOnReply, NetworkScript, SessionCall, SimCoordinator, SimNetwork,
    SimSession,
};

fn config() -> BotConfig {
    BotConfig::new(Credentials::new("bot", "hunter2"))
}

fn host() -> SteamId {
    SteamId::from_account_id(90_210)
}

#[tokio::test(start_paused = true)]
async fn demo_network_full_session() {
    let network = SimNetwork::new(NetworkScript::demo());
    let bot = Bot::new(config(), Arc::clone(&network.session), Arc::clone(&network.coordinator));
    let tracker = bot.tracker();
    let task = tokio::spawn(bot.run());

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert!(tracker.is_ready());
    // Welcome arrives on the third hello, after which probing stops.
    assert_eq!(network.coordinator.hello_count(), 3);

    assert_eq!(
        network.session.calls(),
        vec![
            SessionCall::Connect { addr: "162.254.196.83:27018".into() },
            SessionCall::LogOn { username: "bot".into() },
            SessionCall::SetPersonaState(PersonaState::Online),
            SessionCall::SetGamesPlayed(570),
            SessionCall::AddFriend(host()),
        ]
    );
    assert_eq!(
        network.coordinator.party_calls(),
        vec![
            CoordinatorCall::RespondPartyInvite { group_id: 24_680_135_790, accept: true },
            CoordinatorCall::SetMemberPartyCoach(true),
            CoordinatorCall::JoinChatChannel {
                name: "Party".into(),
                channel_type: ChatChannelType::Party,
            },
        ]
    );

    assert!(!task.is_finished());
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn lost_coordinator_session_resumes_probing() {
    let network = SimNetwork::new(NetworkScript { welcome_after_hellos: 2, ..Default::default() });
    let bot = Bot::new(config(), Arc::clone(&network.session), Arc::clone(&network.coordinator));
    let tracker = bot.tracker();
    let task = tokio::spawn(bot.run());

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert!(tracker.is_ready());
    assert_eq!(network.coordinator.hello_count(), 2);

    network.coordinator.drop_session(&network.session.injector());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!tracker.is_ready());

    // Two more hellos and the coordinator welcomes us back.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(tracker.is_ready());
    assert_eq!(network.coordinator.hello_count(), 4);

    task.abort();
}

#[tokio::test(start_paused = true)]
async fn relog_does_not_duplicate_coordinator_tasks() {
    let network = SimNetwork::new(NetworkScript::default());
    let bot = Bot::new(config(), Arc::clone(&network.session), Arc::clone(&network.coordinator));
    let task = tokio::spawn(bot.run());

    tokio::time::sleep(Duration::from_secs(5)).await;
    network.session.inject(InboundEvent::LoggedOff { reason: "ServiceUnavailable".into() });
    network.session.inject(InboundEvent::LoggedOn);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(
        network.coordinator.count(|c| matches!(c, CoordinatorCall::Subscribe(_))),
        1
    );
    assert_eq!(network.coordinator.subscriber_count(CacheObjectType::PartyInvite), 1);

    // The relog reset readiness and one heartbeat re-earned the welcome.
    assert_eq!(network.coordinator.hello_count(), 6);

    task.abort();
}

#[tokio::test(start_paused = true)]
async fn invites_after_welcome_are_each_accepted() {
    let network = SimNetwork::new(NetworkScript::default());
    let bot = Bot::new(config(), Arc::clone(&network.session), Arc::clone(&network.coordinator));
    let task = tokio::spawn(bot.run());
    tokio::time::sleep(Duration::from_secs(5)).await;

    for group_id in [11, 22] {
        network.coordinator.publish_invite(PartyInvite {
            group_id,
            sender_id: host(),
            sender_name: "host".into(),
        });
    }
    tokio::time::sleep(Duration::from_millis(10)).await;

    let responded: Vec<_> = network
        .coordinator
        .party_calls()
        .into_iter()
        .filter_map(|c| match c {
            CoordinatorCall::RespondPartyInvite { group_id, accept: true } => Some(group_id),
            _ => None,
        })
        .collect();
    assert_eq!(responded, vec![11, 22]);

    task.abort();
}

#[tokio::test(start_paused = true)]
async fn rejected_log_on_is_fatal() {
    let network = SimNetwork::new(NetworkScript {
        reject_log_on: Some("InvalidPassword".into()),
        ..Default::default()
    });
    let bot = Bot::new(config(), Arc::clone(&network.session), Arc::clone(&network.coordinator));

    let result = bot.run().await;

    assert!(matches!(result, Err(BotError::Fatal { ref reason }) if reason.contains("InvalidPassword")));
    assert!(network.coordinator.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn fatal_session_error_stops_running_bot() {
    let network = SimNetwork::new(NetworkScript::default());
    let bot = Bot::new(config(), Arc::clone(&network.session), Arc::clone(&network.coordinator));
    let task = tokio::spawn(bot.run());
    tokio::time::sleep(Duration::from_secs(5)).await;

    network.session.inject(InboundEvent::FatalError { reason: "connection reset".into() });
    let result = task.await.unwrap();
    assert!(matches!(result, Err(BotError::Fatal { .. })));

    // Coordinator tasks die with the dispatcher.
    let hellos = network.coordinator.hello_count();
    network.session.inject(InboundEvent::LoggedOn);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(network.coordinator.hello_count(), hellos);
    assert_eq!(network.coordinator.subscriber_count(CacheObjectType::PartyInvite), 0);
}

#[tokio::test]
async fn invalid_config_fails_before_connecting() {
    let session = Arc::new(SimSession::scripted(LogOnReply::Accept));
    let coordinator = Arc::new(SimCoordinator::new());
    let config = BotConfig { server_addr: "not-an-address".into(), ..config() };

    let result = Bot::new(config, Arc::clone(&session), coordinator).run().await;

    assert!(matches!(result, Err(BotError::Config(ConfigError::InvalidServerAddr { .. }))));
    assert!(session.calls().is_empty());
}

#[tokio::test]
async fn missing_password_is_rejected() {
    let session = Arc::new(SimSession::scripted(LogOnReply::Accept));
    let config = BotConfig::new(Credentials::new("bot", ""));

    let result = Bot::new(config, session, Arc::new(SimCoordinator::new())).run().await;

    assert_eq!(result, Err(BotError::Config(ConfigError::MissingPassword)));
}

#[tokio::test]
async fn connect_failure_is_reported() {
    let session = Arc::new(SimSession::scripted(LogOnReply::Accept));
    session.fail_connect("connection refused");

    let result = Bot::new(config(), Arc::clone(&session), Arc::new(SimCoordinator::new())).run().await;

    assert_eq!(
        result,
        Err(BotError::Connect {
            addr: "162.254.196.83:27018".into(),
            reason: "simulated failure: connection refused".into(),
        })
    );
    assert_eq!(session.log_on_count(), 0);
}

#[tokio::test]
async fn taken_event_stream_is_reported() {
    let session = Arc::new(SimSession::new());
    let _stolen = session.take_events();

    let result = Bot::new(config(), Arc::clone(&session), Arc::new(SimCoordinator::new())).run().await;

    assert_eq!(result, Err(BotError::EventsUnavailable));
    assert!(session.calls().is_empty());
}
