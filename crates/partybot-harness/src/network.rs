//! Scripted in-process network.
//!
//! [`SimNetwork`] wires a scripted [`SimSession`] and a [`SimCoordinator`]
//! together so the whole bot can run without a real transport:
//!
//! 1. `connect` succeeds and emits `Connected`
//! 2. `log_on` is accepted (or rejected, if the script says so)
//! 3. the coordinator welcomes the bot after a number of hellos
//! 4. after the first welcome, the scripted friend requests arrive on the
//!    session stream and the scripted party invites appear in the cache

use std::sync::Arc;

use partybot_core::{FriendRelationship, FriendStateEvent, InboundEvent, PartyInvite, SteamId};

use crate::{LogOnReply, SimCoordinator, SimSession};

/// What the simulated network does once the bot connects.
#[derive(Debug, Clone)]
pub struct NetworkScript {
    /// Reject log-on with this reason instead of accepting it.
    pub reject_log_on: Option<String>,
    /// Hellos needed before the coordinator answers.
    pub welcome_after_hellos: u64,
    /// Accounts sending friend requests after the first welcome.
    pub friend_requests: Vec<SteamId>,
    /// Party invites created after the first welcome.
    pub party_invites: Vec<PartyInvite>,
}

impl Default for NetworkScript {
    fn default() -> Self {
        Self {
            reject_log_on: None,
            welcome_after_hellos: 3,
            friend_requests: Vec::new(),
            party_invites: Vec::new(),
        }
    }
}

impl NetworkScript {
    /// One friend request and one party invite, after three hellos.
    pub fn demo() -> Self {
        let host = SteamId::from_account_id(90_210);
        Self {
            friend_requests: vec![host],
            party_invites: vec![PartyInvite {
                group_id: 24_680_135_790,
                sender_id: host,
                sender_name: "demo-host".to_string(),
            }],
            ..Self::default()
        }
    }
}

/// A session and coordinator sharing one scripted network.
pub struct SimNetwork {
    /// Session side.
    pub session: Arc<SimSession>,
    /// Coordinator side.
    pub coordinator: Arc<SimCoordinator>,
}

impl SimNetwork {
    /// Build a network following `script`.
    pub fn new(script: NetworkScript) -> Self {
        let reply = match script.reject_log_on {
            Some(reason) => LogOnReply::Reject(reason),
            None => LogOnReply::Accept,
        };
        let session = SimSession::scripted(reply);
        let injector = session.injector();

        let friend_requests = script.friend_requests;
        let party_invites = script.party_invites;
        let social = injector.clone();
        let coordinator = SimCoordinator::new()
            .with_welcome(injector, script.welcome_after_hellos)
            .on_first_welcome(move |coordinator| {
                for steam_id in friend_requests {
                    social.inject(InboundEvent::FriendState(FriendStateEvent {
                        steam_id,
                        relationship: FriendRelationship::RequestRecipient,
                    }));
                }
                for invite in party_invites {
                    coordinator.publish_invite(invite);
                }
            });

        Self { session: Arc::new(session), coordinator: Arc::new(coordinator) }
    }
}
