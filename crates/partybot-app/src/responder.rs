//! Party invite responder.
//!
//! Subscribes once to party invites in the coordinator object cache and, for
//! every newly created invite, accepts it, takes the coach slot and joins the
//! party chat channel. Failures are contained: nothing here stops the loop
//! except the subscription channel closing.

use std::sync::Arc;

use partybot_core::{
    CacheEvent, CacheEventKind, CacheObject, CacheObjectType, ChatChannelType, CoordinatorClient,
    PartyInvite,
};

/// Cache subscription loop accepting party invites.
pub struct InviteResponder<C> {
    coordinator: Arc<C>,
    party_channel: String,
}

impl<C: CoordinatorClient> InviteResponder<C> {
    /// Create a responder that joins `party_channel` after accepting.
    pub fn new(coordinator: Arc<C>, party_channel: impl Into<String>) -> Self {
        Self { coordinator, party_channel: party_channel.into() }
    }

    /// Subscribe and process invites until the subscription closes.
    ///
    /// A failed subscription is logged and not retried.
    pub async fn run(self) {
        let (mut events, _subscription) =
            match self.coordinator.subscribe(CacheObjectType::PartyInvite) {
                Ok(subscribed) => subscribed,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to subscribe to party invites");
                    return;
                },
            };

        tracing::debug!("Subscribed to party invites");
        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }
        tracing::warn!("Party invite subscription closed");
    }

    /// Process one cache notification. Returns `true` if it was an invite we
    /// acted on.
    pub async fn handle(&self, event: CacheEvent) -> bool {
        tracing::debug!(kind = ?event.kind, "Party invite cache event");

        match (event.kind, event.object) {
            (CacheEventKind::Create, CacheObject::PartyInvite(invite)) => {
                self.accept(&invite).await;
                true
            },
            (CacheEventKind::Create, CacheObject::Other { type_id }) => {
                tracing::debug!(type_id, "Ignoring created object of unexpected type");
                false
            },
            _ => false,
        }
    }

    async fn accept(&self, invite: &PartyInvite) {
        tracing::info!(
            group_id = invite.group_id,
            sender = %invite.sender_id,
            "Accepting party invite from {}",
            invite.sender_name
        );

        if let Err(e) = self.coordinator.respond_party_invite(invite.group_id, true) {
            tracing::warn!(group_id = invite.group_id, error = %e, "Failed to accept party invite");
        }
        if let Err(e) = self.coordinator.set_member_party_coach(true) {
            tracing::warn!(error = %e, "Failed to take party coach slot");
        }

        match self.coordinator.join_chat_channel(&self.party_channel, ChatChannelType::Party).await
        {
            Ok(joined) => tracing::info!(
                channel_id = joined.channel_id,
                "Joined chat channel {}",
                joined.channel_name
            ),
            Err(e) => tracing::warn!(
                channel = %self.party_channel,
                error = %e,
                "Failed to join party chat channel"
            ),
        }
    }
}
