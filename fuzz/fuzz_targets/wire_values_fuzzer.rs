//! Fuzz target for wire value decoding
//!
//! Harden decoding of raw numeric values received from the network
//!
//! # Strategy
//!
//! - Raw enum bytes: coordinator status and friend relationship
//! - Cache type ids: arbitrary u32 values
//! - Account ids: arbitrary 64-bit identifiers
//!
//! # Invariants
//!
//! - Decoded values re-encode to the same number
//! - Unknown values decode to `None`, never to a neighbouring variant
//! - Account id fields recombine into the raw identifier
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use partybot_core::{CacheObjectType, CoordinatorStatus, FriendRelationship, SteamId};

#[derive(Debug, Clone, Arbitrary)]
struct WireValues {
    status: u8,
    relationship: u8,
    type_id: u32,
    steam_id: u64,
}

fuzz_target!(|values: WireValues| {
    match CoordinatorStatus::from_u8(values.status) {
        Some(status) => assert_eq!(status as u8, values.status),
        None => assert!(values.status > 6),
    }

    match FriendRelationship::from_u8(values.relationship) {
        Some(relationship) => assert_eq!(relationship as u8, values.relationship),
        None => assert!(values.relationship > 6),
    }

    if let Some(object_type) = CacheObjectType::from_type_id(values.type_id) {
        assert_eq!(object_type.type_id(), values.type_id);
    }

    let id = SteamId::new(values.steam_id);
    let rebuilt = (u64::from(id.universe()) << 56)
        | (u64::from(id.account_type()) << 52)
        | (u64::from(id.instance()) << 32)
        | u64::from(id.account_id());
    assert_eq!(rebuilt, id.raw());
    let _ = id.to_string();

    let account = SteamId::from_account_id(id.account_id());
    assert_eq!(account.account_id(), id.account_id());
    assert_eq!(account.universe(), 1);
});
