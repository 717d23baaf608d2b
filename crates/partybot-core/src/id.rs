//! Account identifiers.

use std::fmt;

const ACCOUNT_ID_MASK: u64 = 0xFFFF_FFFF;
const INSTANCE_SHIFT: u32 = 32;
const INSTANCE_MASK: u64 = 0x000F_FFFF;
const TYPE_SHIFT: u32 = 52;
const TYPE_MASK: u64 = 0xF;
const UNIVERSE_SHIFT: u32 = 56;

/// Universe of regular accounts.
const UNIVERSE_PUBLIC: u64 = 1;
/// Account type of regular user accounts.
const TYPE_INDIVIDUAL: u64 = 1;
/// Instance used by desktop clients.
const INSTANCE_DESKTOP: u64 = 1;

/// 64-bit account identifier on the game network.
///
/// Bit layout, most significant first: universe (8), account type (4),
/// instance (20), account id (32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteamId(u64);

impl SteamId {
    /// Wrap a raw 64-bit identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Identifier of an individual account in the public universe.
    pub const fn from_account_id(account_id: u32) -> Self {
        Self(
            (UNIVERSE_PUBLIC << UNIVERSE_SHIFT)
                | (TYPE_INDIVIDUAL << TYPE_SHIFT)
                | (INSTANCE_DESKTOP << INSTANCE_SHIFT)
                | account_id as u64,
        )
    }

    /// Raw 64-bit value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Low 32 bits: the per-universe account number.
    pub const fn account_id(self) -> u32 {
        (self.0 & ACCOUNT_ID_MASK) as u32
    }

    /// Account instance.
    pub const fn instance(self) -> u32 {
        ((self.0 >> INSTANCE_SHIFT) & INSTANCE_MASK) as u32
    }

    /// Account type nibble.
    pub const fn account_type(self) -> u8 {
        ((self.0 >> TYPE_SHIFT) & TYPE_MASK) as u8
    }

    /// Universe byte.
    pub const fn universe(self) -> u8 {
        (self.0 >> UNIVERSE_SHIFT) as u8
    }

    fn type_letter(self) -> char {
        match self.account_type() {
            1 => 'U',
            2 => 'M',
            3 => 'G',
            4 => 'A',
            5 => 'P',
            6 => 'C',
            7 => 'g',
            8 => 'T',
            10 => 'a',
            _ => 'I',
        }
    }
}

impl From<u64> for SteamId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Renders the bracketed `[U:1:account]` form.
impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.type_letter(), self.universe(), self.account_id())
    }
}
