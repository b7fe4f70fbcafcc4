//! Protection kinds, sign locations and the parsed protection record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// The kind of protection a sign grants.
///
/// The set is closed. Header matching walks [`ProtectionType::ALL`] in
/// declaration order and takes the first hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionType {
    /// Owner sign: the first profile is the owner.
    Private,
    /// Extra users sign attached next to a private sign.
    MoreUsers,
}

impl ProtectionType {
    /// Every protection type, in match order.
    pub const ALL: [ProtectionType; 2] = [ProtectionType::Private, ProtectionType::MoreUsers];

    /// Stable key used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionType::Private => "private",
            ProtectionType::MoreUsers => "more_users",
        }
    }
}

impl fmt::Display for ProtectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a sign in the world.
///
/// Only used to look the sign up again before writing. Decoding never
/// dereferences it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignLocation {
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SignLocation {
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }
}

impl fmt::Display for SignLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{},{},{}", self.world, self.x, self.y, self.z)
    }
}

/// A parsed protection sign, or one about to be written.
///
/// Profile order is line order on the sign and is preserved through a
/// decode/encode round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct ProtectionRecord {
    pub location: SignLocation,
    pub protection_type: ProtectionType,
    pub profiles: Vec<Profile>,
}

impl ProtectionRecord {
    pub fn new(
        location: SignLocation,
        protection_type: ProtectionType,
        profiles: Vec<Profile>,
    ) -> Self {
        Self {
            location,
            protection_type,
            profiles,
        }
    }

    /// Display names of all profiles, in order.
    pub fn display_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.display_name()).collect()
    }

    /// Whether the record names no profiles at all.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
