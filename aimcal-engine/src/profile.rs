//! Game profiles
//!
//! A profile names a game and says how its sensitivity setting maps to
//! rotation. Persisted profiles always carry a yaw constant; the cm/360
//! profile is virtual and only exists in the list handed to a UI.
//!
//! The scale serializes as a bare number (`yaw = 0.022`) and accepts the
//! string `"cm/360"` for the virtual entry, so a list that round-trips through
//! a UI does not break the store.

use crate::error::{positive, EngineError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display name of the virtual cm/360 profile
pub const CM360_NAME: &str = "cm/360";

/// How a game's sensitivity value relates to mouse counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// The sensitivity value is itself a cm/360 distance
    Cm360,
    /// Degrees turned per count per unit of sensitivity
    Yaw(f64),
}

impl Scale {
    /// Yaw constant, if this is a yaw-based scale
    pub fn yaw(&self) -> Option<f64> {
        match self {
            Scale::Cm360 => None,
            Scale::Yaw(yaw) => Some(*yaw),
        }
    }

    /// Check the yaw constant is usable
    pub fn validate(&self) -> Result<()> {
        match self {
            Scale::Cm360 => Ok(()),
            Scale::Yaw(yaw) => positive("yaw", *yaw).map(|_| ()),
        }
    }
}

fn serialize_scale<S: Serializer>(scale: &Scale, s: S) -> std::result::Result<S::Ok, S::Error> {
    match scale {
        Scale::Cm360 => s.serialize_str(CM360_NAME),
        Scale::Yaw(yaw) => s.serialize_f64(*yaw),
    }
}

fn deserialize_scale<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Scale, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScaleRepr {
        Yaw(f64),
        Name(String),
    }

    match ScaleRepr::deserialize(d)? {
        ScaleRepr::Yaw(yaw) if yaw.is_finite() && yaw > 0.0 => Ok(Scale::Yaw(yaw)),
        ScaleRepr::Yaw(yaw) => Err(serde::de::Error::custom(format!(
            "yaw must be positive, got {yaw}"
        ))),
        ScaleRepr::Name(name) if name == CM360_NAME || name == "cm360" => Ok(Scale::Cm360),
        ScaleRepr::Name(name) => Err(serde::de::Error::custom(format!(
            "unknown scale: \"{name}\""
        ))),
    }
}

/// A named game and its sensitivity scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProfile {
    pub name: String,
    #[serde(
        rename = "yaw",
        serialize_with = "serialize_scale",
        deserialize_with = "deserialize_scale"
    )]
    pub scale: Scale,
}

impl GameProfile {
    /// Create a yaw-based profile
    pub fn new(name: impl Into<String>, yaw: f64) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::InvalidParameter(
                "game name must not be empty".to_string(),
            ));
        }
        positive("yaw", yaw)?;
        Ok(Self {
            name,
            scale: Scale::Yaw(yaw),
        })
    }

    /// The virtual cm/360 profile
    pub fn cm360() -> Self {
        Self {
            name: CM360_NAME.to_string(),
            scale: Scale::Cm360,
        }
    }

    pub fn is_cm360(&self) -> bool {
        self.scale == Scale::Cm360
    }
}

/// Build the list shown to the user: the cm/360 entry followed by the stored
/// profiles in their original order.
pub fn game_list(stored: &[GameProfile]) -> Vec<GameProfile> {
    std::iter::once(GameProfile::cm360())
        .chain(stored.iter().filter(|p| !p.is_cm360()).cloned())
        .collect()
}

/// Find a profile by name (case-insensitive)
pub fn find<'a>(list: &'a [GameProfile], name: &str) -> Option<&'a GameProfile> {
    list.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
