//! Image asset identifiers
//!
//! Every image the game draws is named by an [`AssetId`]. The host resolves
//! them once at preload time; the renderer never builds names on the fly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{CarKind, CarType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Background,
    PlayerIdle,
    MinimapBackground,
    Car(CarKind),
}

impl AssetId {
    /// Host-side image name
    pub fn name(&self) -> String {
        match self {
            AssetId::Background => "background".to_string(),
            AssetId::PlayerIdle => "player-idle".to_string(),
            AssetId::MinimapBackground => "minimap-background".to_string(),
            AssetId::Car(kind) => format!("car-{}", kind.slug()),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Every image to preload for the given catalog
pub fn manifest(car_types: &[CarType]) -> Vec<AssetId> {
    let mut assets = vec![
        AssetId::Background,
        AssetId::PlayerIdle,
        AssetId::MinimapBackground,
    ];
    assets.extend(car_types.iter().map(|t| AssetId::Car(t.kind)));
    assets
}
