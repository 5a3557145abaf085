//! The six correction experts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which correction expert an instruction or result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Skin,
    Lighting,
    Texture,
    Geometry,
    Color,
    Expression,
}

impl AgentKind {
    /// Registry order. Heuristic selection walks the agents in this order.
    pub const ALL: [AgentKind; 6] = [
        AgentKind::Skin,
        AgentKind::Lighting,
        AgentKind::Texture,
        AgentKind::Geometry,
        AgentKind::Color,
        AgentKind::Expression,
    ];

    /// Default execution order when the expression is being corrected.
    pub const CORRECTING_PRIORITY: [AgentKind; 6] = [
        AgentKind::Expression,
        AgentKind::Geometry,
        AgentKind::Skin,
        AgentKind::Lighting,
        AgentKind::Texture,
        AgentKind::Color,
    ];

    /// Default execution order when the expression is preserved.
    /// Expression only runs here when a signal names it, and then last.
    pub const PRESERVING_PRIORITY: [AgentKind; 6] = [
        AgentKind::Geometry,
        AgentKind::Skin,
        AgentKind::Lighting,
        AgentKind::Texture,
        AgentKind::Color,
        AgentKind::Expression,
    ];

    /// Dense index used by the registry table.
    pub fn index(&self) -> usize {
        match self {
            AgentKind::Skin => 0,
            AgentKind::Lighting => 1,
            AgentKind::Texture => 2,
            AgentKind::Geometry => 3,
            AgentKind::Color => 4,
            AgentKind::Expression => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Skin => "skin",
            AgentKind::Lighting => "lighting",
            AgentKind::Texture => "texture",
            AgentKind::Geometry => "geometry",
            AgentKind::Color => "color",
            AgentKind::Expression => "expression",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skin" => Ok(AgentKind::Skin),
            "lighting" | "light" => Ok(AgentKind::Lighting),
            "texture" => Ok(AgentKind::Texture),
            "geometry" => Ok(AgentKind::Geometry),
            "color" | "colour" => Ok(AgentKind::Color),
            "expression" => Ok(AgentKind::Expression),
            _ => Err(format!("Invalid AgentKind: {}", s)),
        }
    }
}
