//! Match configuration
//!
//! Plain serde types so a match can be described in a JSON file and
//! tweaked from the command line.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::ai::{CriticAI, GreedyAI, MoveSource, RandomAI};
use crate::board::{PlayerId, MAX_PLAYERS};
use crate::runner::DEFAULT_MAX_TURNS;

/// Who controls a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    /// Moves typed at a prompt
    Human,
    /// Uniformly random legal moves
    Random,
    /// Best progress toward the goal
    Greedy,
    /// Random proposals reviewed by the critic
    Critic,
}

impl Default for ControllerKind {
    fn default() -> Self {
        ControllerKind::Greedy
    }
}

impl std::str::FromStr for ControllerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "human" => Ok(ControllerKind::Human),
            "r" | "random" => Ok(ControllerKind::Random),
            "g" | "greedy" | "ai" => Ok(ControllerKind::Greedy),
            "c" | "critic" => Ok(ControllerKind::Critic),
            other => bail!("unknown controller '{}'", other),
        }
    }
}

/// One seat in the config
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    #[serde(default)]
    pub controller: ControllerKind,
    /// Display name (None = generated)
    #[serde(default)]
    pub name: Option<String>,
}

impl SeatConfig {
    pub fn new(controller: ControllerKind) -> Self {
        Self {
            controller,
            name: None,
        }
    }

    /// Name to show for player `player`
    pub fn display_name(&self, player: PlayerId) -> String {
        match (&self.name, self.controller) {
            (Some(name), _) => format!("P{} [{}]", player, name),
            (None, ControllerKind::Human) => format!("Player {} (YOU)", player),
            (None, kind) => format!("P{} [{:?}]", player, kind).to_uppercase(),
        }
    }
}

/// Everything needed to set up a match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub player_count: usize,
    pub seats: Vec<SeatConfig>,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Random seed for reproducibility (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::for_players(2, ControllerKind::Greedy)
    }
}

impl MatchConfig {
    /// All seats with the same controller
    pub fn for_players(player_count: usize, controller: ControllerKind) -> Self {
        Self {
            player_count,
            seats: vec![SeatConfig::new(controller); player_count],
            max_turns: DEFAULT_MAX_TURNS,
            seed: None,
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Replace the seats; player count follows
    pub fn with_seats(mut self, seats: Vec<SeatConfig>) -> Self {
        self.player_count = seats.len();
        self.seats = seats;
        self
    }

    /// Seed for one seat, derived from the match seed
    pub fn seat_seed(&self, player: PlayerId) -> Option<u64> {
        self.seed
            .map(|s| s.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(player as u64))
    }

    /// Move source for an automated seat; None for human or missing seats
    pub fn automated_source(&self, player: PlayerId) -> Option<Box<dyn MoveSource>> {
        let seat = self.seats.get((player as usize).checked_sub(1)?)?;
        let name = seat.display_name(player);
        let seed = self.seat_seed(player);
        let source: Box<dyn MoveSource> = match seat.controller {
            ControllerKind::Human => return None,
            ControllerKind::Random => Box::new(RandomAI::new(name, seed)),
            ControllerKind::Greedy => Box::new(GreedyAI::new(name, seed)),
            ControllerKind::Critic => {
                let proposer = RandomAI::new(format!("{} proposer", name), seed);
                let fallback_seed = seed.map(|s| s ^ 0xC817);
                Box::new(CriticAI::new(name, proposer, fallback_seed))
            }
        };
        Some(source)
    }

    /// Check the config describes a playable match
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.player_count == 0 || self.player_count > MAX_PLAYERS as usize {
            bail!(
                "player count {} out of range 1..={}",
                self.player_count,
                MAX_PLAYERS
            );
        }
        if self.seats.len() != self.player_count {
            bail!(
                "{} seats configured for {} players",
                self.seats.len(),
                self.player_count
            );
        }
        if self.max_turns == 0 {
            bail!("max_turns must be at least 1");
        }
        Ok(())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: MatchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
