//! Room and game state.
//!
//! ## GameState
//!
//! Everything about one room: seats, turn pointer, piles, phase and winner.
//! It is the snapshot sent to clients after every successful mutation.
//! Collections are `im` persistent structures, so cloning a snapshot is O(1)
//! and the engine can resolve an action on a clone and commit it only if it
//! succeeds.
//!
//! ## PlayerView
//!
//! What one player is allowed to see: their own hand, and only hand sizes
//! for everyone else.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::RoomSettings;
use super::player::{Player, PlayerId};
use crate::cards::{Card, CardId, ModuleInstance};
use crate::zones::Piles;

/// Six-character room code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Room phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Lobby: players may join.
    Waiting,
    InProgress,
    /// Terminal until the host restarts.
    Finished,
}

/// Complete state of one room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub code: RoomCode,
    pub settings: RoomSettings,
    /// Seats in turn order.
    pub players: Vector<Player>,
    pub current_player_index: usize,
    /// Round counter, bumped each time the turn pointer wraps to seat 0.
    pub turn: u32,
    #[serde(flatten)]
    pub piles: Piles,
    pub phase: Phase,
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Create an empty room in the lobby.
    #[must_use]
    pub fn new(code: RoomCode, settings: RoomSettings) -> Self {
        Self {
            code,
            settings,
            players: Vector::new(),
            current_player_index: 0,
            turn: 0,
            piles: Piles::default(),
            phase: Phase::Waiting,
            winner: None,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat index of a player.
    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Get a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Get a mutable player by id.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        let idx = self.player_index(id)?;
        self.players.get_mut(idx)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Check whether it is this player's turn.
    #[must_use]
    pub fn is_current(&self, id: &PlayerId) -> bool {
        self.current_player().is_some_and(|p| &p.id == id)
    }

    /// Players still controlled by people.
    #[must_use]
    pub fn human_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_ai).count()
    }

    /// The host, if seated.
    #[must_use]
    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    /// Locate a module: (seat index, module index).
    #[must_use]
    pub fn find_module(&self, owner: &PlayerId, module_id: CardId) -> Option<(usize, usize)> {
        let seat = self.player_index(owner)?;
        let slot = self.players[seat].module_position(module_id)?;
        Some((seat, slot))
    }

    /// Get a module by owner and id.
    #[must_use]
    pub fn module(&self, owner: &PlayerId, module_id: CardId) -> Option<&ModuleInstance> {
        self.player(owner)?.module(module_id)
    }

    /// Opponents of a player, in turn order.
    pub fn opponents<'a>(&'a self, id: &'a PlayerId) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| &p.id != id)
    }

    /// Every card the room holds, wherever it is.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let on_table: usize = self
            .players
            .iter()
            .map(|p| {
                p.hand.len()
                    + p.modules
                        .iter()
                        .map(|m| 1 + m.bugs.len() + m.patches.len())
                        .sum::<usize>()
            })
            .sum();
        on_table + self.piles.available()
    }

    /// Redacted view for one player.
    #[must_use]
    pub fn view_for(&self, viewer: &PlayerId) -> PlayerView {
        PlayerView {
            code: self.code.clone(),
            phase: self.phase,
            turn: self.turn,
            current_player_id: self.current_player().map(|p| p.id.clone()),
            players: self.players.iter().map(PublicPlayer::from).collect(),
            hand: self
                .player(viewer)
                .map(|p| p.hand.iter().cloned().collect())
                .unwrap_or_default(),
            draw_pile_size: self.piles.draw_pile.len(),
            discard_top: self.piles.discard_top().cloned(),
            winner: self.winner.clone(),
        }
    }
}

/// A seat as seen by other players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    pub is_host: bool,
    pub connected: bool,
    pub hand_size: usize,
    pub modules: Vec<ModuleInstance>,
    pub skip_turns: u32,
}

impl From<&Player> for PublicPlayer {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            is_ai: player.is_ai,
            is_host: player.is_host,
            connected: player.connected,
            hand_size: player.hand.len(),
            modules: player.modules.iter().cloned().collect(),
            skip_turns: player.skip_turns,
        }
    }
}

/// Game state as seen by one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub code: RoomCode,
    pub phase: Phase,
    pub turn: u32,
    pub current_player_id: Option<PlayerId>,
    pub players: Vec<PublicPlayer>,
    /// The viewer's own hand.
    pub hand: Vec<Card>,
    pub draw_pile_size: usize,
    pub discard_top: Option<Card>,
    pub winner: Option<PlayerId>,
}
