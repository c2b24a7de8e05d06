//! In-memory room registry.
//!
//! Rooms are independent: each sits behind its own mutex, so actions in
//! different rooms run in parallel while actions in one room are serialized.
//! The room map itself is only write-locked to add or drop a room.
//!
//! Lock order is rooms map, then room, then the members index. Nothing ever
//! waits on a room while holding the members index.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::code::{is_well_formed, unique_code};
use crate::core::{
    Action, EngineConfig, EngineError, GameRng, GameState, LifecycleError, Player, PlayerId, PlayerView,
    RoomCode, RoomSettings,
};
use crate::rules::GameStateMachine;

type Room = Arc<Mutex<GameStateMachine>>;

/// Every active room in the process.
pub struct RoomRegistry {
    config: EngineConfig,
    rooms: RwLock<FxHashMap<RoomCode, Room>>,
    /// Which room each player sits in.
    members: RwLock<FxHashMap<PlayerId, RoomCode>>,
    /// Root stream; each room forks its own from it.
    rng: Mutex<GameRng>,
    codes: Mutex<GameRng>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RoomRegistry {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let codes = rng.labelled("room-codes");
        Self {
            config,
            rooms: RwLock::new(FxHashMap::default()),
            members: RwLock::new(FxHashMap::default()),
            rng: Mutex::new(rng),
            codes: Mutex::new(codes),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open a room with `host` seated and any AI seats filled.
    ///
    /// A host already seated elsewhere leaves that room first.
    pub fn create_room(
        &self,
        settings: RoomSettings,
        host: PlayerId,
        nickname: &str,
    ) -> Result<RoomCode, LifecycleError> {
        settings.validate(&self.config)?;
        self.leave_current(&host);

        let mut rooms = write(&self.rooms);
        let code = unique_code(self.config.room_code_length, &mut lock(&self.codes), |c| {
            rooms.contains_key(c)
        });
        let room_rng = lock(&self.rng).split();

        let ai_players = settings.ai_players;
        let mut machine = GameStateMachine::new(code.clone(), settings, self.config.clone(), room_rng);
        machine.seat(Player::human(host.clone(), nickname).as_host())?;
        for n in 1..=ai_players {
            let id = PlayerId::new(format!("ai-{code}-{n}"));
            machine.seat(Player::ai(id, format!("AI {n}")))?;
        }

        rooms.insert(code.clone(), Arc::new(Mutex::new(machine)));
        write(&self.members).insert(host.clone(), code.clone());

        info!(room = %code, host = %host, ai_players, "room created");
        Ok(code)
    }

    /// Seat a player in a waiting room.
    pub fn join_room(&self, code: &RoomCode, player: PlayerId, nickname: &str) -> Result<GameState, LifecycleError> {
        let room = self.room(code)?;
        if self.room_of(&player).as_ref() != Some(code) {
            self.leave_current(&player);
        }

        let mut machine = lock(&room);
        machine.seat(Player::human(player.clone(), nickname))?;
        write(&self.members).insert(player.clone(), code.clone());

        info!(room = %code, player = %player, "player joined");
        Ok(machine.snapshot())
    }

    /// Remove a player. The room is dropped once no human is left.
    pub fn leave_room(&self, code: &RoomCode, player: &PlayerId) -> Result<(), LifecycleError> {
        let room = self.room(code)?;
        let empty = {
            let mut machine = lock(&room);
            machine.remove_player(player)?;
            machine.state().human_count() == 0
        };
        remove_member(&self.members, player, code);

        if empty {
            self.drop_if_abandoned(code);
        }
        Ok(())
    }

    /// Start or restart the game. Host only.
    pub fn start_game(&self, code: &RoomCode, by: &PlayerId) -> Result<GameState, LifecycleError> {
        let room = self.room(code)?;
        let mut machine = lock(&room);
        machine.start(by)
    }

    /// Apply an action in its room and return the new state.
    pub fn process_action(&self, code: &RoomCode, action: &Action) -> Result<GameState, EngineError> {
        let room = self.room(code)?;
        let mut machine = lock(&room);
        let state = machine.process_action(action)?;
        Ok(state)
    }

    /// Mark a player's transport as gone. Their seat and cards are kept.
    ///
    /// Returns the room they were in, if any.
    pub fn handle_disconnect(&self, player: &PlayerId) -> Option<RoomCode> {
        let code = self.room_of(player)?;
        let room = self.room(&code).ok()?;
        lock(&room).set_connected(player, false).ok()?;

        debug!(room = %code, player = %player, "player disconnected");
        Some(code)
    }

    /// Move a reconnecting player's seat from `old` to `new`.
    pub fn rebind_identity(
        &self,
        code: &RoomCode,
        old: &PlayerId,
        new: PlayerId,
    ) -> Result<GameState, LifecycleError> {
        let room = self.room(code)?;
        let mut machine = lock(&room);
        machine.rebind_identity(old, new.clone())?;

        let mut members = write(&self.members);
        members.remove(old);
        members.insert(new, code.clone());
        Ok(machine.snapshot())
    }

    /// Full state of a room.
    pub fn snapshot(&self, code: &RoomCode) -> Result<GameState, LifecycleError> {
        let room = self.room(code)?;
        let machine = lock(&room);
        Ok(machine.snapshot())
    }

    /// A room as one player may see it.
    pub fn view(&self, code: &RoomCode, player: &PlayerId) -> Result<PlayerView, LifecycleError> {
        let room = self.room(code)?;
        let machine = lock(&room);
        if machine.state().player(player).is_none() {
            return Err(LifecycleError::PlayerNotInRoom);
        }
        Ok(machine.state().view_for(player))
    }

    #[must_use]
    pub fn room_of(&self, player: &PlayerId) -> Option<RoomCode> {
        read(&self.members).get(player).cloned()
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        read(&self.rooms).len()
    }

    fn room(&self, code: &RoomCode) -> Result<Room, LifecycleError> {
        if !is_well_formed(code.as_str(), self.config.room_code_length) {
            debug!(room = %code, "malformed room code");
            return Err(LifecycleError::RoomNotFound(code.clone()));
        }
        read(&self.rooms)
            .get(code)
            .cloned()
            .ok_or_else(|| LifecycleError::RoomNotFound(code.clone()))
    }

    fn leave_current(&self, player: &PlayerId) {
        if let Some(previous) = self.room_of(player) {
            // Membership can be stale if the room vanished; either way it is cleared.
            if self.leave_room(&previous, player).is_err() {
                remove_member(&self.members, player, &previous);
            }
        }
    }

    /// Drop the room if it still has no humans.
    fn drop_if_abandoned(&self, code: &RoomCode) {
        let mut rooms = write(&self.rooms);
        let abandoned = rooms
            .get(code)
            .is_some_and(|room| lock(room).state().human_count() == 0);
        if !abandoned {
            return;
        }

        if let Some(room) = rooms.remove(code) {
            let machine = lock(&room);
            let mut members = write(&self.members);
            for player in machine.state().players.iter() {
                members.remove(&player.id);
            }
        }
        info!(room = %code, "room closed");
    }
}

fn remove_member(members: &RwLock<FxHashMap<PlayerId, RoomCode>>, player: &PlayerId, code: &RoomCode) {
    let mut members = write(members);
    if members.get(player) == Some(code) {
        members.remove(player);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
