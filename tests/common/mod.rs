//! Table builder shared by the integration tests.
//!
//! Builds an in-progress game with hand-picked hands and modules, so a test
//! can set up an exact board instead of fishing for one with seeds.

#![allow(dead_code)]

use bugsquash::cards::{Card, CardId, Color, ModuleInstance, ModuleState, OperationKind};
use bugsquash::core::{EngineConfig, GameRng, GameState, Phase, Player, PlayerId, RoomCode, RoomSettings};
use bugsquash::zones::Piles;
use bugsquash::GameStateMachine;

pub fn pid(id: &str) -> PlayerId {
    PlayerId::new(id)
}

pub struct Table {
    pub state: GameState,
    next_id: u32,
}

impl Table {
    /// Players "p0".."pN", all human, "p0" hosting and to move.
    ///
    /// The draw pile holds `filler` Data Science bugs so draws never run dry.
    pub fn new(players: usize) -> Self {
        let mut state = GameState::new(RoomCode::new("TEST00"), RoomSettings::default().max_players(6));
        for n in 0..players {
            let player = Player::human(pid(&format!("p{n}")), format!("Player {n}"));
            state.players.push_back(if n == 0 { player.as_host() } else { player });
        }
        state.phase = Phase::InProgress;
        state.turn = 1;

        let filler = (0..30).map(|n| Card::bug(CardId::new(9000 + n), Color::DataScience));
        state.piles = Piles::new(filler.collect());

        Self { state, next_id: 1000 }
    }

    fn id(&mut self) -> CardId {
        self.next_id += 1;
        CardId::new(self.next_id)
    }

    /// Put a card in `seat`'s hand.
    pub fn give(&mut self, seat: usize, make: impl FnOnce(CardId) -> Card) -> CardId {
        let id = self.id();
        self.state.players[seat].hand.push_back(make(id));
        id
    }

    pub fn give_module(&mut self, seat: usize, color: Color) -> CardId {
        self.give(seat, |id| Card::module(id, color))
    }

    pub fn give_bug(&mut self, seat: usize, color: Color) -> CardId {
        self.give(seat, |id| Card::bug(id, color))
    }

    pub fn give_patch(&mut self, seat: usize, color: Color) -> CardId {
        self.give(seat, |id| Card::patch(id, color))
    }

    pub fn give_operation(&mut self, seat: usize, effect: OperationKind) -> CardId {
        self.give(seat, |id| Card::operation(id, effect))
    }

    /// Put a module in play for `seat`, with bugs/patches matching `state`.
    pub fn install(&mut self, seat: usize, color: Color, state: ModuleState) -> CardId {
        let module_id = self.id();
        let mut module = ModuleInstance::new(Card::module(module_id, color));
        match state {
            ModuleState::Free => {}
            ModuleState::Bugged => {
                let bug = self.id();
                module.bugs.push_back(Card::bug(bug, color));
            }
            ModuleState::Patched => {
                let patch = self.id();
                module.patches.push_back(Card::patch(patch, color));
            }
            ModuleState::Stabilized => {
                for _ in 0..2 {
                    let patch = self.id();
                    module.patches.push_back(Card::patch(patch, color));
                }
            }
        }
        module.set_state(state);
        self.state.players[seat].modules.push_back(module);
        module_id
    }

    /// Id of the first bug on a module.
    pub fn bug_on(&self, seat: usize, module_id: CardId) -> CardId {
        let module = self.state.players[seat]
            .module(module_id)
            .expect("module should exist");
        module.bugs[0].id
    }

    pub fn machine(self) -> GameStateMachine {
        GameStateMachine::from_state(self.state, EngineConfig::default(), GameRng::new(1))
    }
}

/// Module state, or `None` if the module is gone.
pub fn module_state(state: &GameState, owner: &str, module_id: CardId) -> Option<ModuleState> {
    state.module(&pid(owner), module_id).map(|m| m.state)
}

pub fn discard_ids(state: &GameState) -> Vec<CardId> {
    state.piles.discard_pile.iter().map(|c| c.id).collect()
}
