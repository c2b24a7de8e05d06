//! Module, bug and patch interaction tests.
//!
//! Every case goes through `GameStateMachine::process_action`, so turn
//! checks, target validation, draws and turn advance all take part.

mod common;

use bugsquash::cards::{Color, ModuleState};
use bugsquash::core::{Action, Phase, ValidationError};
use common::{discard_ids, module_state, pid, Table};

/// A bug on a free opponent module attaches and the module becomes bugged.
#[test]
fn test_bug_on_free_module() {
    let mut table = Table::new(2);
    let target = table.install(1, Color::Backend, ModuleState::Free);
    let bug = table.give_bug(0, Color::Backend);
    let mut machine = table.machine();

    let state = machine
        .process_action(&Action::play(pid("p0"), bug).targeting(pid("p1"), target))
        .unwrap();

    assert_eq!(module_state(&state, "p1", target), Some(ModuleState::Bugged));
    assert!(state.piles.discard_pile.is_empty());
    // Played card replaced by one draw.
    assert_eq!(state.players[0].hand.len(), 1);
    assert!(state.is_current(&pid("p1")));
}

/// A bug on a patched module cancels out with the patch.
#[test]
fn test_bug_on_patched_module() {
    let mut table = Table::new(2);
    let target = table.install(1, Color::Mobile, ModuleState::Patched);
    let bug = table.give_bug(0, Color::Multicolor);
    let mut machine = table.machine();

    let state = machine
        .process_action(&Action::play(pid("p0"), bug).targeting(pid("p1"), target))
        .unwrap();

    let module = state.module(&pid("p1"), target).unwrap();
    assert_eq!(module.state, ModuleState::Free);
    assert!(module.bugs.is_empty());
    assert!(module.patches.is_empty());
    assert_eq!(state.piles.discard_pile.len(), 2);
    assert!(discard_ids(&state).contains(&bug));
}

/// A second bug destroys the module and discards everything on it.
#[test]
fn test_bug_on_bugged_module_destroys() {
    let mut table = Table::new(2);
    let target = table.install(1, Color::Frontend, ModuleState::Bugged);
    let first_bug = table.bug_on(1, target);
    let bug = table.give_bug(0, Color::Frontend);
    let mut machine = table.machine();

    let state = machine
        .process_action(&Action::play(pid("p0"), bug).targeting(pid("p1"), target))
        .unwrap();

    assert_eq!(module_state(&state, "p1", target), None);
    assert!(state.players[1].modules.is_empty());
    assert_eq!(discard_ids(&state), vec![target, first_bug, bug]);
}

/// A patch on a bugged module cancels out with the bug.
#[test]
fn test_patch_on_bugged_module() {
    let mut table = Table::new(2);
    let target = table.install(0, Color::DataScience, ModuleState::Bugged);
    let patch = table.give_patch(0, Color::DataScience);
    let mut machine = table.machine();

    let state = machine
        .process_action(&Action::play(pid("p0"), patch).targeting(pid("p0"), target))
        .unwrap();

    assert_eq!(module_state(&state, "p0", target), Some(ModuleState::Free));
    assert_eq!(state.piles.discard_pile.len(), 2);
}

/// Two patches stabilize a module; it then rejects bugs and patches.
#[test]
fn test_second_patch_stabilizes() {
    let mut table = Table::new(2);
    let target = table.install(0, Color::Backend, ModuleState::Patched);
    let patch = table.give_patch(0, Color::Backend);
    let bug = table.give_bug(1, Color::Backend);
    let mut machine = table.machine();

    let state = machine
        .process_action(&Action::play(pid("p0"), patch).targeting(pid("p0"), target))
        .unwrap();
    let module = state.module(&pid("p0"), target).unwrap();
    assert_eq!(module.state, ModuleState::Stabilized);
    assert!(module.is_stabilized);
    assert_eq!(module.patches.len(), 2);

    let before = machine.snapshot();
    let result = machine.process_action(&Action::play(pid("p1"), bug).targeting(pid("p0"), target));
    assert_eq!(result, Err(ValidationError::StabilizedTarget));
    assert_eq!(machine.state(), &before);
}

/// Bugs and patches must match the module color unless either is multicolor.
#[test]
fn test_color_mismatch_rejected() {
    let mut table = Table::new(2);
    let target = table.install(1, Color::Backend, ModuleState::Free);
    let wild_target = table.install(1, Color::Multicolor, ModuleState::Free);
    let bug = table.give_bug(0, Color::Mobile);
    let mut machine = table.machine();

    let before = machine.snapshot();
    assert_eq!(
        machine.process_action(&Action::play(pid("p0"), bug).targeting(pid("p1"), target)),
        Err(ValidationError::ColorMismatch)
    );
    assert_eq!(machine.state(), &before);

    let state = machine
        .process_action(&Action::play(pid("p0"), bug).targeting(pid("p1"), wild_target))
        .unwrap();
    assert_eq!(module_state(&state, "p1", wild_target), Some(ModuleState::Bugged));
}

/// Bugs go on opponents' modules, patches on one's own.
#[test]
fn test_ownership_rules() {
    let mut table = Table::new(2);
    let own = table.install(0, Color::Backend, ModuleState::Free);
    let theirs = table.install(1, Color::Backend, ModuleState::Bugged);
    let bug = table.give_bug(0, Color::Backend);
    let patch = table.give_patch(0, Color::Backend);
    let mut machine = table.machine();

    let self_bug = machine.process_action(&Action::play(pid("p0"), bug).targeting(pid("p0"), own));
    assert!(matches!(self_bug, Err(ValidationError::InvalidTarget(_))));

    let foreign_patch = machine.process_action(&Action::play(pid("p0"), patch).targeting(pid("p1"), theirs));
    assert!(matches!(foreign_patch, Err(ValidationError::InvalidTarget(_))));
}

/// Targeted cards need a target; untargeted ones take none.
#[test]
fn test_target_count() {
    let mut table = Table::new(2);
    let target = table.install(1, Color::Backend, ModuleState::Free);
    let bug = table.give_bug(0, Color::Backend);
    let module = table.give_module(0, Color::Mobile);
    let mut machine = table.machine();

    assert_eq!(
        machine.process_action(&Action::play(pid("p0"), bug)),
        Err(ValidationError::MissingTarget)
    );
    assert!(matches!(
        machine.process_action(&Action::play(pid("p0"), module).targeting(pid("p1"), target)),
        Err(ValidationError::TargetCount { .. })
    ));
}

/// Unknown target players and modules are reported as such.
#[test]
fn test_unknown_targets() {
    let mut table = Table::new(2);
    let target = table.install(1, Color::Backend, ModuleState::Free);
    let bug = table.give_bug(0, Color::Backend);
    let mut machine = table.machine();

    assert_eq!(
        machine.process_action(&Action::play(pid("p0"), bug).targeting(pid("ghost"), target)),
        Err(ValidationError::PlayerNotFound)
    );
    assert_eq!(
        machine.process_action(&Action::play(pid("p0"), bug).targeting(pid("p1"), bugsquash::CardId::new(1))),
        Err(ValidationError::ModuleNotFound)
    );
}

/// At most one module per concrete color; multicolor never collides.
#[test]
fn test_module_colors() {
    let mut table = Table::new(2);
    table.install(0, Color::Backend, ModuleState::Free);
    table.install(0, Color::Multicolor, ModuleState::Free);
    let duplicate = table.give_module(0, Color::Backend);
    let wild = table.give_module(0, Color::Multicolor);
    let mut machine = table.machine();

    assert_eq!(
        machine.process_action(&Action::play(pid("p0"), duplicate)),
        Err(ValidationError::DuplicateColor)
    );
    assert_eq!(
        ValidationError::DuplicateColor.to_string(),
        "Already have this module color"
    );

    let state = machine.process_action(&Action::play(pid("p0"), wild)).unwrap();
    assert_eq!(state.players[0].modules.len(), 3);
}

/// Four bug-free modules win, whatever their state, and end the game.
#[test]
fn test_fourth_module_wins() {
    let mut table = Table::new(2);
    table.install(0, Color::Backend, ModuleState::Stabilized);
    table.install(0, Color::Frontend, ModuleState::Patched);
    table.install(0, Color::Mobile, ModuleState::Free);
    table.install(0, Color::Multicolor, ModuleState::Bugged);
    let module = table.give_module(0, Color::DataScience);
    let mut machine = table.machine();

    let state = machine.process_action(&Action::play(pid("p0"), module)).unwrap();

    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.winner, Some(pid("p0")));
    // The turn does not move once the game is over.
    assert!(state.is_current(&pid("p0")));

    assert_eq!(
        machine.process_action(&Action::pass(pid("p0"))),
        Err(ValidationError::GameFinished)
    );
}

/// Patching the last bug away also wins.
#[test]
fn test_cleaning_a_module_wins() {
    let mut table = Table::new(2);
    table.install(0, Color::Backend, ModuleState::Free);
    table.install(0, Color::Frontend, ModuleState::Free);
    table.install(0, Color::Mobile, ModuleState::Free);
    let bugged = table.install(0, Color::DataScience, ModuleState::Bugged);
    let patch = table.give_patch(0, Color::Multicolor);
    let mut machine = table.machine();

    let state = machine
        .process_action(&Action::play(pid("p0"), patch).targeting(pid("p0"), bugged))
        .unwrap();

    assert_eq!(state.winner, Some(pid("p0")));
}
