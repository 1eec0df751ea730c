//! Session tests through the public API

use blockfall::core::{PieceSupply, Session, SessionConfig};
use blockfall::types::{GameAction, Phase, PREVIEW_LEN};

fn new_session(seed: u64) -> Session {
    Session::with_supply(SessionConfig::default(), PieceSupply::with_seed(seed))
}

fn started(seed: u64) -> Session {
    let mut s = new_session(seed);
    assert!(s.apply_action(GameAction::Start));
    s
}

/// Hard drop until the stack tops out
fn play_to_game_over(s: &mut Session) {
    for _ in 0..1000 {
        if s.phase() == Phase::GameOver {
            return;
        }
        s.apply_action(GameAction::HardDrop);
    }
    panic!("never topped out");
}

#[test]
fn test_menu_then_start() {
    let mut s = new_session(1);
    assert_eq!(s.phase(), Phase::Menu);
    assert!(s.active().is_none());

    // Gameplay input does nothing on the menu.
    assert!(!s.apply_action(GameAction::HardDrop));
    assert!(!s.tick(10_000));

    assert!(s.apply_action(GameAction::Start));
    assert_eq!(s.phase(), Phase::Playing);
    assert!(s.active().is_some());
    assert_eq!(s.preview().len(), PREVIEW_LEN);
    assert_eq!((s.score(), s.lines()), (0, 0));
}

#[test]
fn test_gravity_moves_active_piece_down() {
    let mut s = started(2);
    let y0 = s.active().unwrap().y;

    assert!(!s.tick(249));
    assert_eq!(s.active().unwrap().y, y0);
    assert!(s.tick(1));
    assert_eq!(s.active().unwrap().y, y0 + 1);

    // Three periods worth of time at once step three times.
    s.tick(750);
    assert_eq!(s.active().unwrap().y, y0 + 4);
    assert_eq!(s.score(), 0);
}

#[test]
fn test_hard_drop_locks_and_spawns_from_queue_front() {
    let mut s = started(3);
    let upcoming = s.preview()[0];

    assert!(s.apply_action(GameAction::HardDrop));
    assert_eq!(s.board().settled_count(), 4);
    assert_eq!(s.active().unwrap().kind, upcoming);
    assert!(s.score() > 0);

    let event = s.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(event.line_clear_score, 0);
    assert!(!event.topped_out);
    assert!(s.take_last_event().is_none());
}

#[test]
fn test_soft_drop_repeats_while_held() {
    let mut s = started(4);
    let y0 = s.active().unwrap().y;

    // Pressing steps once right away.
    assert!(s.apply_action(GameAction::SoftDropPressed));
    assert_eq!(s.active().unwrap().y, y0 + 1);
    assert_eq!(s.score(), 1);

    assert!(s.tick(100));
    assert_eq!(s.active().unwrap().y, y0 + 2);
    assert_eq!(s.score(), 2);

    assert!(s.apply_action(GameAction::SoftDropReleased));
    assert!(!s.soft_drop_held());
    assert!(!s.tick(100));
    assert_eq!(s.active().unwrap().y, y0 + 2);
    assert_eq!(s.score(), 2);
}

#[test]
fn test_pause_freezes_the_game() {
    let mut s = started(5);
    let before = s.active();

    assert!(s.apply_action(GameAction::Pause));
    assert_eq!(s.phase(), Phase::Paused);
    assert!(!s.tick(5_000));
    assert!(!s.apply_action(GameAction::MoveLeft));
    assert!(!s.apply_action(GameAction::HardDrop));
    assert_eq!(s.active(), before);

    assert!(s.apply_action(GameAction::Resume));
    assert_eq!(s.phase(), Phase::Playing);
}

#[test]
fn test_hold_once_per_piece() {
    let mut s = started(6);
    let first = s.active().unwrap().kind;
    let upcoming = s.preview()[0];

    assert!(s.apply_action(GameAction::Hold));
    assert_eq!(s.held(), Some(first));
    assert_eq!(s.active().unwrap().kind, upcoming);

    assert!(!s.apply_action(GameAction::Hold));
    assert_eq!(s.held(), Some(first));

    // A locked piece makes hold available again, swapping with the stored one.
    s.apply_action(GameAction::HardDrop);
    let current = s.active().unwrap().kind;
    assert!(s.apply_action(GameAction::Hold));
    assert_eq!(s.active().unwrap().kind, first);
    assert_eq!(s.held(), Some(current));
}

#[test]
fn test_game_over_then_restart() {
    let mut s = started(7);
    play_to_game_over(&mut s);

    assert!(s.take_last_event().unwrap().topped_out);
    let final_score = s.score();
    assert!(!s.apply_action(GameAction::MoveLeft));
    assert!(!s.tick(10_000));
    assert_eq!(s.score(), final_score);

    assert!(s.apply_action(GameAction::Restart));
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.board().settled_count(), 0);
    assert_eq!((s.score(), s.lines()), (0, 0));
    assert!(s.held().is_none());
}

#[test]
fn test_back_to_menu_from_pause_and_game_over() {
    let mut s = started(8);
    s.apply_action(GameAction::Pause);
    assert!(s.apply_action(GameAction::Menu));
    assert_eq!(s.phase(), Phase::Menu);

    s.apply_action(GameAction::Start);
    play_to_game_over(&mut s);
    assert!(s.apply_action(GameAction::Menu));
    assert_eq!(s.phase(), Phase::Menu);

    // Menu is not a gameplay action.
    s.apply_action(GameAction::Start);
    assert!(!s.apply_action(GameAction::Menu));
    assert_eq!(s.phase(), Phase::Playing);
}

#[test]
fn test_quit_from_any_phase() {
    let mut s = new_session(9);
    assert!(!s.quit_requested());
    s.apply_action(GameAction::Quit);
    assert!(s.quit_requested());

    let mut s = started(9);
    s.apply_action(GameAction::Pause);
    s.apply_action(GameAction::Quit);
    assert!(s.quit_requested());
}

#[test]
fn test_snapshot_mirrors_session() {
    let mut s = started(10);
    s.apply_action(GameAction::HardDrop);
    s.apply_action(GameAction::Hold);

    let snap = s.snapshot();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.score, s.score());
    assert_eq!(snap.lines, s.lines());
    assert_eq!(snap.next_queue, s.preview());
    assert_eq!(snap.hold, s.held());
    assert!(!snap.can_hold);
    assert_eq!(snap.active.unwrap().cells, s.active().unwrap().cells());
    assert_eq!(
        snap.board.iter().flatten().filter(|&&v| v != 0).count(),
        s.board().settled_count()
    );
}

#[test]
fn test_same_seed_same_game() {
    let mut a = started(11);
    let mut b = started(11);
    for _ in 0..20 {
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_held_pieces_come_back_inside_the_walls() {
    let mut s = started(12);
    for round in 0..60 {
        if s.phase() == Phase::GameOver {
            s.apply_action(GameAction::Restart);
        }

        // Rotate and push the piece flat against a wall before holding it.
        let wall = if round % 2 == 0 {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        };
        s.apply_action(GameAction::RotateCw);
        for _ in 0..10 {
            s.apply_action(wall);
        }
        if !s.apply_action(GameAction::Hold) {
            continue;
        }
        let held = s.held().unwrap();
        s.apply_action(GameAction::HardDrop);
        if s.phase() != Phase::Playing || !s.apply_action(GameAction::Hold) {
            continue;
        }

        let swapped = s.active().unwrap();
        assert_eq!(swapped.kind, held);
        assert!(
            swapped.cells().iter().all(|&(x, _)| (0..10).contains(&x)),
            "round {}: {:?}",
            round,
            swapped
        );

        let before = s.board().settled_count();
        s.apply_action(GameAction::HardDrop);
        let lock = s.take_last_event().unwrap();
        if !lock.topped_out {
            assert_eq!(
                s.board().settled_count() + 10 * lock.lines_cleared as usize,
                before + 4,
                "round {}",
                round
            );
        }
    }
}
