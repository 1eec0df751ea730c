use blockfall::core::{GameSnapshot, PieceSupply, Session, SessionConfig};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, Phase, PieceKind};

fn playing_snapshot() -> GameSnapshot {
    let mut s = Session::with_supply(SessionConfig::default(), PieceSupply::with_seed(1));
    s.apply_action(GameAction::Start);
    s.snapshot()
}

fn cell_char(fb: &FrameBuffer, x: u16, y: u16) -> char {
    fb.get(x, y).map(|c| c.ch).unwrap_or(' ')
}

#[test]
fn term_view_renders_border_corners() {
    let snap = playing_snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 20x20 board plus border is 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(cell_char(&fb, 0, 0), '┌');
    assert_eq!(cell_char(&fb, 21, 0), '┐');
    assert_eq!(cell_char(&fb, 0, 21), '└');
    assert_eq!(cell_char(&fb, 21, 21), '┘');
}

#[test]
fn term_view_renders_settled_cell_two_chars_wide() {
    let mut snap = playing_snapshot();
    snap.board[19][0] = PieceKind::I.index() as u8 + 1;
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside the border the origin is (1, 1).
    assert_eq!(cell_char(&fb, 1, 20), '█');
    assert_eq!(cell_char(&fb, 2, 20), '█');
    assert_eq!(cell_char(&fb, 3, 20), '·');
}

#[test]
fn term_view_draws_active_piece_cells() {
    let snap = playing_snapshot();
    let active = snap.active.unwrap();
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(22, 22));

    for (x, y) in active.cells {
        let px = 1 + (x as u16) * 2;
        let py = 1 + y as u16;
        assert_eq!(cell_char(&fb, px, py), '█', "cell ({}, {})", x, y);
        assert_eq!(cell_char(&fb, px + 1, py), '█');
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = playing_snapshot();
    snap.score = 1234;
    snap.lines = 10;
    snap.hold = Some(PieceKind::T);

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("1234"));
    assert!(fb.contains_text("LINES"));
    assert!(fb.contains_text("HOLD"));
    assert!(fb.contains_text("NEXT"));

    // Narrow terminals drop the panel but keep the board.
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!fb.contains_text("SCORE"));
}

#[test]
fn term_view_shows_phase_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(70, 26);

    let menu = view.render(&GameSnapshot::default(), vp);
    assert!(menu.contains_text("BLOCKFALL"));
    assert!(menu.contains_text("Enter  start"));

    let mut snap = playing_snapshot();
    assert!(!view.render(&snap, vp).contains_text("PAUSED"));

    snap.phase = Phase::Paused;
    let fb = view.render(&snap, vp);
    assert!(fb.contains_text("PAUSED"));
    assert!(fb.contains_text("M    menu"));

    snap.phase = Phase::GameOver;
    let fb = view.render(&snap, vp);
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("Enter  restart"));
}

#[test]
fn term_view_render_into_reuses_framebuffer() {
    let snap = playing_snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    let first = fb.clone();

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!(fb, first);

    view.render_into(&snap, Viewport::new(30, 23), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 23));
}
