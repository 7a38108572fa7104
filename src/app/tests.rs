use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;

use super::*;
use crate::drag::DropTarget;
use crate::gesture::PointerKind;
use crate::models::{Card, GamePhase, GameSnapshot, Player, TheaterType};

fn snapshot(phase: GamePhase) -> GameSnapshot {
    GameSnapshot {
        id: "g1".into(),
        room_id: "r1".into(),
        player1: Player {
            id: "a".into(),
            name: "Ann".into(),
            hand: vec![
                Card::new(7, TheaterType::Air, 4, "Aerodrome"),
                Card::new(8, TheaterType::Land, 2, "Reinforce"),
            ],
            score: 0,
        },
        player2: Player {
            id: "b".into(),
            name: "Bo".into(),
            hand: vec![],
            score: 0,
        },
        deck: vec![],
        trash: vec![],
        theater_order: vec![TheaterType::Air, TheaterType::Land, TheaterType::Sea],
        theaters: Default::default(),
        current_player_id: "a".into(),
        phase,
        battle_number: 1,
        first_player_id: "a".into(),
        withdrew_player_id: None,
        theater_scores: None,
    }
}

fn app(phase: GamePhase) -> App {
    let mut app = App::new(ClientConfig::default(), SessionIds::new("g1", "a", "r1"));
    app.start(Some(snapshot(phase)));
    register_board(&mut app);
    app
}

/// Air lane at the top, hand below it with card 7 at columns 2..6.
fn register_board(app: &mut App) {
    app.zones.clear();
    app.zones
        .add_zone(Rect::new(0, 0, 20, 10), DropTarget::Theater(TheaterType::Air));
    let hand = app.zones.add_zone(Rect::new(0, 10, 40, 5), DropTarget::Hand);
    app.zones
        .add_child(hand, Rect::new(2, 11, 4, 3), ElementKey::HandCard(7));
    app.zones
        .add_child(hand, Rect::new(8, 11, 4, 3), ElementKey::HandCard(8));
}

fn commands(app: &mut App) -> Vec<Command> {
    app.drain_outgoing()
        .into_iter()
        .filter_map(|o| match o {
            Outgoing::Command(ticket) => Some(ticket.command().clone()),
            Outgoing::Poll(_) => None,
        })
        .collect()
}

#[test]
fn test_drag_hand_card_onto_theater_dispatches_play() {
    let mut app = app(GamePhase::Playing);
    let t0 = Instant::now();

    app.pointer_down(3, 12, PointerKind::Touch, t0);
    app.pointer_move(5, 5, t0 + Duration::from_millis(40));
    assert!(app.session.is_open());
    assert_eq!(app.active_target(), Some(DropTarget::Theater(TheaterType::Air)));
    assert_eq!(app.proxy_position(), Some(ratatui::layout::Position::new(5, 5)));

    app.pointer_up(5, 5, t0 + Duration::from_millis(80));

    assert!(!app.session.is_open());
    assert_eq!(
        commands(&mut app),
        vec![Command::PlayCard {
            card_id: 7,
            theater: TheaterType::Air,
            face_up: true,
        }]
    );
    assert!(app.sync.is_busy());
}

#[test]
fn test_drop_outside_any_zone_dispatches_nothing() {
    let mut app = app(GamePhase::Playing);
    let t0 = Instant::now();
    app.pointer_down(3, 12, PointerKind::Touch, t0);
    app.pointer_move(30, 2, t0 + Duration::from_millis(40));
    app.pointer_up(30, 2, t0 + Duration::from_millis(80));

    assert!(commands(&mut app).is_empty());
    assert!(!app.session.is_open());
    assert_eq!(app.active_target(), None);
}

#[test]
fn test_drag_refused_while_command_in_flight() {
    let mut app = app(GamePhase::Playing);
    app.dispatch(Command::DrawCard);
    assert_eq!(commands(&mut app), vec![Command::DrawCard]);

    let t0 = Instant::now();
    app.pointer_down(3, 12, PointerKind::Touch, t0);
    app.pointer_move(5, 5, t0 + Duration::from_millis(40));
    app.pointer_up(5, 5, t0 + Duration::from_millis(80));

    assert!(!app.session.is_open());
    assert!(commands(&mut app).is_empty());
}

#[test]
fn test_tap_toggles_face_after_double_tap_window() {
    let mut app = app(GamePhase::Playing);
    let t0 = Instant::now();
    app.pointer_down(3, 12, PointerKind::Touch, t0);
    app.pointer_up(3, 12, t0 + Duration::from_millis(50));
    assert!(app.sync.face_up(7));

    app.tick(t0 + Duration::from_millis(400));
    assert!(!app.sync.face_up(7));
    assert!(app.sync.face_up(8));
}

#[test]
fn test_long_press_opens_preview_and_next_press_closes_it() {
    let mut app = app(GamePhase::Playing);
    let t0 = Instant::now();
    app.pointer_down(9, 12, PointerKind::Touch, t0);
    app.tick(t0 + Duration::from_millis(600));
    assert_eq!(app.preview.as_ref().map(|p| p.card_id()), Some(8));

    app.pointer_up(9, 12, t0 + Duration::from_millis(650));
    assert!(app.preview.is_some());
    assert!(app.sync.face_up(8));

    app.pointer_down(30, 30, PointerKind::Touch, t0 + Duration::from_millis(900));
    assert!(app.preview.is_none());
}

#[test]
fn test_double_tap_previews_hand_card() {
    let mut app = app(GamePhase::Playing);
    let t0 = Instant::now();
    app.pointer_down(3, 12, PointerKind::Touch, t0);
    app.pointer_up(3, 12, t0 + Duration::from_millis(40));
    app.pointer_down(3, 12, PointerKind::Touch, t0 + Duration::from_millis(120));
    app.pointer_up(3, 12, t0 + Duration::from_millis(160));

    assert_eq!(app.preview.as_ref().map(|p| p.card_id()), Some(7));
    // The double tap replaces both clicks.
    app.tick(t0 + Duration::from_millis(800));
    assert!(app.sync.face_up(7));
}

#[test]
fn test_available_actions_follow_phase() {
    assert_eq!(
        app(GamePhase::Playing).available_actions(),
        vec![Action::DrawCard, Action::EndTurn, Action::Withdraw]
    );
    assert_eq!(
        app(GamePhase::Scoring).available_actions(),
        vec![Action::SubmitScores]
    );
    assert_eq!(app(GamePhase::GameOver).available_actions(), vec![Action::NextGame]);
}

#[test]
fn test_keys_dispatch_only_available_actions() {
    let mut app = app(GamePhase::Playing);
    app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
    assert!(commands(&mut app).is_empty());

    app.handle_key(KeyCode::Char('e'), KeyModifiers::NONE);
    assert_eq!(commands(&mut app), vec![Command::EndTurn]);
}

#[test]
fn test_withdraw_needs_confirmation() {
    let mut app = app(GamePhase::Playing);
    app.handle_key(KeyCode::Char('w'), KeyModifiers::NONE);
    assert!(commands(&mut app).is_empty());
    assert!(app.confirm_withdraw);

    // While asking, other bindings are ignored and "n" backs out.
    app.handle_key(KeyCode::Char('e'), KeyModifiers::NONE);
    app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
    assert!(commands(&mut app).is_empty());
    assert!(!app.confirm_withdraw);

    // A stray confirm with nothing pending sends nothing.
    app.perform(Action::ConfirmWithdraw);
    assert!(commands(&mut app).is_empty());

    app.handle_key(KeyCode::Char('w'), KeyModifiers::NONE);
    app.handle_key(KeyCode::Char('y'), KeyModifiers::NONE);
    assert_eq!(commands(&mut app), vec![Command::Withdraw]);
    assert!(!app.confirm_withdraw);
}

#[test]
fn test_withdraw_confirmation_closed_by_press_or_turn_change() {
    let mut app = app(GamePhase::Playing);
    app.handle_key(KeyCode::Char('w'), KeyModifiers::NONE);
    let t0 = Instant::now();
    app.pointer_down(3, 12, PointerKind::Touch, t0);
    app.pointer_move(5, 5, t0 + Duration::from_millis(40));
    assert!(!app.confirm_withdraw);
    assert!(!app.session.is_open());

    app.handle_key(KeyCode::Char('w'), KeyModifiers::NONE);
    app.handle_sync(SyncMessage::PollDue);
    let Some(Outgoing::Poll(ticket)) = app.drain_outgoing().into_iter().next() else {
        panic!("expected a poll");
    };
    let mut passed = snapshot(GamePhase::Playing);
    passed.current_player_id = "b".into();
    app.handle_sync(SyncMessage::PollCompleted {
        ticket,
        result: Ok(passed),
    });
    assert!(!app.confirm_withdraw);
    app.handle_key(KeyCode::Char('y'), KeyModifiers::NONE);
    assert!(commands(&mut app).is_empty());
}

#[test]
fn test_score_entry_through_keys() {
    let mut app = app(GamePhase::Scoring);

    app.handle_key(KeyCode::Char('s'), KeyModifiers::NONE);
    assert!(commands(&mut app).is_empty());
    assert!(app.sync.error().is_some());

    app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
    assert!(app.sync.error().is_none());

    for digits in ["4", "12", "0"] {
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        for c in digits.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }
    assert_eq!(app.scores.input(TheaterType::Air), "4");
    assert_eq!(app.scores.input(TheaterType::Land), "12");
    assert_eq!(app.scores.input(TheaterType::Sea), "0");

    app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
    let sent = commands(&mut app);
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Command::SubmitScores { scores } => {
            assert_eq!(scores.get(&TheaterType::Land), Some(&12));
            assert_eq!(scores.get(&TheaterType::Sea), Some(&0));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_prune_gestures_drops_undrawn_elements() {
    let mut app = app(GamePhase::Playing);
    let t0 = Instant::now();
    app.pointer_down(9, 12, PointerKind::Touch, t0);
    app.pointer_up(9, 12, t0 + Duration::from_millis(30));
    assert!(!app.gestures.is_empty());

    app.zones.clear();
    app.prune_gestures();
    assert!(app.gestures.is_empty());
    app.tick(t0 + Duration::from_secs(1));
    assert!(app.sync.face_up(8));
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = app(GamePhase::Playing);
    app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
}
