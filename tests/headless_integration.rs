use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sharktype::app::App;
use sharktype::clock::{ManualClock, SystemClock};
use sharktype::corpus::FixedText;
use sharktype::game::GameState;
use sharktype::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};

fn key(c: char) -> GameEvent {
    GameEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless integration using the internal runtime + App without a TTY
#[test]
fn headless_typing_flow_wins() {
    let mut app = App::new(Box::new(FixedText::new("hi")), SystemClock);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key('p')).unwrap();
    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();

    for _ in 0..100u32 {
        match runner.step() {
            GameEvent::Key(k) => app.handle_key(k).unwrap(),
            GameEvent::Resize | GameEvent::Tick => {}
        }
        app.on_tick().unwrap();
        if app.state() == GameState::Won {
            break;
        }
    }

    assert_eq!(app.state(), GameState::Won);
    let display = app.game.display_state();
    assert_eq!(display.typed_input, "hi");
    assert_eq!(display.statistics.accuracy, 100);
}

#[test]
fn headless_idle_player_is_caught() {
    let clock = ManualClock::new();
    let mut app = App::new(
        Box::new(FixedText::new("the shark never sleeps")),
        clock.clone(),
    );

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    tx.send(key('p')).unwrap();

    // Each frame advances the game clock by a quarter second.
    for _ in 0..40u32 {
        if let GameEvent::Key(k) = runner.step() {
            app.handle_key(k).unwrap();
        }
        clock.advance(Duration::from_millis(250));
        app.on_tick().unwrap();
        if app.state() == GameState::Lost {
            break;
        }
    }

    assert_eq!(app.state(), GameState::Lost);
    let display = app.game.display_state();
    assert!(display.pursuer_position >= display.pursued_position - 30.0);
    assert!(!app.game.is_ticking());
}

#[test]
fn headless_steady_typist_escapes() {
    let text = "swim fast little fish";
    let clock = ManualClock::new();
    let mut app = App::new(Box::new(FixedText::new(text)), clock.clone());
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        .unwrap();

    // Four characters per second, comfortably ahead of the pace.
    for c in text.chars() {
        clock.advance(Duration::from_millis(250));
        app.on_tick().unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap();
    }

    assert_eq!(app.state(), GameState::Won);
    let display = app.game.display_state();
    assert_eq!(display.pursuer_position, 50.0);
    assert_eq!(display.statistics.wpm, 48);
}
