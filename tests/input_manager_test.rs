//! InputManager tests - hold window inference, mapping and the interrupt hatch

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tui_arcade::input::{InputEvent, InputManager, RawInput, ScriptedSource, KEYDOWN, KEYUP, QUIT};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_mapped_key_held_while_repeats_arrive() {
    let mut im = InputManager::headless();
    im.map_key("w", "p1_up");
    let t0 = Instant::now();

    im.handle_raw("w", t0);
    assert!(im.is_key_pressed("p1_up"));
    assert!(!im.is_key_pressed("w"));

    // Repeats every 60ms keep re-arming the 100ms window.
    for i in 1..=5 {
        let now = t0 + ms(60 * i);
        im.update(now);
        im.handle_raw("w", now);
        assert!(im.is_key_pressed("p1_up"), "released early at repeat {i}");
    }

    let last = t0 + ms(300);
    im.update(last + ms(99));
    assert!(im.is_key_pressed("p1_up"));
    im.update(last + ms(100));
    assert!(!im.is_key_pressed("p1_up"));
}

#[test]
fn test_keydown_and_keyup_fire_once_per_hold() {
    let mut im = InputManager::headless();
    im.map_key("w", "p1_up");
    let log = Rc::new(RefCell::new(Vec::new()));
    for name in [KEYDOWN, KEYUP] {
        let log = log.clone();
        im.on(name, move |e| log.borrow_mut().push(e.clone()));
    }

    let t0 = Instant::now();
    for i in 0..10 {
        im.handle_raw("w", t0 + ms(30 * i));
    }
    im.update(t0 + ms(1_000));

    assert_eq!(
        *log.borrow(),
        vec![
            InputEvent::KeyDown("p1_up".into()),
            InputEvent::KeyUp("p1_up".into())
        ]
    );
}

#[test]
fn test_rebinding_changes_logical_name() {
    let mut im = InputManager::headless();
    im.map_key("w", "p1_up");
    im.map_key("w", "jump");
    im.handle_raw("w", Instant::now());
    assert!(im.is_key_pressed("jump"));
    assert!(!im.is_key_pressed("p1_up"));
}

#[test]
fn test_action_subscribers_see_every_signal() {
    let mut im = InputManager::headless();
    im.map_key("space", "fire");
    let shots = Rc::new(RefCell::new(0));
    let s = shots.clone();
    im.on("fire", move |_| *s.borrow_mut() += 1);

    let t0 = Instant::now();
    im.handle_raw("space", t0);
    im.handle_raw("space", t0 + ms(40));
    im.handle_raw("x", t0 + ms(50));

    assert_eq!(*shots.borrow(), 2);
}

#[test]
fn test_interrupt_bypasses_mapping() {
    let source = ScriptedSource::new([
        RawInput::Key("c".into()),
        RawInput::Interrupt,
    ]);
    let mut im = InputManager::with_source(source);
    im.map_key("c", "crouch");
    let quits = Rc::new(RefCell::new(0));
    let q = quits.clone();
    im.on(QUIT, move |_| *q.borrow_mut() += 1);

    im.poll(Instant::now()).unwrap();

    assert!(im.is_key_pressed("crouch"));
    assert!(im.quit_requested());
    assert_eq!(*quits.borrow(), 1);
}

#[test]
fn test_poll_drains_source_then_expires() {
    let source = ScriptedSource::new([RawInput::Key("a".into()), RawInput::Key("b".into())]);
    let mut im = InputManager::with_source(source).with_hold_window(ms(50));
    let t0 = Instant::now();

    im.poll(t0).unwrap();
    let mut held: Vec<&str> = im.pressed_keys().collect();
    held.sort();
    assert_eq!(held, vec!["a", "b"]);

    im.poll(t0 + ms(50)).unwrap();
    assert_eq!(im.pressed_keys().count(), 0);
}

#[test]
fn test_headless_manager_never_reports_keys() {
    let mut im = InputManager::headless();
    im.poll(Instant::now()).unwrap();
    im.wait(Duration::ZERO).unwrap();
    assert_eq!(im.pressed_keys().count(), 0);
    assert!(!im.is_interactive());
    assert!(!im.quit_requested());
}
