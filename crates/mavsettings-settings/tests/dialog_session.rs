use mavsettings_core::thread_safe;
use mavsettings_settings::{DialogSession, Setting, SettingKind, Settings};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn demo_settings() -> Settings {
    Settings::new(
        vec![
            Setting::new("link", SettingKind::Int, 1).with_tab("TabOne"),
            Setting::new("altreadout", SettingKind::Int, 10)
                .with_range(-30.0, 1017.0)
                .with_increment(1.0),
            Setting::new("enable", SettingKind::Bool, true).with_tab("TabTwo"),
            Setting::new("colour", SettingKind::Str, "Blue").with_choice(["Red", "Green", "Blue"]),
            Setting::new("foostr", SettingKind::Str, "blah").with_label("Foo String"),
        ],
        "Demo",
    )
}

#[test]
fn test_applied_changes_reach_owner() {
    let mut owner = demo_settings();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    owner.set_callback(move |s| {
        sink.lock()
            .unwrap()
            .push(format!("Changing {} to {}", s.name, s.value_text()))
    });
    let shared = thread_safe(owner);

    let (mut dialog, session) = DialogSession::open(shared.clone()).unwrap();
    assert!(session.is_alive());
    assert!(dialog.is_connected());

    dialog.set_text("Foo String", "hello");
    dialog.set_text("enable", "False");
    dialog.set_text("altreadout", "not a number");
    let changes = dialog.apply();
    assert_eq!(changes.len(), 2);

    dialog.cancel();
    assert!(!dialog.is_connected());
    assert_eq!(session.join(), 2);

    let owner = shared.lock();
    assert_eq!(owner.get_str("foostr"), Some("hello"));
    assert_eq!(owner.get_bool("enable"), Some(false));
    assert_eq!(owner.get_int("altreadout"), Some(10));
    assert_eq!(
        *log.lock().unwrap(),
        vec!["Changing enable to False", "Changing foostr to hello"]
    );
}

#[test]
fn test_dialog_works_on_a_snapshot() {
    let shared = thread_safe(demo_settings());
    let (mut dialog, session) = DialogSession::open(shared.clone()).unwrap();

    // owner-side edits after opening are not visible to the dialog
    shared.lock().set("link", 5).unwrap();
    assert_eq!(dialog.control("link").unwrap().text(), "1");

    dialog.set_text("colour", "Red");
    dialog.apply();
    drop(dialog);

    assert_eq!(session.join(), 1);
    let owner = shared.lock();
    assert_eq!(owner.get_int("link"), Some(5));
    assert_eq!(owner.get_str("colour"), Some("Red"));
}

#[test]
fn test_session_stops_when_dialog_dropped() {
    let shared = thread_safe(demo_settings());
    let (dialog, session) = DialogSession::open(shared).unwrap();
    drop(dialog);

    let deadline = Instant::now() + Duration::from_secs(5);
    while session.is_alive() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(!session.is_alive());
    assert_eq!(session.join(), 0);
}
