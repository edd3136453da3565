use air_canvas::draw::state::PenState;
use air_canvas::draw::{FrameInput, Point, Rgb, Shortcut, StrokeEntry};
use air_canvas::session::{FrameOutput, SessionController};
use air_canvas::settings::AppSettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn settings_in(dir: &Path) -> AppSettings {
    AppSettings {
        data_dir: dir.to_path_buf(),
        mirror_input: false,
        ..AppSettings::default()
    }
}

fn hand(session: &mut SessionController, point: Point, fingers: u8) -> FrameOutput {
    session.process_frame(FrameInput::hand(point, fingers))
}

fn key(session: &mut SessionController, shortcut: Shortcut) -> FrameOutput {
    session.process_frame(FrameInput::shortcut(shortcut))
}

fn draw(session: &mut SessionController, points: &[Point]) {
    for point in points {
        hand(session, *point, 1);
    }
}

/// Traces the top edge of the target, lifts the pen and scores.
fn trace_and_score(session: &mut SessionController) -> FrameOutput {
    key(session, Shortcut::ToggleGame);
    let target = session.game().target_bounds();
    let edge: Vec<Point> = (target.x1 + 10..target.x2 - 10)
        .step_by(20)
        .map(|x| (x, target.y1))
        .collect();
    draw(session, &edge);
    hand(session, (700, 300), 2);
    hand(session, (700, 300), 2)
}

#[test]
fn drawing_records_smoothed_points_and_one_break() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));

    draw(&mut session, &[(600, 300), (630, 300)]);
    assert_eq!(session.pen_state(), PenState::Drawing);
    // First point alone, then eleven interpolated points for d = 30.
    assert_eq!(session.buffer().len(), 12);

    hand(&mut session, (630, 300), 2);
    hand(&mut session, (630, 300), 0);
    hand(&mut session, (630, 300), 4);
    assert_eq!(session.pen_state(), PenState::Idle);
    assert_eq!(session.buffer().len(), 13);
    assert!(session.buffer().last().is_some_and(StrokeEntry::is_break));

    // A new segment starts without interpolating from the old one.
    hand(&mut session, (900, 500), 1);
    assert_eq!(session.buffer().len(), 14);
}

#[test]
fn three_fingers_clear_everything() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    draw(&mut session, &[(600, 300), (620, 320)]);
    hand(&mut session, (620, 320), 3);
    assert!(session.buffer().is_empty());
    assert_eq!(session.pen_state(), PenState::Idle);
}

#[test]
fn frame_without_hand_only_ticks_cooldown() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    draw(&mut session, &[(600, 300)]);
    // Hovering "+" with the pen lifted.
    hand(&mut session, (100, 320), 0);
    assert_eq!(session.thickness(), 25);
    assert_eq!(session.dispatcher().cooldown().remaining(), 15);

    let before = session.buffer().clone();
    session.process_frame(FrameInput::empty());
    assert_eq!(session.buffer(), &before);
    assert_eq!(session.pen_state(), PenState::Idle);
    assert_eq!(session.dispatcher().cooldown().remaining(), 14);
}

#[test]
fn buttons_are_hit_in_mirrored_space() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(AppSettings {
        mirror_input: true,
        ..settings_in(dir.path())
    });
    hand(&mut session, (100, 320), 0);
    assert_eq!(session.thickness(), 20);
    hand(&mut session, (1280 - 100, 320), 0);
    assert_eq!(session.thickness(), 25);
    hand(&mut session, (1280 - 300, 40), 0);
    // Still cooling down.
    assert_eq!(session.active_color(), Rgb::RED);
}

#[test]
fn color_choice_applies_to_new_samples_only() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    draw(&mut session, &[(600, 300)]);
    hand(&mut session, (600, 300), 0);
    // Blue sits at x = 290..390 on the button row.
    hand(&mut session, (300, 40), 0);
    assert_eq!(session.active_color(), Rgb::rgb(0, 0, 255));
    draw(&mut session, &[(700, 400)]);

    let colors: Vec<Rgb> = session
        .buffer()
        .entries()
        .iter()
        .filter_map(|entry| entry.sample().map(|sample| sample.color))
        .collect();
    assert_eq!(colors, vec![Rgb::RED, Rgb::rgb(0, 0, 255)]);
}

#[test]
fn undo_drops_the_latest_segment() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    draw(&mut session, &[(600, 300), (602, 301)]);
    hand(&mut session, (602, 301), 0);
    draw(&mut session, &[(800, 500), (801, 502)]);

    key(&mut session, Shortcut::Undo);
    assert_eq!(session.buffer().len(), 2);
    assert_eq!(session.buffer().sample_count(), 2);

    key(&mut session, Shortcut::Undo);
    assert!(session.buffer().is_empty());
}

#[test]
fn game_scores_a_finished_trace_once() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(AppSettings {
        player_name: Some("Ana".into()),
        ..settings_in(dir.path())
    });

    key(&mut session, Shortcut::ToggleGame);
    assert!(session.game().is_active());
    let target = session.game().target_bounds();

    let edge: Vec<Point> = (target.x1 + 10..target.x2 - 10)
        .step_by(20)
        .map(|x| (x, target.y1))
        .collect();
    draw(&mut session, &edge);

    // The first two-finger frame only lifts the pen.
    let lifted = hand(&mut session, (700, 300), 2);
    assert!(lifted.masks.is_none());
    assert_eq!(session.pen_state(), PenState::Idle);

    let scored = hand(&mut session, (700, 300), 2);
    assert_eq!(session.pen_state(), PenState::Scoring);
    let masks = scored.masks.expect("scoring frame carries masks");
    assert!(masks.stroke.count_nonzero() > 0);
    let status = scored.status.expect("status message");
    assert_eq!(status.text, "Similarity: 100.00% (OK)");
    assert_eq!(status.color, Rgb::GREEN);

    let held = hand(&mut session, (700, 300), 2);
    assert!(held.masks.is_none());
    assert_eq!(
        fs::read_to_string(dir.path().join("ranking.txt")).unwrap(),
        "Ana:=1.0000\n"
    );

    key(&mut session, Shortcut::ToggleGame);
    assert!(!session.game().is_active());
    assert!(session.buffer().is_empty());
}

#[test]
fn two_fingers_outside_the_game_never_score() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    draw(&mut session, &[(600, 300), (650, 300)]);
    hand(&mut session, (650, 300), 2);
    let output = hand(&mut session, (650, 300), 2);
    assert!(output.masks.is_none());
    assert_eq!(session.pen_state(), PenState::Idle);
}

#[test]
fn undo_in_game_clears_the_attempt() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    key(&mut session, Shortcut::ToggleGame);
    draw(&mut session, &[(600, 300), (650, 300)]);
    hand(&mut session, (650, 300), 0);
    draw(&mut session, &[(700, 400)]);
    key(&mut session, Shortcut::Undo);
    assert!(session.buffer().is_empty());
    assert!(session.game().is_active());
}

#[test]
fn save_and_load_restore_the_buffer() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    draw(&mut session, &[(600, 300), (640, 330)]);
    hand(&mut session, (640, 330), 0);
    let drawn = session.buffer().clone();

    let saved = key(&mut session, Shortcut::Save);
    let status = saved.status.expect("save status");
    assert!(status.text.starts_with("Saved desenho_"), "{}", status.text);

    key(&mut session, Shortcut::ClearAll);
    assert!(session.buffer().is_empty());

    key(&mut session, Shortcut::Load);
    assert_eq!(session.buffer(), &drawn);
}

#[test]
fn failed_load_keeps_the_current_drawing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("desenho_29991231_235959.json"), "not json").unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    draw(&mut session, &[(600, 300)]);
    let before = session.buffer().clone();

    let output = key(&mut session, Shortcut::Load);
    assert_eq!(session.buffer(), &before);
    let status = output.status.expect("failure status");
    assert_eq!(status.color, Rgb::RED);
}

#[test]
fn saving_nothing_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    let output = key(&mut session, Shortcut::Save);
    assert_eq!(output.status.map(|s| s.text).as_deref(), Some("Nothing to save"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn quit_stops_the_session() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(settings_in(dir.path()));
    assert!(key(&mut session, Shortcut::Quit).quit);
}

#[test]
fn scoring_writes_mask_snapshots_when_configured() {
    let dir = tempdir().unwrap();
    let masks_dir = dir.path().join("masks");
    let mut session = SessionController::new(AppSettings {
        mask_snapshot_dir: Some(masks_dir.clone()),
        ..settings_in(dir.path())
    });
    let scored = trace_and_score(&mut session);
    assert!(scored.masks.is_some());

    let mut names: Vec<String> = fs::read_dir(&masks_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2, "{names:?}");
    assert!(names[0].starts_with("mask_stroke_") && names[0].ends_with(".png"));
    assert!(names[1].starts_with("mask_target_") && names[1].ends_with(".png"));
}

#[test]
fn ranking_failure_keeps_the_score_visible() {
    let dir = tempdir().unwrap();
    // A folder where the ranking file should be makes the commit fail.
    fs::create_dir(dir.path().join("ranking.txt")).unwrap();
    let mut session = SessionController::new(AppSettings {
        player_name: Some("Ana".into()),
        ..settings_in(dir.path())
    });
    let scored = trace_and_score(&mut session);
    let status = scored.status.expect("status message");
    assert_eq!(status.text, "Similarity: 100.00% (OK), ranking not saved");
    assert_eq!(status.color, Rgb::RED);
    assert!(session.game().is_active());
}

#[test]
fn extreme_fingertips_are_clamped_instead_of_panicking() {
    let dir = tempdir().unwrap();
    let mut session = SessionController::new(AppSettings {
        mirror_input: true,
        ..settings_in(dir.path())
    });
    hand(&mut session, (i32::MIN, 10), 1);
    hand(&mut session, (i32::MAX, i32::MIN), 1);
    hand(&mut session, (i32::MAX, i32::MAX), 0);
    key(&mut session, Shortcut::ToggleGame);
    draw(&mut session, &[(i32::MIN, i32::MIN), (600, 300)]);
    hand(&mut session, (600, 300), 2);
    let scored = hand(&mut session, (600, 300), 2);
    assert!(scored.masks.is_some());

    let limit = air_canvas::draw::messages::COORDINATE_LIMIT;
    assert!(session
        .buffer()
        .entries()
        .iter()
        .filter_map(StrokeEntry::sample)
        .all(|sample| sample.point.0.abs() <= limit && sample.point.1.abs() <= limit));
}
