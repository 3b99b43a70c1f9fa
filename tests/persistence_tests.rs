//! Save store tests against a throwaway directory

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use recycle_tetris::achievements::AchievementBook;
use recycle_tetris::core::GameState;
use recycle_tetris::save::{SaveError, SaveStore, DEFAULT_SLOT, SAVE_VERSION};
use recycle_tetris::types::{Category, GameAction};

fn unique_temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("recycle_tetris_{name}_{nanos}"))
}

/// A game with a few frozen pieces, a held piece and no line clears.
fn played_game() -> GameState {
    let mut game = GameState::new(99);
    game.apply_action(GameAction::HardDrop);
    game.apply_action(GameAction::Hold);
    game.apply_action(GameAction::MoveLeft);
    game.apply_action(GameAction::HardDrop);
    game.apply_action(GameAction::Rotate);
    game.apply_action(GameAction::SoftDrop);
    game.set_score(1_234);
    game.set_combo_count(2);
    game.set_recycled_count(Category::Metal, 7);
    game
}

#[test]
fn save_and_load_round_trip() {
    let dir = unique_temp_dir("round_trip");
    let store = SaveStore::new(&dir);
    let game = played_game();

    assert!(!store.has_save(DEFAULT_SLOT));
    store.save_game(&game, DEFAULT_SLOT).unwrap();
    assert!(store.has_save(DEFAULT_SLOT));

    let file = store.read_save(DEFAULT_SLOT).unwrap();
    assert_eq!(file.version, SAVE_VERSION);
    assert_eq!(file.game.score, 1_234);

    let mut restored = GameState::new(1);
    store.load_game(&mut restored, DEFAULT_SLOT).unwrap();
    assert_eq!(restored.snapshot(), game.snapshot());
    assert_eq!(restored.held_piece(), game.held_piece());
    assert_eq!(restored.can_hold(), game.can_hold());

    assert!(store.delete_save(DEFAULT_SLOT).unwrap());
    assert!(!store.delete_save(DEFAULT_SLOT).unwrap());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bad_files_leave_the_game_untouched() {
    let dir = unique_temp_dir("bad_files");
    let store = SaveStore::new(&dir);
    let mut game = played_game();
    let before = game.snapshot();

    assert!(matches!(
        store.load_game(&mut game, "missing"),
        Err(SaveError::NotFound(_))
    ));

    fs::create_dir_all(&dir).unwrap();
    fs::write(store.save_path("garbage").unwrap(), "not json").unwrap();
    assert!(matches!(
        store.load_game(&mut game, "garbage"),
        Err(SaveError::Json(_))
    ));

    // A newer version is refused even though the body is fine.
    store.save_game(&GameState::new(5), "future").unwrap();
    let path = store.save_path("future").unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["version"] = serde_json::json!(2);
    fs::write(&path, json.to_string()).unwrap();
    assert!(matches!(
        store.load_game(&mut game, "future"),
        Err(SaveError::UnsupportedVersion(2))
    ));

    // An occupied cell without a category is rejected.
    store.save_game(&GameState::new(5), "broken").unwrap();
    let path = store.save_path("broken").unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["game"]["board"][0][0] = serde_json::json!({ "occupied": true });
    fs::write(&path, json.to_string()).unwrap();
    assert!(matches!(
        store.load_game(&mut game, "broken"),
        Err(SaveError::Invalid(_))
    ));

    assert_eq!(game.snapshot(), before);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn inconsistent_progress_and_stray_pieces_are_rejected() {
    let dir = unique_temp_dir("inconsistent");
    let store = SaveStore::new(&dir);
    let mut game = played_game();
    let before = game.snapshot();

    // 57 lines earn level 6 at least.
    store.save_game(&GameState::new(5), "low_level").unwrap();
    let path = store.save_path("low_level").unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["game"]["level"] = serde_json::json!(0);
    json["game"]["lines_cleared"] = serde_json::json!(57);
    fs::write(&path, json.to_string()).unwrap();
    assert!(matches!(
        store.load_game(&mut game, "low_level"),
        Err(SaveError::Invalid(_))
    ));

    // A flat I piece anchored in column 0 hangs off the left edge.
    store.save_game(&GameState::new(5), "off_board").unwrap();
    let path = store.save_path("off_board").unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["game"]["current"]["shape"] = serde_json::json!(0);
    json["game"]["current"]["rotation"] = serde_json::json!(0);
    json["game"]["current"]["x"] = serde_json::json!(0);
    fs::write(&path, json.to_string()).unwrap();
    assert!(matches!(
        store.load_game(&mut game, "off_board"),
        Err(SaveError::Invalid(_))
    ));

    assert_eq!(game.snapshot(), before);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn huge_recycle_counts_load_and_check() {
    let dir = unique_temp_dir("huge_counts");
    let store = SaveStore::new(&dir);
    let mut game = GameState::new(8);
    game.set_recycled_count(Category::Plastic, u32::MAX);
    game.set_recycled_count(Category::Paper, 1);
    store.save_game(&game, DEFAULT_SLOT).unwrap();

    let mut restored = GameState::new(1);
    store.load_game(&mut restored, DEFAULT_SLOT).unwrap();
    assert_eq!(restored.total_recycled(), u32::MAX);

    let mut book = AchievementBook::new();
    assert!(book.check(&restored) > 0);
    assert!(book.unlocked_ids().contains(&20));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn finished_games_feed_scores_and_statistics() {
    let dir = unique_temp_dir("records");
    let store = SaveStore::new(&dir);
    assert!(store.high_scores().unwrap().is_empty());
    assert_eq!(store.statistics().unwrap().games_played, 0);

    let mut game = GameState::new(3);
    game.set_score(500);
    game.set_lines_cleared(4);
    game.set_recycled_count(Category::Paper, 4);
    store.record_game(&game, Duration::from_secs(40)).unwrap();

    game.set_score(2_000);
    let stats = store.record_game(&game, Duration::from_secs(20)).unwrap();
    assert_eq!(stats.games_played, 2);
    assert_eq!(stats.best_score, 2_000);
    assert_eq!(stats.total_lines, 8);
    assert_eq!(stats.total_time_secs, 60);
    assert_eq!(stats.lifetime_recycled[Category::Paper.index()], 8);

    let scores: Vec<u32> = store.high_scores().unwrap().iter().map(|h| h.score).collect();
    assert_eq!(scores, vec![2_000, 500]);
    assert_eq!(store.statistics().unwrap(), stats);

    store.reset_statistics().unwrap();
    assert_eq!(store.statistics().unwrap().games_played, 0);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unlocked_achievements_persist() {
    let dir = unique_temp_dir("achievements");
    let store = SaveStore::new(&dir);

    let mut book = AchievementBook::new();
    assert_eq!(store.load_achievements(&mut book).unwrap(), 0);
    assert!(book.unlock(3));
    assert!(book.unlock(21));
    store.save_achievements(&book).unwrap();

    let mut fresh = AchievementBook::new();
    assert_eq!(store.load_achievements(&mut fresh).unwrap(), 2);
    assert_eq!(fresh.unlocked_ids(), vec![3, 21]);
    assert!(!fresh.has_notification());
    let _ = fs::remove_dir_all(&dir);
}
