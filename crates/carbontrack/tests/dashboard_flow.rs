use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;

use carbontrack::export::write_csv;
use carbontrack::tips::advice_for;
use carbontrack::{Category, Dashboard, NewActivity, Storage};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn open_temp_storage() -> (TempDir, Storage) {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let storage = Storage::open(temp_dir.path().join("data").join("footprint.db"))
        .expect("open storage");
    (temp_dir, storage)
}

fn log(storage: &Storage, owner: &str, category: Category, value: f64, on: NaiveDate) {
    let activity = NewActivity::new(on, category, value).expect("valid activity");
    storage
        .insert_activity(owner, &activity)
        .expect("insert activity");
}

#[test]
fn logged_week_produces_expected_dashboard() {
    let (_tmp, storage) = open_temp_storage();
    log(&storage, "alice", Category::Transport, 10.0, day(2024, 5, 3));
    log(&storage, "alice", Category::Electricity, 4.0, day(2024, 5, 4));
    log(&storage, "alice", Category::Food, 1.0, day(2024, 5, 5));

    let dashboard = Dashboard::build(&storage, "alice", day(2024, 5, 10), 10)
        .expect("build dashboard");

    assert!((dashboard.total_kg() - 8.9).abs() < 1e-9);
    assert_eq!(dashboard.all_time.get(Category::Transport), Some(2.1));
    assert_eq!(dashboard.all_time.get(Category::Electricity), Some(1.8));
    assert_eq!(dashboard.all_time.get(Category::Food), Some(5.0));
    assert!(dashboard.all_time.get(Category::Waste).is_none());
    assert_eq!(dashboard.all_time.dominant_category(), Some(Category::Food));
    assert_eq!(dashboard.tips, vec![advice_for("food").expect("food advice")]);
    assert_eq!(dashboard.recent.len(), 3);
    assert_eq!(dashboard.recent[0].category(), Category::Food);
}

#[test]
fn goals_survive_reopen_and_upsert_in_place() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let db_path = temp_dir.path().join("footprint.db");
    let may = day(2024, 5, 1);

    {
        let storage = Storage::open(&db_path).expect("open storage");
        let goal = storage.ensure_goal("alice", may).expect("ensure goal");
        assert_eq!(goal.target_kg, 0.0);
        storage.set_goal("alice", may, 120.0).expect("set goal");
        storage.set_goal("alice", may, 90.0).expect("update goal");
    }

    let storage = Storage::open(&db_path).expect("reopen storage");
    let goal = storage
        .get_goal("alice", may)
        .expect("read goal")
        .expect("goal exists");
    assert_eq!(goal.target_kg, 90.0);
    assert_eq!(storage.stats().expect("stats").total_goals, 1);
}

#[test]
fn export_writes_owner_activities_to_csv_file() {
    let (tmp, storage) = open_temp_storage();
    log(&storage, "alice", Category::Transport, 10.0, day(2024, 5, 3));
    log(&storage, "alice", Category::Waste, 2.0, day(2024, 5, 4));
    log(&storage, "bob", Category::Food, 3.0, day(2024, 5, 4));

    let path = tmp.path().join("my_footprint.csv");
    let records = storage.list_activities("alice", None).expect("list");
    let file = fs::File::create(&path).expect("create csv");
    let rows = write_csv(file, &records).expect("write csv");
    assert_eq!(rows, 2);

    let contents = fs::read_to_string(&path).expect("read csv");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Date,Category,Value,CO2 Equivalent (kg)");
    assert_eq!(lines[1], "2024-05-03,Transport,10,2.1");
    assert_eq!(lines[2], "2024-05-04,Waste,2,1");
    assert_eq!(lines.len(), 3);
}
