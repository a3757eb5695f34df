//! Project store and `seatmap` command flow against a temporary directory.
#![cfg(all(feature = "projects", feature = "tabular"))]

use seating_plan::config::Config;
use seating_plan::controllers::{self, AddRowsArgs, Command, Format};
use seating_plan::services::projects::ProjectStore;
use seating_plan::services::Parity;
use seating_plan::{AppState, SeatingError, SeatingPlan};
use tempfile::TempDir;

fn state_in(dir: &TempDir) -> AppState {
    let mut config = Config::default();
    config.projects.dir = dir.path().join("projects");
    AppState::new(config)
}

#[test]
fn save_load_list_delete() {
    let dir = TempDir::new().unwrap();
    let store = ProjectStore::new(dir.path());

    assert!(store.list().unwrap().is_empty());

    let mut plan = SeatingPlan::new("draft");
    plan.add_section("Stalls", false);
    plan.section_mut("Stalls").unwrap().add_seat_range("A", "1", "4");
    store.save("Tour 10", &mut plan).unwrap();
    store.save("Tour 2", &mut SeatingPlan::default()).unwrap();
    assert_eq!(plan.name, "Tour 10");

    let loaded = store.load("Tour 10").unwrap();
    assert_eq!(loaded, plan);

    let names: Vec<String> = store.list().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Tour 2", "Tour 10"]);
    assert!(store.list().unwrap().iter().all(|p| p.modified.is_some()));

    store.delete("Tour 2").unwrap();
    assert!(matches!(
        store.delete("Tour 2"),
        Err(SeatingError::ProjectNotFound(_))
    ));
    assert!(matches!(
        store.load("missing"),
        Err(SeatingError::ProjectNotFound(_))
    ));
}

#[test]
fn commands_build_and_export_a_plan() {
    let dir = TempDir::new().unwrap();
    let state = state_in(&dir);

    controllers::run(
        &state,
        Command::New {
            project: "gala".into(),
            force: false,
        },
    )
    .unwrap();
    assert!(matches!(
        controllers::run(
            &state,
            Command::New {
                project: "gala".into(),
                force: false,
            },
        ),
        Err(SeatingError::ProjectExists(_))
    ));

    controllers::run(
        &state,
        Command::AddSection {
            project: "gala".into(),
            name: "Hall 1".into(),
            ga: false,
            capacity: None,
        },
    )
    .unwrap();
    controllers::run(
        &state,
        Command::AddRows(AddRowsArgs {
            project: "gala".into(),
            section: "Hall 1".into(),
            start_row: "A".into(),
            end_row: "B".into(),
            start_seat: "1".into(),
            end_seat: "3".into(),
            parity: Parity::All,
            continuous: true,
            prefix: String::new(),
            suffix: String::new(),
            unnumbered: false,
        }),
    )
    .unwrap();
    let created = controllers::run(
        &state,
        Command::CloneSection {
            project: "gala".into(),
            name: "Hall 1".into(),
            count: 2,
        },
    )
    .unwrap();
    assert_eq!(created, "Created: Hall 2, Hall 3");

    let plan = state.projects.load("gala").unwrap();
    assert_eq!(plan.section_names(), vec!["Hall 1", "Hall 2", "Hall 3"]);
    assert_eq!(plan.section("Hall 3").unwrap().seats_in_row("B"), vec!["4", "5", "6"]);

    let merge = controllers::run(
        &state,
        Command::Merge {
            project: "gala".into(),
            into: "Both".into(),
            sources: vec!["Hall 1".into(), "Hall 2".into()],
        },
    );
    assert!(matches!(merge, Err(SeatingError::MergeConflict(_))));

    let table = controllers::run(
        &state,
        Command::Export {
            project: "gala".into(),
            format: Format::Table,
            out: None,
        },
    )
    .unwrap();
    assert!(table.starts_with("section,rows,seats,secnam,capacity,type\n"));
    assert!(table.contains("3,B,\"4,5,6\",Hall 3,3,"));
}

#[test]
fn import_table_then_renumber() {
    let dir = TempDir::new().unwrap();
    let state = state_in(&dir);
    let source = dir.path().join("plan.csv");
    std::fs::write(
        &source,
        "section,rows,seats,secnam,capacity,type\n1,1,\"1,2\",Main,2,\n1,2,\"1,2\",Main,2,\n2,,,Lawn,50,GA\n",
    )
    .unwrap();

    controllers::run(
        &state,
        Command::Import {
            project: "fest".into(),
            path: source,
            format: Format::Table,
        },
    )
    .unwrap();
    let output = controllers::run(
        &state,
        Command::RenumberRows {
            project: "fest".into(),
            section: "Main".into(),
            start: "A".into(),
            hash: false,
            rows: vec!["1".into(), "2".into()],
        },
    )
    .unwrap();
    assert_eq!(output, "1 -> A\n2 -> B");

    let plan = state.projects.load("fest").unwrap();
    assert_eq!(plan.name, "fest");
    assert_eq!(plan.section("Main").unwrap().rows(), vec!["A", "B"]);
    let lawn = plan.section("Lawn").unwrap();
    assert!(lawn.is_general_admission);
    assert_eq!(lawn.capacity, Some(50));
}

#[test]
fn add_seats_refuses_oversized_runs() {
    let dir = TempDir::new().unwrap();
    let state = state_in(&dir);
    controllers::run(
        &state,
        Command::New {
            project: "arena".into(),
            force: false,
        },
    )
    .unwrap();
    controllers::run(
        &state,
        Command::AddSection {
            project: "arena".into(),
            name: "Floor".into(),
            ga: false,
            capacity: None,
        },
    )
    .unwrap();

    let add = |start: &str, end: &str| {
        controllers::run(
            &state,
            Command::AddSeats {
                project: "arena".into(),
                section: "Floor".into(),
                row: "A".into(),
                start: start.into(),
                end: end.into(),
            },
        )
    };
    assert!(matches!(
        add("1", "5000000000"),
        Err(SeatingError::TooManySeats { .. })
    ));
    assert!(matches!(
        add("A1", "A9"),
        Err(SeatingError::InvalidSeatRange { .. })
    ));
    assert_eq!(add("1", "3").unwrap(), "Added 3 seats to row A");

    let plan = state.projects.load("arena").unwrap();
    assert_eq!(plan.section("Floor").unwrap().seat_count(), 3);
}
