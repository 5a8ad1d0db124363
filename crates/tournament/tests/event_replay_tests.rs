//! Replays the shipped 2017 event from CSV files on disk.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use bracket_core::{BracketError, BracketTable, ElapsedTime, Heat};
use tournament::{
    fill_roster, heat_sheet, standings_report, Event, EventError, RaceResults, RosterFile,
};

fn event_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../events/sart-2017-80.toml")
}

fn heat(n: u32) -> Heat {
    Heat::from_number(n).unwrap()
}

/// Runner `i` is the i-th fastest in every race.
fn pace(i: u64, round: u64) -> ElapsedTime {
    ElapsedTime::from_millis(540_000 + i * 4_100 + round * 250)
}

fn ability(first_name: &str) -> u64 {
    first_name.trim_start_matches("Runner").parse().unwrap()
}

fn write_time_trial(dir: &Path) -> PathBuf {
    let mut csv = String::from("Surname,First name,Time\n");
    // Slowest first, as the timing system exports by bib.
    for i in (0..80).rev() {
        writeln!(csv, "Field,Runner{:02},{}", i, pace(i, 0)).unwrap();
    }
    let path = dir.join("time_trial.csv");
    fs::write(&path, csv).unwrap();
    path
}

/// Race `round` with the field the table currently has in it.
fn write_round(dir: &Path, event: &Event, table: &BracketTable, round: u8) -> PathBuf {
    let mut csv = String::from("Surname,First name,Time,Entry cl. No\n");
    for h in event.topology.heats_in_round(round) {
        for row in table.rows_for_heat(h) {
            if let Some(c) = &row.competitor {
                let time = pace(ability(&c.first_name), round as u64);
                writeln!(csv, "{},{},{},{}", c.surname, c.first_name, time, h).unwrap();
            }
        }
    }
    let path = dir.join(format!("round{}.csv", round));
    fs::write(&path, csv).unwrap();
    path
}

/// Run the event up to and including `last_round`, returning result files.
fn race_to(dir: &Path, event: &Event, last_round: u8) -> (PathBuf, Vec<PathBuf>) {
    let time_trial = write_time_trial(dir);
    let mut rounds = Vec::new();
    for round in 1..=last_round {
        let results = RaceResults::load(&event.config, &time_trial, &rounds).unwrap();
        let (table, _) = event.replay(&results).unwrap();
        rounds.push(write_round(dir, event, &table, round));
    }
    (time_trial, rounds)
}

#[test]
fn test_shipped_event_definition() {
    let event = Event::load(&event_path()).unwrap();
    assert_eq!(event.config.name, "SART 2017");
    assert_eq!(event.topology.round0.len(), 16);
    assert_eq!(event.topology.entries.len(), 32);
    assert_eq!(event.final_round(), 5);
    assert_eq!(event.keys.len(), 400);
    assert_eq!(event.schedule.get(heat(201)), Some("10:00"));
    for h in event.topology.heats_in_round(3) {
        assert_eq!(event.keys.slots_for(h).len(), 5);
    }
}

#[test]
fn test_full_replay_and_standings() {
    let dir = tempfile::tempdir().unwrap();
    let event = Event::load(&event_path()).unwrap();
    let (time_trial, rounds) = race_to(dir.path(), &event, 5);

    let results = RaceResults::load(&event.config, &time_trial, &rounds).unwrap();
    let (table, summaries) = event.replay(&results).unwrap();
    assert_eq!(summaries.len(), 4);
    assert!(summaries.iter().all(|s| s.filled == 80 && s.ignored == 0));
    assert_eq!(table.populated_rows(5).len(), 80);

    let standings = event.standings(&results).unwrap();
    assert_eq!(standings.len(), 80);
    assert_eq!(standings[0].competitor.first_name, "Runner00");
    assert_eq!(standings[0].heat, heat(516));

    for s in &standings {
        assert!(!s.is_combined());
        let i = ability(&s.competitor.first_name);
        assert_eq!(s.official_time, pace(i, 5));
    }

    let report = standings_report(&event.config.name, &standings);
    assert!(report.contains("=== SART 2017: final standings ==="));
    assert_eq!(report.lines().count(), 4 + 80);
}

#[test]
fn test_heat_sheet_after_round_one() {
    let dir = tempfile::tempdir().unwrap();
    let event = Event::load(&event_path()).unwrap();
    let (time_trial, rounds) = race_to(dir.path(), &event, 1);

    let results = RaceResults::load(&event.config, &time_trial, &rounds).unwrap();
    let (table, _) = event.replay(&results).unwrap();
    let sheet = heat_sheet(&event.config.name, &table, 2);

    assert!(sheet.contains("Heat 201 (start 10:00)"));
    assert!(sheet.contains("Heat 216 (start 11:15)"));
    // Seeds 1 and 16 win heats 101 and 102 and both race heat 201.
    let heat_201 = sheet
        .split("Heat 202")
        .next()
        .unwrap()
        .split("Heat 201")
        .nth(1)
        .unwrap();
    assert!(heat_201.contains("Runner00"));
    assert!(heat_201.contains("Runner15"));
}

#[test]
fn test_roster_export_for_final_round() {
    let dir = tempfile::tempdir().unwrap();
    let event = Event::load(&event_path()).unwrap();
    let (time_trial, rounds) = race_to(dir.path(), &event, 4);

    let results = RaceResults::load(&event.config, &time_trial, &rounds).unwrap();
    let (table, _) = event.replay(&results).unwrap();

    let mut csv = String::from("Bib,Surname,First name\n");
    for i in 0..80 {
        writeln!(csv, "{},Field,Runner{:02}", 100 + i, i).unwrap();
    }
    writeln!(csv, ",,").unwrap();
    let roster = RosterFile::read(csv.as_bytes()).unwrap();

    let filled = fill_roster(&roster, &table, 5, &event.config.roster).unwrap();
    assert_eq!(filled.records.len(), 80);
    let fastest = &filled.records[0];
    assert_eq!(
        fastest.iter().collect::<Vec<_>>(),
        vec!["100", "Field", "Runner00", "Heat 516", "H516", "516"]
    );
}

#[test]
fn test_tied_round_fails_but_earlier_rounds_replay() {
    let dir = tempfile::tempdir().unwrap();
    let event = Event::load(&event_path()).unwrap();
    let (time_trial, mut rounds) = race_to(dir.path(), &event, 2);

    // Heat 201's second runner matches its winner.
    let text = fs::read_to_string(&rounds[1]).unwrap();
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let winner_time = lines[1].split(',').nth(2).unwrap().to_string();
    let mut second: Vec<String> = lines[2].split(',').map(str::to_string).collect();
    second[2] = winner_time;
    lines[2] = second.join(",");
    fs::write(&rounds[1], lines.join("\n")).unwrap();

    let results = RaceResults::load(&event.config, &time_trial, &rounds).unwrap();
    match event.replay(&results) {
        Err(EventError::Bracket(BracketError::TieDetected { reports })) => {
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].to_string(), "heat pair 201/203 has 1 duplicate time");
        }
        other => panic!("expected tie, got {:?}", other.map(|(_, s)| s)),
    }

    rounds.truncate(1);
    let results = RaceResults::load(&event.config, &time_trial, &rounds).unwrap();
    let (table, _) = event.replay(&results).unwrap();
    assert_eq!(table.populated_rows(2).len(), 80);
}
