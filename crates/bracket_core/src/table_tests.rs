use super::*;
use crate::topology::{Policy, Topology, TopologyEntry};

fn heat(n: u32) -> Heat {
    Heat::from_number(n).unwrap()
}

/// 80 seeds spread over 16 round 1 heats, no later rounds.
fn eighty_seed_topology() -> Topology {
    let mut topology = Topology::default();
    for ordinal in 1..=16u32 {
        let seeds = (0..5).map(|k| ordinal + 16 * k).collect();
        topology.round0.insert(heat(100 + ordinal), seeds);
    }
    topology
}

fn trial(count: u64) -> Vec<HeatResult> {
    // Deliberately out of order: slowest first.
    (0..count)
        .rev()
        .map(|i| HeatResult {
            competitor: Competitor::new(&format!("Runner{}", i), "Trial"),
            time: ElapsedTime::from_secs(600 + i * 3),
            heat: None,
        })
        .collect()
}

#[test]
fn test_scaffold_sets_round_heat_and_schedule() {
    let mut topology = eighty_seed_topology();
    for ordinal in (1..=16u32).step_by(2) {
        topology.entries.push(TopologyEntry::pair(
            heat(100 + ordinal),
            heat(101 + ordinal),
            heat(200 + ordinal),
            heat(201 + ordinal),
            Policy::paired(5, 3),
        ));
    }
    let keys = SeedKeys::build(&topology).unwrap();
    let schedule: Schedule = vec![(heat(201), "10:30".to_string())].into_iter().collect();
    let table = BracketTable::scaffold(&keys, &schedule);

    assert_eq!(table.len(), keys.len());
    let winner = table.row(&SlotLabel::Winner(heat(101))).unwrap();
    assert_eq!(winner.next_heat, heat(201));
    assert_eq!(winner.round, 2);
    assert_eq!(winner.next_heat_time.as_deref(), Some("10:30"));
    assert!(!winner.is_populated());

    let seed = table.row(&SlotLabel::Seed(1)).unwrap();
    assert_eq!(seed.round, 1);
    assert_eq!(seed.next_heat_time, None);

    for row in table.rows() {
        assert_eq!(row.round, row.next_heat.round());
    }
}

#[test]
fn test_seed_round0_fastest_is_seed_one() {
    let keys = SeedKeys::build(&eighty_seed_topology()).unwrap();
    let mut table = BracketTable::scaffold(&keys, &Schedule::new());

    let seeded = table.seed_round0(&trial(80)).unwrap();
    assert_eq!(seeded, 80);

    let first = table.row(&SlotLabel::Seed(1)).unwrap();
    assert_eq!(first.competitor.as_ref().unwrap().first_name, "Runner0");
    assert_eq!(first.time, Some(ElapsedTime::from_secs(600)));

    let last = table.row(&SlotLabel::Seed(80)).unwrap();
    assert_eq!(last.competitor.as_ref().unwrap().first_name, "Runner79");

    let mut previous = ElapsedTime::ZERO;
    for seed in 1..=80 {
        let row = table.row(&SlotLabel::Seed(seed)).unwrap();
        let time = row.time.unwrap();
        assert!(time > previous, "seed {} out of order", seed);
        previous = time;
    }
    assert_eq!(table.populated_rows(1).len(), 80);
}

#[test]
fn test_seed_round0_rejects_ties_without_writing() {
    let keys = SeedKeys::build(&eighty_seed_topology()).unwrap();
    let mut table = BracketTable::scaffold(&keys, &Schedule::new());

    let mut results = trial(10);
    results[3].time = results[4].time;
    match table.seed_round0(&results) {
        Err(BracketError::TieDetected { reports }) => {
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].scope, TieScope::TimeTrial);
            assert_eq!(reports[0].duplicates, 1);
        }
        other => panic!("expected tie error, got {:?}", other),
    }
    assert!(table.populated_rows(1).is_empty());
}

#[test]
fn test_seed_round0_more_finishers_than_seeds() {
    let keys = SeedKeys::build(&eighty_seed_topology()).unwrap();
    let mut table = BracketTable::scaffold(&keys, &Schedule::new());

    assert_eq!(
        table.seed_round0(&trial(81)),
        Err(BracketError::RowNotFound(LookupKey::Slot(SlotLabel::Seed(81))))
    );
    assert!(table.populated_rows(1).is_empty());
}

#[test]
fn test_lookup_of_unknown_slot() {
    let keys = SeedKeys::build(&eighty_seed_topology()).unwrap();
    let table = BracketTable::scaffold(&keys, &Schedule::new());
    let missing = SlotLabel::Winner(heat(101));
    assert_eq!(
        table.row(&missing),
        Err(BracketError::RowNotFound(LookupKey::Slot(missing)))
    );
}

#[test]
fn test_rows_for_heat_and_find_competitor() {
    let keys = SeedKeys::build(&eighty_seed_topology()).unwrap();
    let mut table = BracketTable::scaffold(&keys, &Schedule::new());
    table.seed_round0(&trial(80)).unwrap();

    let heat_101: Vec<SlotLabel> = table
        .rows_for_heat(heat(101))
        .iter()
        .map(|r| r.slot)
        .collect();
    assert_eq!(
        heat_101,
        vec![1, 17, 33, 49, 65]
            .into_iter()
            .map(SlotLabel::Seed)
            .collect::<Vec<_>>()
    );

    let runner = Competitor::new("Runner16", "Trial");
    let row = table.find_competitor(1, &runner).unwrap();
    assert_eq!(row.slot, SlotLabel::Seed(17));
    assert!(table.find_competitor(2, &runner).is_none());
}

#[test]
fn test_injected_identity_is_written() {
    let mut topology = eighty_seed_topology();
    let late_entry = Competitor::new("Dana", "Late");
    topology.injections.push(Injection {
        heat: heat(103),
        slot: SlotLabel::Seed(81),
        competitor: Some(late_entry.clone()),
    });
    let keys = SeedKeys::build(&topology).unwrap();
    let mut table = BracketTable::scaffold(&keys, &Schedule::new());
    table.apply_injections(&topology.injections).unwrap();

    let row = table.row(&SlotLabel::Seed(81)).unwrap();
    assert_eq!(row.next_heat, heat(103));
    assert_eq!(row.competitor.as_ref(), Some(&late_entry));
    assert_eq!(row.time, None);
}
