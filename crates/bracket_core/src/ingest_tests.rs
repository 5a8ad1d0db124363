use super::*;

fn raw(line: usize, surname: &str, first: &str, time: &str, heat: Option<&str>) -> RawResult {
    RawResult {
        line,
        surname: surname.to_string(),
        first_name: first.to_string(),
        time: time.to_string(),
        heat: heat.map(str::to_string),
    }
}

#[test]
fn test_heat_results_sorted_by_time() {
    let rows = vec![
        raw(2, "Lindqvist", "Ada", "00:10:20", Some("101")),
        raw(3, " Okafor ", "Ben", "00:09:58", Some("102")),
        raw(4, "Moreau", "Cleo", "00:10:05", Some("101")),
    ];
    let results = normalize_heat_results(&rows).unwrap();

    let surnames: Vec<&str> = results
        .iter()
        .map(|r| r.competitor.surname.as_str())
        .collect();
    assert_eq!(surnames, vec!["Okafor", "Moreau", "Lindqvist"]);
    assert_eq!(results[0].heat, Some(Heat::from_number(102).unwrap()));
}

#[test]
fn test_blank_rows_are_skipped() {
    let rows = vec![
        raw(2, "Lindqvist", "Ada", "00:10:20", None),
        raw(3, "", "", "", None),
    ];
    let results = normalize_time_trial(&rows).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].heat, None);
}

#[test]
fn test_missing_heat_is_rejected_for_heat_rounds() {
    let rows = vec![raw(7, "Lindqvist", "Ada", "00:10:20", Some(" "))];
    match normalize_heat_results(&rows) {
        Err(BracketError::InvalidResult { line, .. }) => assert_eq!(line, 7),
        other => panic!("expected InvalidResult, got {:?}", other),
    }
}

#[test]
fn test_unparseable_time_reports_line() {
    let rows = vec![
        raw(2, "Lindqvist", "Ada", "00:10:20", None),
        raw(3, "Okafor", "Ben", "DNF", None),
    ];
    match normalize_time_trial(&rows) {
        Err(BracketError::InvalidResult { line, reason }) => {
            assert_eq!(line, 3);
            assert!(reason.contains("Ben Okafor"));
        }
        other => panic!("expected InvalidResult, got {:?}", other),
    }
}

#[test]
fn test_duplicate_competitor_is_rejected() {
    let rows = vec![
        raw(2, "Lindqvist", "Ada", "00:10:20", None),
        raw(3, "Lindqvist", "Ada ", "00:11:00", None),
    ];
    assert_eq!(
        normalize_time_trial(&rows),
        Err(BracketError::DuplicateCompetitor("Ada Lindqvist".to_string()))
    );
}
