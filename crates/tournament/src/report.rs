//! Heat sheets and standings printouts

use std::collections::BTreeMap;

use bracket_core::{BracketRow, BracketTable, FinalStanding, Heat, SeedKeys};

/// Heat sheet for `round`: heats ascending, racers in each heat ordered by
/// the time that earned their slot (slots still open listed last).
pub fn heat_sheet(event_name: &str, table: &BracketTable, round: u8) -> String {
    let mut heats: BTreeMap<Heat, Vec<&BracketRow>> = BTreeMap::new();
    for row in table.rows().filter(|r| r.round == round) {
        heats.entry(row.next_heat).or_default().push(row);
    }

    let mut report = String::new();
    report.push_str(&format!("=== {}: round {} ===\n", event_name, round));

    for (heat, mut rows) in heats {
        rows.sort_by_key(|r| (r.time.is_none(), r.time));

        report.push('\n');
        match rows.first().and_then(|r| r.next_heat_time.as_deref()) {
            Some(start) => report.push_str(&format!("{} (start {})\n", heat.long_id(), start)),
            None => report.push_str(&format!("{}\n", heat.long_id())),
        }
        report.push_str(&format!(
            "{:<4} {:<14} {:<20} {:<20} {:>12}\n",
            "#", "Slot", "First name", "Surname", "Time"
        ));
        report.push_str(&"-".repeat(74));
        report.push('\n');

        for (i, row) in rows.iter().enumerate() {
            let (first, surname) = row
                .competitor
                .as_ref()
                .map_or(("-", ""), |c| (c.first_name.as_str(), c.surname.as_str()));
            let time = row.time.map(|t| t.to_string()).unwrap_or_default();
            report.push_str(&format!(
                "{:<4} {:<14} {:<20} {:<20} {:>12}\n",
                i + 1,
                row.slot.to_string(),
                first,
                surname,
                time
            ));
        }
    }

    report
}

/// Final standings, best heat first.
pub fn standings_report(event_name: &str, standings: &[FinalStanding]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== {}: final standings ===\n\n", event_name));
    report.push_str(&format!(
        "{:>4} {:<6} {:>4} {:<28} {:>12} {:>12} {:>12}\n",
        "Pos", "Heat", "In", "Competitor", "Final", "Prior", "Official"
    ));
    report.push_str(&"-".repeat(84));
    report.push('\n');

    for standing in standings {
        let prior = standing
            .prior_time
            .map(|t| t.to_string())
            .unwrap_or_default();
        report.push_str(&format!(
            "{:>4} {:<6} {:>4} {:<28} {:>12} {:>12} {:>12}\n",
            standing.position,
            standing.heat.short_id(),
            standing.heat_position,
            standing.competitor.to_string(),
            standing.leg_time.to_string(),
            prior,
            standing.official_time.to_string()
        ));
    }

    report
}

/// Every heat with its slot labels in generation order
pub fn seed_key_listing(keys: &SeedKeys) -> String {
    let mut heats: Vec<(Heat, Vec<String>)> = keys
        .heats()
        .map(|(heat, slots)| (heat, slots.iter().map(|s| s.to_string()).collect()))
        .collect();
    heats.sort_by_key(|(heat, _)| *heat);

    heats
        .into_iter()
        .map(|(heat, slots)| format!("{}: {}\n", heat, slots.join(", ")))
        .collect()
}
