use super::*;

fn heat(n: u32) -> Heat {
    Heat::from_number(n).unwrap()
}

#[test]
fn test_parse_all_label_forms() {
    assert_eq!("57".parse::<SlotLabel>().unwrap(), SlotLabel::Seed(57));
    assert_eq!(
        "W101".parse::<SlotLabel>().unwrap(),
        SlotLabel::Winner(heat(101))
    );
    assert_eq!(
        "101/102-Q3".parse::<SlotLabel>().unwrap(),
        SlotLabel::Pooled {
            first: heat(101),
            second: heat(102),
            rank: 3
        }
    );
    assert_eq!(
        "402-Q7".parse::<SlotLabel>().unwrap(),
        SlotLabel::Single {
            heat: heat(402),
            rank: 7
        }
    );
}

#[test]
fn test_display_matches_parsed_text() {
    for text in ["1", "80", "W216", "202/204-Q11", "103/104-Q6", "402-Q1"] {
        let slot: SlotLabel = text.parse().unwrap();
        assert_eq!(slot.to_string(), text);
    }
}

#[test]
fn test_rejects_malformed_labels() {
    for text in ["", "0", "W", "W99", "101/102-Q0", "101/102-Qx", "abc", "101-"] {
        assert!(
            text.parse::<SlotLabel>().is_err(),
            "`{}` should not parse",
            text
        );
    }
}

#[test]
fn test_rank_and_round() {
    let pooled: SlotLabel = "301/302-Q2".parse().unwrap();
    assert_eq!(pooled.rank(), Some(2));
    assert_eq!(pooled.earned_in_round(), 3);

    let winner: SlotLabel = "W116".parse().unwrap();
    assert_eq!(winner.rank(), None);
    assert_eq!(winner.earned_in_round(), 1);

    assert_eq!(SlotLabel::Seed(12).earned_in_round(), 0);
}

#[test]
fn test_serde_uses_label_text() {
    let slot: SlotLabel = "101/102-Q3".parse().unwrap();
    let json = serde_json::to_string(&slot).unwrap();
    assert_eq!(json, "\"101/102-Q3\"");
    let back: SlotLabel = serde_json::from_str(&json).unwrap();
    assert_eq!(back, slot);
}
