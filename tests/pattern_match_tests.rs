use hilo_oracle::model::{OutcomeRecord, Vote};
use hilo_oracle::strategy::{NeoPatternSimilarity, Strategy, WeightedLongRangeMatch};

fn history(pattern: &str) -> Vec<OutcomeRecord> {
    pattern
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let dice = if ch == 'H' { [4, 4, 4] } else { [1, 3, 5] };
            OutcomeRecord::new(i as u64 + 1, dice)
        })
        .collect()
}

#[test]
fn neo_pattern_needs_twenty_records() {
    let h = history(&"HL".repeat(9));
    assert_eq!(NeoPatternSimilarity::default().predict(&h), Vote::Abstain);
}

#[test]
fn neo_pattern_continues_alternation() {
    let h = history(&"HL".repeat(10));
    assert_eq!(NeoPatternSimilarity::default().predict(&h), Vote::High);
}

#[test]
fn neo_pattern_continues_period_three() {
    let h = history(&"HHL".repeat(7));
    assert_eq!(NeoPatternSimilarity::default().predict(&h), Vote::High);
}

#[test]
fn long_range_needs_one_hundred_records() {
    let h = history(&"HL".repeat(49));
    assert_eq!(WeightedLongRangeMatch::default().predict(&h), Vote::Abstain);
}

#[test]
fn long_range_continues_alternation() {
    let h = history(&"HL".repeat(50));
    assert_eq!(WeightedLongRangeMatch::default().predict(&h), Vote::High);
}

#[test]
fn long_range_is_pure() {
    let h = history(&"HHLLHLHHHL".repeat(11));
    let s = WeightedLongRangeMatch::default();
    let first = s.predict(&h);
    assert_eq!(first, s.predict(&h));
    assert_eq!(h.len(), 110);
}
