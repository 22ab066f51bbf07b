use hilo_oracle::model::{Category, OutcomeRecord, Vote};
use hilo_oracle::strategy::{RunContinuationBreaker, Strategy};

fn history(pattern: &str) -> Vec<OutcomeRecord> {
    pattern
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let dice = if ch == 'H' { [6, 6, 1] } else { [1, 1, 6] };
            OutcomeRecord::new(i as u64 + 1, dice)
        })
        .collect()
}

#[test]
fn alternating_twenty_ending_low_predicts_high() {
    let h = history(&"HL".repeat(10));
    assert_eq!(h.len(), 20);
    assert_eq!(h.last().unwrap().category, Category::Low);
    assert_eq!(RunContinuationBreaker.predict(&h), Vote::High);
}

#[test]
fn single_run_abstains() {
    assert_eq!(RunContinuationBreaker.predict(&history("HHHHHHH")), Vote::Abstain);
    assert_eq!(RunContinuationBreaker.predict(&[]), Vote::Abstain);
}

#[test]
fn long_run_continues() {
    assert_eq!(RunContinuationBreaker.predict(&history("LHHHH")), Vote::High);
    assert_eq!(RunContinuationBreaker.predict(&history("HLLLLLLL")), Vote::Low);
}

#[test]
fn short_runs_without_alternation_abstain() {
    assert_eq!(RunContinuationBreaker.predict(&history("HHLLH")), Vote::Abstain);
    assert_eq!(RunContinuationBreaker.predict(&history("HLL")), Vote::Abstain);
}

#[test]
fn needs_four_single_runs_for_alternation() {
    assert_eq!(RunContinuationBreaker.predict(&history("HLH")), Vote::Abstain);
    assert_eq!(RunContinuationBreaker.predict(&history("HLHL")), Vote::High);
}

#[test]
fn seven_run_continues_rather_than_reverses() {
    // the continuation rule is checked first, so runs of six or more keep
    // following the run
    assert_eq!(RunContinuationBreaker.predict(&history("LHHHHHHH")), Vote::High);
    assert_eq!(RunContinuationBreaker.predict(&history("HLHLHHHHHHH")), Vote::High);
}
