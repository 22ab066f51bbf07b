use hilo_oracle::features::{entropy, runs, similarity, FeatureSet};
use hilo_oracle::model::{Category, OutcomeRecord};

use Category::{High as H, Low as L};

fn dice_for(total: u8) -> [u8; 3] {
    let d1 = total.saturating_sub(2).min(6);
    let rest = total - d1;
    let d2 = (rest - 1).min(6);
    [d1, d2, rest - d2]
}

fn rec(session: u64, total: u8) -> OutcomeRecord {
    OutcomeRecord::new(session, dice_for(total))
}

#[test]
fn run_lengths_sum_to_input_length() {
    let cases: Vec<Vec<Category>> = vec![
        vec![],
        vec![H],
        vec![H, H, H],
        vec![H, L, H, L],
        vec![L, L, H, H, H, L, H, H],
    ];
    for seq in cases {
        let r = runs(&seq);
        assert_eq!(r.iter().map(|x| x.length).sum::<usize>(), seq.len());
        for pair in r.windows(2) {
            assert_ne!(pair[0].value, pair[1].value, "runs must be maximal");
        }
    }
}

#[test]
fn entropy_of_constant_sequence_is_zero() {
    assert_eq!(entropy(&[H; 40]), 0.0);
    assert_eq!(entropy(&[]), 0.0);
}

#[test]
fn entropy_of_balanced_sequence_is_one_bit() {
    let alternating: Vec<Category> = (0..1000).map(|i| if i % 2 == 0 { H } else { L }).collect();
    assert!((entropy(&alternating) - 1.0).abs() < 1e-12);

    let mut shuffled = vec![H; 500];
    shuffled.extend(vec![L; 500]);
    shuffled.rotate_left(137);
    assert!((entropy(&shuffled) - 1.0).abs() < 1e-12);
}

#[test]
fn empty_history_yields_neutral_features() {
    let f = FeatureSet::extract(&[]);
    assert_eq!(f, FeatureSet::default());
    assert!(f.runs.is_empty());
    assert_eq!(f.longest_run, 0);
    assert_eq!(f.last_run(), None);
}

#[test]
fn totals_mean_and_std_are_population_statistics() {
    let history = vec![rec(1, 3), rec(2, 18)];
    let f = FeatureSet::extract(&history);
    assert!((f.mean_total - 10.5).abs() < 1e-12);
    assert!((f.std_total - 7.5).abs() < 1e-12);
    assert_eq!(f.counts.high, 1);
    assert_eq!(f.counts.low, 1);
}

#[test]
fn longest_run_and_last_run_are_reported() {
    let history: Vec<OutcomeRecord> = [12, 12, 12, 5, 14, 14]
        .iter()
        .enumerate()
        .map(|(i, &t)| rec(i as u64 + 1, t))
        .collect();
    let f = FeatureSet::extract(&history);
    assert_eq!(f.longest_run, 3);
    let last = f.last_run().unwrap();
    assert_eq!(last.value, H);
    assert_eq!(last.length, 2);
}

#[test]
fn similarity_is_fraction_of_matching_positions() {
    assert_eq!(similarity(&[H, H, L, L], &[H, H, L, L]), 1.0);
    assert_eq!(similarity(&[H, H, L, L], &[L, L, H, H]), 0.0);
    assert!((similarity(&[H, L, H, L, H], &[H, L, H, H, H]) - 0.8).abs() < 1e-12);
}
