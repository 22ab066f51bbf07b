use serde::Deserialize;
use serde_json::Value;

use crate::model::{Category, OutcomeRecord};

/// One item of the upstream results array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeedItem {
    #[serde(rename = "SessionId")]
    pub session_id: u64,
    #[serde(rename = "FirstDice")]
    pub first_dice: u8,
    #[serde(rename = "SecondDice")]
    pub second_dice: u8,
    #[serde(rename = "ThirdDice")]
    pub third_dice: u8,
    #[serde(rename = "DiceSum")]
    pub dice_sum: u8,
    #[serde(rename = "BetSide", default)]
    pub bet_side: Option<Value>,
}

impl RawFeedItem {
    pub fn dice(&self) -> [u8; 3] {
        [self.first_dice, self.second_dice, self.third_dice]
    }

    /// `None` when a die is outside 1..=6 or the reported sum disagrees
    /// with the dice.
    pub fn to_record(&self) -> Option<OutcomeRecord> {
        let dice = self.dice();
        if dice.iter().any(|d| !(1..=6).contains(d)) {
            return None;
        }
        let record = OutcomeRecord::new(self.session_id, dice);
        if record.total != self.dice_sum {
            return None;
        }
        Some(record.with_side_label(side_label(self.bet_side.as_ref())))
    }
}

/// Integer 0 marks the High side, integer 1 the Low side; any other value
/// (floats, strings, null) carries no label.
pub fn side_label(bet_side: Option<&Value>) -> Option<Category> {
    match bet_side.and_then(Value::as_u64) {
        Some(0) => Some(Category::High),
        Some(1) => Some(Category::Low),
        _ => None,
    }
}

/// Convert a raw payload into records ordered by ascending session with
/// duplicate sessions and malformed items dropped. The input is not touched.
pub fn normalize(items: &[RawFeedItem]) -> Vec<OutcomeRecord> {
    let mut out: Vec<OutcomeRecord> = items
        .iter()
        .filter_map(|item| {
            let record = item.to_record();
            if record.is_none() {
                tracing::debug!(session = item.session_id, "Dropping malformed feed item");
            }
            record
        })
        .collect();
    out.sort_by_key(|r| r.session_id);
    out.dedup_by_key(|r| r.session_id);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_field_names() {
        let json = r#"{"SessionId": 42, "FirstDice": 6, "SecondDice": 5, "ThirdDice": 1,
                       "DiceSum": 12, "BetSide": 1}"#;
        let item: RawFeedItem = serde_json::from_str(json).unwrap();
        let rec = item.to_record().unwrap();
        assert_eq!(rec.session_id, 42);
        assert_eq!(rec.total, 12);
        assert_eq!(rec.category, Category::High);
        assert_eq!(rec.display_category(), Category::Low);
    }

    #[test]
    fn missing_bet_side_is_unlabelled() {
        let json = r#"{"SessionId": 1, "FirstDice": 1, "SecondDice": 1, "ThirdDice": 1, "DiceSum": 3}"#;
        let item: RawFeedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.bet_side, None);
        assert_eq!(item.to_record().unwrap().side_label, None);
    }
}
