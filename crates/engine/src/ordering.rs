use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, Record};

/// Presentation order for the record list and chart.
///
/// Sorting never touches the stored order; [`DisplayOrder::apply`] returns a
/// new vector of references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayOrder {
    /// Descending by id, which follows creation time.
    #[default]
    #[serde(rename = "recent")]
    MostRecent,
    /// Descending by coffee; ties keep their stored order.
    #[serde(rename = "coffee")]
    HighestCoffee,
}

impl DisplayOrder {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MostRecent => "Most recent",
            Self::HighestCoffee => "Highest coffee",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::MostRecent => "recent",
            Self::HighestCoffee => "coffee",
        }
    }

    /// The other ordering, for a single toggle key.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::MostRecent => Self::HighestCoffee,
            Self::HighestCoffee => Self::MostRecent,
        }
    }

    pub fn apply<'a>(self, records: &'a [Record]) -> Vec<&'a Record> {
        let mut view: Vec<&Record> = records.iter().collect();
        match self {
            Self::MostRecent => view.sort_by(|a, b| b.id().cmp(&a.id())),
            Self::HighestCoffee => {
                view.sort_by(|a, b| b.coffee().value().total_cmp(&a.coffee().value()))
            }
        }
        view
    }
}

impl fmt::Display for DisplayOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DisplayOrder {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" | "most-recent" | "most_recent" => Ok(Self::MostRecent),
            "coffee" | "highest-coffee" | "highest_coffee" => Ok(Self::HighestCoffee),
            other => Err(EngineError::UnknownOption(format!(
                "ordering \"{other}\" (expected recent or coffee)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quantities, Quantity, RecordId};

    fn record(id: i64, coffee: f64) -> Record {
        Record::new(
            RecordId::new(id),
            "01/01/2024",
            Quantities::new(
                Quantity::new(coffee).unwrap(),
                Quantity::ZERO,
                Quantity::ZERO,
            ),
        )
    }

    fn ids(view: &[&Record]) -> Vec<i64> {
        view.iter().map(|r| r.id().get()).collect()
    }

    #[test]
    fn most_recent_sorts_by_id_descending() {
        let records = vec![record(1, 5.0), record(2, 9.0), record(3, 1.0)];
        assert_eq!(ids(&DisplayOrder::MostRecent.apply(&records)), vec![3, 2, 1]);
    }

    #[test]
    fn highest_coffee_sorts_by_coffee_descending() {
        let records = vec![record(1, 5.0), record(2, 9.0), record(3, 1.0)];
        assert_eq!(
            ids(&DisplayOrder::HighestCoffee.apply(&records)),
            vec![2, 1, 3]
        );
    }

    #[test]
    fn coffee_ties_keep_stored_order() {
        let records = vec![record(4, 2.0), record(1, 2.0), record(9, 3.0)];
        assert_eq!(
            ids(&DisplayOrder::HighestCoffee.apply(&records)),
            vec![9, 4, 1]
        );
    }

    #[test]
    fn apply_does_not_reorder_source() {
        let records = vec![record(1, 5.0), record(2, 9.0)];
        let _ = DisplayOrder::MostRecent.apply(&records);
        assert_eq!(records[0].id(), RecordId::new(1));
    }

    #[test]
    fn parses_keys() {
        assert_eq!("recent".parse::<DisplayOrder>().unwrap(), DisplayOrder::MostRecent);
        assert_eq!("Coffee".parse::<DisplayOrder>().unwrap(), DisplayOrder::HighestCoffee);
        assert!("books".parse::<DisplayOrder>().is_err());
        assert_eq!(DisplayOrder::default().toggled(), DisplayOrder::HighestCoffee);
    }
}
