//! One logged entry and the values that make it up.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Quantity;

/// Identifier of a [`Record`], derived from the creation timestamp in
/// milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// The three tracked categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Coffee,
    Books,
    Trips,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Coffee, Category::Books, Category::Trips];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::Books => "books",
            Self::Trips => "trips",
        }
    }
}

/// The mutable part of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quantities {
    pub coffee: Quantity,
    pub books: Quantity,
    pub trips: Quantity,
}

impl Quantities {
    #[must_use]
    pub fn new(coffee: Quantity, books: Quantity, trips: Quantity) -> Self {
        Self {
            coffee,
            books,
            trips,
        }
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Quantity {
        match category {
            Category::Coffee => self.coffee,
            Category::Books => self.books,
            Category::Trips => self.trips,
        }
    }
}

/// A single logged entry.
///
/// `id` and `date` are fixed at creation; only the three quantities change
/// afterwards, through the tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    date: String,
    coffee: Quantity,
    books: Quantity,
    trips: Quantity,
}

impl Record {
    pub fn new(id: RecordId, date: impl Into<String>, quantities: Quantities) -> Self {
        Self {
            id,
            date: date.into(),
            coffee: quantities.coffee,
            books: quantities.books,
            trips: quantities.trips,
        }
    }

    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[must_use]
    pub fn coffee(&self) -> Quantity {
        self.coffee
    }

    #[must_use]
    pub fn books(&self) -> Quantity {
        self.books
    }

    #[must_use]
    pub fn trips(&self) -> Quantity {
        self.trips
    }

    #[must_use]
    pub fn quantities(&self) -> Quantities {
        Quantities::new(self.coffee, self.books, self.trips)
    }

    pub(crate) fn set_quantities(&mut self, quantities: Quantities) {
        self.coffee = quantities.coffee;
        self.books = quantities.books;
        self.trips = quantities.trips;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(value: f64) -> Quantity {
        Quantity::new(value).unwrap()
    }

    #[test]
    fn serializes_with_labeled_fields() {
        let record = Record::new(
            RecordId::new(1_700_000_000_000),
            "14/11/2023",
            Quantities::new(q(2.0), q(0.5), q(1.0)),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1_700_000_000_000_i64,
                "date": "14/11/2023",
                "coffee": 2.0,
                "books": 0.5,
                "trips": 1.0,
            })
        );
    }

    #[test]
    fn deserializes_integer_quantities() {
        let record: Record = serde_json::from_str(
            r#"{"id": 3, "date": "01/01/2024", "coffee": 5, "books": 0, "trips": 1}"#,
        )
        .unwrap();
        assert_eq!(record.id(), RecordId::new(3));
        assert_eq!(record.coffee().value(), 5.0);
    }

    #[test]
    fn deserialize_rejects_negative_quantity() {
        let res = serde_json::from_str::<Record>(
            r#"{"id": 3, "date": "01/01/2024", "coffee": -5, "books": 0, "trips": 1}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn set_quantities_keeps_identity() {
        let mut record = Record::new(RecordId::new(7), "01/01/2024", Quantities::default());
        record.set_quantities(Quantities::new(q(1.0), q(2.0), q(3.0)));
        assert_eq!(record.id(), RecordId::new(7));
        assert_eq!(record.date(), "01/01/2024");
        assert_eq!(record.quantities().get(Category::Trips), q(3.0));
    }
}
