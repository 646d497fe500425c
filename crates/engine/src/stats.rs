//! Aggregates over a set of records, used by the chart and `stats` command.

use crate::{Category, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryStats {
    pub total: f64,
    pub average: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub coffee: CategoryStats,
    pub books: CategoryStats,
    pub trips: CategoryStats,
}

impl Summary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut summary = Summary::default();
        for record in records {
            summary.count += 1;
            for category in Category::ALL {
                let value = record.quantities().get(category).value();
                let stats = summary.category_mut(category);
                stats.total += value;
                stats.max = stats.max.max(value);
            }
        }
        if summary.count > 0 {
            let count = summary.count as f64;
            for category in Category::ALL {
                let stats = summary.category_mut(category);
                stats.average = stats.total / count;
            }
        }
        summary
    }

    pub fn category(&self, category: Category) -> CategoryStats {
        match category {
            Category::Coffee => self.coffee,
            Category::Books => self.books,
            Category::Trips => self.trips,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut CategoryStats {
        match category {
            Category::Coffee => &mut self.coffee,
            Category::Books => &mut self.books,
            Category::Trips => &mut self.trips,
        }
    }

    /// Largest single value across all categories; the chart's y bound.
    pub fn peak(&self) -> f64 {
        Category::ALL
            .iter()
            .map(|c| self.category(*c).max)
            .fold(0.0, f64::max)
    }
}

/// Values of one category in the given record order.
pub fn series(records: &[&Record], category: Category) -> Vec<f64> {
    records
        .iter()
        .map(|record| record.quantities().get(category).value())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quantities, Quantity, RecordId};

    fn record(id: i64, coffee: f64, books: f64, trips: f64) -> Record {
        Record::new(
            RecordId::new(id),
            "01/01/2024",
            Quantities::new(
                Quantity::new(coffee).unwrap(),
                Quantity::new(books).unwrap(),
                Quantity::new(trips).unwrap(),
            ),
        )
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = Summary::from_records(&Vec::<Record>::new());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.peak(), 0.0);
    }

    #[test]
    fn totals_averages_and_maxima() {
        let records = vec![record(1, 2.0, 1.0, 0.0), record(2, 4.0, 0.0, 3.0)];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.coffee.total, 6.0);
        assert_eq!(summary.coffee.average, 3.0);
        assert_eq!(summary.books.max, 1.0);
        assert_eq!(summary.trips.average, 1.5);
        assert_eq!(summary.peak(), 4.0);
    }

    #[test]
    fn series_follows_given_order() {
        let records = vec![record(1, 2.0, 1.0, 0.0), record(2, 4.0, 0.0, 3.0)];
        let view: Vec<&Record> = records.iter().rev().collect();
        assert_eq!(series(&view, Category::Coffee), vec![4.0, 2.0]);
    }
}
