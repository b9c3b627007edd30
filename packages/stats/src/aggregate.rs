//! Grouping of region rows into per-state totals.

use std::collections::HashMap;

use outbreak_stats_models::{RawRegionRecord, StateAggregate};

/// Sums every metric per distinct region label.
///
/// Labels are compared exactly, so `"NY"` and `"ny"` form separate groups.
/// Groups are returned in order of first appearance.
#[must_use]
pub fn aggregate(records: &[RawRegionRecord]) -> Vec<StateAggregate> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut aggregates: Vec<StateAggregate> = Vec::new();

    for record in records {
        let idx = *positions.entry(record.region.as_str()).or_insert_with(|| {
            aggregates.push(StateAggregate::empty(record.region.as_str()));
            aggregates.len() - 1
        });
        aggregates[idx].add(record);
    }

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, confirmed: u64, active: u64, recovered: u64, death: u64) -> RawRegionRecord {
        RawRegionRecord {
            region: region.to_string(),
            total_infected: confirmed,
            active_cases: active,
            recovered,
            death,
        }
    }

    #[test]
    fn sums_rows_per_state() {
        let records = vec![
            record("NY", 10, 1, 8, 1),
            record("NY", 5, 2, 3, 0),
            record("CA", 3, 0, 3, 0),
        ];

        let aggs = aggregate(&records);

        assert_eq!(aggs.len(), 2);
        assert_eq!(aggs[0].state, "NY");
        assert_eq!(aggs[0].confirmed, 15);
        assert_eq!(aggs[0].active, 3);
        assert_eq!(aggs[0].recovered, 11);
        assert_eq!(aggs[0].deaths, 1);
        assert_eq!(aggs[1].state, "CA");
        assert_eq!(aggs[1].confirmed, 3);
    }

    #[test]
    fn grouping_is_case_sensitive() {
        let records = vec![record("NY", 1, 0, 0, 0), record("ny", 2, 0, 0, 0)];
        let aggs = aggregate(&records);

        assert_eq!(aggs.len(), 2);
        assert_eq!(aggs[0].state, "NY");
        assert_eq!(aggs[0].confirmed, 1);
        assert_eq!(aggs[1].state, "ny");
        assert_eq!(aggs[1].confirmed, 2);
    }

    #[test]
    fn each_total_matches_its_rows() {
        let records = vec![
            record("A", 4, 1, 2, 1),
            record("B", 9, 3, 5, 1),
            record("A", 6, 2, 3, 1),
            record("C", 0, 0, 0, 0),
            record("B", 1, 0, 1, 0),
        ];

        for agg in aggregate(&records) {
            let rows: Vec<&RawRegionRecord> =
                records.iter().filter(|r| r.region == agg.state).collect();
            assert_eq!(agg.confirmed, rows.iter().map(|r| r.total_infected).sum::<u64>());
            assert_eq!(agg.active, rows.iter().map(|r| r.active_cases).sum::<u64>());
            assert_eq!(agg.recovered, rows.iter().map(|r| r.recovered).sum::<u64>());
            assert_eq!(agg.deaths, rows.iter().map(|r| r.death).sum::<u64>());
        }
    }

    #[test]
    fn empty_input() {
        assert!(aggregate(&[]).is_empty());
    }
}
