//! Vehicle summarization.

use fleetgraph_ingest::VehicleRecord;
use serde::Serialize;

/// Trim assumed when a vehicle carries none.
pub const DEFAULT_TRIM: &str = "standard";

/// Aggregate stats over one inventory, carried on the fleet root node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSummary {
    pub total: usize,
    pub avg_range: i64,
    pub trims: Vec<String>,
}

/// Summarize an inventory.
///
/// Empty input short-circuits to all-zero output (no division). A missing
/// or non-numeric range counts as 0; a missing trim counts as
/// [`DEFAULT_TRIM`]. Trims are deduplicated in first-appearance order.
pub fn summarize_vehicles(vehicles: &[VehicleRecord]) -> VehicleSummary {
    if vehicles.is_empty() {
        return VehicleSummary {
            total: 0,
            avg_range: 0,
            trims: Vec::new(),
        };
    }

    let total = vehicles.len();
    let range_sum: i64 = vehicles.iter().filter_map(|v| v.range).sum();
    let avg_range = (range_sum as f64 / total as f64).round() as i64;

    let mut trims: Vec<String> = Vec::new();
    for vehicle in vehicles {
        let trim = vehicle
            .trim
            .clone()
            .unwrap_or_else(|| DEFAULT_TRIM.to_string());
        if !trims.contains(&trim) {
            trims.push(trim);
        }
    }

    VehicleSummary {
        total,
        avg_range,
        trims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(range: Option<i64>, trim: Option<&str>) -> VehicleRecord {
        VehicleRecord {
            range,
            trim: trim.map(str::to_string),
            ..VehicleRecord::default()
        }
    }

    #[test]
    fn empty_input_short_circuits() {
        let summary = summarize_vehicles(&[]);
        assert_eq!(
            summary,
            VehicleSummary {
                total: 0,
                avg_range: 0,
                trims: Vec::new(),
            }
        );
    }

    #[test]
    fn averages_with_missing_ranges_as_zero() {
        let vehicles = vec![vehicle(Some(100), Some("sport")), vehicle(Some(300), None)];
        let summary = summarize_vehicles(&vehicles);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.avg_range, 200);
        assert_eq!(summary.trims, vec!["sport", "standard"]);
    }

    #[test]
    fn missing_range_counts_as_zero_in_the_average() {
        let vehicles = vec![vehicle(None, None), vehicle(Some(300), None)];
        assert_eq!(summarize_vehicles(&vehicles).avg_range, 150);
    }

    #[test]
    fn average_rounds_to_nearest() {
        let vehicles = vec![
            vehicle(Some(100), None),
            vehicle(Some(100), None),
            vehicle(Some(101), None),
        ];
        // 301 / 3 = 100.33… → 100
        assert_eq!(summarize_vehicles(&vehicles).avg_range, 100);
    }

    #[test]
    fn trims_dedupe_in_first_appearance_order() {
        let vehicles = vec![
            vehicle(None, Some("touring")),
            vehicle(None, Some("sport")),
            vehicle(None, Some("touring")),
            vehicle(None, None),
        ];
        assert_eq!(
            summarize_vehicles(&vehicles).trims,
            vec!["touring", "sport", "standard"]
        );
    }
}
