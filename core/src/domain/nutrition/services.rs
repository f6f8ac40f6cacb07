use crate::domain::nutrition::entities::{FoodEntry, Totals};

/// Field-wise sum of all entries. An empty list yields zero totals.
pub fn aggregate(entries: &[FoodEntry]) -> Totals {
    entries.iter().map(Totals::from).sum()
}

/// Insulin units for `total_carbs` at the given carb-to-insulin ratio.
///
/// Returns 0 unless both values are positive.
pub fn estimate_dose(total_carbs: f64, ratio: f64) -> f64 {
    if total_carbs.is_finite() && ratio.is_finite() && total_carbs > 0.0 && ratio > 0.0 {
        total_carbs / ratio
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, carbs: f64, protein: f64, fat: f64, calories: f64) -> FoodEntry {
        FoodEntry::new(
            name.to_string(),
            "1 serving".to_string(),
            carbs,
            protein,
            fat,
            calories,
        )
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate(&[]), Totals::zero());
    }

    #[test]
    fn test_aggregate_sums_fields() {
        let entries = vec![
            entry("Toast", 10.0, 3.0, 1.0, 70.0),
            entry("Banana", 25.0, 1.3, 0.4, 105.0),
        ];

        let totals = aggregate(&entries);

        assert_eq!(totals.carbohydrates, 35.0);
        assert!((totals.protein - 4.3).abs() < 1e-9);
        assert!((totals.fat - 1.4).abs() < 1e-9);
        assert_eq!(totals.calories, 175.0);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut entries = vec![
            entry("A", 0.1, 7.7, 3.3, 12.0),
            entry("B", 12.34, 0.2, 9.9, 250.0),
            entry("C", 56.7, 1.1, 0.05, 480.5),
            entry("D", 3.0, 30.0, 14.2, 91.0),
        ];
        let forward = aggregate(&entries);
        entries.reverse();
        let backward = aggregate(&entries);
        entries.swap(0, 2);
        let shuffled = aggregate(&entries);

        for other in [backward, shuffled] {
            assert!((forward.carbohydrates - other.carbohydrates).abs() < 1e-9);
            assert!((forward.protein - other.protein).abs() < 1e-9);
            assert!((forward.fat - other.fat).abs() < 1e-9);
            assert!((forward.calories - other.calories).abs() < 1e-9);
        }
    }

    #[test]
    fn test_aggregate_never_produces_nan() {
        let entries = vec![entry("Bad", f64::NAN, f64::INFINITY, -2.0, 10.0)];
        let totals = aggregate(&entries);
        assert_eq!(totals.carbohydrates, 0.0);
        assert_eq!(totals.protein, 0.0);
        assert_eq!(totals.fat, 0.0);
        assert_eq!(totals.calories, 10.0);
    }

    #[test]
    fn test_estimate_dose() {
        assert_eq!(estimate_dose(37.5, 25.0), 1.5);
        assert!((estimate_dose(35.0, 25.0) - 1.4).abs() < 1e-9);
        assert_eq!(estimate_dose(35.0, 10.0), 3.5);
    }

    #[test]
    fn test_estimate_dose_zero_cases() {
        assert_eq!(estimate_dose(0.0, 25.0), 0.0);
        assert_eq!(estimate_dose(35.0, 0.0), 0.0);
        assert_eq!(estimate_dose(-5.0, 10.0), 0.0);
        assert_eq!(estimate_dose(35.0, -1.0), 0.0);
        assert_eq!(estimate_dose(f64::NAN, 10.0), 0.0);
    }
}
