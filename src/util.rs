/// Whole numbers print without a fraction, anything else with two digits.
pub fn format_complexity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_counts_and_fractions() {
        assert_eq!(format_complexity(12.0), "12");
        assert_eq!(format_complexity(0.0), "0");
        assert_eq!(format_complexity(2.5), "2.50");
    }
}
