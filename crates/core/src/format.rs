//! Display formatting for points and ratios.

/// Format a number with `,` thousands separators.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Format a point amount, e.g. `1,000P`.
pub fn format_points(points: u64) -> String {
    format!("{}P", format_number(points))
}

/// Format a `[0.0, 1.0]` ratio as a whole percentage, e.g. `30%`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", (ratio.clamp(0.0, 1.0) * 100.0).floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn points_have_suffix() {
        assert_eq!(format_points(440), "440P");
        assert_eq!(format_points(12_500), "12,500P");
    }

    #[test]
    fn percent_rounds_down_and_clamps() {
        assert_eq!(format_percent(0.3), "30%");
        assert_eq!(format_percent(0.999), "99%");
        assert_eq!(format_percent(1.7), "100%");
    }
}
