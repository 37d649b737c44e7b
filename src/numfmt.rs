/// Shared numeric rendering used by the `number` modifier: thousands
/// grouping with `,`, rounded to two decimals, trailing zeros dropped.
pub fn format_number(x: f64) -> String {
    if !x.is_finite() {
        return "-".to_string();
    }
    let cents = (x.abs() * 100.0).round() as u64;
    let mut out = String::new();
    if x < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(cents / 100));
    let frac = cents % 100;
    if frac > 0 {
        if frac % 10 == 0 {
            out.push_str(&format!(".{}", frac / 10));
        } else {
            out.push_str(&format!(".{frac:02}"));
        }
    }
    out
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn trims_trailing_decimal_zeros() {
        assert_eq!(format_number(42.5), "42.5");
        assert_eq!(format_number(42.57), "42.57");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(0.05), "0.05");
    }

    #[test]
    fn negatives_and_non_finite() {
        assert_eq!(format_number(-1000.0), "-1,000");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(f64::NAN), "-");
    }
}
