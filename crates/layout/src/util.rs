use chrono::NaiveDate;

/// Formats a count with `,` thousands separators: `2600` becomes `"2,600"`.
pub fn format_count(value: u64) -> String {
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

/// `"{label}: {earned} / {total}"`, the form used by every progress counter.
pub fn progress_line(label: &str, earned: u64, total: u64) -> String {
    format!("{}: {} / {}", label, format_count(earned), format_count(total))
}

/// Badge dates are printed as `YYYY-MM-DD`; a missing date prints as an empty cell.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(2600), "2,600");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn progress_lines() {
        assert_eq!(progress_line("Points", 100, 2600), "Points: 100 / 2,600");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 3, 1)), "2024-03-01");
        assert_eq!(format_date(None), "");
    }
}
