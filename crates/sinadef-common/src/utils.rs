//! Shared formatting and calendar helpers.

use chrono::NaiveDate;

/// Formats an integer with comma-separated thousands groups (`1234567` → `1,234,567`).
pub fn group_thousands(value: u64) -> String {
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

/// Last two digits of a year, zero padded (`2021` → `"21"`, `2005` → `"05"`).
pub fn two_digit_year(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

/// Axis label for a month: `<abbreviation>/<yy>`, e.g. `ENE/21`.
///
/// `month` is 1-based; months outside the table yield `"???"` as the abbreviation.
pub fn month_label(abbreviations: &[String], month: u32, year: i32) -> String {
    let abbr = month
        .checked_sub(1)
        .and_then(|idx| abbreviations.get(idx as usize))
        .map_or("???", String::as_str);
    format!("{abbr}/{}", two_digit_year(year))
}

/// January 1st of `year`.
pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Last calendar day of `month` in `year`.
pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_345), "12,345");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(two_digit_year(2021), "21");
        assert_eq!(two_digit_year(2005), "05");
        assert_eq!(two_digit_year(2100), "00");
    }

    #[test]
    fn test_month_label() {
        let abbrs: Vec<String> = ["ENE", "FEB", "MAR"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(month_label(&abbrs, 1, 2021), "ENE/21");
        assert_eq!(month_label(&abbrs, 3, 2019), "MAR/19");
        assert_eq!(month_label(&abbrs, 4, 2019), "???/19");
        assert_eq!(month_label(&abbrs, 0, 2019), "???/19");
    }

    #[test]
    fn test_month_end() {
        assert_eq!(month_end(2021, 2), NaiveDate::from_ymd_opt(2021, 2, 28));
        assert_eq!(month_end(2020, 2), NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(month_end(2021, 5), NaiveDate::from_ymd_opt(2021, 5, 31));
        assert_eq!(month_end(2021, 12), NaiveDate::from_ymd_opt(2021, 12, 31));
    }

    #[test]
    fn test_year_start() {
        assert_eq!(year_start(2020), NaiveDate::from_ymd_opt(2020, 1, 1));
    }
}
