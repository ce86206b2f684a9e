//! Display formatting for money, percentages and dates, in the pt-BR style the
//! dashboard's users expect (`R$ 1.234,56`, `01/03/2024`).

use chrono::{DateTime, Utc};

/// Format a value as Brazilian reais: `R$ 1.234,56`, `R$ -200,00`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let units = group_thousands(cents / 100);
    format!("R$ {sign}{units},{:02}", cents % 100)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(".")
}

/// `85.0%` style percentage with the given number of decimals.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y").to_string()
}

pub fn format_time(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}

/// `"01/03/2024 14:30"`, or the "no date" placeholder.
pub fn format_timestamp(dt: Option<&DateTime<Utc>>) -> String {
    match dt {
        Some(dt) => format!("{} {}", format_date(dt), format_time(dt)),
        None => "Data não informada".to_string(),
    }
}

/// Parse an amount typed by a user. Accepts `1234.56`, `1234,56`, `1.234,56`
/// and an optional `R$` prefix. Returns `None` for anything that is not a
/// finite number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalised = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    normalised.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(150.0), "R$ 150,00");
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-200.0), "R$ -200,00");
        assert_eq!(format_brl(0.005), "R$ 0,01");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(85.0, 1), "85.0%");
        assert_eq!(format_percent(99.96, 0), "100%");
    }

    #[test]
    fn test_format_dates() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 0).unwrap();
        assert_eq!(format_date(&dt), "01/03/2024");
        assert_eq!(format_time(&dt), "14:05");
        assert_eq!(format_timestamp(Some(&dt)), "01/03/2024 14:05");
        assert_eq!(format_timestamp(None), "Data não informada");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1234.56"), Some(1234.56));
        assert_eq!(parse_amount("1234,56"), Some(1234.56));
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("R$ 80,00"), Some(80.0));
        assert_eq!(parse_amount(" 10 "), Some(10.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("dez"), None);
        assert_eq!(parse_amount("inf"), None);
    }
}
