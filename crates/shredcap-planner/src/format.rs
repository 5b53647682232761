//! Human-readable number and duration formatting for report lines.

const PIB: f64 = (1u64 << 50) as f64;

pub fn pib(bytes: u64) -> f64 {
    bytes as f64 / PIB
}

/// `[D day[s], ]H:MM:SS[.ffffff]`, rounded to the microsecond.
pub fn timedelta(seconds: f64) -> String {
    let total_us = (seconds.max(0.0) * 1e6).round() as u64;
    let micros = total_us % 1_000_000;
    let total_secs = total_us / 1_000_000;
    let days = total_secs / 86_400;
    let rem = total_secs % 86_400;
    let (h, m, s) = (rem / 3600, rem % 3600 / 60, rem % 60);

    let mut out = String::new();
    if days > 0 {
        let plural = if days == 1 { "" } else { "s" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{h}:{m:02}:{s:02}"));
    if micros > 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}

/// Two decimals with `,` thousands separators.
pub fn dollars(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timedelta_like_python() {
        assert_eq!(timedelta(0.0), "0:00:00");
        assert_eq!(timedelta(59.0), "0:00:59");
        assert_eq!(timedelta(3_661.5), "1:01:01.500000");
        assert_eq!(timedelta(86_400.0), "1 day, 0:00:00");
        assert_eq!(timedelta(2.0 * 86_400.0 + 7_200.0), "2 days, 2:00:00");
    }

    #[test]
    fn dollars_grouping() {
        assert_eq!(dollars(0.0), "0.00");
        assert_eq!(dollars(999.994), "999.99");
        assert_eq!(dollars(1_000.0), "1,000.00");
        assert_eq!(dollars(1_234_567.891), "1,234,567.89");
        assert_eq!(dollars(-12_345.5), "-12,345.50");
    }

    #[test]
    fn pib_conversion() {
        assert_eq!(pib(1u64 << 50), 1.0);
        assert_eq!(pib(1u64 << 49), 0.5);
    }
}
