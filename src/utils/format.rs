use chrono::{DateTime, NaiveDate, Utc};

/// Grouped thousands, at most two decimals, peso sign: `₱1,234,567.5`.
pub fn peso(amount: f64) -> String {
    format!("₱{}", grouped(amount))
}

pub fn grouped(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.2}", amount.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut out = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let frac = frac.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    if negative && out.chars().any(|c| c != '0' && c != ',' && c != '.') {
        out.insert(0, '-');
    }
    out
}

/// `Jan 05, 2024`
pub fn date(d: NaiveDate) -> String {
    d.format("%b %d, %Y").to_string()
}

pub fn timestamp(ts: &DateTime<Utc>) -> String {
    date(ts.date_naive())
}

/// Two-letter avatar text from first and last name.
pub fn initials(first: &str, last: &str) -> String {
    first
        .chars()
        .next()
        .into_iter()
        .chain(last.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// `1 Employee`, `3 Employees`
pub fn employee_count(count: u64) -> String {
    if count == 1 {
        "1 Employee".to_string()
    } else {
        format!("{count} Employees")
    }
}
