use std::sync::LazyLock;

use regex::Regex;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static PUBLIC_SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""publicScore":"(.+?)""#).unwrap());
static BEST_PUBLIC_SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""bestPublicScore":([^,}\s]+)"#).unwrap());

/// First run of ASCII digits in `text`.
pub fn extract_integer(text: &str) -> Option<u64> {
    INTEGER_RE.find(text)?.as_str().parse().ok()
}

/// Public score embedded in a commit page, verbatim.
pub fn extract_public_score(page: &str) -> Option<String> {
    PUBLIC_SCORE_RE
        .captures(page)
        .map(|c| c[1].to_string())
}

/// Best public score embedded in a kernel page (an unquoted JSON number).
pub fn extract_best_public_score(page: &str) -> Option<String> {
    BEST_PUBLIC_SCORE_RE
        .captures(page)
        .map(|c| c[1].to_string())
}

/// Format a run time like `"125s"` as seconds, minutes or hours.
///
/// Below a minute the value is kept as-is (`"59.0 s"`), below an hour it is
/// shown in minutes and above in hours, both rounded to one decimal with
/// exact halves going to the even digit (`"75s"` -> `"1.2 m"`). Input that
/// isn't a number with a unit suffix is returned trimmed.
pub fn format_duration(raw: &str) -> String {
    let raw = raw.trim();
    let number = raw
        .strip_suffix(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(raw);
    let Ok(secs) = number.trim().parse::<f64>() else {
        return raw.to_string();
    };

    if secs < 60.0 {
        format!("{} s", format_float(secs))
    } else if secs < 3600.0 {
        format!("{:.1} m", secs / 60.0)
    } else {
        format!("{:.1} h", secs / 3600.0)
    }
}

/// Shortest representation, always with a fractional part (`59` -> `59.0`).
fn format_float(x: f64) -> String {
    let s = x.to_string();
    if !x.is_finite() || s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}
