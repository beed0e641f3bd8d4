//! Display formatting shared by the report and the binary's log output.

use chrono::{DateTime, Utc};

/// Formats a whole-unit amount with space-grouped thousands, e.g. `1 234 567 kr`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_currency(amount: f64, currency: &str) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped} {currency}")
}

/// Text progress bar like `[████████░░] 80.0%`.
///
/// The bar is clamped to `[0, 100]`; the printed percentage is not.
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress is in [0, 100] so the product is in [0, length]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {progress_percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Age of `timestamp` as shown in the notification list: minutes under an
/// hour, hours under a day, days under a week, otherwise the ISO date.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now - timestamp).num_milliseconds() as f64;
    let minutes = (elapsed_ms / 60_000.0).round() as i64;
    let hours = (elapsed_ms / 3_600_000.0).round() as i64;
    let days = (elapsed_ms / 86_400_000.0).round() as i64;

    if minutes < 60 {
        format!("{minutes} min sedan")
    } else if hours < 24 {
        format!("{hours} tim sedan")
    } else if days < 7 {
        let suffix = if days == 1 { "" } else { "ar" };
        format!("{days} dag{suffix} sedan")
    } else {
        timestamp.date_naive().to_string()
    }
}
