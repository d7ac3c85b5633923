//! Relative timestamps for article listings.

use chrono::{DateTime, Utc};

/// How long before `now` the article was published, e.g. `"2 hours ago"`.
///
/// Whole hours win over minutes; anything under a minute (or in the future)
/// is `"Just now"`.
pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(published);
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes() % 60;

    if hours > 0 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else if minutes > 0 {
        format!("{} minute{} ago", minutes, if minutes > 1 { "s" } else { "" })
    } else {
        "Just now".to_string()
    }
}

/// [`time_ago`] against the current time.
pub fn time_ago_from_now(published: DateTime<Utc>) -> String {
    time_ago(published, Utc::now())
}

/// `"<time ago> • <author>"`, or just the author when there is no date.
pub fn byline(
    published: Option<DateTime<Utc>>,
    author: Option<&str>,
    now: DateTime<Utc>,
) -> String {
    match (published, author) {
        (Some(date), Some(author)) => format!("{} \u{2022} {}", time_ago(date, now), author),
        (_, author) => author.unwrap_or_default().to_string(),
    }
}
