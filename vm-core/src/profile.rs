use time::{Duration, OffsetDateTime};

use vm_boundary::User;

const DAYS_PER_YEAR: i64 = 365;

/// Age of the account in whole years.
///
/// Returns `None` if the creation time is unknown or invalid.
#[must_use]
pub fn account_age_years(user: &User, now: OffsetDateTime) -> Option<i64> {
    let created_ms = user.created_at?;
    let created =
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(created_ms) * 1_000_000).ok()?;
    let age: Duration = now - created;
    Some(age.whole_days().max(0) / DAYS_PER_YEAR)
}

/// The first characters of the user ID for display.
#[must_use]
pub fn short_uid(uid: &str) -> String {
    const LEN: usize = 8;
    if uid.chars().count() <= LEN {
        return uid.to_owned();
    }
    let mut short: String = uid.chars().take(LEN).collect();
    short.push('…');
    short
}

/// Name to greet the user with.
#[must_use]
pub fn display_name(user: &User) -> &str {
    user.display_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&user.email)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn user(created_at: Option<i64>) -> User {
        User {
            uid: "abcdefghijkl".into(),
            email: "jane@example.com".into(),
            display_name: None,
            photo_url: None,
            email_verified: false,
            providers: vec!["password".into()],
            created_at,
        }
    }

    #[test]
    fn whole_years() {
        let created = datetime!(2020-01-01 0:00 UTC).unix_timestamp() * 1000;
        let u = user(Some(created));
        assert_eq!(account_age_years(&u, datetime!(2020-12-30 0:00 UTC)), Some(0));
        assert_eq!(account_age_years(&u, datetime!(2023-01-05 0:00 UTC)), Some(3));
        assert_eq!(account_age_years(&user(None), datetime!(2023-01-05 0:00 UTC)), None);
    }

    #[test]
    fn future_creation_is_zero() {
        let created = datetime!(2030-01-01 0:00 UTC).unix_timestamp() * 1000;
        assert_eq!(account_age_years(&user(Some(created)), datetime!(2020-01-01 0:00 UTC)), Some(0));
    }

    #[test]
    fn shorten_uid() {
        assert_eq!(short_uid("abcdefghijkl"), "abcdefgh…");
        assert_eq!(short_uid("abc"), "abc");
    }

    #[test]
    fn fall_back_to_email() {
        let mut u = user(None);
        assert_eq!(display_name(&u), "jane@example.com");
        u.display_name = Some("Jane".into());
        assert_eq!(display_name(&u), "Jane");
    }
}
