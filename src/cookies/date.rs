//! Cookie-date wire format (IMF-fixdate).
//!
//! Cookie assignment strings carry absolute expiration timestamps such as
//! `Thu, 01 Jan 1970 00:00:00 GMT`. Formatting always emits the `GMT`
//! spelling; parsing accepts `UTC` as well, since the deletion constant
//! below uses it.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// Timestamp written by cookie deletion. Always in the past.
pub const EPOCH_COOKIE_DATE: &str = "Thu, 01 Jan 1970 00:00:00 UTC";

const IMF_FIXDATE_GMT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const IMF_FIXDATE_UTC: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] UTC"
);

/// Formats `when` as an IMF-fixdate string, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_cookie_date(when: OffsetDateTime) -> String {
    when.to_offset(time::UtcOffset::UTC)
        .format(&IMF_FIXDATE_GMT)
        .expect("IMF-fixdate format description is well-formed")
}

/// Parses an IMF-fixdate string in either the `GMT` or `UTC` spelling.
///
/// Returns `None` for anything else. Callers treat an unparseable expiry as
/// a session cookie rather than an error.
pub fn parse_cookie_date(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();
    for format in [IMF_FIXDATE_GMT, IMF_FIXDATE_UTC] {
        if let Ok(parsed) = PrimitiveDateTime::parse(text, format) {
            return Some(parsed.assume_utc());
        }
    }
    None
}

/// Absolute expiration timestamp for "now plus `days` days".
///
/// `days` may be negative, which yields an already-expired timestamp.
pub fn expiry_from_days(now: OffsetDateTime, days: i64) -> OffsetDateTime {
    now.saturating_add(Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_imf_fixdate() {
        let when = datetime!(1994-11-06 08:49:37 UTC);
        assert_eq!(format_cookie_date(when), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn parses_both_gmt_and_utc_spellings() {
        let expected = datetime!(1994-11-06 08:49:37 UTC);
        assert_eq!(
            parse_cookie_date("Sun, 06 Nov 1994 08:49:37 GMT"),
            Some(expected)
        );
        assert_eq!(
            parse_cookie_date("Sun, 06 Nov 1994 08:49:37 UTC"),
            Some(expected)
        );
    }

    #[test]
    fn epoch_constant_parses_to_unix_epoch() {
        assert_eq!(
            parse_cookie_date(EPOCH_COOKIE_DATE),
            Some(OffsetDateTime::UNIX_EPOCH)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_cookie_date("").is_none());
        assert!(parse_cookie_date("tomorrow-ish").is_none());
        assert!(parse_cookie_date("2024-01-01T00:00:00Z").is_none());
    }

    #[test]
    fn round_trips_through_format_and_parse() {
        let when = datetime!(2031-02-28 23:59:59 UTC);
        assert_eq!(parse_cookie_date(&format_cookie_date(when)), Some(when));
    }

    #[test]
    fn expiry_from_days_moves_forward_and_backward() {
        let now = datetime!(2026-08-07 12:00:00 UTC);
        assert_eq!(expiry_from_days(now, 1), datetime!(2026-08-08 12:00:00 UTC));
        assert!(expiry_from_days(now, -1) < now);
        assert_eq!(expiry_from_days(now, 42), now + Duration::days(42));
    }
}
