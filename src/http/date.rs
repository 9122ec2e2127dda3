use std::time::{SystemTime, UNIX_EPOCH};

/// An [HTTP date][rfc] in the RFC 1123 fixed-length GMT form, e.g:
/// `Sun, 06 Nov 1994 08:49:37 GMT`.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.7>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpDate {
    year: u16,
    month: u8,
    day: u8,
    weekday: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

/// Create [`HttpDate`] for the current time.
#[inline]
pub fn httpdate_now() -> HttpDate {
    HttpDate::from(SystemTime::now())
}

impl From<SystemTime> for HttpDate {
    fn from(v: SystemTime) -> Self {
        // a clock before the epoch clamps to it
        let secs = v
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        let days = secs.div_euclid(86400);
        let secs_of_day = secs.rem_euclid(86400);

        // Gregorian civil date from day count, era based
        // <https://howardhinnant.github.io/date_algorithms.html#civil_from_days>
        let z = days + 719468;
        let era = z.div_euclid(146097);
        let doe = z.rem_euclid(146097);
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
            // day 0 is Thursday
            weekday: (days + 4).rem_euclid(7) as u8,
            hour: (secs_of_day / 3600) as u8,
            minute: (secs_of_day % 3600 / 60) as u8,
            second: (secs_of_day % 60) as u8,
        }
    }
}

impl std::fmt::Display for HttpDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun",
            "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        write!(
            f,
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            DAYS[self.weekday as usize],
            self.day,
            MONTHS[self.month as usize - 1],
            self.year,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

#[cfg(test)]
mod test {
    use super::HttpDate;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_httpdate() {
        let d = UNIX_EPOCH;
        assert_eq!(HttpDate::from(d).to_string(), "Thu, 01 Jan 1970 00:00:00 GMT");
        let d = UNIX_EPOCH + Duration::from_secs(784111777);
        assert_eq!(HttpDate::from(d).to_string(), "Sun, 06 Nov 1994 08:49:37 GMT");
        let d = UNIX_EPOCH + Duration::from_secs(1475419451);
        assert_eq!(HttpDate::from(d).to_string(), "Sun, 02 Oct 2016 14:44:11 GMT");
    }

    #[test]
    fn test_before_epoch_clamps() {
        let d = UNIX_EPOCH - Duration::from_secs(86400);
        assert_eq!(HttpDate::from(d).to_string(), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_leap_day() {
        // 2024-02-29 12:00:00 UTC
        let d = UNIX_EPOCH + Duration::from_secs(1709208000);
        assert_eq!(HttpDate::from(d).to_string(), "Thu, 29 Feb 2024 12:00:00 GMT");
    }
}
