//! Time-related utilities with clock abstraction for testability.
//!
//! The relay stamps server-authored events (leave notices, messages sent
//! without a client timestamp) with the local wall-clock time as `HH:MM`.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current local date and time
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses the host's local timezone)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fixed clock implementation for testing (always returns the same instant)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given instant
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock pinned to `hour:minute` (UTC offset 0, 2024-01-01).
    ///
    /// Returns `None` when `hour` or `minute` is out of range.
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 1)?.and_hms_opt(hour, minute, 0)?;
        let utc = FixedOffset::east_opt(0)?;
        let fixed_time = utc.from_local_datetime(&naive).single()?;
        Some(Self::new(fixed_time))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Format a timestamp as zero-padded `HH:MM` (24-hour, no seconds, no date)
pub fn format_hhmm(time: &DateTime<FixedOffset>) -> String {
    time.format("%H:%M").to_string()
}

/// Current local time of `clock` as `HH:MM`
pub fn local_hhmm(clock: &dyn Clock) -> String {
    format_hhmm(&clock.now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // テスト項目: FixedClock が固定された時刻を返す
        // given (前提条件):
        let clock = FixedClock::at(14, 5).unwrap();

        // when (操作):
        let first = clock.now();
        let second = clock.now();

        // then (期待する結果):
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_clock_rejects_out_of_range_time() {
        // テスト項目: 範囲外の時刻では FixedClock を作成できない
        // given (前提条件):

        // when (操作):
        let invalid_hour = FixedClock::at(24, 0);
        let invalid_minute = FixedClock::at(12, 60);

        // then (期待する結果):
        assert!(invalid_hour.is_none());
        assert!(invalid_minute.is_none());
    }

    #[test]
    fn test_local_hhmm_is_zero_padded() {
        // テスト項目: 時・分が 2 桁にゼロ埋めされる
        // given (前提条件):
        let clock = FixedClock::at(9, 7).unwrap();

        // when (操作):
        let formatted = local_hhmm(&clock);

        // then (期待する結果):
        assert_eq!(formatted, "09:07");
    }

    #[test]
    fn test_local_hhmm_uses_24_hour_clock() {
        // テスト項目: 午後の時刻が 24 時間表記になる（秒・日付を含まない）
        // given (前提条件):
        let clock = FixedClock::at(23, 59).unwrap();

        // when (操作):
        let formatted = local_hhmm(&clock);

        // then (期待する結果):
        assert_eq!(formatted, "23:59");
        assert_eq!(formatted.len(), 5);
    }

    #[test]
    fn test_system_clock_formats_as_hhmm() {
        // テスト項目: SystemClock の現在時刻が HH:MM 形式で得られる
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let formatted = local_hhmm(&clock);

        // then (期待する結果):
        let (hour, minute) = formatted.split_once(':').unwrap();
        assert_eq!(hour.len(), 2);
        assert_eq!(minute.len(), 2);
        assert!(hour.parse::<u32>().unwrap() < 24);
        assert!(minute.parse::<u32>().unwrap() < 60);
    }
}
