pub type Timestamp = chrono::DateTime<chrono::Local>;

pub fn now() -> Timestamp {
  chrono::Local::now()
}

pub fn format_timestamp(datetime: &Timestamp) -> String {
  datetime.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_timestamp_full(datetime: &Timestamp) -> String {
  datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use crate::time::{format_timestamp, format_timestamp_full};

  #[test]
  fn test_format_timestamp() {
    let datetime = chrono::Local.with_ymd_and_hms(2020, 1, 1, 9, 5, 7).unwrap();
    assert_eq!(format_timestamp(&datetime), "2020-01-01 09:05");
  }

  #[test]
  fn test_format_timestamp_full() {
    let datetime = chrono::Local.with_ymd_and_hms(2020, 1, 1, 9, 5, 7).unwrap();
    assert_eq!(format_timestamp_full(&datetime), "2020-01-01 09:05:07");
  }
}
