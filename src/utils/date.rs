use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::data::shared_booking::Hour;
use crate::i18n::Language;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`, the form the venue API keys days by.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `DD.MM.YYYY`
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Weekday name followed by the display date, e.g. `Montag, 01.01.2024`.
pub fn format_long_date(date: NaiveDate, lang: Language) -> String {
    format!("{}, {}", weekday_name(date.weekday(), lang), format_display_date(date))
}

pub fn slot_label(hour: Hour) -> String {
    format!("{hour}:00")
}

pub fn slot_range_label(hour: Hour) -> String {
    format!("{hour}:00-{}:00", hour + 1)
}

fn weekday_name(day: Weekday, lang: Language) -> &'static str {
    let index = day.num_days_from_monday() as usize;
    match lang {
        Language::En => ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"][index],
        Language::De => ["Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag"][index],
        Language::Ru => ["Понедельник", "Вторник", "Среда", "Четверг", "Пятница", "Суббота", "Воскресенье"][index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(iso_date(date), "2024-01-01");
        assert_eq!(format_display_date(date), "01.01.2024");
        assert_eq!(format_long_date(date, Language::De), "Montag, 01.01.2024");
        assert_eq!(format_long_date(date, Language::En), "Monday, 01.01.2024");
        assert_eq!(parse_iso_date("2024-01-01"), Some(date));
        assert_eq!(parse_iso_date("01.01.2024"), None);
    }

    #[test]
    fn slot_labels() {
        assert_eq!(slot_label(9), "9:00");
        assert_eq!(slot_range_label(19), "19:00-20:00");
    }
}
