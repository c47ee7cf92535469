use chrono::{Datelike, Weekday};

/// Название дня недели для текста напоминания
pub fn weekday_name(date: &impl Datelike) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Понедельник",
        Weekday::Tue => "Вторник",
        Weekday::Wed => "Среда",
        Weekday::Thu => "Четверг",
        Weekday::Fri => "Пятница",
        Weekday::Sat => "Суббота",
        Weekday::Sun => "Воскресенье",
    }
}

/// Календарный день (год, месяц, число) по локальному времени.
/// Два момента времени совпадают по `DayIdentity` тогда и только тогда,
/// когда они приходятся на один календарный день.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayIdentity {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DayIdentity {
    pub fn of(date: &impl Datelike) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}
