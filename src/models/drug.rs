use crate::calendar::DayIdentity;

/// Одно зарегистрированное лекарство и его счётчики
#[derive(Debug, Clone)]
pub struct Drug {
    pub name: String,
    pub pills_total: u32,
    pub pills_left: u32,
    /// Час напоминания 1-24; `None` пока пользователь его не назвал
    pub reminder_hour: Option<u32>,
    pub last_taken: Option<DayIdentity>,
}

impl Drug {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pills_total: 0,
            pills_left: 0,
            reminder_hour: None,
            last_taken: None,
        }
    }

    /// Приём таблетки: уменьшает остаток, при нуле считаем,
    /// что начата новая упаковка
    pub fn take_dose(&mut self, today: DayIdentity) {
        self.pills_left = self.pills_left.saturating_sub(1);
        if self.pills_left == 0 {
            self.pills_left = self.pills_total;
        }
        self.last_taken = Some(today);
    }

    pub fn is_already_taken_today(&self, today: DayIdentity) -> bool {
        self.last_taken == Some(today)
    }

    pub fn is_running_low(&self) -> bool {
        self.pills_left < 3
    }

    /// Пользователь вводит час как 1-24, т.е. полночь — это 24
    pub fn matches_hour(&self, local_hour: u32) -> bool {
        match self.reminder_hour {
            Some(hour) => hour % 24 == local_hour,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> DayIdentity {
        DayIdentity {
            year: 2024,
            month: 5,
            day: 15,
        }
    }

    #[test]
    fn take_dose_decrements() {
        let mut drug = Drug::new("Аспирин");
        drug.pills_total = 20;
        drug.pills_left = 10;

        drug.take_dose(today());
        assert_eq!(drug.pills_left, 9);
        assert_eq!(drug.last_taken, Some(today()));
    }

    #[test]
    fn take_dose_starts_new_pack_at_zero() {
        let mut drug = Drug::new("Аспирин");
        drug.pills_total = 20;
        drug.pills_left = 1;

        drug.take_dose(today());
        assert_eq!(drug.pills_left, 20);
    }

    #[test]
    fn running_low_below_three() {
        let mut drug = Drug::new("Аспирин");
        for left in [0, 1, 2] {
            drug.pills_left = left;
            assert!(drug.is_running_low());
        }
        for left in [3, 4, 100] {
            drug.pills_left = left;
            assert!(!drug.is_running_low());
        }
    }

    #[test]
    fn never_taken_is_not_taken_today() {
        let drug = Drug::new("Аспирин");
        assert!(!drug.is_already_taken_today(today()));
    }

    #[test]
    fn taken_today_blocks_until_tomorrow() {
        let mut drug = Drug::new("Аспирин");
        drug.pills_total = 20;
        drug.pills_left = 10;
        drug.take_dose(today());

        assert!(drug.is_already_taken_today(today()));
        let tomorrow = DayIdentity {
            day: 16,
            ..today()
        };
        assert!(!drug.is_already_taken_today(tomorrow));
    }

    #[test]
    fn hour_24_means_midnight() {
        let mut drug = Drug::new("Аспирин");
        assert!(!drug.matches_hour(9), "без часа напоминание не срабатывает");

        drug.reminder_hour = Some(9);
        assert!(drug.matches_hour(9));
        assert!(!drug.matches_hour(10));

        drug.reminder_hour = Some(24);
        assert!(drug.matches_hour(0));
    }
}
