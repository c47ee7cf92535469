use teloxide::types::{KeyboardButton, KeyboardMarkup, ReplyMarkup};

use crate::models::conversation::{ADD_ANOTHER_LABEL, PROCEED_LABEL};

/// Клавиатура выбора после регистрации лекарства
pub fn choice_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![vec![
            KeyboardButton::new(ADD_ANOTHER_LABEL),
            KeyboardButton::new(PROCEED_LABEL),
        ]])
        .resize_keyboard()
        .one_time_keyboard(),
    )
}

pub fn remove_keyboard() -> ReplyMarkup {
    ReplyMarkup::kb_remove()
}
