use std::time::Duration;

use chrono::{Datelike, Local, Timelike};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::time;

use crate::bot_state::BotState;
use crate::calendar::{weekday_name, DayIdentity};
use crate::models::conversation::pick_sweet_name;
use crate::models::Conversation;

const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Воркер напоминаний одного чата. Запускается один раз после
/// регистрации и живёт до /reset или завершения процесса.
pub async fn reminder_worker(bot: Bot, state: BotState, chat_id: ChatId) {
    log::info!("Reminder worker started for chat {}", chat_id);
    let mut tick = time::interval(POLL_INTERVAL);
    loop {
        tick.tick().await;
        let now = Local::now();
        let due = state
            .with_conversation(chat_id, |conv| collect_due(conv, &now))
            .await;
        for text in due {
            // Ошибка доставки не откатывает приём: таблетка уже учтена
            if let Err(err) = bot.send_message(chat_id, text).await {
                log::error!("Failed to deliver reminder to chat {}: {}", chat_id, err);
            }
        }
    }
}

/// Проходит по лекарствам чата и собирает тексты напоминаний,
/// попутно списывая таблетки. Лекарство пропускается, если сегодня
/// уже напоминали или текущий час не совпадает с выбранным.
fn collect_due(conv: &mut Conversation, now: &(impl Datelike + Timelike)) -> Vec<String> {
    let today = DayIdentity::of(now);
    let hour = now.hour();
    let weekday = weekday_name(now);
    let pool = conv.sweet_names();

    let mut due = Vec::new();
    for drug in conv.drugs.iter_mut() {
        if drug.is_already_taken_today(today) || !drug.matches_hour(hour) {
            continue;
        }
        drug.take_dose(today);
        let mut text = format!(
            "Привет {}! Пришло время принять «{}». Сегодня {}. Осталось таблеток: {}.",
            pick_sweet_name(&pool),
            drug.name,
            weekday,
            drug.pills_left
        );
        if drug.is_running_low() {
            text.push_str(" Таблетки заканчиваются! Не забудь купить новые!");
        }
        due.push(text);
    }
    due
}
