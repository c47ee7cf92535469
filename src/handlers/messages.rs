use std::error::Error;

use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::bot_state::BotState;
use crate::handlers::utils::{choice_keyboard, remove_keyboard};
use crate::models::KeyboardAction;
use crate::worker;

/// Свободный текст: ответ на текущем шаге регистрации. Команды
/// разобраны раньше (ветка команд в диспетчере стоит первой), сюда
/// доходят только нераспознанные.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if text.starts_with('/') {
        bot.send_message(msg.chat.id, "I don't know that command")
            .await?;
        return Ok(());
    }

    let reply = state
        .with_conversation(msg.chat.id, |conv| conv.handle_text(text))
        .await;
    let Some(reply) = reply else {
        // ни один шаг не ждёт этот текст
        return Ok(());
    };

    let send = bot.send_message(msg.chat.id, reply.text);
    let sent = match reply.keyboard {
        KeyboardAction::ShowChoice => send.reply_markup(choice_keyboard()).await,
        KeyboardAction::Remove => send.reply_markup(remove_keyboard()).await,
        KeyboardAction::Keep => send.await,
    };

    if reply.start_worker {
        // Недоставленный итог не отменяет регистрацию: иначе чат
        // навсегда застрянет на шаге Notifying, где свободный текст
        // уже не обрабатывается
        if let Err(err) = sent {
            log::error!(
                "Failed to deliver registration summary to chat {}: {}",
                msg.chat.id,
                err
            );
        }
        finalize_registration(&bot, &state, msg.chat.id).await;
        return Ok(());
    }

    sent?;
    Ok(())
}

/// Запускает воркер напоминаний (один на чат) и закрывает регистрацию
async fn finalize_registration(bot: &Bot, state: &BotState, chat_id: ChatId) {
    let spawned = state
        .ensure_worker(chat_id, || {
            tokio::spawn(worker::reminder_worker(bot.clone(), state.clone(), chat_id))
        })
        .await;
    if spawned {
        log::info!("Reminder worker spawned for chat {}", chat_id);
    }
    state.with_conversation(chat_id, |conv| conv.finish()).await;
}
