use std::error::Error;

use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::handlers::utils::remove_keyboard;
use crate::Command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => handle_start(bot, msg, state).await?,
        Command::Reset => handle_reset(bot, msg, state).await?,
        Command::Help => handle_help(bot, msg).await?,
    }
    Ok(())
}

/// /start начинает регистрацию с чистого листа: старый воркер
/// останавливается, прежний список лекарств очищается
async fn handle_start(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    state.cancel_worker(msg.chat.id).await;
    let prompt = state
        .with_conversation(msg.chat.id, |conv| {
            conv.reset();
            conv.start()
        })
        .await;
    bot.send_message(msg.chat.id, prompt)
        .reply_markup(remove_keyboard())
        .await?;
    Ok(())
}

async fn handle_reset(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    state.cancel_worker(msg.chat.id).await;
    state.with_conversation(msg.chat.id, |conv| conv.reset()).await;
    log::info!("Conversation reset for chat {}", msg.chat.id);
    bot.send_message(msg.chat.id, "Данные сброшены. Начни снова с команды /start")
        .reply_markup(remove_keyboard())
        .await?;
    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> Result<(), Box<dyn Error + Send + Sync>> {
    bot.send_message(msg.chat.id, "I understand /start, /reset and /help")
        .await?;
    Ok(())
}
