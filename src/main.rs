use std::error::Error;

use teloxide::{prelude::*, utils::command::BotCommands};

mod bot_state;
mod calendar;
mod config;
mod handlers;
mod health;
mod models;
mod worker;

use crate::bot_state::BotState;
use crate::config::Config;
use crate::handlers::{command_handler, message_handler, new_member_handler};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
enum Command {
    #[command(description = "начать регистрацию лекарств")]
    Start,
    #[command(description = "сбросить данные и напоминания")]
    Reset,
    #[command(description = "показать помощь")]
    Help,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting pill reminder bot...");

    let config = Config::from_env()?;
    log::info!("✅ Loaded {} sweet names", config.sweet_names.len());

    // Эндпоинт живости поднимается до диспетчера
    let health_addr = config.health_addr;
    tokio::spawn(async move {
        health::serve(health_addr).await;
    });

    let state = BotState::new(config.sweet_names.into());

    let bot = Bot::from_env();

    // Команды разбираются первой веткой: /reset и /help работают
    // на любом шаге регистрации, а не только из начального состояния
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(
            Update::filter_message()
                .filter(|msg: Message| {
                    msg.new_chat_members().map_or(false, |members| !members.is_empty())
                })
                .endpoint(new_member_handler),
        )
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
