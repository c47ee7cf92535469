use std::error::Error;

use teloxide::prelude::*;

use crate::bot_state::BotState;

/// Приветствие при появлении нового участника чата
pub async fn new_member_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let greeting = state
        .with_conversation(msg.chat.id, |conv| conv.greeting())
        .await;
    bot.send_message(msg.chat.id, greeting).await?;
    Ok(())
}
