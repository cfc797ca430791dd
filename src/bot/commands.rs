use std::sync::Arc;

use log::error;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::service::subscription_service::SubscribeOutcome;
use crate::service::subscription_service::SubscriptionService;
use crate::service::subscription_service::UnsubscribeOutcome;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "subscribe to new car listing notifications.")]
    Subscribe,
    #[command(description = "stop receiving notifications.")]
    Unsubscribe,
    #[command(description = "show this help text.")]
    Help,
}

/// Whatever goes wrong internally, the subscriber only ever sees a status
/// string.
pub async fn handle_command(
    bot: teloxide::Bot,
    msg: Message,
    cmd: Command,
    service: Arc<SubscriptionService>,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let reply = match cmd {
        Command::Help => Command::descriptions().to_string(),
        Command::Subscribe => match service.subscribe(&chat_id.to_string()).await {
            Ok(SubscribeOutcome::Created) => {
                "You are subscribed to new car listing notifications.".to_string()
            }
            Ok(SubscribeOutcome::Reactivated) => "Your subscription is active again.".to_string(),
            Ok(SubscribeOutcome::AlreadyActive) => "You are already subscribed.".to_string(),
            Err(e) => {
                error!("Subscribe failed for chat {chat_id}: {e}");
                "Something went wrong, please try again later.".to_string()
            }
        },
        Command::Unsubscribe => match service.unsubscribe(&chat_id.to_string()).await {
            Ok(UnsubscribeOutcome::Deactivated) => {
                "You are unsubscribed from notifications.".to_string()
            }
            Ok(UnsubscribeOutcome::NotSubscribed) => "You are not subscribed.".to_string(),
            Err(e) => {
                error!("Unsubscribe failed for chat {chat_id}: {e}");
                "Something went wrong, please try again later.".to_string()
            }
        },
    };

    bot.send_message(chat_id, reply).await?;
    Ok(())
}
