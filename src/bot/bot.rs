use std::sync::Arc;

use log::info;
use teloxide::dispatching::HandlerExt;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::bot::commands::handle_command;
use crate::service::subscription_service::SubscriptionService;

/// The Telegram bot front end: owns the API client and the command loop.
pub struct Bot {
    client: teloxide::Bot,
    service: Arc<SubscriptionService>,
}

impl Bot {
    pub fn new(client: teloxide::Bot, service: Arc<SubscriptionService>) -> Self {
        Self { client, service }
    }

    /// Spawns the long-polling command dispatcher.
    pub fn start(&self) {
        info!("Starting Telegram command dispatcher.");
        let client = self.client.clone();
        let service = self.service.clone();

        tokio::spawn(async move {
            let handler = Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command);

            Dispatcher::builder(client, handler)
                .dependencies(dptree::deps![service])
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        });
    }
}
