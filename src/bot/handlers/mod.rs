pub mod message;

use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::services::cities::CityTimezones;

/// Holds the shared read-only state handed to every update handler.
pub struct BotHandler {
    pub cities: Arc<CityTimezones>,
}

impl BotHandler {
    pub fn new(cities: Arc<CityTimezones>) -> Self {
        Self { cities }
    }

    pub fn schema(&self) -> UpdateHandler<teloxide::RequestError> {
        use teloxide::dispatching::UpdateFilterExt;

        let cities = self.cities.clone();

        Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            let cities = cities.clone();
            async move { message::handle_group_message(bot, msg, cities).await }
        })
    }
}
