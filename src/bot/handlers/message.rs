use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;

use crate::services::cities::CityTimezones;
use crate::services::working_hours::is_working_time;
use crate::utils::logging::log_message_event;

/// Reply sent to group messages that arrive outside the working window.
const AFTER_HOURS_REPLY: &str = "📧 Спасибо за сообщение! 🧡\n\
    Сейчас команда Vaffel уже не в онлайне — мы на связи по будням с 9:00 до 20:00.\n\
    Ваш вопрос я уже зафиксировал, и в ближайшее рабочее время коллеги обязательно вернутся с ответом.\n\
    До скорой связи 😊";

/// Handles one inbound message: group chats only, reply when the chat's
/// local time is outside the working window.
pub async fn handle_group_message(
    bot: Bot,
    msg: Message,
    cities: Arc<CityTimezones>,
) -> ResponseResult<()> {
    if !msg.chat.is_group() && !msg.chat.is_supergroup() {
        return Ok(());
    }

    let title = msg.chat.title().unwrap_or_default();
    let tz = cities.for_chat_title(title);
    let local = Utc::now().with_timezone(&tz);
    let working = is_working_time(tz);
    log_message_event(title, tz, &local, working);

    if !working {
        bot.send_message(msg.chat.id, AFTER_HOURS_REPLY)
            .reply_to_message_id(msg.id)
            .await?;
    }

    Ok(())
}
