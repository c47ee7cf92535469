use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::models::Conversation;

type Conversations = Arc<RwLock<HashMap<ChatId, Conversation>>>;
type Workers = Arc<RwLock<HashMap<ChatId, JoinHandle<()>>>>;

/// Общее состояние бота: диалоги по чатам и запущенные воркеры
/// напоминаний. Все мутации идут под одним RwLock, воркер и обработчик
/// сообщений никогда не трогают `Conversation` без него.
#[derive(Clone)]
pub struct BotState {
    conversations: Conversations,
    workers: Workers,
    sweet_names: Arc<Vec<String>>,
}

impl BotState {
    pub fn new(sweet_names: Arc<Vec<String>>) -> Self {
        Self {
            conversations: Arc::new(RwLock::new(HashMap::new())),
            workers: Arc::new(RwLock::new(HashMap::new())),
            sweet_names,
        }
    }

    /// Доступ к диалогу чата; диалог создаётся при первом обращении
    pub async fn with_conversation<F, R>(&self, chat_id: ChatId, f: F) -> R
    where
        F: FnOnce(&mut Conversation) -> R,
    {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .entry(chat_id)
            .or_insert_with(|| Conversation::new(chat_id, self.sweet_names.clone()));
        f(conversation)
    }

    /// Регистрирует воркер напоминаний, если для чата его ещё нет.
    /// Возвращает false, когда воркер уже был запущен раньше.
    pub async fn ensure_worker(
        &self,
        chat_id: ChatId,
        spawn: impl FnOnce() -> JoinHandle<()>,
    ) -> bool {
        let mut workers = self.workers.write().await;
        if workers.contains_key(&chat_id) {
            return false;
        }
        workers.insert(chat_id, spawn());
        true
    }

    /// Останавливает воркер напоминаний чата (команды /reset и /start)
    pub async fn cancel_worker(&self, chat_id: ChatId) {
        if let Some(handle) = self.workers.write().await.remove(&chat_id) {
            handle.abort();
            log::info!("Reminder worker cancelled for chat {}", chat_id);
        }
    }

    #[cfg(test)]
    pub async fn has_worker(&self, chat_id: ChatId) -> bool {
        self.workers.read().await.contains_key(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Step;

    fn state() -> BotState {
        BotState::new(Arc::new(vec!["Солнышко".to_string(), "Зайка".to_string()]))
    }

    #[tokio::test]
    async fn conversation_is_created_on_first_access() {
        let state = state();
        let step = state
            .with_conversation(ChatId(7), |conv| conv.step)
            .await;
        assert_eq!(step, Step::Idle);
    }

    #[tokio::test]
    async fn conversation_state_persists_between_accesses() {
        let state = state();
        state
            .with_conversation(ChatId(7), |conv| {
                conv.start();
            })
            .await;
        let step = state
            .with_conversation(ChatId(7), |conv| conv.step)
            .await;
        assert_eq!(step, Step::AwaitingDrugName);
    }

    #[tokio::test]
    async fn chats_do_not_share_conversations() {
        let state = state();
        state
            .with_conversation(ChatId(1), |conv| {
                conv.start();
            })
            .await;
        let other = state
            .with_conversation(ChatId(2), |conv| conv.step)
            .await;
        assert_eq!(other, Step::Idle);
    }

    #[tokio::test]
    async fn worker_is_registered_once_and_cancellable() {
        let state = state();
        let chat_id = ChatId(7);

        let spawned = state
            .ensure_worker(chat_id, || tokio::spawn(std::future::pending::<()>()))
            .await;
        assert!(spawned);

        let spawned_again = state
            .ensure_worker(chat_id, || tokio::spawn(std::future::pending::<()>()))
            .await;
        assert!(!spawned_again, "второй воркер для чата не создаётся");

        state.cancel_worker(chat_id).await;
        assert!(!state.has_worker(chat_id).await);

        // после отмены воркер можно запустить заново
        let respawned = state
            .ensure_worker(chat_id, || tokio::spawn(std::future::pending::<()>()))
            .await;
        assert!(respawned);
        state.cancel_worker(chat_id).await;
    }
}
