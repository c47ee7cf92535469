use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use teloxide::types::ChatId;

use crate::models::Drug;

pub const ADD_ANOTHER_LABEL: &str = "Добавить ещё лекарство";
pub const PROCEED_LABEL: &str = "Продолжить";

/// Шаги регистрации. На каждом шаге допустим ровно один вид ответа,
/// всё остальное возвращает пользователя на тот же шаг.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    AwaitingDrugName,
    AwaitingPillsLeft,
    AwaitingPillsTotal,
    AwaitingReminderHour,
    AwaitingAddAnotherChoice,
    Notifying,
    Finished,
}

/// Что сделать с reply-клавиатурой при отправке ответа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    Keep,
    ShowChoice,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: KeyboardAction,
    /// Машина дошла до шага Notifying — пора запускать воркер напоминаний
    pub start_worker: bool,
}

impl Reply {
    fn plain(text: String) -> Self {
        Self {
            text,
            keyboard: KeyboardAction::Keep,
            start_worker: false,
        }
    }
}

/// Случайное имя из пула обращений. Пул валидируется при старте
/// процесса (минимум два имени), поэтому индекс всегда корректен.
pub fn pick_sweet_name(pool: &[String]) -> &str {
    &pool[rand::thread_rng().gen_range(0..pool.len())]
}

/// Состояние одного чата: текущий шаг регистрации и список лекарств
pub struct Conversation {
    pub chat_id: ChatId,
    pub step: Step,
    pub drugs: Vec<Drug>,
    seen_names: HashSet<String>,
    sweet_names: Arc<Vec<String>>,
}

impl Conversation {
    pub fn new(chat_id: ChatId, sweet_names: Arc<Vec<String>>) -> Self {
        Self {
            chat_id,
            step: Step::Idle,
            drugs: Vec::new(),
            seen_names: HashSet::new(),
            sweet_names,
        }
    }

    pub fn sweet_names(&self) -> Arc<Vec<String>> {
        self.sweet_names.clone()
    }

    fn rand_name(&self) -> &str {
        pick_sweet_name(&self.sweet_names)
    }

    pub fn greeting(&self) -> String {
        format!(
            "Привет {}! Этот бот поможет тебе вовремя принимать лекарства. \
             Начни с команды /start",
            self.rand_name()
        )
    }

    /// Начало регистрации (команда /start)
    pub fn start(&mut self) -> String {
        log::info!("Registration started for chat {}", self.chat_id);
        self.step = Step::AwaitingDrugName;
        format!(
            "{}, как называется лекарство, о котором нужно напоминать?",
            self.rand_name()
        )
    }

    pub fn reset(&mut self) {
        self.step = Step::Idle;
        self.drugs.clear();
        self.seen_names.clear();
    }

    /// Воркер запущен, регистрация закрыта
    pub fn finish(&mut self) {
        self.step = Step::Finished;
    }

    /// Ответ пользователя на текущем шаге. `None` — ни один шаг
    /// не ждёт свободного текста (Idle/Notifying/Finished).
    pub fn handle_text(&mut self, text: &str) -> Option<Reply> {
        match self.step {
            Step::AwaitingDrugName => Some(self.on_drug_name(text)),
            Step::AwaitingPillsLeft => Some(self.on_pills_left(text)),
            Step::AwaitingPillsTotal => Some(self.on_pills_total(text)),
            Step::AwaitingReminderHour => Some(self.on_reminder_hour(text)),
            Step::AwaitingAddAnotherChoice => Some(self.on_choice(text)),
            Step::Idle | Step::Notifying | Step::Finished => None,
        }
    }

    fn on_drug_name(&mut self, text: &str) -> Reply {
        let name = text.trim();
        if name.is_empty() {
            return Reply::plain("Название не может быть пустым. Как называется лекарство?".into());
        }
        if self.seen_names.contains(name) {
            return Reply::plain(format!("«{}» уже записано. Назови другое лекарство", name));
        }
        self.seen_names.insert(name.to_string());
        self.drugs.push(Drug::new(name));
        self.step = Step::AwaitingPillsLeft;
        Reply::plain(format!(
            "Спасибо {}! Сколько таблеток «{}» осталось в упаковке?",
            self.rand_name(),
            name
        ))
    }

    fn on_pills_left(&mut self, text: &str) -> Reply {
        let Ok(left) = text.trim().parse::<u32>() else {
            return Reply::plain("Нужно число".into());
        };
        if let Some(drug) = self.drugs.last_mut() {
            drug.pills_left = left;
        }
        self.step = Step::AwaitingPillsTotal;
        Reply::plain(format!(
            "Спасибо {}! А сколько ВСЕГО таблеток должно быть в упаковке?",
            self.rand_name()
        ))
    }

    fn on_pills_total(&mut self, text: &str) -> Reply {
        let Ok(total) = text.trim().parse::<u32>() else {
            return Reply::plain("Нужно число".into());
        };
        let left = self.drugs.last().map(|d| d.pills_left).unwrap_or(0);
        if left > total {
            return Reply::plain(format!(
                "Осталось {} — больше, чем вмещает упаковка ({}). \
                 Сколько всего таблеток в упаковке?",
                left, total
            ));
        }
        if let Some(drug) = self.drugs.last_mut() {
            drug.pills_total = total;
        }
        self.step = Step::AwaitingReminderHour;
        Reply::plain(format!(
            "Спасибо {}! В какой час напоминать о приёме? Число между 1-24",
            self.rand_name()
        ))
    }

    fn on_reminder_hour(&mut self, text: &str) -> Reply {
        let hour = match text.trim().parse::<u32>() {
            Ok(hour) if (1..=24).contains(&hour) => hour,
            _ => return Reply::plain("Нужно число между 1-24".into()),
        };
        if let Some(drug) = self.drugs.last_mut() {
            drug.reminder_hour = Some(hour);
        }
        self.step = Step::AwaitingAddAnotherChoice;
        let name = self.drugs.last().map(|d| d.name.clone()).unwrap_or_default();
        Reply {
            text: format!("Записала «{}». Добавить ещё лекарство или продолжить?", name),
            keyboard: KeyboardAction::ShowChoice,
            start_worker: false,
        }
    }

    fn on_choice(&mut self, text: &str) -> Reply {
        match text.trim() {
            ADD_ANOTHER_LABEL => {
                self.step = Step::AwaitingDrugName;
                Reply::plain(format!(
                    "{}, как называется следующее лекарство?",
                    self.rand_name()
                ))
            }
            PROCEED_LABEL => {
                self.step = Step::Notifying;
                Reply {
                    text: self.summary(),
                    keyboard: KeyboardAction::Remove,
                    start_worker: true,
                }
            }
            _ => Reply {
                text: format!(
                    "Не поняла. Выбери кнопку на клавиатуре: «{}» или «{}»",
                    ADD_ANOTHER_LABEL, PROCEED_LABEL
                ),
                keyboard: KeyboardAction::ShowChoice,
                start_worker: false,
            },
        }
    }

    fn summary(&self) -> String {
        let mut text = format!("Спасибо {}! Всё записано:\n", self.rand_name());
        for drug in &self.drugs {
            let hour = match drug.reminder_hour {
                Some(hour) => format!("{}:00", hour),
                None => "час не задан".to_string(),
            };
            text.push_str(&format!(
                "• «{}» — осталось {} из {}, напоминание в {}\n",
                drug.name, drug.pills_left, drug.pills_total, hour
            ));
        }
        text.push_str("Напоминания будут приходить каждый день в выбранный час");
        text
    }
}
