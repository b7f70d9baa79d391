//! Fixed reply texts for informational commands.

/// Reply to `/start`.
pub const WELCOME: &str = "\
🤖 Добро пожаловать в бота рекомендаций подарков!

Я подбираю подарки с помощью искусственного интеллекта:
• учитываю возраст, пол и интересы получателя
• предлагаю варианты в рамках вашего бюджета
• помогаю с выбором для разных поводов

Начните с команды /reco, а подробности смотрите в /help.";

/// Reply to `/help`.
pub const HELP: &str = "\
Доступные команды:

/reco — подобрать подарок:
  1. выберите тип подарка
  2. укажите возраст получателя
  3. выберите пол получателя
  4. определите повод
  5. установите бюджет
  и получите пять персональных рекомендаций.
/note <текст> — добавить пожелания о получателе во время выбора
/shop — магазин подарков
/help — показать это сообщение

Команда /reco в любой момент начинает выбор заново.";

/// Reply to `/shop`. There is no store behind it.
pub const SHOP: &str = "🛍️ Магазин подарков скоро откроется.";

/// Shown when a selection or note arrives outside an active collection.
pub const NO_ACTIVE_SESSION: &str = "Сначала начните подбор командой /reco.";

/// Shown when a selection is rejected.
pub const CHOOSE_AGAIN: &str = "Такого варианта нет на этом шаге, выберите ещё раз.";

/// Shown after a note has been attached.
pub const NOTE_ATTACHED: &str = "Пожелание учтено.";

/// Header above the final list.
pub const RECOMMENDATIONS_HEADER: &str = "🎁 Рекомендации подарков:";

/// Footer under the final list.
pub const RECOMMENDATIONS_FOOTER: &str = "Чтобы подобрать заново, используйте /reco.";
