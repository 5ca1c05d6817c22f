use super::{Locale, OperationType};

/// A category with a fixed report icon. Any other label is still accepted,
/// it just renders without an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownCategory {
    pub emoji: &'static str,
    pub name_en: &'static str,
    pub name_ru: &'static str,
}

impl KnownCategory {
    const fn new(emoji: &'static str, name_en: &'static str, name_ru: &'static str) -> Self {
        Self {
            emoji,
            name_en,
            name_ru,
        }
    }

    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.name_en,
            Locale::Ru => self.name_ru,
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        label == self.name_en || label == self.name_ru
    }
}

const EXPENSE_CATEGORIES: [KnownCategory; 7] = [
    KnownCategory::new("🔵", "Household", "Бытовые траты"),
    KnownCategory::new("🔴", "Regular payments", "Регулярные платежи"),
    KnownCategory::new("🟡", "Clothing", "Одежда"),
    KnownCategory::new("🟢", "Health", "Здоровье"),
    KnownCategory::new("🟠", "Leisure & education", "Досуг и образование"),
    KnownCategory::new("🟣", "Investments", "Инвестиции"),
    KnownCategory::new("⚪️", "Other expenses", "Прочие расходы"),
];

const INCOME_CATEGORIES: [KnownCategory; 7] = [
    KnownCategory::new("🔵", "Salary", "Заработная плата"),
    KnownCategory::new("🔴", "Side income", "Побочный доход"),
    KnownCategory::new("🟡", "Business income", "Доход от бизнеса"),
    KnownCategory::new("🟢", "Government benefits", "Гос. выплаты"),
    KnownCategory::new("🟠", "Property sales", "Продажа имущества"),
    KnownCategory::new("🟣", "Investment income", "Доход от инвестиций"),
    KnownCategory::new("⚪️", "Other income", "Прочие доходы"),
];

/// The well-known categories for one domain, in menu order.
pub fn well_known(op: OperationType) -> &'static [KnownCategory] {
    match op {
        OperationType::Income => &INCOME_CATEGORIES,
        OperationType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Icon for `label` within the given domain, if it is a well-known category.
pub fn emoji_for(op: OperationType, label: &str) -> Option<&'static str> {
    well_known(op)
        .iter()
        .find(|c| c.matches(label))
        .map(|c| c.emoji)
}
