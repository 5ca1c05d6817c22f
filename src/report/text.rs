use super::Line;
use crate::analytics::WindowKind;
use crate::models::{Locale, OperationType};

use Locale::{En, Ru};
use OperationType::{Expense, Income};
use WindowKind::{Day, Month, Week};

fn no_activity(locale: Locale, op: OperationType, period: WindowKind) -> &'static str {
    match (locale, op, period) {
        (En, Expense, Day) => "📉 You had no expenses today.",
        (En, Income, Day) => "📈 You had no income today.",
        (En, Expense, Week) => "📊 No expenses over the past week.",
        (En, Income, Week) => "📊 No income over the past week.",
        (En, Expense, Month) => "📊 No expenses over the past month.",
        (En, Income, Month) => "📊 No income over the past month.",
        (Ru, Expense, Day) => "📉 Сегодня у вас не было расходов.",
        (Ru, Income, Day) => "📈 Сегодня у вас не было доходов.",
        (Ru, Expense, Week) => "📊 За прошедшую неделю расходы отсутствуют.",
        (Ru, Income, Week) => "📊 За прошедшую неделю доходы отсутствуют.",
        (Ru, Expense, Month) => "📊 За прошедший месяц расходы отсутствуют.",
        (Ru, Income, Month) => "📊 За прошедший месяц доходы отсутствуют.",
    }
}

fn title(locale: Locale, op: OperationType, period: WindowKind) -> &'static str {
    match (locale, op, period) {
        (En, Expense, Day) => "📉 Daily report:",
        (En, Income, Day) => "📈 Daily report:",
        (En, _, Week) => "📊 Weekly report:",
        (En, Expense, Month) => "📊 Monthly expenses:",
        (En, Income, Month) => "📊 Monthly income:",
        (Ru, Expense, Day) => "📉 Отчёт за день:",
        (Ru, Income, Day) => "📈 Отчёт за день:",
        (Ru, _, Week) => "📊 Отчёт за неделю:",
        (Ru, Expense, Month) => "📊 Расходы за месяц:",
        (Ru, Income, Month) => "📊 Доходы за месяц:",
    }
}

fn total_caption(locale: Locale, op: OperationType, period: WindowKind) -> &'static str {
    match (locale, op, period) {
        (En, Expense, Day) => "💸 Total expenses for the day",
        (En, Income, Day) => "💵 Total income for the day",
        (En, Expense, Week) => "💸 Total spent over the week",
        (En, Income, Week) => "💵 Total earned over the week",
        (En, Expense, Month) => "💸 Total expenses",
        (En, Income, Month) => "💵 Total income",
        (Ru, Expense, Day) => "💸 Итого расходов за день",
        (Ru, Income, Day) => "💵 Итого доходов за день",
        (Ru, Expense, Week) => "💸 Общий расход за неделю составил",
        (Ru, Income, Week) => "💵 Общий доход за неделю составил",
        (Ru, Expense, Month) => "💸 Общие расходы",
        (Ru, Income, Month) => "💵 Общий доход",
    }
}

fn week_amount_label(locale: Locale, op: OperationType) -> &'static str {
    match (locale, op) {
        (En, Expense) => "Spent",
        (En, Income) => "Earned",
        (Ru, Expense) => "Расход",
        (Ru, Income) => "Доход",
    }
}

struct Labels {
    category: &'static str,
    amount: &'static str,
    comment: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        En => Labels {
            category: "Category",
            amount: "Amount",
            comment: "Comment",
        },
        Ru => Labels {
            category: "Категория",
            amount: "Сумма",
            comment: "Комментарий",
        },
    }
}

pub(super) fn render_line(line: &Line, op: OperationType, locale: Locale) -> String {
    let l = labels(locale);
    match line {
        Line::NoActivity(period) => no_activity(locale, op, *period).to_string(),
        Line::Title(period) => title(locale, op, *period).to_string(),
        Line::Blank => String::new(),
        Line::EntryCategory(category) => format!("▪ {}: {category}", l.category),
        Line::EntryAmount(amount) => format!("   {}: {amount}", l.amount),
        Line::EntryComment(comment) => format!("   {}: {comment}", l.comment),
        Line::WeekCategory { category, total } => format!(
            "▪ {}: {category} — {}: {total}",
            l.category,
            week_amount_label(locale, op)
        ),
        Line::MonthCategory {
            emoji: Some(emoji),
            category,
            total,
            percent,
        } => format!("{emoji} {category}: {total} ({percent}%)"),
        Line::MonthCategory {
            emoji: None,
            category,
            total,
            percent,
        } => format!("{category}: {total} ({percent}%)"),
        Line::Total {
            period,
            amount,
            currency,
        } => format!("{}: {amount} {currency}", total_caption(locale, op, *period)),
    }
}
