//! Russian grammatical number agreement.
//!
//! Nouns take one of three forms depending on the count: singular ("1 день"),
//! paucal ("3 дня") and plural ("5 дней"). Teens always take the plural.

pub fn pluralize<'a>(count: f64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let abs = count.floor().abs() as u64;
    let mod10 = abs % 10;
    let mod100 = abs % 100;

    if (11..=19).contains(&mod100) {
        return many;
    }
    if mod10 == 1 {
        return one;
    }
    if (2..=4).contains(&mod10) {
        return few;
    }
    many
}

pub fn pluralize_days(count: f64) -> &'static str {
    pluralize(count, "день", "дня", "дней")
}

pub fn pluralize_months(count: f64) -> &'static str {
    pluralize(count, "месяц", "месяца", "месяцев")
}

pub fn pluralize_years(count: f64) -> &'static str {
    pluralize(count, "год", "года", "лет")
}

pub fn pluralize_expenses(count: f64) -> &'static str {
    pluralize(count, "расход", "расхода", "расходов")
}
