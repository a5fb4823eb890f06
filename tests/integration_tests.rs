use chrono::{DateTime, Duration, NaiveDate, Utc};
use expense_lifecycle::*;
use serde_json::json;

fn at(date: &str) -> DateTime<Utc> {
    start_of_day(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap())
}

fn print_forecast(groups: &[ForecastGroup<'_>], today: NaiveDate) {
    for group in groups {
        println!(
            "{} ({} ₽)",
            group.label,
            format_money(group.cost_subtotal)
        );
        for item in &group.items {
            println!(
                "  {} до {}",
                item.expense.name,
                format_date_range(
                    item.lifecycle.end_min.date_naive(),
                    item.lifecycle.end_max.date_naive(),
                    today
                )
            );
        }
    }
}

/// A payload mixing every record shape that has ever been persisted.
fn legacy_payload() -> String {
    json!([
        {
            "id": "bread",
            "name": "Хлеб",
            "cost": 60,
            "lifespanDays": 3,
            "category": "food",
            "createdAt": "2024-05-30T09:00:00.000Z"
        },
        {
            "id": "brush",
            "name": "Зубная щётка",
            "cost": 200,
            "lifespanValue": 3,
            "lifespanPeriod": "months",
            "lifespanDays": 91,
            "category": "household",
            "startDate": "2024-04-01",
            "replacementCount": 1,
            "createdAt": "2023-12-01T00:00:00.000Z"
        },
        {
            "id": "phone",
            "name": "Смартфон",
            "cost": 50000,
            "lifespanMin": 2,
            "lifespanMax": 3,
            "lifespanDaysMin": 731,
            "lifespanDaysMax": 1096,
            "lifespanPeriod": "years",
            "category": "tech",
            "startDate": "2023-01-15",
            "replacementCount": 0,
            "createdAt": "2023-01-15T12:00:00.000Z"
        },
        {
            "id": "sneakers",
            "name": "Кроссовки",
            "cost": 8000,
            "lifespanMin": 6,
            "lifespanMax": 12,
            "lifespanPeriod": "months",
            "category": "clothing",
            "startDate": "2023-09-01"
        },
        {
            "id": "gym",
            "name": "Абонемент в зал",
            "cost": 4500,
            "lifespanMin": 1,
            "lifespanMax": 1,
            "lifespanPeriod": "months",
            "category": "fitness",
            "startDate": "2024-05-20"
        }
    ])
    .to_string()
}

#[test]
fn test_household_snapshot() {
    let now = at("2024-06-01");
    let today = now.date_naive();
    let collection = ExpenseCollection::from_json(&legacy_payload(), now);
    let expenses = collection.as_slice();

    assert_eq!(expenses.len(), 5);

    let gym = collection.get("gym").unwrap();
    assert_eq!(gym.category, Category::Other);
    assert_eq!(gym.lifespan_days_min, 30.0);

    let bread = collection.get("bread").unwrap();
    assert_eq!(bread.start_date, NaiveDate::from_ymd_opt(2024, 5, 30).unwrap());
    assert_eq!(status_of(bread, now), ExpenseStatus::Active);

    let sneakers = collection.get("sneakers").unwrap();
    assert_eq!((sneakers.lifespan_days_min, sneakers.lifespan_days_max), (183.0, 365.0));
    assert_eq!(status_of(sneakers, now), ExpenseStatus::Warning);

    let brush = collection.get("brush").unwrap();
    assert_eq!(status_of(brush, now), ExpenseStatus::Active);
    assert_eq!(classify(brush, now).remaining.min, 30);

    let groups = aggregate_by_category(expenses);
    for (category, group) in &groups {
        println!(
            "{} {}: {} ₽/мес",
            category.icon(),
            category.label(),
            format_money_range(group.monthly.min, group.monthly.max)
        );
    }
    let summed: CostRange = groups.values().map(|g| g.monthly).sum();
    assert!(summed.approx_eq(&total_monthly(expenses), 1e-6));

    let forecast = bucket_forecast(expenses, now, ForecastPolicy::FixedHorizon);
    print_forecast(&forecast, today);

    assert_eq!(forecast[0].kind, ForecastGroupKind::Warning);
    assert_eq!(forecast[0].cost_subtotal, 8000.0);

    let this_week = forecast
        .iter()
        .find(|g| g.kind == ForecastGroupKind::Upcoming(ForecastWindow::ThisWeek))
        .unwrap();
    let ids: Vec<&str> = this_week.items.iter().map(|i| i.expense.id.as_str()).collect();
    assert_eq!(ids, vec!["bread"]);
}

#[test]
fn test_replacement_cycle() {
    let tracker = ExpenseTracker::new(TrackerConfig::default()).unwrap();
    let bought = at("2024-01-10");

    let collection = ExpenseCollection::default()
        .add(
            tracker
                .draft("Фильтр для воды", 600.0, 2.0)
                .with_range(2.0, 3.0)
                .with_category(Category::Household),
            bought,
        )
        .unwrap();
    let id = collection.as_slice()[0].id.clone();

    let later = bought + Duration::days(75);
    assert_eq!(status_of(collection.get(&id).unwrap(), later), ExpenseStatus::Warning);

    let much_later = bought + Duration::days(120);
    assert_eq!(status_of(collection.get(&id).unwrap(), much_later), ExpenseStatus::Expired);
    let due = bucket_forecast(collection.as_slice(), much_later, ForecastPolicy::FixedHorizon);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].kind, ForecastGroupKind::Expired);

    let replaced = collection
        .replace(&id, much_later.date_naive(), Some(650.0))
        .unwrap();
    let filter = replaced.get(&id).unwrap();
    assert_eq!(filter.replacement_count, 1);
    assert_eq!(filter.created_at, bought);
    assert_eq!(status_of(filter, much_later), ExpenseStatus::Active);
    assert_eq!(burn_rate(replaced.as_slice(), much_later).count, 1);

    // The previous snapshot is untouched.
    assert_eq!(collection.get(&id).unwrap().replacement_count, 0);
}

#[test]
fn test_persistence_round_trip() -> anyhow::Result<()> {
    let now = at("2024-06-01");
    let collection = ExpenseCollection::from_json(&legacy_payload(), now);

    let json = collection.to_json()?;
    let reloaded = ExpenseCollection::from_json(&json, now);
    assert_eq!(reloaded, collection);

    let twice = ExpenseCollection::from_json(&reloaded.to_json()?, now + Duration::days(30));
    assert_eq!(twice, collection);
    Ok(())
}

#[test]
fn test_corrupt_storage_is_treated_as_empty() {
    let now = at("2024-06-01");

    for payload in ["", "null", "{\"expenses\": []}", "[{\"id\": \"1\"", "\"text\""] {
        let collection = ExpenseCollection::from_json(payload, now);
        assert!(collection.is_empty(), "payload {:?} should load as empty", payload);
        assert!(bucket_forecast(collection.as_slice(), now, ForecastPolicy::FixedHorizon).is_empty());
        assert!(category_shares(collection.as_slice()).is_empty());
    }
}

#[test]
fn test_corrupted_record_degrades_to_free() {
    let now = at("2024-06-01");
    let payload = json!([{ "id": "broken", "name": "Сломанная запись", "cost": 1000 }]).to_string();
    let collection = ExpenseCollection::from_json(&payload, now);
    let broken = collection.get("broken").unwrap();

    let rates = expense_rates(broken);
    assert_eq!(rates.daily, CostRange::default());
    assert_eq!(rates.monthly, CostRange::default());
    assert_eq!(status_of(broken, now), ExpenseStatus::Active);
    assert_eq!(format_money(rates.monthly.max), "0.00");
}

#[test]
fn test_absurd_lifespan_does_not_break_views() {
    let now = at("2024-06-01");
    let payload = json!([
        {
            "id": "eternal",
            "name": "Вечный",
            "cost": 100,
            "lifespanValue": 1000000,
            "lifespanPeriod": "years",
            "startDate": "2024-01-01"
        },
        { "id": "bread", "name": "Хлеб", "cost": 60, "lifespanDays": 3, "startDate": "2024-05-31" }
    ])
    .to_string();

    let tracker = ExpenseTracker::new(TrackerConfig::default()).unwrap();
    let collection = tracker.load(&payload, now);
    let expenses = collection.as_slice();

    assert_eq!(status_of(collection.get("eternal").unwrap(), now), ExpenseStatus::Active);
    assert_eq!(burn_rate(expenses, now).count, 2);
    assert_eq!(tracker.overview(expenses, now).active, 2);

    let sorted = sort_expenses(
        expenses,
        SortKey::AverageRemainingDays,
        SortDirection::Descending,
        now,
    );
    assert_eq!(sorted[0].id, "eternal");

    let forecast = bucket_forecast(expenses, now, ForecastPolicy::Horizon(Horizon::FiveYears));
    let ids: Vec<&str> = forecast
        .iter()
        .flat_map(|g| g.items.iter().map(|i| i.expense.id.as_str()))
        .collect();
    assert_eq!(ids, vec!["bread"]);
}

#[test]
fn test_category_partition_matches_global_total() {
    let now = at("2024-06-01");
    let mut collection = ExpenseCollection::default();

    for (i, preset) in EXPENSE_PRESETS.iter().cycle().take(30).enumerate() {
        let category = Category::ALL[i % Category::ALL.len()];
        let draft = preset
            .to_draft()
            .with_range(preset.lifespan, preset.lifespan * (1.0 + (i % 4) as f64))
            .with_category(category);
        collection = collection.add(draft, now - Duration::days(i as i64 * 11)).unwrap();
    }

    let expenses = collection.as_slice();
    let groups = aggregate_by_category(expenses);
    let summed: CostRange = groups.values().map(|g| g.monthly).sum();

    assert!(summed.approx_eq(&total_monthly(expenses), 1e-6));
    assert_eq!(groups.len(), Category::ALL.len());

    let shares = category_shares(expenses);
    let pct: f64 = shares.iter().map(|s| s.percentage).sum();
    assert!((pct - 100.0).abs() < 1e-6);

    let burn = burn_rate(expenses, now);
    let all = total_rates(expenses);
    assert!(burn.monthly.min <= all.monthly.min + 1e-9);
    assert!(burn.daily.min <= burn.daily.max);
}

#[test]
fn test_display_texts() {
    assert_eq!(format_lifespan(14.0), "14 дней");
    assert_eq!(format_lifespan(91.0), "3 месяца");
    assert_eq!(format_lifespan(730.0), "2 года");
    assert_eq!(format!("{} {}", 3, pluralize_expenses(3.0)), "3 расхода");

    let phone = EXPENSE_PRESETS.iter().find(|p| p.name == "Смартфон").unwrap();
    let collection = ExpenseCollection::default()
        .add(phone.to_draft(), at("2024-06-01"))
        .unwrap();
    let rates = expense_rates(&collection.as_slice()[0]);

    assert_eq!(format_lifespan_range(731.0, 731.0), "2 года");
    assert_eq!(format_money_range(rates.monthly.min, rates.monthly.max), "2082");
}

#[test]
fn test_schema_generation() {
    let schema = Expense::schema_as_json().unwrap();
    println!("Generated schema:\n{}", schema);
    assert!(schema.contains("lifespanPeriod"));
    assert!(schema.contains("createdAt"));
}
