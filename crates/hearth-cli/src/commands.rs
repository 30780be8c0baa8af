//! Command implementations

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use hearth_core::backend::{AuthService, Credentials, InMemoryBackend};
use hearth_core::config::Config;
use hearth_core::forms::{ChoreDraft, PurchaseDraft};
use hearth_core::store::Dashboard;
use hearth_core::warranty::{remaining_whole_months, warranty_end_date};
use hearth_core::{Recurrence, TypingAnimator, WarrantyUnit};

/// Example prompts from the product's landing page
const SAMPLE_PROMPTS: &[&str] = &[
    "What is the replacement filter for my fridge?",
    "When did I last change my car's oil?",
    "What's the warranty status of my laptop?",
    "When is my next house cleaning due?",
];

pub async fn run_typing(config: &Config, seconds: u64) -> Result<()> {
    let texts = SAMPLE_PROMPTS.iter().map(|t| t.to_string()).collect();
    let animator = TypingAnimator::spawn(texts, config.animation.typing_config(), |text| {
        // Overwrite the line in place, padding over the previous text
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "\r{text:<60}");
        let _ = stdout.flush();
    })?;

    tokio::time::sleep(Duration::from_secs(seconds)).await;
    animator.dispose();
    println!();
    Ok(())
}

pub fn run_warranty(date: NaiveDate, period: u32, unit: WarrantyUnit) -> Result<()> {
    match warranty_end_date(date, period, unit) {
        Some(end) => {
            let today = Local::now().date_naive();
            let remaining = remaining_whole_months(Some(end), today);
            println!("Warranty ends {end} ({remaining} whole months left)");
        }
        None => println!("No warranty coverage for a period of {period} {unit}"),
    }
    Ok(())
}

pub async fn run_dashboard() -> Result<()> {
    let backend = Arc::new(InMemoryBackend::new());
    let dashboard = Dashboard::new(backend.clone(), backend.clone());
    let user = seed(&dashboard, backend.as_ref()).await?;
    tracing::debug!(%user, "seeded demo data");

    let snapshot = dashboard.snapshot().await?;
    println!("Welcome, {}!", snapshot.greeting_name);

    println!("\nUpcoming chores:");
    for chore in &snapshot.upcoming_chores {
        println!("  {}  {} ({})", chore.due_date, chore.name, chore.recurrence);
    }

    let today = Local::now().date_naive();
    println!("\nRecent purchases:");
    for purchase in &snapshot.recent_purchases {
        let warranty = match purchase.warranty_end_date {
            Some(end) => format!(
                "warranty until {end}, {} months left",
                purchase.remaining_warranty_months(today)
            ),
            None => "no warranty".to_string(),
        };
        println!(
            "  {}  {} - ${:.2} ({warranty})",
            purchase.date, purchase.name, purchase.price
        );
    }

    println!("\nTotal spending: ${:.2}", snapshot.total_spending);
    Ok(())
}

async fn seed(dashboard: &Dashboard, auth: &dyn AuthService) -> Result<uuid::Uuid> {
    let credentials = Credentials {
        email: "demo@hearth.local".into(),
        password: "demo-password".into(),
    };
    auth.sign_up(&credentials, Some("Demo User")).await?;
    let session = auth.sign_in_with_password(&credentials).await?;
    let user = session.user.id;

    let today = Local::now().date_naive();
    let purchases = [
        ("Washing machine", 649.99, 120, Some(24u32)),
        ("Laptop", 1299.00, 45, Some(12)),
        ("Kettle", 35.50, 10, None),
    ];
    for (name, price, days_ago, warranty_months) in purchases {
        let date = today - chrono::Days::new(days_ago);
        dashboard
            .purchases()
            .add(
                user,
                PurchaseDraft {
                    name: name.into(),
                    price,
                    date,
                    notes: None,
                    warranty_period: warranty_months,
                    warranty_unit: WarrantyUnit::Months,
                },
            )
            .await?;
    }

    let chores = [
        ("Replace air filters", 3, Recurrence::Quarterly),
        ("Mow lawn", 5, Recurrence::Weekly),
        ("Dentist appointment", 14, Recurrence::None),
    ];
    for (name, days_ahead, recurrence) in chores {
        let due_date = today + chrono::Days::new(days_ahead);
        dashboard
            .chores()
            .add(
                user,
                ChoreDraft {
                    name: name.into(),
                    due_date,
                    recurrence,
                    notes: None,
                    category: None,
                },
            )
            .await?;
    }

    Ok(user)
}
