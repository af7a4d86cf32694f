// SPDX-License-Identifier: MIT

//! SehatSathi portal, terminal edition.
//!
//! Interactive client for the SehatSathi backend: login/signup, the
//! pharmacy inventory dashboard and the government oversight console,
//! role-gated the same way the web portal gates its routes.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sehatsathi_portal::auth::{GuardDecision, RecordingNavigator, RouteGuard};
use sehatsathi_portal::config::Config;
use sehatsathi_portal::models::{AddStockData, PharmacySignupData, Role};
use sehatsathi_portal::portal::{GovernmentConsole, PharmacyDashboard, StockAlert};
use sehatsathi_portal::Portal;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(api = %config.api_base_url, "Starting SehatSathi portal");

    let navigator: Arc<RecordingNavigator> = Arc::new(RecordingNavigator::new());
    let portal = Portal::new(config, navigator.clone());

    portal.auth.initialize();

    println!("SehatSathi portal - connected to {}", portal.config.api_base_url);
    match portal.auth.current_user() {
        Some(user) => println!("Welcome back, {} ({})", user.username, user.user_type),
        None => println!("Not logged in. Type `login <username>` to begin, `help` for commands."),
    }

    let mut pharmacy_guard = RouteGuard::new(
        portal.auth.subscribe(),
        vec![Role::Pharmacy],
        navigator.clone(),
    );
    let mut government_guard = RouteGuard::new(
        portal.auth.subscribe(),
        vec![Role::Government, Role::Admin],
        navigator.clone(),
    );

    let mut pharmacy = PharmacyDashboard::new(portal.api.clone());
    let mut government = GovernmentConsole::new(portal.api.clone());

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline("sehatsathi> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,

            "health" => match portal.api.health().await {
                Ok(response) => println!("{}", response.message),
                Err(e) => println!("Backend check failed: {e}"),
            },

            "status" => {
                println!("Backend: {}", portal.config.api_base_url);
                match portal.auth.current_user() {
                    Some(user) => {
                        println!(
                            "Logged in as {} ({}{})",
                            user.username,
                            user.user_type,
                            if user.is_approved { "" } else { ", pending approval" }
                        );
                    }
                    None => println!("Not logged in"),
                }
                if let Some(route) = navigator.current() {
                    println!("Screen: {}", route.path());
                }
            }

            "login" => {
                let username = match args.first() {
                    Some(name) => name.to_string(),
                    None => prompt(&mut rl, "Username: ")?,
                };
                let password = match args.get(1) {
                    Some(pass) => pass.to_string(),
                    None => prompt(&mut rl, "Password: ")?,
                };
                match portal.auth.login(&username, &password).await {
                    Ok(()) => {
                        if let Some(route) = navigator.current() {
                            println!("Logged in. Opening {}", route.path());
                        }
                    }
                    Err(e) => println!("Login failed: {e}"),
                }
            }

            "logout" => {
                portal.auth.logout();
                println!("Logged out.");
            }

            "refresh" => match portal.auth.refresh().await {
                Ok(()) => println!("Profile refreshed."),
                Err(e) => println!("Refresh failed (session kept): {e}"),
            },

            "signup" => match run_signup(&mut rl, &portal).await {
                Ok(()) => {}
                Err(e) => println!("Signup failed: {e}"),
            },

            // ── Pharmacy screens ──
            "stocks" => {
                if guard_allows(&mut pharmacy_guard, "pharmacy dashboard") {
                    pharmacy.load().await;
                    render_stocks(&pharmacy);
                }
            }

            "add-stock" => {
                if guard_allows(&mut pharmacy_guard, "pharmacy dashboard") {
                    let Some(user) = portal.auth.current_user() else {
                        continue;
                    };
                    let data = match prompt_stock(&mut rl) {
                        Ok(data) => data,
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    };
                    match pharmacy.add_medicine(&user, &data).await {
                        Ok(message) => {
                            println!("{message}");
                            render_stocks(&pharmacy);
                        }
                        Err(message) => println!("{message}"),
                    }
                }
            }

            // ── Government screens ──
            "dashboard" => {
                if guard_allows(&mut government_guard, "oversight console") {
                    government.load_overview().await;
                    render_overview(&government);
                }
            }

            "pending" => {
                if guard_allows(&mut government_guard, "oversight console") {
                    government.load_pending().await;
                    render_pending(&government);
                }
            }

            "approve" => {
                if guard_allows(&mut government_guard, "oversight console") {
                    let Some(id) = args.first().and_then(|raw| raw.parse::<i64>().ok()) else {
                        println!("Usage: approve <user-id>");
                        continue;
                    };
                    match government.approve(id).await {
                        Ok(message) => println!("{message}"),
                        Err(message) => println!("{message}"),
                    }
                }
            }

            "all-stocks" => {
                if guard_allows(&mut government_guard, "oversight console") {
                    government.load_all_stocks().await;
                    render_all_stocks(&government);
                }
            }

            other => println!("Unknown command `{other}`. Type `help` for commands."),
        }
    }

    println!("Bye.");
    Ok(())
}

/// Check a guard before rendering its screen; report denials.
fn guard_allows(guard: &mut RouteGuard, screen: &str) -> bool {
    match guard.check() {
        GuardDecision::Render => true,
        GuardDecision::Redirect(route) => {
            println!("Access to the {screen} denied; back to {}", route.path());
            false
        }
        GuardDecision::Wait => {
            println!("Session still loading, try again.");
            false
        }
    }
}

fn prompt(rl: &mut DefaultEditor, label: &str) -> anyhow::Result<String> {
    Ok(rl.readline(label)?.trim().to_string())
}

async fn run_signup(rl: &mut DefaultEditor, portal: &Portal) -> anyhow::Result<()> {
    println!("Pharmacy signup (government accounts are provisioned centrally)");
    let data = PharmacySignupData {
        name: prompt(rl, "Pharmacy name: ")?,
        owner: prompt(rl, "Owner: ")?,
        location: prompt(rl, "Location: ")?,
        license: prompt(rl, "License number: ")?,
        phone: prompt(rl, "Phone: ")?,
        email: prompt(rl, "Email: ")?,
        password: {
            let raw = prompt(rl, "Password (blank for generated): ")?;
            if raw.is_empty() { None } else { Some(raw) }
        },
    };

    use validator::Validate;
    if let Err(errors) = data.validate() {
        anyhow::bail!("{errors}");
    }

    let response = portal.api.pharmacy_signup(&data).await?;
    println!("{}", response.message);
    println!(
        "Credentials: username {} / password {}",
        response.credentials.username, response.credentials.password
    );
    Ok(())
}

fn prompt_stock(rl: &mut DefaultEditor) -> anyhow::Result<AddStockData> {
    let medicine_name = prompt(rl, "Medicine name: ")?;
    let quantity = prompt(rl, "Quantity: ")?
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("Quantity must be a whole number"))?;
    let price = prompt(rl, "Price: ")?
        .parse::<f64>()
        .map_err(|_| anyhow::anyhow!("Price must be a number"))?;
    let expiry_date = prompt(rl, "Expiry date (YYYY-MM-DD): ")?;
    let batch_number = prompt(rl, "Batch number: ")?;
    Ok(AddStockData {
        medicine_name,
        quantity,
        price,
        expiry_date,
        batch_number,
    })
}

fn render_stocks(dashboard: &PharmacyDashboard) {
    if let Some(error) = &dashboard.error {
        println!("{error}");
        return;
    }
    if dashboard.medicines.is_empty() {
        println!("No medicines in stock yet.");
        return;
    }
    println!(
        "{:<4} {:<28} {:>8} {:>10}  {:<12} {:<10}",
        "ID", "Medicine", "Qty", "Price", "Expiry", "Batch"
    );
    for stock in &dashboard.medicines {
        let alert = match PharmacyDashboard::alert_for(stock) {
            StockAlert::Ok => "",
            StockAlert::LowStock => "  [LOW]",
            StockAlert::ExpiringSoon => "  [EXPIRING]",
        };
        println!(
            "{:<4} {:<28} {:>8} {:>10.2}  {:<12} {:<10}{alert}",
            stock.id,
            stock.medicine_name,
            stock.quantity,
            stock.price,
            stock.expiry_date,
            stock.batch_number,
        );
    }
}

fn render_overview(console: &GovernmentConsole) {
    if let Some(error) = &console.error {
        println!("{error}");
        return;
    }
    let Some(dashboard) = &console.overview else {
        println!("No dashboard data.");
        return;
    };
    let stats = &dashboard.statistics;
    println!("Pharmacies: {}   Pending approvals: {}", stats.total_pharmacies, stats.pending_approvals);
    println!(
        "Medicines: {}   Low stock: {}   Expiring soon: {}",
        stats.total_medicines, stats.low_stock_count, stats.expiring_soon_count
    );
    if !dashboard.low_stock_medicines.is_empty() {
        println!("\nLow stock:");
        for row in &dashboard.low_stock_medicines {
            println!(
                "  {:<28} {:>6}  {}",
                row.medicine_name,
                row.quantity,
                row.pharmacy_name.as_deref().unwrap_or("-")
            );
        }
    }
    if !dashboard.expiring_medicines.is_empty() {
        println!("\nExpiring soon:");
        for row in &dashboard.expiring_medicines {
            println!(
                "  {:<28} {:<12}  {}",
                row.medicine_name,
                row.expiry_date,
                row.pharmacy_name.as_deref().unwrap_or("-")
            );
        }
    }
    if !dashboard.top_medicines.is_empty() {
        println!("\nTop medicines:");
        for row in &dashboard.top_medicines {
            println!(
                "  {:<28} {:>8} across {} pharmacies",
                row.medicine_name, row.total_quantity, row.pharmacy_count
            );
        }
    }
}

fn render_pending(console: &GovernmentConsole) {
    if let Some(error) = &console.error {
        println!("{error}");
        return;
    }
    if console.pending.is_empty() {
        println!("No pharmacies awaiting approval.");
        return;
    }
    println!("{:<4} {:<20} {:<24} {:<16}", "ID", "Username", "Pharmacy", "License");
    for user in &console.pending {
        println!(
            "{:<4} {:<20} {:<24} {:<16}",
            user.id,
            user.username,
            user.pharmacy_name.as_deref().unwrap_or("-"),
            user.license_number.as_deref().unwrap_or("-"),
        );
    }
    println!("Approve with `approve <id>`.");
}

fn render_all_stocks(console: &GovernmentConsole) {
    if let Some(error) = &console.error {
        println!("{error}");
        return;
    }
    if console.all_stocks.is_empty() {
        println!("No stock reported yet.");
        return;
    }
    println!(
        "{:<28} {:>8} {:<12} {:<24}",
        "Medicine", "Qty", "Expiry", "Pharmacy"
    );
    for row in &console.all_stocks {
        println!(
            "{:<28} {:>8} {:<12} {:<24}",
            row.stock.medicine_name,
            row.stock.quantity,
            row.stock.expiry_date,
            row.pharmacy_name.as_deref().unwrap_or("-"),
        );
    }
}

fn print_help() {
    println!(
        "Commands:\n  \
         login [username] [password]   log in and open your dashboard\n  \
         logout                        clear the session\n  \
         signup                        register a new pharmacy\n  \
         refresh                       re-fetch your profile\n  \
         status                        connection and session info\n  \
         health                        check the backend\n  \
         stocks                        pharmacy: list your medicines\n  \
         add-stock                     pharmacy: add a medicine\n  \
         dashboard                     government: overview statistics\n  \
         pending                       government: pharmacies awaiting approval\n  \
         approve <id>                  government: approve a pharmacy\n  \
         all-stocks                    government: stock across pharmacies\n  \
         quit                          leave"
    );
}

/// Initialize human-readable logging filtered by `RUST_LOG`.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sehatsathi_portal=info")),
        )
        .with(format)
        .init();
}
