//! Seeds the database with a demo user, starter categories of every kind
//! and a month of transactions, for poking at the API by hand.

use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::str::FromStr;

use fdge_financas::auth;
use fdge_financas::database::db::connection::get_db_pool;
use fdge_financas::database::db::migrate::run_migrations;
use fdge_financas::database::db::queries::{self, NewTransaction, TransactionFilter};
use fdge_financas::database::models::{CategoryKind, Installments, Summary};

const DEMO_EMAIL: &str = "demo@financas.dev";
const DEMO_PASSWORD: &str = "demo-password";

#[derive(Parser, Debug)]
#[command(name = "seed", about = "Load demo data into the tracker database")]
struct Args {
    /// SQLite database to seed.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://financas.db?mode=rwc"
    )]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let pool = get_db_pool(&args.database_url).await?;
    run_migrations(&pool).await?;
    println!("Migrations ran successfully!");

    if queries::get_user_credentials(&pool, DEMO_EMAIL)
        .await?
        .is_some()
    {
        println!("Demo user {} already exists, nothing to do.", DEMO_EMAIL);
        return Ok(());
    }

    // ----------------------------------------------------
    // Demo user
    // ----------------------------------------------------
    let password_hash =
        auth::hash_password(DEMO_PASSWORD).map_err(|e| anyhow::anyhow!("hash password: {}", e))?;
    let user = queries::create_user(&pool, DEMO_EMAIL, &password_hash, Some("Demo")).await?;
    println!("Created demo user {} (id {})", user.email, user.user_id);

    // ----------------------------------------------------
    // Categories, one starter set per kind
    // ----------------------------------------------------
    let salario = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::Income,
        "Salário",
        Some("💼"),
        Some("pagamento mensal"),
    )
    .await?;
    let freelance = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::Income,
        "Freelance",
        Some("💻"),
        None,
    )
    .await?;
    let mercado = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::Expense,
        "Mercado",
        Some("🛒"),
        None,
    )
    .await?;
    let transporte = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::Expense,
        "Transporte",
        Some("🚗"),
        None,
    )
    .await?;
    let lazer = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::Expense,
        "Lazer",
        Some("🎮"),
        None,
    )
    .await?;
    let cartao = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::PaymentMethod,
        "Cartão de crédito",
        Some("💳"),
        None,
    )
    .await?;
    let pix = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::PaymentMethod,
        "Pix",
        Some("⚡"),
        None,
    )
    .await?;
    let supermercado = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::Place,
        "Supermercado do bairro",
        None,
        None,
    )
    .await?;
    let shopping = queries::create_category(
        &pool,
        user.user_id,
        CategoryKind::Place,
        "Shopping",
        None,
        None,
    )
    .await?;
    println!("Created 9 starter categories");

    // ----------------------------------------------------
    // A month of transactions ending today
    // ----------------------------------------------------
    let today = Utc::now().date_naive();
    let rows: Vec<(&str, &str, NaiveDate, Option<i64>, Option<i64>, Option<i64>)> = vec![
        (
            "Salário de março",
            "4200.00",
            today - Duration::days(25),
            Some(salario.category_id),
            Some(pix.category_id),
            None,
        ),
        (
            "Projeto site da padaria",
            "850.00",
            today - Duration::days(18),
            Some(freelance.category_id),
            Some(pix.category_id),
            None,
        ),
        (
            "Compra da semana",
            "312.45",
            today - Duration::days(21),
            Some(mercado.category_id),
            Some(cartao.category_id),
            Some(supermercado.category_id),
        ),
        (
            "Compra da semana",
            "287.90",
            today - Duration::days(14),
            Some(mercado.category_id),
            Some(cartao.category_id),
            Some(supermercado.category_id),
        ),
        (
            "Gasolina",
            "180.00",
            today - Duration::days(12),
            Some(transporte.category_id),
            Some(pix.category_id),
            None,
        ),
        (
            "Cinema",
            "64.00",
            today - Duration::days(6),
            Some(lazer.category_id),
            Some(cartao.category_id),
            Some(shopping.category_id),
        ),
    ];

    for (description, amount, on, category_id, payment_method_id, place_id) in rows {
        queries::create_transaction(
            &pool,
            user.user_id,
            NewTransaction {
                description,
                amount: Decimal::from_str(amount)?,
                transacted_on: on,
                notes: None,
                receipt_url: None,
                category_id,
                payment_method_id,
                place_id,
                installments: None,
            },
        )
        .await?;
    }

    // One installment purchase, 2 of 10, with a stored receipt link.
    queries::create_transaction(
        &pool,
        user.user_id,
        NewTransaction {
            description: "Notebook novo",
            amount: Decimal::from_str("289.90")?,
            transacted_on: today - Duration::days(3),
            notes: Some("parcela do notebook"),
            receipt_url: Some("https://receipts.example.com/notebook.pdf"),
            category_id: Some(lazer.category_id),
            payment_method_id: Some(cartao.category_id),
            place_id: Some(shopping.category_id),
            installments: Some(Installments { number: 2, count: 10 }),
        },
    )
    .await?;
    println!("Created 7 transactions");

    // ----------------------------------------------------
    // Show what the summary endpoint will report
    // ----------------------------------------------------
    let records =
        queries::get_transactions(&pool, user.user_id, &TransactionFilter::default()).await?;
    let summary = Summary::from_records(&records);
    println!(
        "Summary: income {}, expense {}, balance {}, {} transactions",
        summary.total_income, summary.total_expense, summary.balance, summary.transaction_count
    );
    println!("Login with {} / {}", DEMO_EMAIL, DEMO_PASSWORD);

    Ok(())
}
