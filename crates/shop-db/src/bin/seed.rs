//! # Seed Data Generator
//!
//! Populates the database with demo customers and orders for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./shop_dev.db
//! cargo run -p shop-db --bin seed
//!
//! # Specify database path
//! cargo run -p shop-db --bin seed -- --db ./data/shop.db
//! ```
//!
//! ## Generated Data
//! - 5 customers, two of them premium members; every demo account has the
//!   password `storefront-demo`
//! - 11 orders priced through `shop_core::compute_total`, so stored totals
//!   carry the same discounts the API would apply
//! - Some orders advanced through the status lifecycle, one cancelled

use std::env;

use shop_core::{compute_total, OrderStatus};
use shop_db::credentials::hash_password;
use shop_db::{Database, DbConfig, NewOrder, NewUser};

/// Password shared by all demo accounts.
const DEMO_PASSWORD: &str = "storefront-demo";

/// (email, first name, last name, premium)
const USERS: &[(&str, &str, &str, bool)] = &[
    ("alice@example.com", "Alice", "Wonder", true),
    ("bob@example.com", "Bob", "Builder", false),
    ("charlie@example.com", "Charlie", "Brown", false),
    ("diana@example.com", "Diana", "Prince", true),
    ("edgar@example.com", "Edgar", "Poe", false),
];

/// (user index, product, quantity, unit price, final status)
const ORDERS: &[(usize, &str, i64, f64, OrderStatus)] = &[
    (0, "MacBook Pro 16", 1, 2499.0, OrderStatus::Delivered),
    (0, "USB-C Hub", 12, 39.9, OrderStatus::Shipped),
    (0, "Mechanical Keyboard", 2, 129.0, OrderStatus::Processing),
    (1, "Desk Lamp", 1, 45.0, OrderStatus::Delivered),
    (1, "Notebook A5", 6, 20.0, OrderStatus::Pending),
    (2, "Noise Cancelling Headphones", 1, 349.0, OrderStatus::Cancelled),
    (2, "Coffee Beans 1kg", 10, 18.5, OrderStatus::Delivered),
    (3, "4K Monitor", 2, 599.0, OrderStatus::Shipped),
    (3, "HDMI Cable", 15, 9.99, OrderStatus::Pending),
    (3, "Standing Desk", 1, 899.0, OrderStatus::Processing),
    (4, "Fountain Pen", 3, 75.0, OrderStatus::Pending),
];

/// Lifecycle steps from `Pending` to each final status.
fn path_to(status: OrderStatus) -> &'static [OrderStatus] {
    match status {
        OrderStatus::Pending => &[],
        OrderStatus::Processing => &[OrderStatus::Processing],
        OrderStatus::Shipped => &[OrderStatus::Processing, OrderStatus::Shipped],
        OrderStatus::Delivered => &[
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ],
        OrderStatus::Cancelled => &[OrderStatus::Cancelled],
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./shop_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./shop_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // One hash is enough; every demo account shares the password.
    let password_hash = hash_password(DEMO_PASSWORD)?;

    let mut users = Vec::with_capacity(USERS.len());
    for (email, first_name, last_name, is_premium) in USERS {
        let user = db
            .users()
            .insert(&NewUser {
                email: email.to_string(),
                password_hash: password_hash.clone(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                is_premium: *is_premium,
            })
            .await?;
        users.push(user);
    }
    println!("✓ Created {} users", users.len());

    for (user_idx, product, quantity, unit_price, status) in ORDERS {
        let user = &users[*user_idx];
        let priced = compute_total(*unit_price, *quantity, user.is_premium)?;

        let order = db
            .orders()
            .insert(&NewOrder {
                user_id: user.id.clone(),
                product_name: product.to_string(),
                quantity: *quantity,
                unit_price: *unit_price,
                discount_rate: priced.discount_rate(),
                total_amount: priced.net_amount(),
            })
            .await?;

        let mut current = order.status;
        for step in path_to(*status) {
            db.orders()
                .update_status(&order.id, current, *step)
                .await?
                .ok_or_else(|| format!("order {} changed while seeding", order.id))?;
            current = *step;
        }
    }
    println!("✓ Created {} orders", ORDERS.len());

    println!();
    for user in &users {
        let standing = db.users().order_stats(&user.id).await?.standing()?;
        println!(
            "  {:<22} {:<9} orders={:<2} premium-eligible={}",
            user.email, standing.tier, standing.completed_orders, standing.eligible_for_premium
        );
    }

    let stats = db.orders().statistics().await?;
    println!();
    println!(
        "  Revenue: {} over {} orders ({} cancelled)",
        shop_core::Money::from_amount(stats.total_revenue),
        stats.total_orders,
        stats.cancelled_orders
    );

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
