//! # Seed Data Generator
//!
//! Populates the catalog with demo buildings and units for development.
//!
//! ## Usage
//! ```bash
//! # Default database path
//! cargo run -p arriendo-db --bin seed
//!
//! # Specify database path
//! cargo run -p arriendo-db --bin seed -- --db ./data/arriendo.db
//! ```
//!
//! ## Generated Catalog
//! Each demo building gets one unit per layout in [`LAYOUTS`], priced from
//! the building's base rent. Every fourth unit is marked as rented so the
//! listing shows mixed availability.

use arriendo_core::{BadgeKind, Building, Money, PromotionBadge, Unit};
use arriendo_db::{generate_id, Database, DbConfig};
use chrono::Utc;
use std::env;

/// (name, address, comuna, base rent, parking, storage, badges)
type BuildingSeed = (
    &'static str,
    &'static str,
    &'static str,
    i64,
    Option<i64>,
    Option<i64>,
    &'static [(BadgeKind, &'static str)],
);

const BUILDINGS: &[BuildingSeed] = &[
    (
        "Edificio Vista Parque",
        "Av. Vicuña Mackenna 1234",
        "Santiago",
        290_000,
        Some(50_000),
        Some(25_000),
        &[(BadgeKind::FreeCommission, "Comisión gratis")],
    ),
    (
        "Alto Ñuñoa",
        "Av. Irarrázaval 3050",
        "Ñuñoa",
        380_000,
        Some(60_000),
        None,
        &[(BadgeKind::Discount, "50% dcto. primer mes")],
    ),
    (
        "Plaza Providencia",
        "Av. Providencia 2100",
        "Providencia",
        450_000,
        Some(70_000),
        Some(30_000),
        &[
            (BadgeKind::FreeCommission, "Comisión gratis"),
            (BadgeKind::Discount, "20% dcto. primer mes"),
            (BadgeKind::Other, "Pet friendly"),
        ],
    ),
    (
        "Mirador Independencia",
        "Av. Independencia 880",
        "Independencia",
        240_000,
        None,
        None,
        &[],
    ),
];

/// (tipologia, m2, rent multiplier in percent, parking, storage)
const LAYOUTS: &[(&str, f64, i64, bool, bool)] = &[
    ("Studio", 26.0, 85, false, false),
    ("1D1B", 36.5, 100, true, false),
    ("2D1B", 48.0, 125, true, true),
    ("2D2B", 56.5, 140, true, true),
    ("3D2B", 72.0, 175, true, true),
];

fn build_building(seed: &BuildingSeed) -> Building {
    let (name, address, comuna, _, parking, storage, badges) = *seed;
    let now = Utc::now();

    Building {
        id: generate_id(),
        name: name.to_string(),
        address: address.to_string(),
        comuna: comuna.to_string(),
        parking_price: parking.map(Money::from_pesos),
        storage_price: storage.map(Money::from_pesos),
        badges: badges
            .iter()
            .map(|(kind, label)| PromotionBadge::new(*kind, *label))
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

fn build_unit(building: &Building, base_rent: i64, index: usize) -> Unit {
    let (tipologia, m2, multiplier, parking, storage) = LAYOUTS[index % LAYOUTS.len()];
    let now = Utc::now();
    // Round to the nearest thousand, as listings do
    let price = (base_rent * multiplier / 100 + 500) / 1_000 * 1_000;

    Unit {
        id: generate_id(),
        building_id: building.id.clone(),
        tipologia: tipologia.to_string(),
        m2,
        price: Money::from_pesos(price),
        common_expenses: Money::from_pesos((m2 * 1_200.0).round() as i64),
        estacionamiento: parking && building.parking_price.is_some(),
        bodega: storage && building.storage_price.is_some(),
        disponible: index % 4 != 3,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./arriendo_dev.db");

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
                println!("Arriendo Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./arriendo_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Arriendo Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.buildings().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} buildings", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut units = 0;
    for seed in BUILDINGS {
        let building = db.buildings().insert(&build_building(seed)).await?;
        for index in 0..LAYOUTS.len() {
            db.units().insert(&build_unit(&building, seed.3, index)).await?;
            units += 1;
        }
        println!("  {} ({})", building.name, building.id);
    }

    println!();
    println!("✓ Created {} buildings and {} units", BUILDINGS.len(), units);

    db.close().await;
    Ok(())
}
