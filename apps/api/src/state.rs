//! # Application State
//!
//! Shared state handed to every handler through axum's `State` extractor.

use arriendo_core::PricingEngine;
use arriendo_db::Database;
use chrono::{Local, NaiveDate};

/// Source of "today" for quotation date checks.
///
/// The engine never reads a clock; handlers ask this instead, so tests can
/// pin the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Server-local calendar date.
    System,
    /// Always the given date.
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub engine: PricingEngine,
    pub clock: Clock,
}

impl AppState {
    pub fn new(db: Database, engine: PricingEngine, clock: Clock) -> Self {
        AppState { db, engine, clock }
    }
}
