//! # Quotation Module
//!
//! The pricing engine: turns a unit, a move-in date and a set of options
//! into an itemized first payment.
//!
//! ## Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        First Payment                                    │
//! │                                                                         │
//! │  startDate ──► ProrationPeriod (daysCharged / daysInMonth)              │
//! │                      │                                                  │
//! │    unit.price ───────┼──► proratedRent ──► - discountPromo = netRent    │
//! │    commonExpenses ───┼──► gcProrated                                    │
//! │    parkingPrice ─────┼──► parkingProrated ─┐                            │
//! │    storagePrice ─────┴──► storageProrated ─┴► addOns                    │
//! │                                                                         │
//! │    unit.price (FULL) × guaranteeRate ──────► guaranteeEntry            │
//! │    unit.price (FULL) × commissionRate ─────► commission (0 if free)    │
//! │    creditReportFee (flat) ─────────────────► creditReportFee           │
//! │                                                                         │
//! │  firstPayment = netRent + addOns + gcProrated + guaranteeEntry          │
//! │               + creditReportFee + commission                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Every prorated or percentage line is rounded once, half up, before it
//!   is summed. The total is the sum of the rounded lines, so the itemized
//!   breakdown and the bottom line always agree.
//! - The discount applies to rent only. Add-ons, common expenses, fees,
//!   guarantee and commission are never discounted.
//! - Guarantee and commission are computed off the full monthly rent and
//!   do not change with the move-in day.
//! - "Today" is an argument. The engine never reads a clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calendar::ProrationPeriod;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::PromotionContext;
use crate::types::Rate;
use crate::validation::{
    parse_start_date, validate_add_on, validate_common_expenses, validate_credit_report_fee,
    validate_discount_percent, validate_rate_bps, validate_start_date, validate_unit_id,
    validate_unit_price, ValidationResult,
};

// =============================================================================
// Engine Input
// =============================================================================

/// The unit fields the engine needs, detached from the catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPricingInput {
    pub unit_id: String,
    /// Full monthly base rent.
    pub price: Money,
    /// Monthly common expenses before proration.
    pub common_expenses: Money,
    pub parking_available: bool,
    pub storage_available: bool,
    pub available: bool,
}

/// A quotation request as posted by the web UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationInput {
    pub unit_id: String,
    /// Move-in date, `YYYY-MM-DD`.
    pub start_date: String,
    pub options: QuotationOptions,
}

/// Add-on selection and fees.
///
/// A selected add-on must carry its price. `Some(0)` is a free add-on;
/// `None` is a request error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationOptions {
    #[serde(default)]
    pub parking_selected: bool,

    #[serde(default)]
    pub storage_selected: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub parking_price: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub storage_price: Option<i64>,

    pub credit_report_fee: i64,
}

// =============================================================================
// Engine Output
// =============================================================================

/// Itemized first payment for one unit, date and option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationResult {
    pub meta: QuotationMeta,
    pub lines: QuotationLines,
    pub flags: QuotationFlags,
    pub totals: QuotationTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationMeta {
    pub unit_id: String,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    pub days_charged: u32,
    pub days_in_month: u32,
}

/// Every amount in whole currency units, already rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationLines {
    /// Full monthly rent, for reference. Not part of the total.
    pub base_monthly: Money,
    pub prorated_rent: Money,
    pub discount_promo: Money,
    pub net_rent: Money,
    pub parking_prorated: Money,
    pub storage_prorated: Money,
    pub gc_prorated: Money,
    pub guarantee_entry: Money,
    pub credit_report_fee: Money,
    pub commission: Money,
}

impl QuotationLines {
    /// Sum of the lines that make up the first payment.
    ///
    /// Fails with `Computation` instead of wrapping if the sum does not fit.
    pub fn charged_total(&self) -> CoreResult<Money> {
        [
            self.net_rent,
            self.parking_prorated,
            self.storage_prorated,
            self.gc_prorated,
            self.guarantee_entry,
            self.credit_report_fee,
            self.commission,
        ]
        .into_iter()
        .try_fold(Money::zero(), Money::checked_add)
        .ok_or_else(|| CoreError::computation("firstPayment", "sum of lines overflows"))
    }

    /// Prorated parking plus prorated storage.
    pub fn add_ons(&self) -> CoreResult<Money> {
        self.parking_prorated
            .checked_add(self.storage_prorated)
            .ok_or_else(|| CoreError::computation("addOns", "sum of add-ons overflows"))
    }

    fn named(&self) -> [(&'static str, Money); 10] {
        [
            ("baseMonthly", self.base_monthly),
            ("proratedRent", self.prorated_rent),
            ("discountPromo", self.discount_promo),
            ("netRent", self.net_rent),
            ("parkingProrated", self.parking_prorated),
            ("storageProrated", self.storage_prorated),
            ("gcProrated", self.gc_prorated),
            ("guaranteeEntry", self.guarantee_entry),
            ("creditReportFee", self.credit_report_fee),
            ("commission", self.commission),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationFlags {
    pub has_free_commission: bool,
    pub discount_percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationTotals {
    /// Prorated parking plus prorated storage.
    pub add_ons: Money,
    pub first_payment: Money,
}

impl QuotationResult {
    /// The bottom line.
    pub fn first_payment(&self) -> Money {
        self.totals.first_payment
    }

    /// Checks the breakdown against the engine's invariants.
    ///
    /// ## Invariants
    /// - `1 <= daysCharged <= daysInMonth`
    /// - No line or total is negative
    /// - `discountPromo <= proratedRent` and `netRent = proratedRent - discountPromo`
    /// - `addOns = parkingProrated + storageProrated`
    /// - `firstPayment` equals the sum of the charged lines
    /// - Free commission means a zero commission line
    pub fn verify(&self) -> CoreResult<()> {
        let meta = &self.meta;
        if meta.days_charged == 0 || meta.days_charged > meta.days_in_month {
            return Err(CoreError::computation(
                "daysCharged",
                format!("{} outside 1..={}", meta.days_charged, meta.days_in_month),
            ));
        }

        let totals = [
            ("addOns", self.totals.add_ons),
            ("firstPayment", self.totals.first_payment),
        ];
        for (line, amount) in self.lines.named().into_iter().chain(totals) {
            if amount.is_negative() {
                return Err(CoreError::computation(
                    line,
                    format!("negative amount {}", amount.pesos()),
                ));
            }
        }

        let lines = &self.lines;
        if lines.discount_promo > lines.prorated_rent {
            return Err(CoreError::computation(
                "discountPromo",
                format!(
                    "discount {} exceeds prorated rent {}",
                    lines.discount_promo, lines.prorated_rent
                ),
            ));
        }
        if lines.net_rent != lines.prorated_rent - lines.discount_promo {
            return Err(CoreError::computation(
                "netRent",
                "does not equal proratedRent - discountPromo",
            ));
        }

        if self.totals.add_ons != lines.add_ons()? {
            return Err(CoreError::computation(
                "addOns",
                "does not equal parkingProrated + storageProrated",
            ));
        }

        let expected = lines.charged_total()?;
        if self.totals.first_payment != expected {
            return Err(CoreError::computation(
                "firstPayment",
                format!("{} differs from sum of lines {}", self.totals.first_payment, expected),
            ));
        }

        if self.flags.has_free_commission && !lines.commission.is_zero() {
            return Err(CoreError::computation(
                "commission",
                "charged while free commission is active",
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Pricing Policy
// =============================================================================

/// Business rates that are not part of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Fraction of the full monthly rent taken as guarantee.
    pub guarantee_rate: Rate,
    /// Fraction of the full monthly rent charged as brokerage commission.
    pub commission_rate: Rate,
}

impl PricingPolicy {
    /// Default guarantee: one month of rent.
    pub const DEFAULT_GUARANTEE_BPS: u32 = 10_000;
    /// Default commission: half a month of rent.
    pub const DEFAULT_COMMISSION_BPS: u32 = 5_000;

    /// Creates a policy from basis points, rejecting rates above 100%.
    pub fn new(guarantee_bps: u32, commission_bps: u32) -> ValidationResult<Self> {
        validate_rate_bps("guaranteeBps", guarantee_bps)?;
        validate_rate_bps("commissionBps", commission_bps)?;
        Ok(PricingPolicy {
            guarantee_rate: Rate::from_bps(guarantee_bps),
            commission_rate: Rate::from_bps(commission_bps),
        })
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            guarantee_rate: Rate::from_bps(Self::DEFAULT_GUARANTEE_BPS),
            commission_rate: Rate::from_bps(Self::DEFAULT_COMMISSION_BPS),
        }
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Stateless quotation calculator.
///
/// Holds only the policy, so one engine can be shared across request
/// handlers without locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine {
    policy: PricingPolicy,
}

impl PricingEngine {
    pub fn new(policy: PricingPolicy) -> Self {
        PricingEngine { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Computes the first payment for `unit`.
    ///
    /// ## Errors
    /// - `UnitNotFound` if `input.unit_id` does not name `unit`
    /// - `UnitUnavailable` if the unit is not offered for rent
    /// - `Validation` for a non-positive rent, an unparseable or past
    ///   `startDate`, a selected add-on without price, a negative fee, or
    ///   an out-of-range discount
    /// - `Computation` if the result breaks an invariant (a bug)
    ///
    /// ## Example
    /// ```rust
    /// use arriendo_core::money::Money;
    /// use arriendo_core::promotion::PromotionContext;
    /// use arriendo_core::quotation::{
    ///     PricingEngine, QuotationInput, QuotationOptions, UnitPricingInput,
    /// };
    /// use chrono::NaiveDate;
    ///
    /// let unit = UnitPricingInput {
    ///     unit_id: "u-101".to_string(),
    ///     price: Money::from_pesos(290_000),
    ///     common_expenses: Money::zero(),
    ///     parking_available: false,
    ///     storage_available: false,
    ///     available: true,
    /// };
    /// let input = QuotationInput {
    ///     unit_id: "u-101".to_string(),
    ///     start_date: "2024-04-16".to_string(),
    ///     options: QuotationOptions {
    ///         parking_selected: false,
    ///         storage_selected: false,
    ///         parking_price: None,
    ///         storage_price: None,
    ///         credit_report_fee: 0,
    ///     },
    /// };
    /// let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    ///
    /// let result = PricingEngine::default()
    ///     .quote(&unit, &input, PromotionContext::none(), today)
    ///     .unwrap();
    /// assert_eq!(result.meta.days_charged, 15);
    /// assert_eq!(result.lines.prorated_rent.pesos(), 145_000);
    /// ```
    pub fn quote(
        &self,
        unit: &UnitPricingInput,
        input: &QuotationInput,
        promotions: PromotionContext,
        today: NaiveDate,
    ) -> CoreResult<QuotationResult> {
        // 1. Preconditions on the unit
        validate_unit_id(&input.unit_id)?;
        if input.unit_id.trim() != unit.unit_id {
            return Err(CoreError::UnitNotFound(input.unit_id.clone()));
        }
        if !unit.available {
            return Err(CoreError::UnitUnavailable(unit.unit_id.clone()));
        }
        validate_unit_price(unit.price)?;
        validate_common_expenses(unit.common_expenses)?;

        // 2. Request
        let start_date = parse_start_date(&input.start_date)?;
        validate_start_date(start_date, today)?;

        let options = &input.options;
        let parking = validate_add_on(
            "parking",
            options.parking_selected,
            options.parking_price,
            unit.parking_available,
            &unit.unit_id,
        )?;
        let storage = validate_add_on(
            "storage",
            options.storage_selected,
            options.storage_price,
            unit.storage_available,
            &unit.unit_id,
        )?;
        let credit_report_fee = validate_credit_report_fee(options.credit_report_fee)?;
        validate_discount_percent(promotions.discount_percent)?;

        // 3. Lines
        let period = ProrationPeriod::starting(start_date);

        let prorated_rent = period.apply(unit.price);
        let discount_rate = Rate::from_percent(promotions.discount_percent);
        let discount_promo = prorated_rent.apply_rate(discount_rate);
        let net_rent = prorated_rent - discount_promo;

        let parking_prorated = period.apply(parking);
        let storage_prorated = period.apply(storage);
        let gc_prorated = period.apply(unit.common_expenses);

        let guarantee_entry = unit.price.apply_rate(self.policy.guarantee_rate);
        let commission = if promotions.has_free_commission {
            Money::zero()
        } else {
            unit.price.apply_rate(self.policy.commission_rate)
        };

        let lines = QuotationLines {
            base_monthly: unit.price,
            prorated_rent,
            discount_promo,
            net_rent,
            parking_prorated,
            storage_prorated,
            gc_prorated,
            guarantee_entry,
            credit_report_fee,
            commission,
        };

        // 4. Totals
        let totals = QuotationTotals {
            add_ons: lines.add_ons()?,
            first_payment: lines.charged_total()?,
        };

        let result = QuotationResult {
            meta: QuotationMeta {
                unit_id: unit.unit_id.clone(),
                start_date,
                days_charged: period.days_charged,
                days_in_month: period.days_in_month,
            },
            lines,
            flags: QuotationFlags {
                has_free_commission: promotions.has_free_commission,
                discount_percent: promotions.discount_percent,
            },
            totals,
        };

        result.verify()?;
        Ok(result)
    }
}

/// Quotes with the default policy.
pub fn compute_quotation(
    unit: &UnitPricingInput,
    input: &QuotationInput,
    promotions: PromotionContext,
    today: NaiveDate,
) -> CoreResult<QuotationResult> {
    PricingEngine::default().quote(unit, input, promotions, today)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::days_in_month;
    use crate::error::ValidationError;
    use crate::validation::MAX_AMOUNT;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn unit(price: i64) -> UnitPricingInput {
        UnitPricingInput {
            unit_id: "u-101".to_string(),
            price: Money::from_pesos(price),
            common_expenses: Money::from_pesos(45_000),
            parking_available: true,
            storage_available: true,
            available: true,
        }
    }

    fn input(start_date: &str) -> QuotationInput {
        QuotationInput {
            unit_id: "u-101".to_string(),
            start_date: start_date.to_string(),
            options: QuotationOptions {
                parking_selected: false,
                storage_selected: false,
                parking_price: None,
                storage_price: None,
                credit_report_fee: 0,
            },
        }
    }

    fn quote(unit: &UnitPricingInput, input: &QuotationInput) -> QuotationResult {
        compute_quotation(unit, input, PromotionContext::none(), today()).unwrap()
    }

    fn try_quote(unit: &UnitPricingInput, input: &QuotationInput) -> CoreResult<QuotationResult> {
        compute_quotation(unit, input, PromotionContext::none(), today())
    }

    fn quote_err(unit: &UnitPricingInput, input: &QuotationInput) -> CoreError {
        try_quote(unit, input).unwrap_err()
    }

    // -------------------------------------------------------------------------
    // Scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_move_in_on_the_first_charges_full_month() {
        let result = quote(&unit(290_000), &input("2024-04-01"));

        assert_eq!(result.meta.days_charged, 30);
        assert_eq!(result.meta.days_in_month, 30);
        assert_eq!(result.lines.prorated_rent.pesos(), 290_000);
        assert_eq!(result.lines.discount_promo, Money::zero());
        assert_eq!(result.lines.net_rent.pesos(), 290_000);
        assert_eq!(result.lines.gc_prorated.pesos(), 45_000);
        assert_eq!(result.lines.guarantee_entry.pesos(), 290_000);
        assert_eq!(result.lines.commission.pesos(), 145_000);
        // 290000 + 45000 + 290000 + 145000
        assert_eq!(result.first_payment().pesos(), 770_000);
    }

    #[test]
    fn test_mid_month_prorates_rent_but_not_guarantee() {
        let result = quote(&unit(290_000), &input("2024-04-16"));

        assert_eq!(result.meta.days_charged, 15);
        assert_eq!(result.lines.prorated_rent.pesos(), 145_000);
        assert_eq!(result.lines.gc_prorated.pesos(), 22_500);
        assert_eq!(result.lines.guarantee_entry.pesos(), 290_000);
        assert_eq!(result.lines.commission.pesos(), 145_000);
        assert_eq!(result.first_payment().pesos(), 602_500);
    }

    #[test]
    fn test_discount_applies_to_rent_only() {
        let promotions = PromotionContext::new(false, 50).unwrap();
        let mut request = input("2024-04-01");
        request.options.parking_selected = true;
        request.options.parking_price = Some(50_000);

        let result = compute_quotation(&unit(500_000), &request, promotions, today()).unwrap();

        assert_eq!(result.lines.prorated_rent.pesos(), 500_000);
        assert_eq!(result.lines.discount_promo.pesos(), 250_000);
        assert_eq!(result.lines.net_rent.pesos(), 250_000);
        assert_eq!(result.lines.parking_prorated.pesos(), 50_000);
        assert_eq!(result.lines.guarantee_entry.pesos(), 500_000);
        assert_eq!(result.flags.discount_percent, 50);
    }

    #[test]
    fn test_free_commission() {
        for price in [1, 290_000, 2_750_000] {
            let promotions = PromotionContext::new(true, 0).unwrap();
            let result =
                compute_quotation(&unit(price), &input("2024-04-10"), promotions, today()).unwrap();
            assert!(result.flags.has_free_commission);
            assert_eq!(result.lines.commission, Money::zero());
        }
    }

    #[test]
    fn test_parking_is_prorated() {
        let mut request = input("2024-04-16");
        request.options.parking_selected = true;
        request.options.parking_price = Some(50_000);

        let result = quote(&unit(290_000), &request);

        assert_eq!(result.lines.parking_prorated.pesos(), 25_000);
        assert_eq!(result.lines.storage_prorated, Money::zero());
        assert_eq!(result.totals.add_ons.pesos(), 25_000);
        assert_eq!(result.first_payment().pesos(), 602_500 + 25_000);
    }

    #[test]
    fn test_missing_parking_price_is_rejected() {
        let mut request = input("2024-04-16");
        request.options.parking_selected = true;

        let err = quote_err(&unit(290_000), &request);
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field })
                if field == "parkingPrice"
        ));
    }

    // -------------------------------------------------------------------------
    // Edge cases
    // -------------------------------------------------------------------------

    #[test]
    fn test_move_in_on_last_day_charges_one_day() {
        let result = quote(&unit(290_000), &input("2024-04-30"));

        assert_eq!(result.meta.days_charged, 1);
        // 290000 / 30 = 9666.67 → 9667
        assert_eq!(result.lines.prorated_rent.pesos(), 9_667);
        assert!(result.lines.prorated_rent.is_positive());
    }

    #[test]
    fn test_leap_february() {
        let result = quote(&unit(290_000), &input("2024-02-29"));
        assert_eq!(result.meta.days_in_month, 29);
        assert_eq!(result.lines.prorated_rent.pesos(), 10_000);
    }

    #[test]
    fn test_free_storage_and_credit_fee_passthrough() {
        let mut request = input("2024-04-16");
        request.options.storage_selected = true;
        request.options.storage_price = Some(0);
        request.options.credit_report_fee = 8_500;

        let result = quote(&unit(290_000), &request);

        assert_eq!(result.lines.storage_prorated, Money::zero());
        // Flat fee, not prorated
        assert_eq!(result.lines.credit_report_fee.pesos(), 8_500);
        assert_eq!(result.first_payment().pesos(), 602_500 + 8_500);
    }

    #[test]
    fn test_unselected_add_on_ignores_price() {
        let mut request = input("2024-04-01");
        request.options.parking_price = Some(50_000);

        let result = quote(&unit(290_000), &request);
        assert_eq!(result.totals.add_ons, Money::zero());
    }

    #[test]
    fn test_start_date_today_is_accepted_and_past_is_rejected() {
        assert!(try_quote(&unit(290_000), &input("2024-03-20")).is_ok());

        let err = quote_err(&unit(290_000), &input("2024-03-19"));
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DateInPast { .. })
        ));
    }

    #[test]
    fn test_invalid_start_date() {
        let err = quote_err(&unit(290_000), &input("2024-13-01"));
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        for price in [0, -290_000] {
            let err = quote_err(&unit(price), &input("2024-04-01"));
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::MustBePositive { .. })
            ));
        }
    }

    #[test]
    fn test_unavailable_unit_and_add_on() {
        let mut unavailable = unit(290_000);
        unavailable.available = false;
        let err = quote_err(&unavailable, &input("2024-04-01"));
        assert!(matches!(err, CoreError::UnitUnavailable(_)));

        let mut no_parking = unit(290_000);
        no_parking.parking_available = false;
        let mut request = input("2024-04-01");
        request.options.parking_selected = true;
        request.options.parking_price = Some(50_000);
        let err = compute_quotation(&no_parking, &request, PromotionContext::none(), today())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotAvailable { .. })
        ));
    }

    #[test]
    fn test_mismatched_unit_id() {
        let mut request = input("2024-04-01");
        request.unit_id = "u-999".to_string();

        let err = compute_quotation(&unit(290_000), &request, PromotionContext::none(), today())
            .unwrap_err();
        assert!(matches!(err, CoreError::UnitNotFound(ref id) if id == "u-999"));
    }

    #[test]
    fn test_discount_out_of_range() {
        let promotions = PromotionContext {
            has_free_commission: false,
            discount_percent: 120,
        };
        let err = compute_quotation(&unit(290_000), &input("2024-04-01"), promotions, today())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_custom_policy() {
        // 33% guarantee, no commission
        let engine = PricingEngine::new(PricingPolicy::new(3_300, 0).unwrap());
        let result = engine
            .quote(&unit(290_000), &input("2024-04-01"), PromotionContext::none(), today())
            .unwrap();

        assert_eq!(result.lines.guarantee_entry.pesos(), 95_700);
        assert_eq!(result.lines.commission, Money::zero());
        assert!(!result.flags.has_free_commission);
        assert!(PricingPolicy::new(10_001, 0).is_err());
    }

    #[test]
    fn test_verify_catches_drift() {
        let mut result = quote(&unit(290_000), &input("2024-04-16"));
        result.totals.first_payment = result.totals.first_payment + Money::from_pesos(1);

        let err = result.verify().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Computation { line: "firstPayment", .. }
        ));
    }

    #[test]
    fn test_huge_request_amounts_are_rejected() {
        let mut fee = input("2024-04-01");
        fee.options.credit_report_fee = i64::MAX;
        let err = quote_err(&unit(290_000), &fee);
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. })
                if field == "creditReportFee"
        ));

        let mut parking = input("2024-04-01");
        parking.options.parking_selected = true;
        parking.options.parking_price = Some(i64::MAX);
        let err = quote_err(&unit(290_000), &parking);
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. })
                if field == "parkingPrice"
        ));

        let err = quote_err(&unit(i64::MAX), &input("2024-04-01"));
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "price"
        ));
    }

    #[test]
    fn test_largest_accepted_amounts_still_add_up() {
        let mut big = unit(MAX_AMOUNT);
        big.common_expenses = Money::from_pesos(MAX_AMOUNT);
        let mut request = input("2024-04-01");
        request.options.parking_selected = true;
        request.options.parking_price = Some(MAX_AMOUNT);
        request.options.storage_selected = true;
        request.options.storage_price = Some(MAX_AMOUNT);
        request.options.credit_report_fee = MAX_AMOUNT;

        let result = quote(&big, &request);

        // rent + parking + storage + gc + guarantee + fee + half-month commission
        assert_eq!(result.first_payment().pesos(), MAX_AMOUNT * 6 + MAX_AMOUNT / 2);
        assert!(result.verify().is_ok());
    }

    #[test]
    fn test_verify_rejects_overflowing_or_negative_totals() {
        let mut result = quote(&unit(290_000), &input("2024-04-01"));
        result.lines.credit_report_fee = Money::from_pesos(i64::MAX);
        assert!(matches!(
            result.verify().unwrap_err(),
            CoreError::Computation { line: "firstPayment", .. }
        ));

        let mut result = quote(&unit(290_000), &input("2024-04-01"));
        result.totals.first_payment = Money::from_pesos(-725_000);
        assert!(matches!(
            result.verify().unwrap_err(),
            CoreError::Computation { line: "firstPayment", .. }
        ));
    }

    #[test]
    fn test_json_contract() {
        let mut request = input("2024-04-16");
        request.options.parking_selected = true;
        request.options.parking_price = Some(50_000);
        let json = serde_json::to_value(quote(&unit(290_000), &request)).unwrap();

        assert_eq!(json["meta"]["startDate"], "2024-04-16");
        assert_eq!(json["meta"]["daysCharged"], 15);
        assert_eq!(json["lines"]["proratedRent"], 145_000);
        assert_eq!(json["lines"]["gcProrated"], 22_500);
        assert_eq!(json["lines"]["parkingProrated"], 25_000);
        assert_eq!(json["flags"]["hasFreeCommission"], false);
        assert_eq!(json["totals"]["firstPayment"], 627_500);
    }

    #[test]
    fn test_request_json_parses() {
        let request: QuotationInput = serde_json::from_str(
            r#"{
                "unitId": "u-101",
                "startDate": "2024-04-16",
                "options": { "parkingSelected": true, "parkingPrice": 50000, "creditReportFee": 0 }
            }"#,
        )
        .unwrap();

        assert!(request.options.parking_selected);
        assert!(!request.options.storage_selected);
        assert_eq!(request.options.parking_price, Some(50_000));
        assert_eq!(request.options.storage_price, None);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (2000i32..=2099, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
            let d = d.min(days_in_month(y, m));
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        })
    }

    fn past() -> NaiveDate {
        NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()
    }

    #[test]
    fn prop_quotation_invariants() {
        proptest!(|(
            date in any_date(),
            price in 1i64..=20_000_000,
            common in 0i64..=1_000_000,
            parking in proptest::option::of(0i64..=500_000),
            storage in proptest::option::of(0i64..=500_000),
            fee in 0i64..=100_000,
            free in any::<bool>(),
            discount in 0u32..=100,
        )| {
            let mut u = unit(price);
            u.common_expenses = Money::from_pesos(common);
            let request = QuotationInput {
                unit_id: "u-101".to_string(),
                start_date: date.format("%Y-%m-%d").to_string(),
                options: QuotationOptions {
                    parking_selected: parking.is_some(),
                    storage_selected: storage.is_some(),
                    parking_price: parking,
                    storage_price: storage,
                    credit_report_fee: fee,
                },
            };
            let promotions = PromotionContext::new(free, discount).unwrap();

            let result = compute_quotation(&u, &request, promotions, past()).unwrap();
            let lines = &result.lines;

            prop_assert!(result.meta.days_charged >= 1);
            prop_assert!(result.meta.days_charged <= result.meta.days_in_month);
            prop_assert_eq!(result.totals.first_payment, lines.charged_total().unwrap());
            prop_assert_eq!(
                result.totals.first_payment,
                lines.net_rent + result.totals.add_ons + lines.gc_prorated
                    + lines.guarantee_entry + lines.credit_report_fee + lines.commission
            );
            prop_assert!(lines.discount_promo <= lines.prorated_rent);
            prop_assert_eq!(lines.guarantee_entry, Money::from_pesos(price));
            if free {
                prop_assert!(lines.commission.is_zero());
            } else {
                prop_assert!(lines.commission.is_positive());
            }

            // Same inputs, same bytes
            let again = compute_quotation(&u, &request, promotions, past()).unwrap();
            prop_assert_eq!(
                serde_json::to_string(&result).unwrap(),
                serde_json::to_string(&again).unwrap()
            );
        });
    }

    #[test]
    fn prop_first_of_month_is_not_prorated() {
        proptest!(|(
            year in 2000i32..=2099,
            month in 1u32..=12,
            price in 1i64..=20_000_000,
        )| {
            let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let request = input(&date.format("%Y-%m-%d").to_string());

            let result =
                compute_quotation(&unit(price), &request, PromotionContext::none(), past())
                    .unwrap();

            prop_assert_eq!(result.meta.days_charged, result.meta.days_in_month);
            prop_assert_eq!(result.lines.prorated_rent, result.lines.base_monthly);
            prop_assert_eq!(result.lines.gc_prorated, Money::from_pesos(45_000));
        });
    }
}
