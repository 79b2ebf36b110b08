//! # Promotion Module
//!
//! Turns listing badges into the two numbers the pricing engine understands.
//!
//! ## Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Building badges                      PromotionContext                  │
//! │  ───────────────                      ────────────────                  │
//! │  { free_commission, "Comisión 0" } ─► has_free_commission = true        │
//! │  { discount, "30% dcto", - }       ─┐                                   │
//! │  { discount, "Oferta", 50 }        ─┴► discount_percent = 50 (max wins) │
//! │  { other, "Pet friendly" }         ─► ignored                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never sees badges; it only receives a `PromotionContext`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_discount_percent, ValidationResult};

// =============================================================================
// Badges
// =============================================================================

/// Kind of promotion badge attached to a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BadgeKind {
    /// Brokerage commission waived for the tenant.
    FreeCommission,
    /// Percentage off the first month's rent.
    Discount,
    /// Anything else ("Pet friendly", "Nuevo"). Not a pricing promotion.
    #[serde(other)]
    Other,
}

/// A badge as stored with the building and shown on the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromotionBadge {
    pub kind: BadgeKind,
    pub label: String,
    /// Discount percentage. When absent, the percent is read from the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl PromotionBadge {
    /// Creates a badge without an explicit value.
    pub fn new(kind: BadgeKind, label: impl Into<String>) -> Self {
        PromotionBadge {
            kind,
            label: label.into(),
            value: None,
        }
    }

    /// Creates a discount badge with an explicit percentage.
    pub fn discount(label: impl Into<String>, percent: u32) -> Self {
        PromotionBadge {
            kind: BadgeKind::Discount,
            label: label.into(),
            value: Some(percent),
        }
    }

    /// Percentage carried by a discount badge, explicit value first.
    fn discount_percent(&self) -> Option<u32> {
        self.value.or_else(|| percent_in_label(&self.label))
    }
}

/// Reads the number right before the first `%` in a label ("30% dcto" → 30).
fn percent_in_label(label: &str) -> Option<u32> {
    let idx = label.find('%')?;
    let before = label[..idx].trim_end();
    let digits: Vec<char> = before
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.into_iter().rev().collect::<String>().parse().ok()
}

// =============================================================================
// Promotion Context
// =============================================================================

/// Active promotions for one quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionContext {
    pub has_free_commission: bool,
    /// 0..=100, applied to prorated rent only.
    pub discount_percent: u32,
}

impl PromotionContext {
    /// No promotion: commission charged, no discount.
    pub const fn none() -> Self {
        PromotionContext {
            has_free_commission: false,
            discount_percent: 0,
        }
    }

    /// Creates a validated context.
    pub fn new(has_free_commission: bool, discount_percent: u32) -> ValidationResult<Self> {
        validate_discount_percent(discount_percent)?;
        Ok(PromotionContext {
            has_free_commission,
            discount_percent,
        })
    }

    /// Normalizes building badges.
    ///
    /// ## Rules
    /// - Any `FreeCommission` badge sets `has_free_commission`
    /// - Discount badges do not stack: the largest percentage wins
    /// - A discount badge whose percentage cannot be determined, or exceeds
    ///   100, is rejected rather than silently ignored
    ///
    /// ## Example
    /// ```rust
    /// use arriendo_core::promotion::{BadgeKind, PromotionBadge, PromotionContext};
    ///
    /// let badges = vec![
    ///     PromotionBadge::new(BadgeKind::Discount, "20% dcto"),
    ///     PromotionBadge::discount("Oferta", 50),
    /// ];
    /// let ctx = PromotionContext::from_badges(&badges).unwrap();
    /// assert_eq!(ctx.discount_percent, 50);
    /// assert!(!ctx.has_free_commission);
    /// ```
    pub fn from_badges<'a, I>(badges: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = &'a PromotionBadge>,
    {
        let mut context = PromotionContext::none();

        for badge in badges {
            match badge.kind {
                BadgeKind::FreeCommission => context.has_free_commission = true,
                BadgeKind::Discount => {
                    let percent =
                        badge
                            .discount_percent()
                            .ok_or_else(|| ValidationError::Required {
                                field: "badge.value".to_string(),
                            })?;
                    validate_discount_percent(percent)?;
                    context.discount_percent = context.discount_percent.max(percent);
                }
                BadgeKind::Other => {}
            }
        }

        Ok(context)
    }

    /// True when neither promotion applies.
    pub fn is_none(&self) -> bool {
        !self.has_free_commission && self.discount_percent == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_badges_is_no_promotion() {
        let ctx = PromotionContext::from_badges(&Vec::<PromotionBadge>::new()).unwrap();
        assert_eq!(ctx, PromotionContext::none());
        assert!(ctx.is_none());
    }

    #[test]
    fn test_free_commission_badge() {
        let badges = [PromotionBadge::new(BadgeKind::FreeCommission, "Comisión gratis")];
        let ctx = PromotionContext::from_badges(&badges).unwrap();
        assert!(ctx.has_free_commission);
        assert_eq!(ctx.discount_percent, 0);
    }

    #[test]
    fn test_discount_from_label() {
        assert_eq!(percent_in_label("50% dcto"), Some(50));
        assert_eq!(percent_in_label("Hasta 30 % en arriendo"), Some(30));
        assert_eq!(percent_in_label("Descuento especial"), None);
        assert_eq!(percent_in_label("% off"), None);
    }

    #[test]
    fn test_discounts_do_not_stack() {
        let badges = [
            PromotionBadge::discount("10% dcto", 10),
            PromotionBadge::new(BadgeKind::Discount, "25% primer mes"),
            PromotionBadge::new(BadgeKind::Other, "Pet friendly"),
        ];
        let ctx = PromotionContext::from_badges(&badges).unwrap();
        assert_eq!(ctx.discount_percent, 25);
    }

    #[test]
    fn test_unresolvable_discount_is_rejected() {
        let badges = [PromotionBadge::new(BadgeKind::Discount, "Gran descuento")];
        let err = PromotionContext::from_badges(&badges).unwrap_err();
        assert_eq!(err.reason(), "REQUIRED");
    }

    #[test]
    fn test_discount_over_100_is_rejected() {
        let badges = [PromotionBadge::discount("Error de carga", 150)];
        let err = PromotionContext::from_badges(&badges).unwrap_err();
        assert_eq!(err.reason(), "OUT_OF_RANGE");
        assert!(PromotionContext::new(false, 101).is_err());
        assert!(PromotionContext::new(true, 100).is_ok());
    }

    #[test]
    fn test_unknown_badge_kind_deserializes_as_other() {
        let badge: PromotionBadge =
            serde_json::from_str(r#"{"kind":"new_building","label":"Estreno"}"#).unwrap();
        assert_eq!(badge.kind, BadgeKind::Other);
        assert_eq!(badge.value, None);

        let badge: PromotionBadge =
            serde_json::from_str(r#"{"kind":"discount","label":"Oferta","value":15}"#).unwrap();
        assert_eq!(badge.discount_percent(), Some(15));
    }
}
