//! Ingredient value objects.
//!
//! An [`Ingredient`] is a catalog entry supplied by an external collaborator
//! (see `application::ports::IngredientCatalog`); this module treats it as an
//! immutable identity. A [`FlexibleIngredient`] wraps one with an amount that
//! is either fixed or chosen within a range.
//!
//! ## Design Decisions
//!
//! ### Fixed XOR Ranged
//!
//! The two amount modes are an enum, not two optional fields. A struct with
//! `fixed: Option<f64>` and `range: Option<AmountRange>` would admit the
//! invalid states (both set, neither set) that the enum rules out at the type
//! level.
//!
//! ### Immutability
//!
//! Every transformation (`scale`) returns a new value. Domain consumers never
//! observe a mutated ingredient.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::error::DomainError;

/// A catalog ingredient: identity, display unit, icon.
///
/// Identity is the `id` alone — two entries with the same id are the same
/// ingredient even if display fields drifted apart between catalog versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Stable catalog key (e.g., "flour").
    pub id: String,
    /// Display name (e.g., "Flour").
    pub name: String,
    /// Display unit (e.g., "cups").
    pub unit: String,
    /// Display icon (e.g., an emoji).
    pub icon: String,
}

impl Ingredient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            icon: icon.into(),
        }
    }
}

impl PartialEq for Ingredient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ingredient {}

impl Hash for Ingredient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.unit)
    }
}

/// A choosable amount window for a ranged ingredient.
///
/// ## Invariants (enforced by [`AmountRange::new`])
///
/// 1. `0 <= min < max`
/// 2. `recommended` lies in `[min, max]` (defaults to the midpoint)
/// 3. `step > 0` (defaults to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
    pub recommended: f64,
    pub step: f64,
}

impl AmountRange {
    /// Build a validated range.
    ///
    /// A `recommended` outside `[min, max]` is clamped rather than rejected;
    /// only a malformed window (`min >= max`, `min < 0`) or a non-positive
    /// `step` fails.
    pub fn new(
        min: f64,
        max: f64,
        recommended: Option<f64>,
        step: Option<f64>,
    ) -> Result<Self, DomainError> {
        if min >= max || min < 0.0 {
            return Err(DomainError::InvalidAmountRange { min, max });
        }

        let step = step.unwrap_or(1.0);
        if step <= 0.0 {
            return Err(DomainError::NonPositive {
                field: "step",
                value: step,
            });
        }

        let recommended = recommended
            .unwrap_or_else(|| (min + max) / 2.0)
            .clamp(min, max);

        Ok(Self {
            min,
            max,
            recommended,
            step,
        })
    }

    /// Clamp a requested amount into the window.
    pub fn clamp_amount(&self, requested: f64) -> f64 {
        requested.clamp(self.min, self.max)
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// Multiply every bound (including `step`) by `factor`.
    ///
    /// Callers validate the factor; with `factor > 0` the result trivially
    /// satisfies the range invariants again.
    fn scale(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
            recommended: self.recommended * factor,
            step: self.step * factor,
        }
    }
}

/// The amount mode of a [`FlexibleIngredient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Amount {
    /// Single, non-negotiable quantity.
    Fixed(f64),
    /// Quantity chosen within a window, defaulting to `recommended`.
    Ranged(AmountRange),
}

/// An ingredient bound to a recipe step with a fixed or ranged amount.
///
/// Immutable value: `scale` returns a new instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleIngredient {
    ingredient: Ingredient,
    amount: Amount,
    description: Option<String>,
}

impl FlexibleIngredient {
    /// Fixed-amount binding. The amount must not be negative.
    pub fn fixed(ingredient: Ingredient, amount: f64) -> Result<Self, DomainError> {
        if amount < 0.0 {
            return Err(DomainError::Negative {
                field: "fixed amount",
                value: amount,
            });
        }
        Ok(Self {
            ingredient,
            amount: Amount::Fixed(amount),
            description: None,
        })
    }

    /// Ranged binding. The range was already validated by [`AmountRange::new`].
    pub fn ranged(ingredient: Ingredient, range: AmountRange) -> Self {
        Self {
            ingredient,
            amount: Amount::Ranged(range),
            description: None,
        }
    }

    /// Attach a free-form description (e.g., "sifted").
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn ingredient(&self) -> &Ingredient {
        &self.ingredient
    }

    pub fn id(&self) -> &str {
        &self.ingredient.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.amount, Amount::Fixed(_))
    }

    /// The underlying range, if this is a ranged binding.
    pub fn range(&self) -> Option<&AmountRange> {
        match &self.amount {
            Amount::Ranged(r) => Some(r),
            Amount::Fixed(_) => None,
        }
    }

    /// Resolve a concrete amount.
    ///
    /// Fixed mode ignores `requested` entirely. Ranged mode returns
    /// `recommended` when no request is given, otherwise clamps the request
    /// into `[min, max]`.
    pub fn amount(&self, requested: Option<f64>) -> f64 {
        match &self.amount {
            Amount::Fixed(v) => *v,
            Amount::Ranged(r) => match requested {
                Some(req) => r.clamp_amount(req),
                None => r.recommended,
            },
        }
    }

    /// Whether `candidate` is an acceptable amount for this binding.
    ///
    /// Fixed mode requires exact equality; ranged mode requires membership
    /// in `[min, max]`.
    pub fn is_valid_amount(&self, candidate: f64) -> bool {
        match &self.amount {
            Amount::Fixed(v) => *v == candidate,
            Amount::Ranged(r) => r.contains(candidate),
        }
    }

    /// Return a new binding with all amounts multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> Result<Self, DomainError> {
        if !(factor > 0.0) {
            return Err(DomainError::InvalidScaleFactor { factor });
        }
        let amount = match &self.amount {
            Amount::Fixed(v) => Amount::Fixed(v * factor),
            Amount::Ranged(r) => Amount::Ranged(r.scale(factor)),
        };
        Ok(Self {
            ingredient: self.ingredient.clone(),
            amount,
            description: self.description.clone(),
        })
    }

    /// Human-readable `"<amount> <unit> <name>"` form used by instruction
    /// substitution, with an optional per-call amount override.
    pub fn display_amount(&self, requested: Option<f64>) -> String {
        format!(
            "{} {} {}",
            format_amount(self.amount(requested)),
            self.ingredient.unit,
            self.ingredient.name
        )
    }
}

/// Render an amount without a trailing `.0` for integral values.
///
/// `2.0` reads as "2 cups", not "2.0 cups"; non-integral amounts keep the
/// default float rendering.
pub(crate) fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
