//! Recipe steps: the ordered unit of work in a recipe.
//!
//! A [`RecipeStep`] carries instruction strings with placeholder tokens,
//! individually attached ingredients, named ingredient groups, and free-form
//! parameters. Three token families share the `{...}` syntax:
//!
//! | Token              | Resolved from                  |
//! |--------------------|--------------------------------|
//! | `{paramKey}`       | [`StepParameters`]             |
//! | `{group:<name>}`   | [`IngredientGroup`] members    |
//! | `{ingredientId}`   | individually attached ingredients |
//!
//! Substitution runs in **three independent passes, in that fixed order**,
//! each pass scanning the whole string. When a parameter key happens to equal
//! an ingredient id the parameter wins by pass order — an accident of
//! ordering inherited from the reference behavior, not a deliberate rule.
//! Tokens matching nothing are left as literal text.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::group::IngredientGroup;
use crate::domain::entities::ingredient::{FlexibleIngredient, format_amount};
use crate::domain::error::DomainError;

/// What kind of work a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Preparation,
    Baking,
    Cooling,
    Assembly,
    Decoration,
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Preparation => "preparation",
            Self::Baking => "baking",
            Self::Cooling => "cooling",
            Self::Assembly => "assembly",
            Self::Decoration => "decoration",
        };
        write!(f, "{s}")
    }
}

/// A parameter value: numeric or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_amount(*n)),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Open map of named step parameters.
///
/// Two keys have defined semantics: `temp` is purely descriptive and never
/// scaled; `time` scales proportionally with the recipe (rounded to the
/// nearest integer). Every other key is an opaque pass-through value
/// substituted verbatim into instruction text.
///
/// Backed by a `BTreeMap` so substitution order is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepParameters(BTreeMap<String, ParamValue>);

impl StepParameters {
    pub const TEMP: &'static str = "temp";
    pub const TIME: &'static str = "time";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn time(&self) -> Option<f64> {
        self.get(Self::TIME).and_then(ParamValue::as_number)
    }

    pub fn temp(&self) -> Option<&ParamValue> {
        self.get(Self::TEMP)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return new parameters with `time` rescaled; everything else (including
    /// `temp`) passes through unchanged.
    fn scale_time(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        if let Some(t) = self.time() {
            scaled
                .0
                .insert(Self::TIME.into(), ParamValue::Number((t * factor).round()));
        }
        scaled
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for StepParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Per-ingredient amount overrides, keyed by ingredient id.
pub type CustomAmounts = HashMap<String, f64>;

/// One ordered unit of work in a recipe.
///
/// Immutable: `scale` and `with_order` return new steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    id: String,
    name: String,
    description: String,
    order: u32,
    step_type: StepType,
    instructions: Vec<String>,
    ingredients: Vec<FlexibleIngredient>,
    groups: Vec<IngredientGroup>,
    parameters: StepParameters,
    estimated_time: Option<f64>,
    temperature: Option<f64>,
}

impl RecipeStep {
    /// Start the builder pattern for fluent construction.
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
        step_type: StepType,
    ) -> RecipeStepBuilder {
        RecipeStepBuilder::new(id, name, step_type)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn ingredients(&self) -> &[FlexibleIngredient] {
        &self.ingredients
    }

    pub fn groups(&self) -> &[IngredientGroup] {
        &self.groups
    }

    pub fn parameters(&self) -> &StepParameters {
        &self.parameters
    }

    pub fn estimated_time(&self) -> Option<f64> {
        self.estimated_time
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Return a copy with a different `order`.
    ///
    /// Step factories hand out provisional orders; the caller assembling a
    /// recipe overwrites them so the whole sequence is contiguous from 1.
    pub fn with_order(&self, order: u32) -> Self {
        let mut step = self.clone();
        step.order = order;
        step
    }

    // ── Substitution ──────────────────────────────────────────────────────

    /// Render each instruction with all placeholder tokens substituted.
    ///
    /// Three passes over every string, in fixed order:
    ///
    /// 1. Parameters — `{temp}` and `{time}` first (when present), then the
    ///    remaining keys, each replaced with the value's string form.
    /// 2. Groups — `{group:<name>}` becomes the comma-joined
    ///    `"<amount> <unit> <name>"` list of the group's members.
    /// 3. Individual ingredients — `{<ingredientId>}` becomes that
    ///    ingredient's `"<amount> <unit> <name>"` form.
    ///
    /// Amounts honor `custom_amounts` overrides by ingredient id, falling
    /// back to each binding's default resolution. Unmatched tokens remain in
    /// the output verbatim.
    pub fn formatted_instructions(&self, custom_amounts: Option<&CustomAmounts>) -> Vec<String> {
        self.instructions
            .iter()
            .map(|instruction| self.substitute(instruction, custom_amounts))
            .collect()
    }

    fn substitute(&self, instruction: &str, custom_amounts: Option<&CustomAmounts>) -> String {
        let mut text = instruction.to_string();

        // Pass 1: parameters, temp/time before the rest.
        for key in [StepParameters::TEMP, StepParameters::TIME] {
            if let Some(value) = self.parameters.get(key) {
                text = text.replace(&format!("{{{key}}}"), &value.to_string());
            }
        }
        for (key, value) in self.parameters.iter() {
            if key == StepParameters::TEMP || key == StepParameters::TIME {
                continue;
            }
            text = text.replace(&format!("{{{key}}}"), &value.to_string());
        }

        // Pass 2: group tokens.
        for group in &self.groups {
            let token = format!("{{group:{}}}", group.name());
            if !text.contains(&token) {
                continue;
            }
            let joined = group
                .ingredients()
                .iter()
                .map(|fi| fi.display_amount(requested_for(fi, custom_amounts)))
                .collect::<Vec<_>>()
                .join(", ");
            text = text.replace(&token, &joined);
        }

        // Pass 3: individual ingredient tokens.
        for fi in &self.ingredients {
            let token = format!("{{{}}}", fi.id());
            text = text.replace(&token, &fi.display_amount(requested_for(fi, custom_amounts)));
        }

        text
    }

    // ── Scaling ───────────────────────────────────────────────────────────

    /// Return a new step with every owned ingredient (individual and
    /// grouped) scaled by `factor` and the `time` parameter recomputed as
    /// `round(time * factor)`.
    pub fn scale(&self, factor: f64) -> Result<Self, DomainError> {
        if !(factor > 0.0) {
            return Err(DomainError::InvalidScaleFactor { factor });
        }

        let ingredients = self
            .ingredients
            .iter()
            .map(|fi| fi.scale(factor))
            .collect::<Result<Vec<_>, _>>()?;
        let groups = self
            .groups
            .iter()
            .map(|g| g.scale(factor))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            order: self.order,
            step_type: self.step_type,
            instructions: self.instructions.clone(),
            ingredients,
            groups,
            parameters: self.parameters.scale_time(factor),
            estimated_time: self.estimated_time,
            temperature: self.temperature,
        })
    }

    // ── Aggregation ───────────────────────────────────────────────────────

    /// Union of individually attached ingredients and every group's members.
    pub fn all_ingredients(&self) -> Vec<&FlexibleIngredient> {
        self.ingredients
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.ingredients().iter()))
            .collect()
    }

    /// Resolved amount per ingredient id across the whole step.
    ///
    /// The same id appearing both individually and in a group (or in two
    /// groups) is **summed**, not overwritten.
    pub fn ingredient_amounts(&self, custom_amounts: Option<&CustomAmounts>) -> HashMap<String, f64> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for fi in self.all_ingredients() {
            let amount = fi.amount(requested_for(fi, custom_amounts));
            *totals.entry(fi.id().to_string()).or_insert(0.0) += amount;
        }
        totals
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn group(&self, name: &str) -> Option<&IngredientGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.group(name).is_some()
    }

    /// First binding for `id`, searching individual ingredients then groups.
    pub fn ingredient(&self, id: &str) -> Option<&FlexibleIngredient> {
        self.all_ingredients().into_iter().find(|fi| fi.id() == id)
    }

    pub fn uses_ingredient(&self, id: &str) -> bool {
        self.ingredient(id).is_some()
    }
}

fn requested_for(fi: &FlexibleIngredient, custom: Option<&CustomAmounts>) -> Option<f64> {
    custom.and_then(|m| m.get(fi.id()).copied())
}

/// Builder for constructing steps with validation at `build()`.
pub struct RecipeStepBuilder {
    id: String,
    name: String,
    description: String,
    order: u32,
    step_type: StepType,
    instructions: Vec<String>,
    ingredients: Vec<FlexibleIngredient>,
    groups: Vec<IngredientGroup>,
    parameters: StepParameters,
    estimated_time: Option<f64>,
    temperature: Option<f64>,
}

impl RecipeStepBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>, step_type: StepType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            order: 0,
            step_type,
            instructions: Vec::new(),
            ingredients: Vec::new(),
            groups: Vec::new(),
            parameters: StepParameters::new(),
            estimated_time: None,
            temperature: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    pub fn instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn ingredient(mut self, ingredient: FlexibleIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn group(mut self, group: IngredientGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn parameters(mut self, parameters: StepParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters = self.parameters.with(key, value);
        self
    }

    pub fn estimated_time(mut self, minutes: f64) -> Self {
        self.estimated_time = Some(minutes);
        self
    }

    pub fn temperature(mut self, degrees: f64) -> Self {
        self.temperature = Some(degrees);
        self
    }

    /// Consume the builder and construct a validated [`RecipeStep`].
    ///
    /// # Errors
    ///
    /// - `EmptyField` if id or name is blank
    /// - `MissingInstructions` if no instruction string was provided
    /// - `Negative` if `estimated_time` is negative
    /// - `DuplicateGroup` if two groups share a name
    pub fn build(self) -> Result<RecipeStep, DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "step id" });
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "step name" });
        }
        if self.instructions.is_empty() {
            return Err(DomainError::MissingInstructions { step_id: self.id });
        }
        if let Some(t) = self.estimated_time {
            if t < 0.0 {
                return Err(DomainError::Negative {
                    field: "estimated_time",
                    value: t,
                });
            }
        }

        let mut seen = std::collections::HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.name().to_string()) {
                return Err(DomainError::DuplicateGroup {
                    name: group.name().to_string(),
                    step_id: self.id,
                });
            }
        }

        Ok(RecipeStep {
            id: self.id,
            name: self.name,
            description: self.description,
            order: self.order,
            step_type: self.step_type,
            instructions: self.instructions,
            ingredients: self.ingredients,
            groups: self.groups,
            parameters: self.parameters,
            estimated_time: self.estimated_time,
            temperature: self.temperature,
        })
    }
}
