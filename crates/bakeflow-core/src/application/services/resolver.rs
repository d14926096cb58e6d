//! Template resolver - config-driven recipe builder.
//!
//! This service materializes [`MultiStepRecipe`] values from declarative
//! documents: named step templates plus per-recipe step configs fetched
//! through the [`RecipeSource`] port. It owns the load lifecycle and the
//! partial-failure isolation of bulk loading.
//!
//! ## Lifecycle
//!
//! `Uninitialized → Loading → Ready`, with a failed load leaving the
//! resolver re-enterable. The `Loading` state is not a stored variant: the
//! resolver's state lives behind one `tokio::sync::Mutex`, and the load runs
//! while that lock is held. A second `initialize()` arriving mid-load parks
//! on the mutex, and on waking observes `Ready` — so concurrent callers
//! share a single underlying fetch instead of racing two. (Re-checking a
//! plain boolean flag before an awaited fetch would admit exactly that
//! race.)
//!
//! ## Partial failure
//!
//! A recipe config that fails assembly (unknown template, missing required
//! parameter, invalid range, ...) is logged and excluded; the remaining
//! configs continue loading. Only a failure of the initial
//! `fetch_recipes()` call propagates out of `initialize()`, leaving the
//! state `Uninitialized` so a retry or [`TemplateResolver::reload`] can
//! re-enter.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{IngredientCatalog, RecipeSource};
use crate::domain::{
    GroupSpec, Ingredient, IngredientGroup, MultiStepRecipe, ParamValue, RecipeConfig, RecipeStep,
    StepConfig, StepParameters,
};
use crate::error::BakeflowResult;

enum ResolverState {
    Uninitialized,
    /// Resolved recipes in source-config order.
    Ready(Vec<MultiStepRecipe>),
}

/// Config-driven recipe builder with a cached, lazily loaded recipe set.
///
/// Constructed once and passed by reference to consumers (dependency
/// injection); the resolved-recipe cache is owned exclusively by this
/// instance and only read through accessor methods. Returned recipes are
/// immutable value trees, safe to hand out by clone.
pub struct TemplateResolver {
    source: Arc<dyn RecipeSource>,
    catalog: Arc<dyn IngredientCatalog>,
    /// Static starter catalog consulted when `catalog` misses an id.
    fallback: Arc<dyn IngredientCatalog>,
    state: Mutex<ResolverState>,
}

impl TemplateResolver {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        catalog: Arc<dyn IngredientCatalog>,
        fallback: Arc<dyn IngredientCatalog>,
    ) -> Self {
        Self {
            source,
            catalog,
            fallback,
            state: Mutex::new(ResolverState::Uninitialized),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Load and resolve all recipes from the source.
    ///
    /// Idempotent: a call while `Ready` is a no-op, and a call while a load
    /// is in flight awaits that load rather than starting a second fetch.
    ///
    /// # Errors
    ///
    /// Only an outright failure of the source's recipe fetch; individual
    /// recipe assembly failures are logged and excluded instead.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> BakeflowResult<()> {
        let mut state = self.state.lock().await;
        self.load_locked(&mut state).await
    }

    /// Clear all resolved recipes, reset the lifecycle, clear the source's
    /// cache, and load again from scratch.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> BakeflowResult<()> {
        let mut state = self.state.lock().await;
        *state = ResolverState::Uninitialized;
        self.source.clear_cache().await;
        info!("Resolver reset; reloading recipe set");
        self.load_locked(&mut state).await
    }

    /// The actual load, run while the state lock is held.
    async fn load_locked(&self, state: &mut ResolverState) -> BakeflowResult<()> {
        if matches!(state, ResolverState::Ready(_)) {
            return Ok(());
        }

        let configs = self.source.fetch_recipes().await?;
        debug!(count = configs.len(), "Fetched recipe configs");

        let mut recipes = Vec::with_capacity(configs.len());
        for config in &configs {
            match self.resolve_config(config).await {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => {
                    let failure = ApplicationError::RecipeBuild {
                        recipe_id: config.id.clone(),
                        reason: e.to_string(),
                    };
                    warn!(recipe_id = %config.id, error = %failure, "Excluding recipe from load");
                }
            }
        }

        info!(
            loaded = recipes.len(),
            skipped = configs.len() - recipes.len(),
            "Recipe set ready"
        );
        *state = ResolverState::Ready(recipes);
        Ok(())
    }

    // ── Read accessors (initialize on first use) ──────────────────────────

    /// A resolved recipe by id, if it loaded successfully.
    pub async fn recipe(&self, id: &str) -> BakeflowResult<Option<MultiStepRecipe>> {
        let mut state = self.state.lock().await;
        self.load_locked(&mut state).await?;
        let ResolverState::Ready(recipes) = &*state else {
            unreachable!("load_locked leaves the state Ready on success");
        };
        Ok(recipes.iter().find(|r| r.id() == id).cloned())
    }

    /// All resolved recipes, in source-config order.
    pub async fn all_recipes(&self) -> BakeflowResult<Vec<MultiStepRecipe>> {
        let mut state = self.state.lock().await;
        self.load_locked(&mut state).await?;
        let ResolverState::Ready(recipes) = &*state else {
            unreachable!("load_locked leaves the state Ready on success");
        };
        Ok(recipes.clone())
    }

    pub async fn has_recipe(&self, id: &str) -> BakeflowResult<bool> {
        Ok(self.recipe(id).await?.is_some())
    }

    pub async fn recipe_ids(&self) -> BakeflowResult<Vec<String>> {
        Ok(self
            .all_recipes()
            .await?
            .iter()
            .map(|r| r.id().to_string())
            .collect())
    }

    // ── Single-recipe resolution ──────────────────────────────────────────

    /// Resolve one declarative recipe config into a domain recipe.
    ///
    /// Public so callers can assemble ad-hoc configs outside the bulk-loaded
    /// set; during bulk load every error from here is caught and the recipe
    /// excluded.
    pub async fn resolve_config(&self, config: &RecipeConfig) -> BakeflowResult<MultiStepRecipe> {
        let mut steps = Vec::with_capacity(config.steps.len());
        for (index, step_config) in config.steps.iter().enumerate() {
            // Step order is the config's position, overriding anything the
            // template might imply.
            let order = index as u32 + 1;
            steps.push(self.resolve_step(config, step_config, order).await?);
        }

        let meta = &config.metadata;
        let mut builder = MultiStepRecipe::builder(&config.id, &meta.name)
            .description(&meta.description)
            .base_servings(meta.base_servings)
            .difficulty(meta.difficulty)
            .baking_time(meta.baking_time)
            .icon(&meta.icon)
            .tags(meta.tags.clone())
            .steps(steps);
        if let Some(level) = &meta.skill_level {
            builder = builder.skill_level(level);
        }

        // Contiguity re-validates here; always satisfied since orders were
        // assigned sequentially above.
        Ok(builder.build()?)
    }

    async fn resolve_step(
        &self,
        config: &RecipeConfig,
        step_config: &StepConfig,
        order: u32,
    ) -> BakeflowResult<RecipeStep> {
        let template = self
            .source
            .fetch_step_template(&step_config.template)
            .await?
            .ok_or_else(|| ApplicationError::TemplateNotFound {
                name: step_config.template.clone(),
            })?;

        // Merge parameters: step config overrides win.
        let mut merged = template.default_params.clone();
        merged.extend(step_config.params.clone());

        for required in &template.required_params {
            if !merged.contains_key(required) {
                return Err(ApplicationError::MissingRequiredParameter {
                    template: step_config.template.clone(),
                    param: required.clone(),
                }
                .into());
            }
        }

        // Custom instructions are a full replacement, never a merge.
        let instructions = step_config
            .custom_instructions
            .clone()
            .unwrap_or_else(|| template.instructions.clone());

        let mut builder = RecipeStep::builder(
            format!("{}-step-{order}", config.id),
            substitute_name(&template.name, &merged),
            template.step_type,
        )
        .order(order)
        .instructions(instructions)
        .parameters(merged.iter().map(|(k, v)| (k.clone(), v.clone())).collect());

        if let Some(description) = &template.description {
            builder = builder.description(description);
        }
        if let Some(minutes) = step_config.estimated_time {
            builder = builder.estimated_time(minutes);
        }
        if let Some(temp) = merged.get(StepParameters::TEMP).and_then(ParamValue::as_number) {
            builder = builder.temperature(temp);
        }

        for spec in &step_config.ingredients {
            let Some(ingredient) = self.lookup_ingredient(&spec.id) else {
                warn!(
                    ingredient_id = %spec.id,
                    step = %step_config.template,
                    "Ingredient not found in any catalog; skipping binding"
                );
                continue;
            };
            let mut bound = spec.amount.bind(ingredient)?;
            if let Some(description) = &spec.description {
                bound = bound.with_description(description);
            }
            builder = builder.ingredient(bound);
        }

        for group_spec in &step_config.ingredient_groups {
            if let Some(group) = self.resolve_group(group_spec)? {
                builder = builder.group(group);
            }
        }

        Ok(builder.build()?)
    }

    /// Bind a declared group; `None` drops a group with no resolvable
    /// members.
    fn resolve_group(&self, spec: &GroupSpec) -> BakeflowResult<Option<IngredientGroup>> {
        let mut members = Vec::with_capacity(spec.ingredients.len());
        for ingredient_spec in &spec.ingredients {
            let Some(ingredient) = self.lookup_ingredient(&ingredient_spec.id) else {
                warn!(
                    ingredient_id = %ingredient_spec.id,
                    group = %spec.name,
                    "Group member not found in any catalog; skipping"
                );
                continue;
            };
            let mut bound = ingredient_spec.amount.bind(ingredient)?;
            if let Some(description) = &ingredient_spec.description {
                bound = bound.with_description(description);
            }
            members.push(bound);
        }

        if members.is_empty() {
            warn!(group = %spec.name, "Group has no resolvable ingredients; dropping group");
            return Ok(None);
        }

        let mut group = IngredientGroup::new(&spec.name, members)?;
        if let Some(description) = &spec.description {
            group = group.with_description(description);
        }
        Ok(Some(group))
    }

    /// Live catalog first, static starter catalog as a fallback.
    fn lookup_ingredient(&self, id: &str) -> Option<Ingredient> {
        self.catalog.get(id).or_else(|| self.fallback.get(id))
    }
}

/// Replace `{key}` tokens in a template's name from the merged parameters.
///
/// Simple literal substitution, independent of the three-pass instruction
/// substitution on [`RecipeStep`].
fn substitute_name(name: &str, params: &BTreeMap<String, ParamValue>) -> String {
    let mut out = name.to_string();
    for (key, value) in params {
        out = out.replace(&format!("{{{key}}}"), &value.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::{IngredientCatalog, RecipeSource};
    use crate::domain::{
        AmountSpec, Difficulty, IngredientSpec, RecipeMetadata, StepTemplate, StepType,
    };
    use crate::error::BakeflowError;

    // ── Test doubles ──────────────────────────────────────────────────────

    struct TestCatalog {
        entries: HashMap<String, Ingredient>,
    }

    impl TestCatalog {
        fn with(entries: &[(&str, &str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                entries: entries
                    .iter()
                    .map(|(id, name, unit)| {
                        (id.to_string(), Ingredient::new(*id, *name, *unit, ""))
                    })
                    .collect(),
            })
        }

        fn empty() -> Arc<Self> {
            Self::with(&[])
        }
    }

    impl IngredientCatalog for TestCatalog {
        fn get(&self, id: &str) -> Option<Ingredient> {
            self.entries.get(id).cloned()
        }

        fn ids(&self) -> Vec<String> {
            self.entries.keys().cloned().collect()
        }
    }

    mockall::mock! {
        Catalog {}
        impl IngredientCatalog for Catalog {
            fn get(&self, id: &str) -> Option<Ingredient>;
            fn ids(&self) -> Vec<String>;
        }
    }

    struct TestSource {
        recipes: Vec<RecipeConfig>,
        templates: HashMap<String, StepTemplate>,
        fetches: AtomicUsize,
        cache_clears: AtomicUsize,
        fail_next_fetch: AtomicBool,
        fetch_delay: Option<Duration>,
    }

    impl TestSource {
        fn new(recipes: Vec<RecipeConfig>, templates: Vec<(&str, StepTemplate)>) -> Arc<Self> {
            Arc::new(Self {
                templates: templates
                    .into_iter()
                    .map(|(name, t)| (name.to_string(), t))
                    .collect(),
                recipes,
                fetches: AtomicUsize::new(0),
                cache_clears: AtomicUsize::new(0),
                fail_next_fetch: AtomicBool::new(false),
                fetch_delay: None,
            })
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecipeSource for TestSource {
        async fn fetch_recipes(&self) -> BakeflowResult<Vec<RecipeConfig>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.fetch_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_next_fetch.swap(false, Ordering::SeqCst) {
                return Err(ApplicationError::SourceFetch {
                    reason: "catalog unreachable".into(),
                }
                .into());
            }
            Ok(self.recipes.clone())
        }

        async fn fetch_step_template(&self, name: &str) -> BakeflowResult<Option<StepTemplate>> {
            Ok(self.templates.get(name).cloned())
        }

        async fn clear_cache(&self) {
            self.cache_clears.fetch_add(1, Ordering::SeqCst);
        }
    }

    // ── Fixtures ──────────────────────────────────────────────────────────

    fn bake_template() -> StepTemplate {
        StepTemplate {
            name: "Bake at {temp}°F".into(),
            description: Some("bake".into()),
            step_type: StepType::Baking,
            instructions: vec!["Bake at {temp}°F for {time} minutes".into()],
            default_params: BTreeMap::from([
                ("temp".to_string(), ParamValue::Number(375.0)),
                ("time".to_string(), ParamValue::Number(10.0)),
            ]),
            required_params: vec![],
        }
    }

    fn glaze_template() -> StepTemplate {
        StepTemplate {
            name: "Glaze".into(),
            description: Some("glaze".into()),
            step_type: StepType::Decoration,
            instructions: vec!["Brush on the {glaze} glaze".into()],
            default_params: BTreeMap::new(),
            required_params: vec!["glaze".into()],
        }
    }

    fn metadata(name: &str) -> RecipeMetadata {
        RecipeMetadata {
            name: name.into(),
            description: String::new(),
            base_servings: 4.0,
            difficulty: Difficulty::Easy,
            baking_time: 12.0,
            icon: String::new(),
            skill_level: None,
            tags: vec![],
        }
    }

    fn bake_step_config() -> StepConfig {
        StepConfig {
            template: "bake".into(),
            params: BTreeMap::from([("time".to_string(), ParamValue::Number(12.0))]),
            ingredients: vec![IngredientSpec {
                id: "flour".into(),
                amount: AmountSpec::Fixed(2.0),
                description: None,
            }],
            ingredient_groups: vec![],
            custom_instructions: None,
            estimated_time: Some(12.0),
        }
    }

    fn simple_config(id: &str) -> RecipeConfig {
        RecipeConfig {
            id: id.into(),
            metadata: metadata(id),
            steps: vec![bake_step_config()],
        }
    }

    fn resolver_with(
        source: Arc<TestSource>,
        catalog: Arc<TestCatalog>,
        fallback: Arc<TestCatalog>,
    ) -> TemplateResolver {
        TemplateResolver::new(source, catalog, fallback)
    }

    fn flour_catalog() -> Arc<TestCatalog> {
        TestCatalog::with(&[("flour", "Flour", "cups")])
    }

    // ── Resolution semantics ──────────────────────────────────────────────

    #[tokio::test]
    async fn merges_params_with_config_overrides_winning() {
        let source = TestSource::new(vec![simple_config("cookies")], vec![("bake", bake_template())]);
        let resolver = resolver_with(source, flour_catalog(), TestCatalog::empty());

        let recipe = resolver.recipe("cookies").await.unwrap().unwrap();
        let step = &recipe.steps()[0];

        assert_eq!(step.parameters().time(), Some(12.0));
        assert_eq!(
            step.formatted_instructions(None),
            vec!["Bake at 375°F for 12 minutes"]
        );
        // Template name tokens resolve from the merged params too.
        assert_eq!(step.name(), "Bake at 375°F");
        assert_eq!(step.order(), 1);
        assert_eq!(step.temperature(), Some(375.0));
    }

    #[tokio::test]
    async fn missing_required_parameter_fails_assembly() {
        let config = RecipeConfig {
            id: "glazed".into(),
            metadata: metadata("glazed"),
            steps: vec![StepConfig {
                template: "glaze".into(),
                params: BTreeMap::new(),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: None,
            }],
        };
        let source = TestSource::new(vec![config.clone()], vec![("glaze", glaze_template())]);
        let resolver = resolver_with(source, TestCatalog::empty(), TestCatalog::empty());

        let err = resolver.resolve_config(&config).await.unwrap_err();
        assert!(matches!(
            err,
            BakeflowError::Application(ApplicationError::MissingRequiredParameter { .. })
        ));
    }

    #[tokio::test]
    async fn required_parameter_satisfied_by_override() {
        let config = RecipeConfig {
            id: "glazed".into(),
            metadata: metadata("glazed"),
            steps: vec![StepConfig {
                template: "glaze".into(),
                params: BTreeMap::from([(
                    "glaze".to_string(),
                    ParamValue::Text("lemon".into()),
                )]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: None,
            }],
        };
        let source = TestSource::new(vec![config.clone()], vec![("glaze", glaze_template())]);
        let resolver = resolver_with(source, TestCatalog::empty(), TestCatalog::empty());

        let recipe = resolver.resolve_config(&config).await.unwrap();
        assert_eq!(
            recipe.steps()[0].formatted_instructions(None),
            vec!["Brush on the lemon glaze"]
        );
    }

    #[tokio::test]
    async fn unknown_template_fails_assembly() {
        let config = RecipeConfig {
            id: "mystery".into(),
            metadata: metadata("mystery"),
            steps: vec![StepConfig {
                template: "does-not-exist".into(),
                params: BTreeMap::new(),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: None,
            }],
        };
        let source = TestSource::new(vec![config.clone()], vec![("bake", bake_template())]);
        let resolver = resolver_with(source, TestCatalog::empty(), TestCatalog::empty());

        let err = resolver.resolve_config(&config).await.unwrap_err();
        assert!(matches!(
            err,
            BakeflowError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn custom_instructions_replace_template_instructions_entirely() {
        let mut config = simple_config("cookies");
        config.steps[0].custom_instructions =
            Some(vec!["Bake until golden, about {time} minutes".into()]);
        let source = TestSource::new(vec![config.clone()], vec![("bake", bake_template())]);
        let resolver = resolver_with(source, flour_catalog(), TestCatalog::empty());

        let recipe = resolver.resolve_config(&config).await.unwrap();
        assert_eq!(
            recipe.steps()[0].formatted_instructions(None),
            vec!["Bake until golden, about 12 minutes"]
        );
    }

    #[tokio::test]
    async fn unresolvable_ingredient_is_skipped_not_fatal() {
        let mut config = simple_config("cookies");
        config.steps[0].ingredients.push(IngredientSpec {
            id: "unobtainium".into(),
            amount: AmountSpec::Fixed(1.0),
            description: None,
        });
        let source = TestSource::new(vec![config.clone()], vec![("bake", bake_template())]);
        let resolver = resolver_with(source, flour_catalog(), TestCatalog::empty());

        let recipe = resolver.resolve_config(&config).await.unwrap();
        let step = &recipe.steps()[0];
        assert!(step.uses_ingredient("flour"));
        assert!(!step.uses_ingredient("unobtainium"));
    }

    #[tokio::test]
    async fn fallback_catalog_resolves_what_the_live_catalog_misses() {
        let config = simple_config("cookies");
        let source = TestSource::new(vec![config.clone()], vec![("bake", bake_template())]);

        // The live catalog must be consulted exactly once before falling
        // back to the starter catalog.
        let mut live = MockCatalog::new();
        live.expect_get()
            .withf(|id| id == "flour")
            .times(1)
            .returning(|_| None);
        let resolver = TemplateResolver::new(source, Arc::new(live), flour_catalog());

        let recipe = resolver.resolve_config(&config).await.unwrap();
        assert!(recipe.steps()[0].uses_ingredient("flour"));
    }

    #[tokio::test]
    async fn group_with_no_resolvable_members_is_dropped() {
        let mut config = simple_config("cookies");
        config.steps[0].ingredient_groups.push(GroupSpec {
            name: "ghost".into(),
            description: None,
            ingredients: vec![IngredientSpec {
                id: "unobtainium".into(),
                amount: AmountSpec::Fixed(1.0),
                description: None,
            }],
        });
        config.steps[0].ingredient_groups.push(GroupSpec {
            name: "real".into(),
            description: None,
            ingredients: vec![
                IngredientSpec {
                    id: "flour".into(),
                    amount: AmountSpec::Fixed(1.0),
                    description: None,
                },
                IngredientSpec {
                    id: "unobtainium".into(),
                    amount: AmountSpec::Fixed(1.0),
                    description: None,
                },
            ],
        });
        let source = TestSource::new(vec![config.clone()], vec![("bake", bake_template())]);
        let resolver = resolver_with(source, flour_catalog(), TestCatalog::empty());

        let recipe = resolver.resolve_config(&config).await.unwrap();
        let step = &recipe.steps()[0];
        assert!(!step.has_group("ghost"));
        // Partially resolvable groups keep their resolvable members.
        assert_eq!(step.group("real").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn step_orders_follow_config_position() {
        let mut config = simple_config("cookies");
        config.steps.push(bake_step_config());
        config.steps.push(bake_step_config());
        let source = TestSource::new(vec![config.clone()], vec![("bake", bake_template())]);
        let resolver = resolver_with(source, flour_catalog(), TestCatalog::empty());

        let recipe = resolver.resolve_config(&config).await.unwrap();
        let orders: Vec<u32> = recipe.steps().iter().map(RecipeStep::order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    // ── Load lifecycle ────────────────────────────────────────────────────

    #[tokio::test]
    async fn partial_failure_excludes_only_the_broken_recipe() {
        let broken = RecipeConfig {
            id: "broken".into(),
            metadata: metadata("broken"),
            steps: vec![StepConfig {
                template: "glaze".into(), // requires "glaze" param, none given
                params: BTreeMap::new(),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: None,
            }],
        };
        let source = TestSource::new(
            vec![simple_config("cookies"), broken, simple_config("brownies")],
            vec![("bake", bake_template()), ("glaze", glaze_template())],
        );
        let resolver = resolver_with(source, flour_catalog(), TestCatalog::empty());

        let ids = resolver.recipe_ids().await.unwrap();
        assert_eq!(ids, vec!["cookies", "brownies"]);
        assert!(!resolver.has_recipe("broken").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_initialize_shares_one_fetch() {
        let source = Arc::new(TestSource {
            recipes: vec![simple_config("cookies")],
            templates: [("bake".to_string(), bake_template())]
                .into_iter()
                .collect(),
            fetches: AtomicUsize::new(0),
            cache_clears: AtomicUsize::new(0),
            fail_next_fetch: AtomicBool::new(false),
            fetch_delay: Some(Duration::from_millis(50)),
        });
        let resolver = Arc::new(resolver_with(
            source.clone(),
            flour_catalog(),
            TestCatalog::empty(),
        ));

        let a = {
            let r = resolver.clone();
            tokio::spawn(async move { r.initialize().await })
        };
        let b = {
            let r = resolver.clone();
            tokio::spawn(async move { r.initialize().await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_propagates_and_is_retryable() {
        let source = TestSource::new(vec![simple_config("cookies")], vec![("bake", bake_template())]);
        source.fail_next_fetch.store(true, Ordering::SeqCst);
        let resolver = resolver_with(source.clone(), flour_catalog(), TestCatalog::empty());

        let err = resolver.initialize().await.unwrap_err();
        assert!(matches!(
            err,
            BakeflowError::Application(ApplicationError::SourceFetch { .. })
        ));

        // The failure leaves the resolver re-enterable.
        resolver.initialize().await.unwrap();
        assert!(resolver.has_recipe("cookies").await.unwrap());
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn reload_clears_source_cache_and_refetches() {
        let source = TestSource::new(vec![simple_config("cookies")], vec![("bake", bake_template())]);
        let resolver = resolver_with(source.clone(), flour_catalog(), TestCatalog::empty());

        resolver.initialize().await.unwrap();
        resolver.initialize().await.unwrap(); // no-op while Ready
        assert_eq!(source.fetch_count(), 1);

        resolver.reload().await.unwrap();
        assert_eq!(source.cache_clears.load(Ordering::SeqCst), 1);
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn accessors_initialize_lazily() {
        let source = TestSource::new(vec![simple_config("cookies")], vec![("bake", bake_template())]);
        let resolver = resolver_with(source.clone(), flour_catalog(), TestCatalog::empty());

        assert_eq!(source.fetch_count(), 0);
        let recipe = resolver.recipe("cookies").await.unwrap();
        assert!(recipe.is_some());
        assert_eq!(source.fetch_count(), 1);
    }
}
