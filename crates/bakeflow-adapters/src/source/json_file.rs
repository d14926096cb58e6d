//! JSON-file recipe source with an in-memory parse cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use bakeflow_core::application::ApplicationError;
use bakeflow_core::application::ports::RecipeSource;
use bakeflow_core::domain::{RecipeConfig, StepTemplate};
use bakeflow_core::error::BakeflowResult;

use crate::builtin;

/// On-disk recipe document: optional template definitions plus recipes.
///
/// Document templates extend (and on a name clash override) the built-in
/// template vocabulary, so a document only has to define the exotic steps
/// it actually introduces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeDocument {
    #[serde(default)]
    pub templates: HashMap<String, StepTemplate>,
    #[serde(default)]
    pub recipes: Vec<RecipeConfig>,
}

/// Recipe source reading one JSON document from disk.
///
/// The parsed document is cached after the first read; `clear_cache`
/// drops it so the next fetch re-reads the file.
pub struct JsonFileSource {
    path: PathBuf,
    builtin_templates: HashMap<String, StepTemplate>,
    cache: RwLock<Option<Arc<RecipeDocument>>>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            builtin_templates: builtin::step_templates(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> BakeflowResult<Arc<RecipeDocument>> {
        if let Some(doc) = self.cache.read().await.as_ref() {
            return Ok(doc.clone());
        }

        let mut cache = self.cache.write().await;
        // A concurrent loader may have filled the cache while we waited
        // for the write lock.
        if let Some(doc) = cache.as_ref() {
            return Ok(doc.clone());
        }

        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(error = %e, "Failed to read recipe document");
            ApplicationError::SourceFetch {
                reason: format!("cannot read {}: {e}", self.path.display()),
            }
        })?;
        let doc: RecipeDocument = serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "Failed to parse recipe document");
            ApplicationError::SourceFetch {
                reason: format!("invalid recipe document {}: {e}", self.path.display()),
            }
        })?;
        debug!(
            recipes = doc.recipes.len(),
            templates = doc.templates.len(),
            "Loaded recipe document"
        );

        let doc = Arc::new(doc);
        *cache = Some(doc.clone());
        Ok(doc)
    }
}

#[async_trait]
impl RecipeSource for JsonFileSource {
    async fn fetch_recipes(&self) -> BakeflowResult<Vec<RecipeConfig>> {
        Ok(self.load().await?.recipes.clone())
    }

    async fn fetch_step_template(&self, name: &str) -> BakeflowResult<Option<StepTemplate>> {
        let doc = self.load().await?;
        Ok(doc
            .templates
            .get(name)
            .or_else(|| self.builtin_templates.get(name))
            .cloned())
    }

    async fn clear_cache(&self) {
        *self.cache.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const MINIMAL_DOC: &str = r#"{
        "recipes": [{
            "id": "shortbread",
            "metadata": {
                "name": "Shortbread",
                "baseServings": 8,
                "difficulty": "easy",
                "bakingTime": 45
            },
            "steps": [
                { "template": "preheat", "params": { "temp": 325 } },
                { "template": "bake", "params": { "temp": 325, "time": 45 } }
            ]
        }]
    }"#;

    fn doc_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn parses_a_minimal_document() {
        let file = doc_file(MINIMAL_DOC);
        let source = JsonFileSource::new(file.path());

        let recipes = source.fetch_recipes().await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, "shortbread");
        assert_eq!(recipes[0].metadata.base_servings, 8.0);
        assert_eq!(recipes[0].steps.len(), 2);
    }

    #[tokio::test]
    async fn document_templates_fall_back_to_builtin() {
        let file = doc_file(MINIMAL_DOC);
        let source = JsonFileSource::new(file.path());

        // Not defined in the document, resolved from the built-in set.
        let bake = source.fetch_step_template("bake").await.unwrap().unwrap();
        assert_eq!(bake.required_params, vec!["temp", "time"]);
        assert!(source.fetch_step_template("sous-vide").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn caches_until_cleared() {
        let file = doc_file(MINIMAL_DOC);
        let source = JsonFileSource::new(file.path());

        assert_eq!(source.fetch_recipes().await.unwrap().len(), 1);

        // Overwrite the document; the cached parse still answers.
        std::fs::write(file.path(), r#"{ "recipes": [] }"#).unwrap();
        assert_eq!(source.fetch_recipes().await.unwrap().len(), 1);

        source.clear_cache().await;
        assert_eq!(source.fetch_recipes().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let source = JsonFileSource::new("/nonexistent/recipes.json");
        let err = source.fetch_recipes().await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/recipes.json"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_fetch_error() {
        let file = doc_file("{ not json");
        let source = JsonFileSource::new(file.path());
        assert!(source.fetch_recipes().await.is_err());
    }
}
