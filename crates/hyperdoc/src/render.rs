//! Module: render
//! Responsibility: rendering a document graph into the Siren wire format.
//! Does not own: reference resolution rules or navigation math.
//! Boundary: synchronous, single-threaded per call; any resolution
//! failure inside the walk aborts the whole render.

use crate::core::{
    Error,
    document::{Action, Document, PathSchemas, SchemaProvider},
    query::QueryResult,
    reference::Reference,
    relation::rel,
    resolve::Resolver,
    route::RouteRegistry,
    value::Value,
};
use serde_json::{Map, Value as Json, json};
use thiserror::Error as ThisError;

///
/// RenderError
///
/// Render-surface failure. No partial documents are ever returned; the
/// originating error propagates unchanged so the caller can map it to a
/// transport-level failure.
///

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error(transparent)]
    Resolve(#[from] Error),

    #[error("non-finite number in property '{name}'")]
    NonFiniteProperty { name: String },
}

static PATH_SCHEMAS: PathSchemas = PathSchemas;

///
/// Renderer
///
/// Siren document builder: walks a document's classes, properties,
/// links, embedded entities, and actions, and renders the wire tree.
/// Shares one read-only route registry across concurrent renders.
///

pub struct Renderer<'a> {
    resolver: Resolver<'a>,
    schemas: &'a dyn SchemaProvider,
}

impl<'a> Renderer<'a> {
    /// Renderer with the default schema provider (type paths pass
    /// through as schema references).
    #[must_use]
    pub fn new(registry: &'a RouteRegistry) -> Self {
        Self {
            resolver: Resolver::new(registry),
            schemas: &PATH_SCHEMAS,
        }
    }

    #[must_use]
    pub const fn with_schemas(
        registry: &'a RouteRegistry,
        schemas: &'a dyn SchemaProvider,
    ) -> Self {
        Self {
            resolver: Resolver::new(registry),
            schemas,
        }
    }

    /// Render a root document.
    pub fn render(&self, document: &Document) -> Result<Json, RenderError> {
        tracing::debug!(path = document.path(), "rendering document");

        self.render_document(document).map(Json::Object)
    }

    /// Render a paged query result as a collection document, populating
    /// its navigation references first.
    pub fn render_result(&self, result: &mut QueryResult) -> Result<Json, RenderError> {
        tracing::debug!(
            target_path = result.target(),
            total = result.total(),
            "rendering query result"
        );
        result.populate_navigation();

        let mut out = Map::new();
        out.insert("class".to_string(), json!([rel::COLLECTION]));
        out.insert("properties".to_string(), json!({ "total": result.total() }));

        let mut entities = Vec::with_capacity(result.entities().len());
        for reference in result.entities() {
            entities.push(self.render_embedded(json!([rel::ITEM]), reference)?);
        }
        out.insert("entities".to_string(), Json::Array(entities));

        let mut links = Vec::new();
        for (set, reference) in result.navigation().iter() {
            links.push(json!({
                "rel": set.names(),
                "href": self.resolver.resolve(reference)?,
            }));
        }
        out.insert("links".to_string(), Json::Array(links));
        out.insert("actions".to_string(), Json::Array(Vec::new()));

        Ok(Json::Object(out))
    }

    fn render_document(&self, document: &Document) -> Result<Map<String, Json>, RenderError> {
        let mut out = Map::new();

        out.insert("class".to_string(), json!(document.classes()));

        let mut properties = Map::new();
        for property in document.properties() {
            if property.value.is_null() && !property.always {
                continue;
            }
            properties.insert(
                property.name.clone(),
                property_json(&property.name, &property.value)?,
            );
        }
        out.insert("properties".to_string(), Json::Object(properties));

        let mut entities = Vec::new();
        for (set, reference) in document.entities().iter() {
            entities.push(self.render_embedded(json!(set.names()), reference)?);
        }
        out.insert("entities".to_string(), Json::Array(entities));

        let mut links = Vec::new();
        for (set, reference) in document.links().iter() {
            links.push(json!({
                "rel": set.names(),
                "href": self.resolver.resolve(reference)?,
            }));
        }
        out.insert("links".to_string(), Json::Array(links));

        let mut actions = Vec::new();
        for action in document.actions() {
            if let Some(rendered) = self.render_action(action)? {
                actions.push(rendered);
            }
        }
        out.insert("actions".to_string(), Json::Array(actions));

        Ok(out)
    }

    /// Render one embedded-entity entry: a full sub-document when an
    /// instance is present, a link-only entity otherwise. An embedded
    /// instance need not be addressable, so an unregistered route only
    /// suppresses its `href`; every other failure stays fatal.
    fn render_embedded(&self, rel: Json, reference: &Reference) -> Result<Json, RenderError> {
        match reference.instance() {
            Some(instance) => {
                let mut sub = self.render_document(instance)?;
                sub.insert("rel".to_string(), rel);
                match self.resolver.resolve(reference) {
                    Ok(href) => {
                        sub.insert("href".to_string(), Json::String(href));
                    }
                    Err(Error::UnregisteredRoute { .. }) => {}
                    Err(err) => return Err(err.into()),
                }

                Ok(Json::Object(sub))
            }
            None => Ok(json!({
                "rel": rel,
                "href": self.resolver.resolve(reference)?,
            })),
        }
    }

    /// Render one action, or `None` when its capability gate is closed.
    /// Gated-off actions leave no trace in the output.
    fn render_action(&self, action: &Action) -> Result<Option<Json>, RenderError> {
        if !action.can_execute() {
            return Ok(None);
        }

        let mut out = Map::new();
        out.insert("name".to_string(), Json::String(action.name().to_string()));
        out.insert(
            "method".to_string(),
            Json::String(action.method().to_string()),
        );
        out.insert(
            "href".to_string(),
            Json::String(self.resolver.resolve(action.target())?),
        );

        if !action.param_models().is_empty() {
            let fields: Vec<Json> = action
                .param_models()
                .iter()
                .map(|param| {
                    json!({
                        "name": param.name,
                        "type": self.schemas.schema_ref(param.type_path),
                    })
                })
                .collect();
            out.insert("fields".to_string(), Json::Array(fields));
        }

        Ok(Some(Json::Object(out)))
    }
}

// Scalar coercion: integers and booleans stay native JSON types;
// everything else renders through its canonical textual form.
fn property_json(name: &str, value: &Value) -> Result<Json, RenderError> {
    let non_finite = || RenderError::NonFiniteProperty {
        name: name.to_string(),
    };

    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::from(*i),
        Value::Uint(u) => Json::from(*u),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(non_finite)?,
        other => other.route_text().map(Json::String).ok_or_else(non_finite)?,
    })
}
