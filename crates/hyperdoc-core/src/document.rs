use crate::{
    reference::Reference,
    relation::{RelationDictionary, RelationSet},
    traits::DocumentKind,
    value::Value,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Document
///
/// An in-memory node of the API's hypermedia graph: classification tags,
/// ordered properties, a relation dictionary of outbound links, a
/// relation dictionary of embedded entities, and an ordered action list.
/// Identity is structural (the instance itself) until resolved.
///
/// Built fresh per response and never shared across requests; all
/// mutation happens before the render walk starts.
///

#[derive(Debug)]
pub struct Document {
    path: &'static str,
    classes: Vec<String>,
    properties: Vec<Property>,
    links: RelationDictionary,
    entities: RelationDictionary,
    actions: Vec<Action>,
}

impl Document {
    #[must_use]
    pub fn new<K: DocumentKind>() -> Self {
        Self {
            path: K::PATH,
            classes: K::CLASSES.iter().map(ToString::to_string).collect(),
            properties: Vec::new(),
            links: RelationDictionary::new(),
            entities: RelationDictionary::new(),
            actions: Vec::new(),
        }
    }

    // ── Builder surface ─────────────────────────────────────────────

    /// Append a classification tag.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set a property. Null-valued properties are skipped at render
    /// time; use [`Self::prop_always`] for explicitly-present nulls.
    #[must_use]
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_prop(name, value, false);
        self
    }

    /// Set a property that is emitted even when null.
    #[must_use]
    pub fn prop_always(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_prop(name, value, true);
        self
    }

    /// Add an outbound link under the given relation set.
    #[must_use]
    pub fn link(mut self, relations: RelationSet, reference: Reference) -> Self {
        self.links.add(relations, reference);
        self
    }

    /// Embed an entity under the given relation set.
    #[must_use]
    pub fn entity(mut self, relations: RelationSet, reference: Reference) -> Self {
        self.entities.add(relations, reference);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    fn set_prop(&mut self, name: impl Into<String>, value: impl Into<Value>, always: bool) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(slot) => {
                slot.value = value;
                slot.always = always;
            }
            None => self.properties.push(Property {
                name,
                value,
                always,
            }),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Declared document-type path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    #[must_use]
    pub const fn links(&self) -> &RelationDictionary {
        &self.links
    }

    #[must_use]
    pub const fn entities(&self) -> &RelationDictionary {
        &self.entities
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

///
/// Property
///
/// One named property slot. `always` forces emission of null values.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Value,
    pub always: bool,
}

///
/// Method
/// HTTP method tag carried by an action.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Method {
    #[display("DELETE")]
    Delete,
    #[display("GET")]
    Get,
    #[display("PATCH")]
    Patch,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
}

///
/// ParamModel
/// Static per-parameter descriptor for an action's request type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParamModel {
    /// Wire-visible field name.
    pub name: &'static str,
    /// Fully-qualified parameter-type path, projected through a
    /// [`SchemaProvider`] into the emitted `type` reference.
    pub type_path: &'static str,
}

///
/// SchemaProvider
///
/// Consumed collaborator: maps an action parameter's type path to an
/// opaque external schema reference. This engine never inspects the
/// schema's internal shape.
///

pub trait SchemaProvider {
    fn schema_ref(&self, type_path: &str) -> String;
}

///
/// PathSchemas
/// Default provider: the type path itself is the schema reference.
///

pub struct PathSchemas;

impl SchemaProvider for PathSchemas {
    fn schema_ref(&self, type_path: &str) -> String {
        type_path.to_string()
    }
}

///
/// Action
///
/// Named, method-tagged operation on a document. The guard is evaluated
/// at render time; a false guard removes the action from the output
/// entirely (capability gate, not a disabled-state indicator).
///
/// Guards must be idempotent and side-effect-free: the renderer
/// currently evaluates each guard once per render, but callers must not
/// rely on single evaluation.
///

pub struct Action {
    name: String,
    method: Method,
    target: Reference,
    guard: Option<Box<dyn Fn() -> bool + Send + Sync>>,
    command: Option<Box<dyn Fn() + Send + Sync>>,
    params: &'static [ParamModel],
}

impl Action {
    #[must_use]
    pub fn new(name: impl Into<String>, method: Method, target: Reference) -> Self {
        Self {
            name: name.into(),
            method,
            target,
            guard: None,
            command: None,
            params: &[],
        }
    }

    /// Attach a capability guard. Absent a guard the action is always
    /// executable.
    #[must_use]
    pub fn guard(mut self, guard: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Attach the command the action invokes. Rendering never runs it;
    /// invocation is the transport layer's responsibility.
    #[must_use]
    pub fn command(mut self, command: impl Fn() + Send + Sync + 'static) -> Self {
        self.command = Some(Box::new(command));
        self
    }

    /// Declare the action's parameter descriptors.
    #[must_use]
    pub const fn params(mut self, params: &'static [ParamModel]) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub const fn target(&self) -> &Reference {
        &self.target
    }

    #[must_use]
    pub fn can_execute(&self) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard())
    }

    #[must_use]
    pub const fn param_models(&self) -> &'static [ParamModel] {
        self.params
    }

    /// Run the attached command, if any. Gating is the caller's job:
    /// check [`Self::can_execute`] first.
    pub fn invoke(&self) {
        if let Some(command) = &self.command {
            command();
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .field("command", &self.command.is_some())
            .field("params", &self.params)
            .finish()
    }
}
