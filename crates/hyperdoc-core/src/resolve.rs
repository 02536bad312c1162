//! Module: resolve
//! Responsibility: turning references into concrete URIs.
//! Does not own: route registration or wire-document rendering.
//! Boundary: pure function of (reference, registry state); no side effects.

use crate::{
    error::Error,
    query,
    reference::Reference,
    route::{RouteBinding, RouteRegistry},
    traits::KeySource,
};

///
/// Resolver
///
/// Resolves any reference variant to a URI, delegating identity
/// translation to the bound key producer and template expansion to the
/// route registry. External references bypass both, unconditionally.
///

pub struct Resolver<'a> {
    registry: &'a RouteRegistry,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(registry: &'a RouteRegistry) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, reference: &Reference) -> Result<String, Error> {
        match reference {
            Reference::External(uri) => Ok(uri.clone()),

            Reference::Direct(instance) => {
                let path = instance.path();
                let binding = self.binding(path)?;
                let payload = binding.producer().from_instance(instance);

                binding.template().expand(&payload, path)
            }

            Reference::KeyOnly { target, key } => {
                let binding = self.binding(*target)?;
                let payload = binding.producer().from_key(KeySource::Key(key));

                binding.template().expand(&payload, *target)
            }

            Reference::QueryKeyed { target, query } => {
                let binding = self.binding(*target)?;
                let payload = binding
                    .producer()
                    .from_key(KeySource::Query(query.as_ref()));
                let base = binding.template().expand(&payload, *target)?;
                let encoded = query::encode(Some(&query.to_object()))?;

                if encoded.is_empty() {
                    Ok(base)
                } else {
                    Ok(format!("{base}?{encoded}"))
                }
            }
        }
    }

    fn binding(&self, path: &'static str) -> Result<&RouteBinding, Error> {
        self.registry
            .lookup(path)
            .ok_or(Error::UnregisteredRoute { path })
    }
}
