use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{MappingError, Result};

/// Converts a value between its persisted and in-memory representation.
pub trait PropertyHandler: Send + Sync {
    type Input;
    type Output;

    /// Persisted value -> in-memory value.
    fn get(&self, input: Self::Input) -> Self::Output;

    /// In-memory value -> persisted value.
    fn set(&self, output: Self::Output) -> Self::Input;
}

pub type SharedHandler = Arc<dyn Any + Send + Sync>;

pub trait Resolver<I, O> {
    fn resolve(&self, input: I) -> O;
}

struct RegisteredHandler {
    type_name: &'static str,
    handler: SharedHandler,
}

/// Type-level property handlers, keyed by the handled type.
///
/// Build one during application wiring, register handlers, then share it
/// behind an `Arc`. Lookups take a read lock and may run concurrently; a
/// completed `add` is visible to every lookup that starts after it.
#[derive(Default)]
pub struct PropertyHandlerRegistry {
    handlers: RwLock<HashMap<TypeId, RegisteredHandler>>,
}

impl PropertyHandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T, H>(&self, handler: H, force: bool) -> Result<()>
    where
        T: 'static,
        H: PropertyHandler + 'static,
    {
        let handled_type = type_name::<T>();
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);

        if handlers.contains_key(&TypeId::of::<T>()) {
            if !force {
                return Err(MappingError::AlreadyExists {
                    type_name: handled_type,
                }
                .into());
            }
            tracing::debug!(type_name = handled_type, "replacing property handler");
        } else {
            tracing::debug!(type_name = handled_type, "registering property handler");
        }

        handlers.insert(
            TypeId::of::<T>(),
            RegisteredHandler {
                type_name: handled_type,
                handler: Arc::new(handler),
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<SharedHandler> {
        self.get_by_id(TypeId::of::<T>())
    }

    #[must_use]
    pub fn get_by_id(&self, type_id: TypeId) -> Option<SharedHandler> {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        handlers
            .get(&type_id)
            .map(|registered| Arc::clone(&registered.handler))
    }

    /// Returns the handler for `T` if it was registered as an `H`.
    #[must_use]
    pub fn get_as<T, H>(&self) -> Option<Arc<H>>
    where
        T: 'static,
        H: PropertyHandler + 'static,
    {
        self.get::<T>()?.downcast::<H>().ok()
    }

    pub fn remove<T: 'static>(&self) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        let removed = handlers.remove(&TypeId::of::<T>());
        if let Some(registered) = &removed {
            tracing::debug!(
                type_name = registered.type_name,
                "removed property handler"
            );
        }
        removed.is_some()
    }

    pub fn clear(&self) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(count = handlers.len(), "clearing property handlers");
        handlers.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the types that currently have a handler, sorted.
    #[must_use]
    pub fn registered_type_names(&self) -> Vec<&'static str> {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let mut names = handlers
            .values()
            .map(|registered| registered.type_name)
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

/// Resolves the property handler registered for a whole type.
#[derive(Clone)]
pub struct TypeLevelHandlerResolver {
    registry: Arc<PropertyHandlerRegistry>,
}

impl TypeLevelHandlerResolver {
    #[must_use]
    pub fn new(registry: Arc<PropertyHandlerRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn resolve_type<T: 'static>(&self) -> Option<SharedHandler> {
        self.resolve(TypeId::of::<T>())
    }
}

impl Resolver<TypeId, Option<SharedHandler>> for TypeLevelHandlerResolver {
    fn resolve(&self, input: TypeId) -> Option<SharedHandler> {
        let resolved = self.registry.get_by_id(input);
        tracing::trace!(type_id = ?input, hit = resolved.is_some(), "resolved property handler");
        resolved
    }
}
