//! The named container and dispatch point for knowledge entities.
//!
//! A `KnowledgeBase` owns a mapping from entity name to entity list and
//! routes `lookup`/`prove`/forward-chaining registration to the right list.
//! In the reference syntax `base.entity(pattern...)`, the base name is
//! `base`; this module implements the base-to-entity half of that
//! resolution. Name parsing and the chaining engines live outside.
//!
//! Entity lists are created lazily on first unresolved access through an
//! injected factory, or installed explicitly. Either way an entry is created
//! at most once per name and its identity is stable across accesses.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::entity_list::{EntityList, EntityListFactory};
use crate::error::{SyllogError, SyllogResult};
use crate::matching::{no_matches, MatchEngine, Matches};
use crate::rules::FcRuleRef;

/// One-shot hook run by [`KnowledgeBase::init`] for deferred setup.
pub type InitHook<E> = Box<dyn FnOnce(&KnowledgeBase<E>)>;

/// A master repository for the knowledge entities of one domain.
pub struct KnowledgeBase<E: MatchEngine> {
    name: String,
    entity_lists: RefCell<HashMap<String, Rc<dyn EntityList<E>>>>,
    factory: Option<EntityListFactory<E>>,
    init_hook: RefCell<Option<InitHook<E>>>,
    initialized: Cell<bool>,
}

impl<E: MatchEngine> KnowledgeBase<E> {
    /// Creates an empty, unregistered base.
    ///
    /// Without a factory, [`KnowledgeBase::get_entity_list`] on an unknown
    /// name is an error; configure one with [`KnowledgeBase::with_factory`].
    /// Registration into the process namespaces goes through
    /// [`crate::registry::Registry::add_knowledge_base`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_lists: RefCell::new(HashMap::new()),
            factory: None,
            init_hook: RefCell::new(None),
            initialized: Cell::new(false),
        }
    }

    /// Sets the factory used to lazily create entity lists.
    #[must_use]
    pub fn with_factory(mut self, factory: EntityListFactory<E>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Sets the deferred-initialization hook, run once by
    /// [`KnowledgeBase::init`] before first use.
    #[must_use]
    pub fn with_init_hook(self, hook: impl FnOnce(&KnowledgeBase<E>) + 'static) -> Self {
        *self.init_hook.borrow_mut() = Some(Box::new(hook));
        self
    }

    /// The base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether [`KnowledgeBase::init`] has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Runs the deferred-initialization hook. Idempotent: the hook runs at
    /// most once, no matter how many callers ask.
    pub fn init(&self) {
        if self.initialized.replace(true) {
            return;
        }
        // Take the hook out before running it so it may reenter this base.
        let hook = self.init_hook.borrow_mut().take();
        if let Some(hook) = hook {
            tracing::debug!(base = %self.name, "running deferred init hook");
            hook(self);
        }
    }

    /// Discards volatile state in every owned entity list, in unspecified
    /// order. The lists themselves, and this base's registration, survive.
    pub fn reset(&self) {
        tracing::trace!(base = %self.name, "resetting entity lists");
        let lists: Vec<Rc<dyn EntityList<E>>> =
            self.entity_lists.borrow().values().map(Rc::clone).collect();
        for list in lists {
            list.reset();
        }
    }

    /// Returns the entity list for `entity_name` without creating one.
    #[must_use]
    pub fn entity_list(&self, entity_name: &str) -> Option<Rc<dyn EntityList<E>>> {
        self.entity_lists.borrow().get(entity_name).cloned()
    }

    /// Returns the entity list for `entity_name`, lazily creating it through
    /// the factory on first access.
    ///
    /// This is the sole mutation point of the entity map besides
    /// [`KnowledgeBase::add_entity_list`]. The map borrow is released before
    /// the factory runs, so factories may reenter this base.
    ///
    /// # Errors
    /// [`SyllogError::EntityListNotFound`] when the name is unknown and no
    /// factory is configured; the entity map is left unchanged.
    pub fn get_entity_list(&self, entity_name: &str) -> SyllogResult<Rc<dyn EntityList<E>>> {
        if let Some(list) = self.entity_list(entity_name) {
            return Ok(list);
        }
        let factory = self
            .factory
            .as_ref()
            .ok_or_else(|| SyllogError::EntityListNotFound {
                base: self.name.clone(),
                entity: entity_name.to_string(),
            })?;
        tracing::debug!(base = %self.name, entity = %entity_name, "creating entity list");
        let list = factory(entity_name);
        self.entity_lists
            .borrow_mut()
            .insert(entity_name.to_string(), Rc::clone(&list));
        Ok(list)
    }

    /// Installs an externally constructed entity list under its own name.
    ///
    /// # Errors
    /// [`SyllogError::EntityListExists`] when the name is already occupied;
    /// the existing list keeps its identity.
    pub fn add_entity_list(&self, list: Rc<dyn EntityList<E>>) -> SyllogResult<()> {
        let entity_name = list.name().to_string();
        let mut entity_lists = self.entity_lists.borrow_mut();
        if entity_lists.contains_key(&entity_name) {
            return Err(SyllogError::EntityListExists {
                base: self.name.clone(),
                entity: entity_name,
            });
        }
        entity_lists.insert(entity_name, list);
        Ok(())
    }

    /// Looks up facts under `entity_name`, forwarding the opaque values to
    /// the entity list unchanged.
    ///
    /// An unknown entity name yields an empty sequence: a never-asserted
    /// predicate has zero matches, it is not an error.
    pub fn lookup<'a>(
        &self,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        entity_name: &str,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        match self.entity_list(entity_name) {
            Some(list) => list.lookup(bindings, context, patterns),
            None => no_matches::<E>(),
        }
    }

    /// Proves goals under `entity_name`; identical contract to
    /// [`KnowledgeBase::lookup`], delegating to [`EntityList::prove`].
    pub fn prove<'a>(
        &self,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        entity_name: &str,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        match self.entity_list(entity_name) {
            Some(list) => list.prove(bindings, context, patterns),
            None => no_matches::<E>(),
        }
    }

    /// Registers a forward-chaining dependency under `entity_name`, lazily
    /// creating its entity list if needed.
    ///
    /// # Errors
    /// [`SyllogError::EntityListNotFound`] when the list does not exist and
    /// no factory is configured.
    pub fn add_fc_rule_ref(&self, entity_name: &str, fc_ref: FcRuleRef<E>) -> SyllogResult<()> {
        self.get_entity_list(entity_name)?.add_fc_rule_ref(fc_ref);
        Ok(())
    }

    /// Names of the currently materialized entity lists, sorted.
    #[must_use]
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entity_lists.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl<E: MatchEngine> fmt::Debug for KnowledgeBase<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("name", &self.name)
            .field("entity_lists", &self.entity_names())
            .field("initialized", &self.initialized.get())
            .finish()
    }
}
