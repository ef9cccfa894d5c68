//! The two process-wide base namespaces.
//!
//! A `Registry` owns every knowledge base and rule base of one embedding and
//! enforces the naming invariant: a name, once registered, is unique across
//! *both* namespaces. There is no ambient global state; embeddings pass the
//! registry explicitly to whatever constructs bases.

use std::collections::HashMap;
use std::fmt;

use crate::error::{SyllogError, SyllogResult};
use crate::knowledge_base::KnowledgeBase;
use crate::matching::MatchEngine;
use crate::rule_base::RuleBase;

/// Which namespace holds a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    /// The knowledge-base namespace.
    Knowledge,
    /// The rule-base namespace.
    Rule,
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Knowledge => write!(f, "knowledge base"),
            Self::Rule => write!(f, "rule base"),
        }
    }
}

/// The combined knowledge-base and rule-base namespaces of one embedding.
pub struct Registry<E: MatchEngine> {
    knowledge_bases: HashMap<String, KnowledgeBase<E>>,
    rule_bases: HashMap<String, RuleBase<E>>,
}

impl<E: MatchEngine> Registry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            knowledge_bases: HashMap::new(),
            rule_bases: HashMap::new(),
        }
    }

    /// Registers a knowledge base, checking both namespaces first.
    ///
    /// # Errors
    /// [`SyllogError::NameCollision`] naming the occupied namespace; neither
    /// namespace is mutated on failure.
    pub fn add_knowledge_base(
        &mut self,
        base: KnowledgeBase<E>,
    ) -> SyllogResult<&KnowledgeBase<E>> {
        self.check_name(base.name())?;
        tracing::debug!(name = %base.name(), "registering knowledge base");
        let name = base.name().to_string();
        Ok(self.knowledge_bases.entry(name).or_insert(base))
    }

    /// Registers a rule base, checking both namespaces first.
    ///
    /// # Errors
    /// [`SyllogError::NameCollision`] naming the occupied namespace; neither
    /// namespace is mutated on failure.
    pub fn add_rule_base(&mut self, base: RuleBase<E>) -> SyllogResult<&RuleBase<E>> {
        self.check_name(base.name())?;
        tracing::debug!(name = %base.name(), "registering rule base");
        let name = base.name().to_string();
        Ok(self.rule_bases.entry(name).or_insert(base))
    }

    /// Returns the knowledge base registered under `name`.
    #[must_use]
    pub fn knowledge_base(&self, name: &str) -> Option<&KnowledgeBase<E>> {
        self.knowledge_bases.get(name)
    }

    /// Returns the rule base registered under `name`.
    #[must_use]
    pub fn rule_base(&self, name: &str) -> Option<&RuleBase<E>> {
        self.rule_bases.get(name)
    }

    /// Returns the namespace holding `name`, if any.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<BaseKind> {
        if self.knowledge_bases.contains_key(name) {
            Some(BaseKind::Knowledge)
        } else if self.rule_bases.contains_key(name) {
            Some(BaseKind::Rule)
        } else {
            None
        }
    }

    /// Returns true if either namespace holds `name`.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    /// Runs deferred initialization on every registered base, each at most
    /// once. Called by the embedding engine after setup, before first use.
    pub fn init_all(&self) {
        for base in self.knowledge_bases.values() {
            base.init();
        }
        for base in self.rule_bases.values() {
            base.init();
        }
    }

    /// Resets every registered base between independent proof sessions.
    pub fn reset_all(&self) {
        tracing::debug!("resetting all registered bases");
        for base in self.knowledge_bases.values() {
            base.reset();
        }
        for base in self.rule_bases.values() {
            base.reset();
        }
    }

    /// Names registered in the knowledge-base namespace, sorted.
    #[must_use]
    pub fn knowledge_base_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.knowledge_bases.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names registered in the rule-base namespace, sorted.
    #[must_use]
    pub fn rule_base_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rule_bases.keys().cloned().collect();
        names.sort();
        names
    }

    fn check_name(&self, name: &str) -> SyllogResult<()> {
        match self.kind_of(name) {
            Some(occupied_by) => Err(SyllogError::NameCollision {
                name: name.to_string(),
                occupied_by,
            }),
            None => Ok(()),
        }
    }
}

impl<E: MatchEngine> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MatchEngine> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("knowledge_bases", &self.knowledge_base_names())
            .field("rule_bases", &self.rule_base_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::fact_list::FactList;
    use crate::matching::{SimpleMatcher, Term};

    fn fact_kb(name: &str) -> KnowledgeBase<SimpleMatcher> {
        KnowledgeBase::new(name).with_factory(FactList::factory(Rc::new(SimpleMatcher)))
    }

    #[test]
    fn test_fresh_name_registers_and_becomes_visible() {
        let mut registry = Registry::new();
        registry.add_knowledge_base(fact_kb("family")).unwrap();

        assert!(registry.contains_name("family"));
        assert_eq!(registry.kind_of("family"), Some(BaseKind::Knowledge));
        assert_eq!(registry.knowledge_base("family").unwrap().name(), "family");
        assert!(registry.rule_base("family").is_none());
    }

    #[test]
    fn test_duplicate_knowledge_base_name_collides() {
        let mut registry = Registry::new();
        registry.add_knowledge_base(fact_kb("family")).unwrap();

        let err = registry.add_knowledge_base(fact_kb("family")).unwrap_err();
        let SyllogError::NameCollision { name, occupied_by } = err else {
            panic!("expected NameCollision, got {err:?}");
        };
        assert_eq!(name, "family");
        assert_eq!(occupied_by, BaseKind::Knowledge);
        assert_eq!(registry.knowledge_base_names(), vec!["family"]);
    }

    #[test]
    fn test_cross_namespace_collision_both_directions() {
        let mut registry = Registry::new();
        registry.add_knowledge_base(fact_kb("family")).unwrap();

        let err = registry.add_rule_base(RuleBase::new("family")).unwrap_err();
        let SyllogError::NameCollision { occupied_by, .. } = err else {
            panic!("expected NameCollision, got {err:?}");
        };
        assert_eq!(occupied_by, BaseKind::Knowledge);

        registry.add_rule_base(RuleBase::new("laws")).unwrap();
        let err = registry.add_knowledge_base(fact_kb("laws")).unwrap_err();
        let SyllogError::NameCollision { occupied_by, .. } = err else {
            panic!("expected NameCollision, got {err:?}");
        };
        assert_eq!(occupied_by, BaseKind::Rule);

        // Failed registrations mutated neither namespace.
        assert_eq!(registry.knowledge_base_names(), vec!["family"]);
        assert_eq!(registry.rule_base_names(), vec!["laws"]);
    }

    #[test]
    fn test_init_all_runs_every_hook_once() {
        let mut registry = Registry::new();
        registry.add_knowledge_base(fact_kb("family")).unwrap();
        registry.add_rule_base(RuleBase::new("laws")).unwrap();

        registry.init_all();
        registry.init_all();
        assert!(registry.knowledge_base("family").unwrap().is_initialized());
        assert!(registry.rule_base("laws").unwrap().is_initialized());
    }

    #[test]
    fn test_reset_all_clears_volatile_facts() {
        let mut registry = Registry::new();
        registry.add_knowledge_base(fact_kb("family")).unwrap();

        let kb = registry.knowledge_base("family").unwrap();
        kb.get_entity_list("parent").unwrap();
        let list = Rc::new(FactList::new("sibling", Rc::new(SimpleMatcher)));
        list.assert_fact(vec![Term::atom("bob"), Term::atom("carol")]);
        kb.add_entity_list(list.clone()).unwrap();
        assert_eq!(list.fact_count(), 1);

        registry.reset_all();
        assert_eq!(list.fact_count(), 0);
    }
}
