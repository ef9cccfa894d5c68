//! The rule-base half of the process namespace.
//!
//! A `RuleBase` is a named base living in the second namespace, carrying the
//! rule lists an external rule compiler installs. It shares the knowledge
//! base dispatch core and defaults its factory to empty [`RuleList`]
//! creation, so unresolved accesses always succeed.

use std::fmt;
use std::rc::Rc;

use crate::entity_list::{EntityList, EntityListFactory};
use crate::error::SyllogResult;
use crate::knowledge_base::KnowledgeBase;
use crate::matching::{MatchEngine, Matches};
use crate::rule_list::RuleList;

/// A named container for the rule lists of one domain.
pub struct RuleBase<E: MatchEngine> {
    core: KnowledgeBase<E>,
}

impl<E: MatchEngine> RuleBase<E> {
    /// Creates an empty, unregistered rule base with a [`RuleList`] factory.
    ///
    /// Registration goes through
    /// [`crate::registry::Registry::add_rule_base`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: KnowledgeBase::new(name).with_factory(RuleList::factory()),
        }
    }

    /// The base name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.core.name()
    }

    /// Runs deferred initialization at most once.
    pub fn init(&self) {
        self.core.init();
    }

    /// Whether deferred initialization has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.core.is_initialized()
    }

    /// Discards volatile state in every owned rule list.
    pub fn reset(&self) {
        self.core.reset();
    }

    /// Returns the rule list for `entity_name`, creating an empty one on
    /// first access.
    ///
    /// # Errors
    /// Propagates [`crate::error::SyllogError`] from the dispatch core;
    /// with the default factory this cannot fail.
    pub fn get_entity_list(&self, entity_name: &str) -> SyllogResult<Rc<dyn EntityList<E>>> {
        self.core.get_entity_list(entity_name)
    }

    /// Installs an externally constructed (typically populated) rule list.
    ///
    /// # Errors
    /// [`crate::error::SyllogError::EntityListExists`] when the name is
    /// already occupied.
    pub fn add_entity_list(&self, list: Rc<dyn EntityList<E>>) -> SyllogResult<()> {
        self.core.add_entity_list(list)
    }

    /// Looks up under `entity_name`; rule lists match no facts, so this
    /// yields results only for explicitly installed fact-bearing lists.
    pub fn lookup<'a>(
        &self,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        entity_name: &str,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        self.core.lookup(bindings, context, entity_name, patterns)
    }

    /// Proves goals under `entity_name` by running the stored rules.
    pub fn prove<'a>(
        &self,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        entity_name: &str,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        self.core.prove(bindings, context, entity_name, patterns)
    }

    /// Names of the currently materialized rule lists, sorted.
    #[must_use]
    pub fn entity_names(&self) -> Vec<String> {
        self.core.entity_names()
    }

    /// Replaces the default factory, for specialized rule list variants.
    #[must_use]
    pub fn with_factory(mut self, factory: EntityListFactory<E>) -> Self {
        self.core = self.core.with_factory(factory);
        self
    }
}

impl<E: MatchEngine> fmt::Debug for RuleBase<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBase")
            .field("name", &self.core.name())
            .field("entity_lists", &self.core.entity_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{Bindings, SimpleMatcher, Term};
    use crate::rules::BackwardRule;

    struct AlwaysAlice;

    impl BackwardRule<SimpleMatcher> for AlwaysAlice {
        fn name(&self) -> &str {
            "always_alice"
        }

        fn prove<'a>(
            self: Rc<Self>,
            bindings: &'a Bindings,
            _context: &'a (),
            _patterns: &'a [Term],
        ) -> Matches<'a, SimpleMatcher> {
            Box::new(std::iter::once(Ok(
                bindings.extended("who", Term::atom("alice"))
            )))
        }
    }

    #[test]
    fn test_default_factory_creates_rule_lists() {
        let rb: RuleBase<SimpleMatcher> = RuleBase::new("family_rules");
        let list = rb.get_entity_list("ancestor").unwrap();
        assert_eq!(list.name(), "ancestor");

        let again = rb.get_entity_list("ancestor").unwrap();
        assert!(Rc::ptr_eq(&list, &again));
    }

    #[test]
    fn test_prove_runs_installed_rules_lookup_does_not() {
        let rb: RuleBase<SimpleMatcher> = RuleBase::new("family_rules");
        let list: Rc<RuleList<SimpleMatcher>> = Rc::new(RuleList::new("ancestor"));
        list.add_rule(Rc::new(AlwaysAlice));
        rb.add_entity_list(list).unwrap();

        let bindings = Bindings::new();
        let patterns = [Term::var("who")];

        assert_eq!(rb.lookup(&bindings, &(), "ancestor", &patterns).count(), 0);

        let proved: Vec<_> = rb
            .prove(&bindings, &(), "ancestor", &patterns)
            .map(Result::unwrap)
            .collect();
        assert_eq!(proved.len(), 1);
        assert_eq!(proved[0].get("who"), Some(&Term::atom("alice")));
    }

    #[test]
    fn test_unknown_entity_name_proves_empty() {
        let rb: RuleBase<SimpleMatcher> = RuleBase::new("family_rules");
        let bindings = Bindings::new();
        assert_eq!(rb.prove(&bindings, &(), "ancestor", &[]).count(), 0);
        // Dispatch alone does not materialize a rule list.
        assert!(rb.entity_names().is_empty());
    }
}
