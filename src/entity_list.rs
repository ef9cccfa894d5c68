//! The per-name entity container capability.
//!
//! An entity list holds all knowledge entities sharing one name inside one
//! base. In the reference syntax `base.entity(pattern...)`, the entity list
//! name is `entity`. Fact-bearing and rule-bearing variants specialize the
//! defaults; the trait itself carries the minimal polymorphic surface the
//! dispatcher needs.

use std::rc::Rc;

use crate::matching::{MatchEngine, Matches};
use crate::rules::FcRuleRef;

/// All knowledge entities sharing one name within one base.
///
/// Methods take `Rc<Self>` where they produce match sequences, so the
/// sequence can own a handle to the list and survive later mutation of the
/// owning base's entity map.
pub trait EntityList<E: MatchEngine> {
    /// The entity name shared by every entity this list holds.
    fn name(&self) -> &str;

    /// Produces the lazy sequence of binding extensions, one per stored
    /// entity that unifies with `patterns`. Pure pattern matching only; no
    /// rule execution.
    fn lookup<'a>(
        self: Rc<Self>,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E>;

    /// Proves goals against this list. Defaults to [`EntityList::lookup`];
    /// rule-bearing variants override to run rule bodies while matching.
    fn prove<'a>(
        self: Rc<Self>,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        self.lookup(bindings, context, patterns)
    }

    /// Discards transient state between proof sessions. Default no-op.
    fn reset(&self) {}

    /// Records a forward-chaining dependency. Default no-op; fact-bearing
    /// variants override to notify the rule on later assertions.
    fn add_fc_rule_ref(&self, _fc_ref: FcRuleRef<E>) {}

    /// The forward-chaining dependencies currently recorded. Default empty.
    fn fc_rule_refs(&self) -> Vec<FcRuleRef<E>> {
        Vec::new()
    }
}

/// Factory used by a base to lazily create entity lists on first access.
pub type EntityListFactory<E> = Box<dyn Fn(&str) -> Rc<dyn EntityList<E>>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{Bindings, SimpleMatcher, Term};

    /// Minimal list relying on every default the trait provides.
    struct Unspecialized {
        name: String,
    }

    impl EntityList<SimpleMatcher> for Unspecialized {
        fn name(&self) -> &str {
            &self.name
        }

        fn lookup<'a>(
            self: Rc<Self>,
            bindings: &'a Bindings,
            _context: &'a (),
            _patterns: &'a [Term],
        ) -> Matches<'a, SimpleMatcher> {
            let extended = bindings.extended("who", Term::atom("alice"));
            Box::new(std::iter::once(Ok(extended)))
        }
    }

    #[test]
    fn test_default_prove_equals_lookup() {
        let list = Rc::new(Unspecialized {
            name: "parent".to_string(),
        });
        let bindings = Bindings::new();
        let patterns = [Term::var("who")];

        let looked: Vec<_> = Rc::clone(&list)
            .lookup(&bindings, &(), &patterns)
            .map(Result::unwrap)
            .collect();
        let proved: Vec<_> = list
            .prove(&bindings, &(), &patterns)
            .map(Result::unwrap)
            .collect();
        assert_eq!(looked, proved);
    }

    #[test]
    fn test_default_reset_and_fc_refs_are_noops() {
        let list = Unspecialized {
            name: "parent".to_string(),
        };
        list.reset();
        assert!(list.fc_rule_refs().is_empty());
        assert_eq!(list.name(), "parent");
    }
}
