//! Fact-bearing entity list variant.
//!
//! A `FactList` holds every fact asserted under one entity name. Facts split
//! into two stores: universal facts survive [`FactList::reset`], case-specific
//! facts are volatile state discarded between proof sessions. Lookup unifies
//! lazily against a snapshot of both stores via the injected match engine, and
//! asserting a fact notifies every registered forward-chaining dependency.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::entity_list::{EntityList, EntityListFactory};
use crate::matching::{MatchEngine, Matches};
use crate::rules::FcRuleRef;

/// All facts sharing one entity name.
pub struct FactList<E: MatchEngine> {
    name: String,
    engine: Rc<E>,
    universal: RefCell<Vec<Rc<E::Fact>>>,
    case_specific: RefCell<Vec<Rc<E::Fact>>>,
    fc_rule_refs: RefCell<Vec<FcRuleRef<E>>>,
}

impl<E: MatchEngine> FactList<E> {
    /// Creates an empty fact list for `name`, matching via `engine`.
    #[must_use]
    pub fn new(name: impl Into<String>, engine: Rc<E>) -> Self {
        Self {
            name: name.into(),
            engine,
            universal: RefCell::new(Vec::new()),
            case_specific: RefCell::new(Vec::new()),
            fc_rule_refs: RefCell::new(Vec::new()),
        }
    }

    /// Returns an entity list factory producing fact lists over `engine`.
    #[must_use]
    pub fn factory(engine: Rc<E>) -> EntityListFactory<E> {
        Box::new(move |name: &str| {
            let list: Rc<dyn EntityList<E>> = Rc::new(FactList::new(name, Rc::clone(&engine)));
            list
        })
    }

    /// Adds a fact that survives `reset`. Returns false (and does not
    /// notify) if an equal fact is already stored.
    pub fn add_universal_fact(&self, fact: E::Fact) -> bool
    where
        E::Fact: PartialEq,
    {
        if self.contains(&fact) {
            return false;
        }
        let fact = Rc::new(fact);
        self.universal.borrow_mut().push(Rc::clone(&fact));
        self.notify_fc_rules(&fact);
        true
    }

    /// Asserts a case-specific fact, discarded by the next `reset`. Returns
    /// false (and does not notify) if an equal fact is already stored.
    pub fn assert_fact(&self, fact: E::Fact) -> bool
    where
        E::Fact: PartialEq,
    {
        if self.contains(&fact) {
            return false;
        }
        let fact = Rc::new(fact);
        self.case_specific.borrow_mut().push(Rc::clone(&fact));
        self.notify_fc_rules(&fact);
        true
    }

    /// Retracts a case-specific fact. Universal facts are structural and
    /// cannot be retracted. Returns true if a fact was removed.
    pub fn retract_fact(&self, fact: &E::Fact) -> bool
    where
        E::Fact: PartialEq,
    {
        let mut case_specific = self.case_specific.borrow_mut();
        match case_specific.iter().position(|stored| **stored == *fact) {
            Some(index) => {
                case_specific.remove(index);
                true
            }
            None => false,
        }
    }

    /// Total number of stored facts, universal plus case-specific.
    #[must_use]
    pub fn fact_count(&self) -> usize {
        self.universal.borrow().len() + self.case_specific.borrow().len()
    }

    fn contains(&self, fact: &E::Fact) -> bool
    where
        E::Fact: PartialEq,
    {
        self.universal
            .borrow()
            .iter()
            .chain(self.case_specific.borrow().iter())
            .any(|stored| **stored == *fact)
    }

    /// Snapshot of shared fact handles; lookups iterate the snapshot so a
    /// rule asserting mid-search never invalidates a live sequence.
    fn snapshot(&self) -> Vec<Rc<E::Fact>> {
        self.universal
            .borrow()
            .iter()
            .chain(self.case_specific.borrow().iter())
            .map(Rc::clone)
            .collect()
    }

    fn notify_fc_rules(&self, fact: &E::Fact) {
        // Snapshot first: a notified rule may register further refs here.
        let refs: Vec<FcRuleRef<E>> = self.fc_rule_refs.borrow().clone();
        for fc_ref in refs {
            fc_ref.rule.fact_asserted(fc_ref.foreach_index, fact);
        }
    }
}

impl<E: MatchEngine> EntityList<E> for FactList<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup<'a>(
        self: Rc<Self>,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        let facts = self.snapshot();
        let engine = Rc::clone(&self.engine);
        Box::new(facts.into_iter().filter_map(move |fact| {
            match engine.unify(bindings, context, patterns, &fact) {
                Ok(Some(extended)) => Some(Ok(extended)),
                Ok(None) => None,
                Err(err) => Some(Err(err)),
            }
        }))
    }

    fn reset(&self) {
        tracing::trace!(entity = %self.name, "clearing case-specific facts");
        self.case_specific.borrow_mut().clear();
    }

    fn add_fc_rule_ref(&self, fc_ref: FcRuleRef<E>) {
        self.fc_rule_refs.borrow_mut().push(fc_ref);
    }

    fn fc_rule_refs(&self) -> Vec<FcRuleRef<E>> {
        self.fc_rule_refs.borrow().clone()
    }
}

impl<E: MatchEngine> fmt::Debug for FactList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactList")
            .field("name", &self.name)
            .field("universal", &self.universal.borrow().len())
            .field("case_specific", &self.case_specific.borrow().len())
            .field("fc_rule_refs", &self.fc_rule_refs.borrow().len())
            .finish()
    }
}
