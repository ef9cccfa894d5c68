//! Rule-bearing entity list variant.
//!
//! A `RuleList` holds the backward-chaining rules sharing one entity name.
//! Rules are not facts: `lookup` yields nothing, while `prove` lazily chains
//! the proof sequence of every stored rule. Rule bodies themselves execute in
//! the external chaining engine behind [`BackwardRule`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::entity_list::{EntityList, EntityListFactory};
use crate::matching::{no_matches, MatchEngine, Matches};
use crate::rules::BackwardRule;

/// All backward-chaining rules sharing one entity name.
pub struct RuleList<E: MatchEngine> {
    name: String,
    rules: RefCell<Vec<Rc<dyn BackwardRule<E>>>>,
}

impl<E: MatchEngine> RuleList<E> {
    /// Creates an empty rule list for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: RefCell::new(Vec::new()),
        }
    }

    /// Returns an entity list factory producing empty rule lists.
    #[must_use]
    pub fn factory() -> EntityListFactory<E> {
        Box::new(|name: &str| {
            let list: Rc<dyn EntityList<E>> = Rc::new(RuleList::new(name));
            list
        })
    }

    /// Appends a rule. Rules prove in insertion order.
    pub fn add_rule(&self, rule: Rc<dyn BackwardRule<E>>) {
        self.rules.borrow_mut().push(rule);
    }

    /// Number of stored rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.borrow().len()
    }
}

impl<E: MatchEngine> EntityList<E> for RuleList<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup<'a>(
        self: Rc<Self>,
        _bindings: &'a E::Bindings,
        _context: &'a E::Context,
        _patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        // Pure matching finds no stored facts here.
        no_matches::<E>()
    }

    fn prove<'a>(
        self: Rc<Self>,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E> {
        let rules: Vec<Rc<dyn BackwardRule<E>>> = self.rules.borrow().iter().map(Rc::clone).collect();
        Box::new(
            rules
                .into_iter()
                .flat_map(move |rule| rule.prove(bindings, context, patterns)),
        )
    }
}

impl<E: MatchEngine> fmt::Debug for RuleList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleList")
            .field("name", &self.name)
            .field("rules", &self.rules.borrow().len())
            .finish()
    }
}
