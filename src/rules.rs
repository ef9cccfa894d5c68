//! Opaque handles for the external chaining engines.
//!
//! Rule compilation and execution live outside this crate. The dispatch core
//! only needs two capabilities from them: forward-chaining rules that want to
//! be re-evaluated when matching facts are asserted, and backward-chaining
//! rules that produce proof matches on demand.

use std::fmt;
use std::rc::Rc;

use crate::matching::{MatchEngine, Matches};

/// A forward-chaining rule, notified when a watched fact is asserted.
pub trait ForwardRule<E: MatchEngine> {
    /// Rule name, for diagnostics.
    fn name(&self) -> &str;

    /// Called when a fact is asserted under an entity name this rule
    /// registered a reference for. `foreach_index` identifies which premise
    /// of the rule should be re-evaluated against `fact`.
    fn fact_asserted(&self, foreach_index: usize, fact: &E::Fact);
}

/// A backward-chaining rule, proving goals on demand.
pub trait BackwardRule<E: MatchEngine> {
    /// Rule name, for diagnostics.
    fn name(&self) -> &str;

    /// Produces the lazy sequence of binding extensions this rule can prove
    /// for `patterns` under the given bindings.
    fn prove<'a>(
        self: Rc<Self>,
        bindings: &'a E::Bindings,
        context: &'a E::Context,
        patterns: &'a [E::Pattern],
    ) -> Matches<'a, E>;
}

/// A registered forward-chaining dependency: which rule to notify, and at
/// which premise index, when a matching fact is asserted.
pub struct FcRuleRef<E: MatchEngine> {
    /// The rule to notify.
    pub rule: Rc<dyn ForwardRule<E>>,
    /// The premise index to re-evaluate.
    pub foreach_index: usize,
}

impl<E: MatchEngine> FcRuleRef<E> {
    /// Creates a new dependency reference.
    #[must_use]
    pub fn new(rule: Rc<dyn ForwardRule<E>>, foreach_index: usize) -> Self {
        Self {
            rule,
            foreach_index,
        }
    }
}

impl<E: MatchEngine> Clone for FcRuleRef<E> {
    fn clone(&self) -> Self {
        Self {
            rule: Rc::clone(&self.rule),
            foreach_index: self.foreach_index,
        }
    }
}

impl<E: MatchEngine> fmt::Debug for FcRuleRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FcRuleRef")
            .field("rule", &self.rule.name())
            .field("foreach_index", &self.foreach_index)
            .finish()
    }
}
