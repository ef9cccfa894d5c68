//! The matching seam between the dispatch core and the unification engine.
//!
//! The core never inspects bindings, pattern contexts, or patterns; it only
//! forwards them. [`MatchEngine`] fixes the shapes of those opaque values per
//! embedding, and [`Matches`] is the lazy result sequence every lookup and
//! proof produces.
//!
//! Binding semantics are copy-on-extend: `unify` receives the caller's
//! bindings by reference and returns a freshly extended environment on
//! success. Two search branches extending the same base therefore never
//! observe each other's extensions.

pub mod simple;

pub use simple::{Bindings, SimpleMatcher, Term};

use crate::error::SyllogResult;

/// The unification contract an embedding supplies to the dispatch core.
///
/// Associated types are `'static` so that match sequences can own snapshots
/// of shared state without lifetime entanglement with the stores they came
/// from.
pub trait MatchEngine: 'static {
    /// Accumulated variable assignments, extended copy-on-write.
    type Bindings: Clone + 'static;
    /// Surrounding match state, forwarded unchanged.
    type Context: 'static;
    /// A single pattern term.
    type Pattern: 'static;
    /// A stored fact, as the fact-bearing entity lists hold it.
    type Fact: 'static;

    /// Attempts to unify `patterns` against one stored `fact` under the
    /// given bindings.
    ///
    /// Returns `Ok(Some(extended))` with a new binding environment on
    /// success, `Ok(None)` when the fact does not match, and `Err` only for
    /// genuine engine failures (e.g. malformed patterns).
    ///
    /// # Errors
    /// Engine failures propagate unchanged through the match sequence.
    fn unify(
        &self,
        bindings: &Self::Bindings,
        context: &Self::Context,
        patterns: &[Self::Pattern],
        fact: &Self::Fact,
    ) -> SyllogResult<Option<Self::Bindings>>;
}

/// A lazy, pull-driven sequence of binding-extension results.
///
/// Produced by `lookup` and `prove`. Nothing is evaluated eagerly: dropping
/// the sequence early performs no work for unexplored alternatives, and a
/// fresh call to the producing operation restarts the sequence.
pub type Matches<'a, E> =
    Box<dyn Iterator<Item = SyllogResult<<E as MatchEngine>::Bindings>> + 'a>;

/// An empty match sequence.
///
/// Unknown entity names yield this rather than an error, so search code
/// never special-cases never-asserted predicates.
#[must_use]
pub fn no_matches<'a, E: MatchEngine>() -> Matches<'a, E> {
    Box::new(std::iter::empty())
}
