//! Reference match engine over symbolic terms.
//!
//! This module provides a small unifier for embedded usage, tests, and as a
//! reference implementation of the [`MatchEngine`] contract. Facts are tuples
//! of ground or pattern-bearing terms; bindings extend copy-on-write.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SyllogResult;
use crate::matching::MatchEngine;

/// Upper bound on variable chain hops during dereferencing.
///
/// Guards against reference cycles that unification without an occurs check
/// can produce.
const MAX_VAR_HOPS: usize = 64;

/// A symbolic term: the unit patterns and facts are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// A pattern variable, bound during matching.
    Var(String),
    /// A named constant.
    Atom(String),
    /// An opaque ground payload, compared for equality only.
    Value(serde_json::Value),
    /// An ordered sequence of sub-terms.
    List(Vec<Term>),
}

impl Term {
    /// Creates a pattern variable.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// Creates a named constant.
    #[must_use]
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Creates a ground payload term.
    #[must_use]
    pub fn value(value: impl Into<serde_json::Value>) -> Self {
        Self::Value(value.into())
    }

    /// Creates a list term.
    #[must_use]
    pub fn list(items: Vec<Term>) -> Self {
        Self::List(items)
    }

    /// Returns true if the term contains no variables.
    #[must_use]
    pub fn is_ground(&self) -> bool {
        match self {
            Self::Var(_) => false,
            Self::Atom(_) | Self::Value(_) => true,
            Self::List(items) => items.iter().all(Term::is_ground),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "${name}"),
            Self::Atom(name) => write!(f, "{name}"),
            Self::Value(value) => write!(f, "{value}"),
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A binding environment: variable assignments accumulated during matching.
///
/// Extension is copy-on-write. [`Bindings::extended`] returns a new
/// environment and leaves the receiver untouched, so sibling search branches
/// never alias each other's extensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    map: HashMap<String, Term>,
}

impl Bindings {
    /// Creates an empty binding environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the term bound to `var`, if any.
    #[must_use]
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.map.get(var)
    }

    /// Returns a new environment with `var` additionally bound to `term`.
    #[must_use]
    pub fn extended(&self, var: impl Into<String>, term: Term) -> Self {
        let mut map = self.map.clone();
        map.insert(var.into(), term);
        Self { map }
    }

    /// Resolves a term against this environment, following variable chains
    /// and descending into lists.
    ///
    /// Unresolvable variables are returned as-is.
    #[must_use]
    pub fn resolve(&self, term: &Term) -> Term {
        self.resolve_bounded(term, MAX_VAR_HOPS)
    }

    fn resolve_bounded(&self, term: &Term, budget: usize) -> Term {
        if budget == 0 {
            return term.clone();
        }
        match term {
            Term::Var(name) => match self.map.get(name) {
                Some(bound) => self.resolve_bounded(bound, budget - 1),
                None => term.clone(),
            },
            Term::List(items) => Term::List(
                items
                    .iter()
                    .map(|item| self.resolve_bounded(item, budget - 1))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no variables are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Follows variable chains without allocating, up to the hop bound.
fn deref<'t>(bindings: &'t Bindings, term: &'t Term) -> &'t Term {
    let mut current = term;
    let mut hops = 0;
    while let Term::Var(name) = current {
        match bindings.get(name) {
            Some(next) if hops < MAX_VAR_HOPS => {
                current = next;
                hops += 1;
            }
            _ => break,
        }
    }
    current
}

/// Unifies two terms under an environment, returning the extended
/// environment on success.
///
/// Symmetric: either side may carry variables. No occurs check is performed;
/// [`Bindings::resolve`] bounds chain traversal instead.
#[must_use]
pub fn unify_terms(bindings: &Bindings, left: &Term, right: &Term) -> Option<Bindings> {
    let left = deref(bindings, left).clone();
    let right = deref(bindings, right).clone();
    match (left, right) {
        (Term::Var(a), Term::Var(b)) if a == b => Some(bindings.clone()),
        (Term::Var(name), other) | (other, Term::Var(name)) => {
            Some(bindings.extended(name, other))
        }
        (Term::Atom(a), Term::Atom(b)) => (a == b).then(|| bindings.clone()),
        (Term::Value(a), Term::Value(b)) => (a == b).then(|| bindings.clone()),
        (Term::List(a), Term::List(b)) => {
            if a.len() != b.len() {
                return None;
            }
            let mut current = bindings.clone();
            for (x, y) in a.iter().zip(b.iter()) {
                current = unify_terms(&current, x, y)?;
            }
            Some(current)
        }
        _ => None,
    }
}

/// Reference [`MatchEngine`] over [`Term`] tuples.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleMatcher;

impl MatchEngine for SimpleMatcher {
    type Bindings = Bindings;
    type Context = ();
    type Pattern = Term;
    type Fact = Vec<Term>;

    fn unify(
        &self,
        bindings: &Bindings,
        _context: &(),
        patterns: &[Term],
        fact: &Vec<Term>,
    ) -> SyllogResult<Option<Bindings>> {
        if patterns.len() != fact.len() {
            return Ok(None);
        }
        let mut current = bindings.clone();
        for (pattern, term) in patterns.iter().zip(fact.iter()) {
            match unify_terms(&current, pattern, term) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}
