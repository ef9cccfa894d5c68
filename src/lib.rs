//! # syllog — namespace and dispatch core for rule-based inference
//!
//! syllog organizes knowledge entities (facts or rules) into named containers
//! and routes lookup and proof queries to the right container. It is the
//! dispatch layer under a rule-based inference system: pattern matching,
//! binding environments, rule compilation, and the chaining engines are
//! external collaborators reached through the [`MatchEngine`],
//! [`ForwardRule`], and [`BackwardRule`] seams.
//!
//! ## Core Concepts
//!
//! - **Registry**: two disjoint process namespaces (knowledge bases, rule
//!   bases) with a combined uniqueness invariant
//! - **KnowledgeBase**: a named container dispatching `base.entity(...)`
//!   references to the entity list for `entity`
//! - **EntityList**: all entities sharing one name; fact-bearing
//!   ([`FactList`]) and rule-bearing ([`RuleList`]) variants
//! - **Matches**: lazy, restartable sequences of binding extensions,
//!   consumed on demand by an external backtracking search
//!
//! ## Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use syllog::{Bindings, FactList, KnowledgeBase, Registry, SimpleMatcher, Term};
//!
//! let engine = Rc::new(SimpleMatcher);
//! let mut registry = Registry::new();
//! let kb = KnowledgeBase::new("family").with_factory(FactList::factory(Rc::clone(&engine)));
//! let kb = registry.add_knowledge_base(kb).unwrap();
//!
//! // Assert a fact under "parent" and query it back.
//! let parents = Rc::new(FactList::new("parent", engine));
//! parents.add_universal_fact(vec![Term::atom("alice"), Term::atom("bob")]);
//! kb.add_entity_list(parents).unwrap();
//!
//! let bindings = Bindings::new();
//! let patterns = [Term::var("who"), Term::atom("bob")];
//! let mut matches = kb.lookup(&bindings, &(), "parent", &patterns);
//! let found = matches.next().unwrap().unwrap();
//! assert_eq!(found.get("who"), Some(&Term::atom("alice")));
//! ```
//!
//! The core is single-threaded by contract: mutations to one base must be
//! externally serialized when embedded in a multithreaded host.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod entity_list;
pub mod error;
pub mod fact_list;
pub mod knowledge_base;
pub mod matching;
pub mod registry;
pub mod rule_base;
pub mod rule_list;
pub mod rules;

// Re-export primary types at crate root for convenience
pub use entity_list::{EntityList, EntityListFactory};
pub use error::{SyllogError, SyllogResult};
pub use fact_list::FactList;
pub use knowledge_base::{InitHook, KnowledgeBase};
pub use matching::{no_matches, Bindings, MatchEngine, Matches, SimpleMatcher, Term};
pub use registry::{BaseKind, Registry};
pub use rule_base::RuleBase;
pub use rule_list::RuleList;
pub use rules::{BackwardRule, FcRuleRef, ForwardRule};
