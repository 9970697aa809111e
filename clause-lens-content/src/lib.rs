//! Content layer for clause-lens.
//!
//! Holds the records that feed the segmentation engine and decides where each
//! one comes from: an optional editable store first, the static bundle
//! compiled into this crate otherwise.
//!
//! ## Modules
//!
//! - [`model`] - Content records (clauses, terms, concepts, cases, explainers,
//!   Q&A, war stories)
//! - [`bundle`] - Static RON bundle and the built-in content
//! - [`store`] - [`ContentStore`] seam and [`MemoryStore`]
//! - [`resolver`] - Store-first resolution with bundle fallback
//! - [`view`] - Clause tab, explainer and Q&A answer view assembly
//! - [`lint`] - Checks for content the engine would silently ignore
//!
//! ## Example
//!
//! ```
//! use clause_lens::AnnotationToggle;
//! use clause_lens_content::{
//!     annotated_clauses, AnnotationKey, ContentBundle, ContentResolver, Level, MemoryStore,
//!     StoreConfig,
//! };
//!
//! let bundle = ContentBundle::builtin().unwrap();
//! let resolver = ContentResolver::with_store(bundle, MemoryStore::new(), &StoreConfig::default());
//!
//! let clauses = resolver.clauses("structure", None);
//! let annotations = resolver.annotations("structure", None);
//! let catalog = resolver.term_catalog();
//! let mut toggle = AnnotationToggle::new();
//! toggle.toggle(AnnotationKey::new("c1", Level::Junior));
//!
//! let views = annotated_clauses(&clauses, &annotations, Level::Junior, &catalog, &toggle);
//! assert!(views[0].is_open);
//! assert!(views[0].note.is_some());
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod lint;
pub mod model;
pub mod resolver;
pub mod store;
pub mod view;

pub use bundle::ContentBundle;
pub use config::{StoreConfig, STORE_URL_ENV};
pub use error::{ContentError, ContentResult};
pub use lint::{lint_bundle, ContentIssue, EmbedSource};
pub use model::{
    AnnotationRow, CaseRecord, Clause, ClauseSection, ConceptRecord, Explainer, Level,
    LevelAnnotations, NegotiationPoint, Provision, QaItem, TermRecord, WarStory,
};
pub use resolver::{AnnotationIndex, ContentResolver};
pub use store::{ContentStore, MemoryStore};
pub use view::{
    annotated_clauses, explainer_nodes, qa_answer_nodes, term_catalog, AnnotationKey, ClauseView,
};
