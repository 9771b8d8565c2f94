//! # Overview
//!
//! This crate computes the [tree edit distance] between two labeled ordered trees, that is the
//! lowest cost sequence of node insertions, deletions and relabelings that transforms one tree
//! into the other, according to a user-defined [CostModel].
//!
//! Two independent dynamic programming algorithms are provided:
//!
//! * [Selkow], which always relabels roots into one another and inserts or deletes whole
//!   subtrees, aligning the children of every pair of nodes like the characters of a string;
//! * [ZhangShasha], which may also insert or delete inner nodes on their own, driven by the
//!   keyroots of both trees.
//!
//! Both operate on an [IndexedTree], which numbers the nodes of any [Tree] in post-order.
//!
//! [tree edit distance]: https://en.wikipedia.org/wiki/Tree_edit_distance
//!
//! # Example
//!
//! ```rust
//! use forest_distance::*;
//!
//! enum Json {
//!     Null,
//!     Bool(bool),
//!     Number(f64),
//!     String(String),
//!     Array(Vec<Json>),
//!     Map(Vec<(String, Json)>),
//! }
//!
//! impl<'n> Node<'n> for Json {
//!     type Label = String;
//!     fn label(&'n self) -> Self::Label {
//!         match self {
//!             Json::Null => "null".into(),
//!             Json::Bool(b) => b.to_string(),
//!             Json::Number(n) => n.to_string(),
//!             Json::String(s) => s.clone(),
//!             Json::Array(_) => "[]".into(),
//!             Json::Map(_) => "{}".into(),
//!         }
//!     }
//! }
//!
//! impl<'t> Tree<'t> for Json {
//!     type Children = Box<dyn Iterator<Item = &'t Self> + 't>;
//!     fn children(&'t self) -> Self::Children {
//!         match self {
//!             Json::Array(a) => Box::new(a.iter()),
//!             Json::Map(m) => Box::new(m.iter().map(|(_, v)| v)),
//!             _ => Box::new(std::iter::empty()),
//!         }
//!     }
//! }
//! #
//! # impl From<serde_json::Value> for Json {
//! #     fn from(obj: serde_json::Value) -> Self {
//! #         use serde_json::Value::*;
//! #         match obj {
//! #             Null => Json::Null,
//! #             Bool(b) => Json::Bool(b),
//! #             Number(n) => Json::Number(n.as_i64().unwrap() as f64),
//! #             String(s) => Json::String(s),
//! #             Array(a) => Json::Array(a.into_iter().map(Into::into).collect()),
//! #             Object(m) => Json::Map(
//! #                 m.into_iter()
//! #                     .map(|(k, v)| (k, v.into()))
//! #                     .collect(),
//! #             ),
//! #         }
//! #     }
//! # }
//!
//! macro_rules! json {
//!     ($( $tokens:tt )*) => {
//!         // ...
//! #         Json::from(::serde_json::json!({$($tokens)*}))
//!     };
//! }
//!
//! let john = IndexedTree::new(&json! {
//!     "name": "John Doe",
//!     "age": 43,
//!     "phones": [
//!         "+44 1234567",
//!         "+44 2345678"
//!     ]
//! });
//!
//! let jane = IndexedTree::new(&json! {
//!     "name": "Jane Doe",
//!     "age": 40,
//!     "phones": [
//!         "+44 2345678"
//!     ]
//! });
//!
//! // Relabel the age and the name, delete a phone.
//! assert_eq!(ZhangShasha::new(&john, &jane).distance(), 3);
//! assert_eq!(Selkow::new(&john, &jane, UnitCost).cost(), 3);
//!
//! // Deleting and inserting the name is cheaper than relabeling "John" into "Jane".
//! assert_eq!(Selkow::new(&john, &jane, LevenshteinCost::default()).cost(), 4.);
//! ```
//!
//! # Memory
//!
//! [Selkow] memoizes up to `|T1| × |T2|` pairs of subtrees and [ZhangShasha] allocates two
//! `(|T1|+1) × (|T2|+1)` matrices, so comparing two trees of ten thousand nodes each takes
//! hundreds of millions of cells.

mod builder;
mod cost;
mod error;
mod indexed;
mod inspect;
mod selkow;
mod tree;
mod zhang_shasha;

pub use builder::*;
pub use cost::*;
pub use error::*;
pub use indexed::*;
pub use inspect::*;
pub use selkow::*;
pub use tree::*;
pub use zhang_shasha::*;

mod levenshtein;
mod memoize;

pub(crate) use levenshtein::*;
pub(crate) use memoize::*;
