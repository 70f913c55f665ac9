//! # sovran-variant
//!
//! Sum and optional types whose payloads live in lazily allocated heap slots.
//!
//! Storing a sum type's payload inline makes recursive structures impossible:
//! a tree node that holds a variant which may hold a tree node has no finite
//! size. The usual fix is a nullable pointer, which brings back the "might be
//! missing" state the variant was supposed to rule out. `sovran-variant`
//! instead gives every alternative its own lazily allocated slot, so a
//! container is always a fixed number of pointers wide, and tracks which
//! alternative is current by stamping each write with a process-wide
//! monotonic clock.
//!
//! ## Key Features
//!
//! - **Recursion-friendly**: [`OneOf`] and [`Optional`] are pointer-sized per
//!   alternative no matter how large the payload is
//! - **No discriminant**: the active alternative is the most recently written one
//! - **Allocation reuse**: switching back to an earlier alternative overwrites its
//!   retained storage instead of allocating again
//! - **Visitor dispatch**: one handler per alternative, one shared result type
//! - **Thread-safe sharing**: [`SharedOneOf`] wraps a container in `Arc<Mutex<_>>`
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_variant::{Handle, OneOf, VariantError, Visitor};
//!
//! struct Score;
//!
//! impl Visitor for Score {
//!     type Result = i32;
//! }
//!
//! impl Handle<i32> for Score {
//!     fn handle(&mut self, value: &i32) -> i32 {
//!         value * 2
//!     }
//! }
//!
//! impl Handle<bool> for Score {
//!     fn handle(&mut self, value: &bool) -> i32 {
//!         if *value { 32 } else { 42 }
//!     }
//! }
//!
//! fn main() -> Result<(), VariantError> {
//!     let mut value = OneOf::<(i32, bool)>::of::<0>(11);
//!     assert_eq!(value.visit(&mut Score)?, 22);
//!
//!     value.set::<1>(true);
//!     assert_eq!(value.visit(&mut Score)?, 32);
//!
//!     value.set::<1>(false);
//!     assert_eq!(value.visit(&mut Score)?, 42);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Recursive Structures
//!
//! ```rust
//! use sovran_variant::OneOf;
//!
//! #[derive(Clone)]
//! struct Tree {
//!     node: OneOf<(u32, Branch)>,
//! }
//!
//! #[derive(Clone)]
//! struct Branch {
//!     left: Tree,
//!     right: Tree,
//! }
//!
//! fn leaf(n: u32) -> Tree {
//!     Tree { node: OneOf::of::<0>(n) }
//! }
//!
//! fn sum(tree: &Tree) -> u32 {
//!     match (tree.node.get::<0>(), tree.node.get::<1>()) {
//!         (Some(n), _) => *n,
//!         (_, Some(branch)) => sum(&branch.left) + sum(&branch.right),
//!         _ => 0,
//!     }
//! }
//!
//! let tree = Tree {
//!     node: OneOf::of::<1>(Branch { left: leaf(1), right: leaf(2) }),
//! };
//! assert_eq!(sum(&tree), 3);
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use sovran_variant::{OneOf, VariantError};
//!
//! let mut value = OneOf::<(String, u64)>::new();
//!
//! // Nothing written yet
//! match value.with::<0, _, _>(|s| s.len()) {
//!     Ok(len) => println!("Length: {}", len),
//!     Err(VariantError::NoActiveAlternative) => println!("Nothing stored yet"),
//!     Err(e) => println!("Other error: {}", e),
//! }
//!
//! value.set::<1>(7);
//!
//! // Asking for the wrong alternative
//! match value.with::<0, _, _>(|s| s.len()) {
//!     Ok(len) => println!("Length: {}", len),
//!     Err(VariantError::InactiveAlternative { requested, active }) => {
//!         println!("Wanted {}, but {} is active", requested, active)
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Behavior Notes
//!
//! - Visiting a [`OneOf`] that was never written returns
//!   [`VariantError::NoActiveAlternative`]; visiting an empty [`Optional`]
//!   returns `None`.
//! - Writing one alternative never frees another's storage. The previous value
//!   stays reachable through [`OneOf::retained`] until it is overwritten or the
//!   container is dropped.
//! - A single `OneOf` or `Optional` is not synchronized. Share it across threads
//!   through [`SharedOneOf`] or your own lock.

pub mod clock;
mod error;
mod one_of;
mod optional;
mod shared;
mod slot;
mod visit;

pub use clock::{Clock, GlobalClock, RecencyClock, Stamp};
pub use error::VariantError;
pub use one_of::{Alternatives, CloneAlternatives, OneOf, Record, Select};
pub use optional::Optional;
pub use shared::SharedOneOf;
pub use slot::Slot;
pub use visit::{Dispatch, Handle, Visitor};
