//! Core type definitions for tablink.
//!
//! A table arrives with its columns already classified into named-entity
//! (NE), literal (LIT), and untagged (NOTAG) columns. This crate holds the
//! input shapes ([`Table`], [`RowInput`], [`Target`]) and the built artifact
//! the rest of the pipeline mutates: [`Row`]s of tagged [`Cell`]s, where NE
//! cells carry a ranked list of [`Candidate`] entities.
//!
//! The cell variant is chosen exactly once, at classification time, from the
//! target sets — never inferred later from which fields happen to be filled.

mod candidate;
mod cell;
mod table;
mod target;

pub use candidate::{Candidate, TypeRef};
pub use cell::{Cell, LitCell, NeCell, NoTagCell, Row};
pub use table::{RowInput, Table};
pub use target::{ColumnTag, Target, TargetError};
