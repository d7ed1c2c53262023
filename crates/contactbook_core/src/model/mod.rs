//! Domain model for customers and their meetings.
//!
//! # Responsibility
//! - Define the value types handed between stores and the presentation layer.
//! - Define the `Entity` contract shared by every stored record.
//!
//! # Invariants
//! - Identity is the store-assigned `EntityId`; other fields never take part
//!   in equality.
//! - Deletion is a hard delete; there are no tombstones.

pub mod customer;
pub mod entity;
pub mod meeting;
