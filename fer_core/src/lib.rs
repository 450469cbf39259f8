//! # fer_core - Ferraillage Tracking Engine
//!
//! `fer_core` is the domain heart of Suivifer, a client for tracking rebar
//! ("ferraillage") procurement and usage across construction sites. Everything
//! in this crate is pure, synchronous state: the HTTP layer lives in
//! `fer_api`, the terminal front-end in `fer_cli`.
//!
//! ## Design Philosophy
//!
//! - **Pure state machines**: guard decisions and wizard transitions are plain
//!   functions of their inputs, safe to re-evaluate at any time
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Lenient numerics**: user-entered quantities never fail to parse; bad
//!   input degrades to zero
//! - **French display conventions**: decimal comma, `dd/mm/yyyy` dates
//!
//! ## Quick Start
//!
//! ```rust
//! use fer_core::diameters::DiameterRange;
//! use fer_core::units::kg_per_meter;
//!
//! let mut range = DiameterRange::standard_run();
//! range.toggle(12);
//!
//! // A 12 mm bar weighs 144/162 kg per metre.
//! assert!((kg_per_meter(12) - 144.0 / 162.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`entitlement`] - User, subscription, plan and module state
//! - [`guard`] - Route-access decision machine over entitlement snapshots
//! - [`routes`] - Client-visible route table and href builders
//! - [`diameters`] - Two-tiered ordered diameter sets with boundary growth
//! - [`aggregate`] - Per-diameter totals over row collections
//! - [`numfmt`] - French-locale quantity parsing and formatting
//! - [`units`] - Weight units and the bar-weight rate
//! - [`rapport`] - Mouvement and restant row models
//! - [`niveaux`] - Per-level designation rows and derived totals
//! - [`wizard`] - Step controllers for the creation flows
//! - [`errors`] - Structured error types

pub mod aggregate;
pub mod diameters;
pub mod entitlement;
pub mod errors;
pub mod guard;
pub mod niveaux;
pub mod numfmt;
pub mod rapport;
pub mod routes;
pub mod units;
pub mod wizard;

// Re-export commonly used types at crate root for convenience
pub use diameters::DiameterRange;
pub use entitlement::{BillingCycle, Entitlement, ModuleKey, Plan, Subscription, User};
pub use errors::{FerError, FerResult};
pub use guard::{evaluate, GuardDecision, Location};
