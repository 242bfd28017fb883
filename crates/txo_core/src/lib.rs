//! # txo_core: Payoff Foundation for the TXO Buyer Calculator
//!
//! ## Foundation Layer Role
//!
//! txo_core is the bottom layer of the workspace and provides:
//! - Option side and position types: `OptionType`, `OptionPosition`, `PositionPair` (`types`)
//! - Contract specification with the injected multiplier: `ContractSpec` (`types`)
//! - Expiry profit/loss and breakeven: `PayoffModel`, `breakeven` (`payoff`)
//! - Comparison curve sampling: `PayoffCurve`, `CurveConfig` (`curve`)
//! - Error types: `PayoffError` (`error`)
//!
//! Everything here is pure computation. Rendering and I/O live in the
//! presentation and service crates.
//!
//! ## Usage Examples
//!
//! ```rust
//! use txo_core::{breakeven, ContractSpec, OptionType, PayoffModel};
//!
//! let model = PayoffModel::new(ContractSpec::txo());
//!
//! // Buy one 17000 call for 150 points, settle at 17300
//! let pl = model
//!     .profit_loss(17_300.0, 17_000.0, 150.0, 1, OptionType::Call)
//!     .unwrap();
//! assert_eq!(pl, 7_500.0);
//!
//! assert_eq!(breakeven(17_000.0, 150.0, OptionType::Put), 16_850.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for the domain types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod curve;
pub mod error;
pub mod payoff;
pub mod types;

pub use curve::{
    sample_curve, CurveConfig, CurvePoint, CurvePoints, PayoffCurve, MAX_CURVE_POINTS,
};
pub use error::PayoffError;
pub use payoff::{breakeven, PayoffModel, PayoffPoint};
pub use types::{ContractSpec, OptionPosition, OptionType, PositionPair, TXO_MULTIPLIER};
