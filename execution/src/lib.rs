//! Ecos da Cama lucky-number engine.
//!
//! This crate turns dream text into a reproducible set of lottery-style numbers:
//!
//! 1. [`seed`] derives a 32-bit [`Seed`] from the text (SHA-256 by default).
//! 2. [`rng`] advances a seeded generator (mulberry32 by default).
//! 3. [`draw`] picks K distinct integers from an inclusive range.
//! 4. [`lucky`] runs the draws in a fixed order and renders the text block.
//!
//! [`Oracle`] wires the steps together for one request.
//!
//! ## Determinism requirements
//! - Do not read wall-clock time or OS entropy anywhere in this crate.
//! - One generator per request; never share or re-seed it between draws.
//! - Draw order is part of the output: the same seed with a different lottery order
//!   yields different numbers.
//!
//! ## Example
//! ```rust
//! use ecos_execution::{Oracle, OracleConfig};
//! use ecos_types::Lang;
//!
//! let oracle = Oracle::new(OracleConfig::default());
//! let reading = oracle.read("Sonhei que voava sobre o mar", None);
//! let text = ecos_execution::append_block("Interpretação...", &reading.render(Lang::Pt));
//! assert!(text.contains("Mega-Sena"));
//! ```

pub mod draw;
pub mod lucky;
pub mod oracle;
pub mod rng;
pub mod seed;


use ecos_types::DrawSpecError;
use thiserror::Error;

pub use draw::{draw_unique, draw_unique_checked};
pub use ecos_types::Seed;
pub use lucky::{append_block, strip_model_lucky_section, LuckyNumbers};
pub use oracle::{Oracle, OracleConfig, Reading};
pub use rng::{DrawRng, Generator, GeneratorKind, Lcg, Mulberry32};
pub use seed::{rolling_seed, sha256_seed, SeedConvention, SeedStrategy};

/// Error type for draw operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid draw spec: {0}")]
    InvalidDrawSpec(#[from] DrawSpecError),
}
