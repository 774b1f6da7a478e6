//! Shared value types for the Ecos da Cama backend.
//!
//! The deterministic draw engine lives in `ecos-execution`; this crate only holds
//! the values that cross crate boundaries (seeds, draw parameters, draw results)
//! and the JSON bodies exchanged with the mobile client.

pub mod api;
pub mod draw;

pub use api::{
    DrawView, ErrorResponse, GeminiInterpretRequest, GeminiInterpretResponse, HealthzResponse,
    InterpretRequest, InterpretResponse, LuckyNumbersRequest, LuckyNumbersResponse,
};
pub use draw::{DrawResult, DrawSpec, DrawSpecError, Lang, Lottery, Seed};

/// Maximum accepted dream length, in characters.
pub const MAX_DREAM_CHARS: usize = 4000;

/// Minimum dream length accepted by the `/interpret-dream` route, in characters.
pub const MIN_DREAM_CHARS: usize = 10;
