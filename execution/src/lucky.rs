//! Lucky-number block: ordered draws against one generator and their text rendering.

use std::fmt::Write;

use ecos_types::{DrawResult, Lang, Lottery};

use crate::draw::draw_unique;
use crate::rng::DrawRng;

/// Draw results, in the order they were drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LuckyNumbers {
    draws: Vec<(Lottery, DrawResult)>,
}

impl LuckyNumbers {
    /// Runs each lottery's draw in order against the same generator.
    ///
    /// The generator is never re-seeded between draws: every draw starts from the state
    /// the previous one left behind, so reordering `lotteries` changes the results from
    /// the first moved draw onwards.
    pub fn draw<R: DrawRng + ?Sized>(rng: &mut R, lotteries: &[Lottery]) -> Self {
        let draws = lotteries
            .iter()
            .map(|lottery| (*lottery, draw_unique(rng, &lottery.spec())))
            .collect();
        Self { draws }
    }

    pub fn draws(&self) -> &[(Lottery, DrawResult)] {
        &self.draws
    }

    pub fn get(&self, lottery: Lottery) -> Option<&DrawResult> {
        self.draws
            .iter()
            .find(|(candidate, _)| *candidate == lottery)
            .map(|(_, result)| result)
    }

    pub fn into_draws(self) -> Vec<(Lottery, DrawResult)> {
        self.draws
    }

    /// Renders the labelled block in `lang`.
    pub fn render(&self, lang: Lang) -> String {
        let (title, disclaimer) = match lang {
            Lang::Pt => (
                "🔢 Números da sorte baseados no sonho:",
                "Obs.: apenas diversão; sem garantia de resultados.",
            ),
            Lang::En => (
                "🔢 Lucky numbers based on the dream:",
                "Note: just for fun; no guarantee of results.",
            ),
        };
        let mut out = String::new();
        out.push('\n');
        out.push_str(title);
        for (lottery, result) in &self.draws {
            let _ = write!(out, "\n- {}: {}", lottery.label(), result);
        }
        out.push('\n');
        out.push_str(disclaimer);
        out
    }
}

/// Appends `block` to `text`, guaranteeing a newline between them.
pub fn append_block(text: &str, block: &str) -> String {
    let mut out = String::with_capacity(text.len() + block.len() + 1);
    out.push_str(text);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(block);
    out
}

const MODEL_SECTION_MARKERS: [&str; 3] = ["números da sorte", "numeros da sorte", "lucky numbers"];

/// Removes a lucky-number section the model may have written on its own.
///
/// Everything from the first line mentioning one of the section markers onwards is
/// dropped, along with trailing whitespace.
pub fn strip_model_lucky_section(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let lowered = line.to_lowercase();
        if MODEL_SECTION_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            return text[..offset].trim_end();
        }
        offset += line.len();
    }
    text.trim_end()
}
