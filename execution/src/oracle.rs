//! Per-request composition of seed derivation, generator and draws.

use ecos_types::{Lang, Lottery, Seed};
use tracing::debug;

use crate::lucky::LuckyNumbers;
use crate::rng::GeneratorKind;
use crate::seed::{SeedConvention, SeedStrategy};

/// Variant choices for the lucky-number draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    pub strategy: SeedStrategy,
    pub generator: GeneratorKind,
    pub convention: SeedConvention,
    pub lotteries: Vec<Lottery>,
}

impl Default for OracleConfig {
    /// SHA-256 seed over the dream text, mulberry32, canonical draw order.
    fn default() -> Self {
        Self {
            strategy: SeedStrategy::Sha256,
            generator: GeneratorKind::Mulberry32,
            convention: SeedConvention::DreamOnly,
            lotteries: Lottery::CANONICAL.to_vec(),
        }
    }
}

impl OracleConfig {
    /// Rolling hash over `dream|prompt` with the linear-congruential generator.
    pub fn legacy() -> Self {
        Self {
            strategy: SeedStrategy::Rolling,
            generator: GeneratorKind::Lcg,
            convention: SeedConvention::DreamWithPrompt,
            lotteries: Lottery::CANONICAL.to_vec(),
        }
    }
}

/// Output of one oracle run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub seed: Seed,
    pub numbers: LuckyNumbers,
}

impl Reading {
    pub fn render(&self, lang: Lang) -> String {
        self.numbers.render(lang)
    }
}

/// Stateless lucky-number oracle. Every call builds its own generator.
#[derive(Clone, Debug, Default)]
pub struct Oracle {
    config: OracleConfig,
}

impl Oracle {
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn seed_for(&self, dream: &str, prompt: Option<&str>) -> Seed {
        let source = self.config.convention.source(dream, prompt);
        self.config.strategy.derive(&source)
    }

    /// Derives the seed once, then runs every configured draw against one generator.
    pub fn read(&self, dream: &str, prompt: Option<&str>) -> Reading {
        let seed = self.seed_for(dream, prompt);
        self.read_seed(seed)
    }

    pub fn read_seed(&self, seed: Seed) -> Reading {
        let mut rng = self.config.generator.build(seed);
        let numbers = LuckyNumbers::draw(&mut rng, &self.config.lotteries);
        debug!(%seed, draws = numbers.draws().len(), "lucky numbers drawn");
        Reading { seed, numbers }
    }
}
