//! Unique draws: K distinct integers from an inclusive range.

use std::collections::BTreeSet;

use ecos_types::{DrawResult, DrawSpec};
use tracing::trace;

use crate::rng::DrawRng;
use crate::Error;

/// Draws `spec.count()` distinct integers from `spec.min()..=spec.max()`.
///
/// Each step maps a fraction `f` to `floor(f * span) + min`; values already drawn are
/// discarded and the loop continues. [`DrawSpec`] guarantees `count <= span`, so the
/// loop terminates.
pub fn draw_unique<R: DrawRng + ?Sized>(rng: &mut R, spec: &DrawSpec) -> DrawResult {
    let span = spec.span() as f64;
    let target = spec.count() as usize;
    let mut selected = BTreeSet::new();
    let mut steps: u64 = 0;
    while selected.len() < target {
        let offset = (rng.next_fraction() * span).floor() as u64;
        let value = u64::from(spec.min()) + offset;
        // offset < span, so value <= max.
        selected.insert(value as u32);
        steps += 1;
    }
    trace!(count = target, min = spec.min(), max = spec.max(), steps, "unique draw complete");
    selected.into_iter().collect()
}

/// Validates raw draw parameters, then draws.
pub fn draw_unique_checked<R: DrawRng + ?Sized>(
    rng: &mut R,
    count: u32,
    min: u32,
    max: u32,
) -> Result<DrawResult, Error> {
    let spec = DrawSpec::new(count, min, max)?;
    Ok(draw_unique(rng, &spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Lcg, Mulberry32};
    use ecos_types::{DrawSpecError, Lottery, Seed};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn draws_requested_count_in_range_sorted() {
        let mut rng = Mulberry32::new(Seed(0));
        let spec = DrawSpec::new(6, 1, 60).unwrap();
        let result = draw_unique(&mut rng, &spec);
        assert_eq!(result.len(), 6);
        assert!(result.numbers().windows(2).all(|w| w[0] < w[1]));
        assert!(result.numbers().iter().all(|n| spec.contains(*n)));
    }

    #[test]
    fn zero_seed_lotofacil_is_stable() {
        let mut rng = Mulberry32::new(Seed(0));
        let result = draw_unique(&mut rng, &Lottery::Lotofacil.spec());
        assert_eq!(
            result.numbers(),
            &[1, 3, 4, 6, 7, 9, 11, 12, 14, 15, 16, 17, 19, 21, 23]
        );
    }

    #[test]
    fn exhaustive_draw_returns_whole_range() {
        let mut rng = Lcg::new(Seed(99));
        let spec = DrawSpec::new(25, 1, 25).unwrap();
        let result = draw_unique(&mut rng, &spec);
        assert_eq!(result.into_inner(), (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn single_value_range() {
        let mut rng = Mulberry32::new(Seed(3));
        let spec = DrawSpec::new(1, 7, 7).unwrap();
        assert_eq!(draw_unique(&mut rng, &spec).numbers(), &[7]);
    }

    #[test]
    fn range_at_u32_ceiling() {
        let mut rng = Mulberry32::new(Seed(11));
        let spec = DrawSpec::new(3, u32::MAX - 2, u32::MAX).unwrap();
        assert_eq!(
            draw_unique(&mut rng, &spec).into_inner(),
            vec![u32::MAX - 2, u32::MAX - 1, u32::MAX]
        );
    }

    #[test]
    fn same_state_same_result() {
        let spec = Lottery::DiaDeSorte.spec();
        let a = draw_unique(&mut Mulberry32::new(Seed(1234)), &spec);
        let b = draw_unique(&mut Mulberry32::new(Seed(1234)), &spec);
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_draw_fails_fast() {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut rng = Mulberry32::new(Seed(1));
            let _ = tx.send(draw_unique_checked(&mut rng, 30, 1, 25));
        });
        let result = rx
            .recv_timeout(Duration::from_secs(2))
            .expect("validation must not hang");
        match result {
            Err(Error::InvalidDrawSpec(DrawSpecError::CountExceedsRange { count, .. })) => {
                assert_eq!(count, 30)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn checked_draw_accepts_valid_spec() {
        let mut rng = Mulberry32::new(Seed(1));
        let result = draw_unique_checked(&mut rng, 3, 1, 5).unwrap();
        assert_eq!(result.len(), 3);
    }
}
