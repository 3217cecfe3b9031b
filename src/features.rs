//! Pluggable symbol feature extraction.
//!
//! The dataset loader does not look inside image files itself: it asks a
//! [`FeatureProvider`] for frequency, contour and similarity facts about each
//! symbol. The provider shipped here fabricates values with a seedable RNG,
//! standing in for a vision pipeline that can be dropped in later.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A similarity link from one symbol to another.
///
/// `target` is a symbol reference of the form `{script}_{symbolId}`. Targets
/// are not required to exist in the graph; dangling references are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityLink {
    pub target: String,
    /// Score in [0.0, 1.0].
    pub score: f32,
}

/// Feature facts for a single symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolFeatures {
    /// Usage frequency, non-negative.
    pub frequency: u32,
    /// Contour count of the glyph outline, when available.
    pub contour_count: Option<u32>,
    /// Cross-script similarity links.
    pub similarities: Vec<SimilarityLink>,
}

/// Computes feature facts for symbols as they are loaded.
///
/// Returning `None` is the "no features" sentinel: the symbol keeps its base
/// triples but gets no frequency, contour or similarity facts. Providers
/// should return it for images they cannot read.
pub trait FeatureProvider {
    fn compute_features(
        &mut self,
        script: &str,
        symbol_id: &str,
        image_path: &Path,
    ) -> Option<SymbolFeatures>;
}

/// Fabricates features from a seedable RNG instead of inspecting image data.
///
/// Value ranges mirror the behavior a real provider must preserve as its
/// contract: frequency in [1, 100), contour count in [1, 10), similarity
/// scores in [0.5, 0.95] rounded to two decimals. Similarity links are
/// emitted with probability 0.3 per symbol, one per configured target
/// script, pointing at a fabricated `{target}_symbol_{n}` reference.
pub struct RandomStubProvider {
    rng: StdRng,
    link_targets: Vec<String>,
    link_probability: f64,
}

impl RandomStubProvider {
    /// Provider with an entropy-seeded RNG.
    pub fn new(link_targets: Vec<String>) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            link_targets,
            link_probability: 0.3,
        }
    }

    /// Provider with a fixed seed, for reproducible graphs.
    pub fn with_seed(seed: u64, link_targets: Vec<String>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            link_targets,
            link_probability: 0.3,
        }
    }
}

impl FeatureProvider for RandomStubProvider {
    fn compute_features(
        &mut self,
        _script: &str,
        _symbol_id: &str,
        image_path: &Path,
    ) -> Option<SymbolFeatures> {
        // An unreadable or empty image yields the sentinel.
        let readable = std::fs::metadata(image_path)
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false);
        if !readable {
            return None;
        }

        let frequency = self.rng.gen_range(1..100);
        let contour_count = Some(self.rng.gen_range(1..10));

        let mut similarities = Vec::new();
        if self.rng.gen_bool(self.link_probability) {
            for target in &self.link_targets {
                let target_symbol = format!("{target}_symbol_{}", self.rng.gen_range(1..50));
                let score = (self.rng.gen_range(0.5_f32..0.95) * 100.0).round() / 100.0;
                similarities.push(SimilarityLink {
                    target: target_symbol,
                    score,
                });
            }
        }

        Some(SymbolFeatures {
            frequency,
            contour_count,
            similarities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_respects_documented_ranges() {
        let dir = tempfile::TempDir::new().unwrap();
        let image = dir.path().join("glyph.png");
        std::fs::write(&image, b"not really a png").unwrap();

        let mut provider = RandomStubProvider::with_seed(7, vec!["yi".into()]);
        for _ in 0..200 {
            let features = provider
                .compute_features("indus", "glyph", &image)
                .expect("readable image must yield features");
            assert!((1..100).contains(&features.frequency));
            let contours = features.contour_count.unwrap();
            assert!((1..10).contains(&contours));
            for link in &features.similarities {
                assert!(link.score >= 0.5 && link.score <= 0.95);
                assert!(link.target.starts_with("yi_symbol_"));
            }
        }
    }

    #[test]
    fn stub_is_deterministic_under_a_seed() {
        let dir = tempfile::TempDir::new().unwrap();
        let image = dir.path().join("glyph.png");
        std::fs::write(&image, b"data").unwrap();

        let mut a = RandomStubProvider::with_seed(42, vec!["ba-shu".into()]);
        let mut b = RandomStubProvider::with_seed(42, vec!["ba-shu".into()]);
        for _ in 0..50 {
            assert_eq!(
                a.compute_features("indus", "g", &image),
                b.compute_features("indus", "g", &image)
            );
        }
    }

    #[test]
    fn unreadable_image_yields_sentinel() {
        let dir = tempfile::TempDir::new().unwrap();
        let empty = dir.path().join("empty.png");
        std::fs::write(&empty, b"").unwrap();
        let missing = dir.path().join("missing.png");

        let mut provider = RandomStubProvider::with_seed(1, Vec::new());
        assert!(provider.compute_features("indus", "empty", &empty).is_none());
        assert!(provider
            .compute_features("indus", "missing", &missing)
            .is_none());
    }
}
