use std::sync::Mutex;

use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::models::{EmotionScores, Sentiment, TextAnalysis, VoiceAnalysis, VoiceFeatures};

use super::{
    config::{Band, ScoringConfig},
    EmotionScorer, VoiceSample,
};

const ENABLE_LOGS: bool = false;

use crate::log_debug;

/// Keyword-biased uniform scorer.
pub struct KeywordScorer {
    config: ScoringConfig,
    rng: Mutex<StdRng>,
}

impl KeywordScorer {
    pub fn new(config: ScoringConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ScoringConfig {
            seed: Some(seed),
            ..ScoringConfig::default()
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

fn draw(rng: &mut StdRng, band: Band) -> f64 {
    if band.span <= 0.0 {
        return band.base;
    }
    band.base + rng.gen_range(0.0..band.span)
}

/// Emotion and sentiment figures live in [0, 1].
fn draw_unit(rng: &mut StdRng, band: Band) -> f64 {
    draw(rng, band).clamp(0.0, 1.0)
}

fn draw_risk(rng: &mut StdRng, band: Band) -> f64 {
    draw(rng, band).clamp(0.0, 100.0)
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

impl EmotionScorer for KeywordScorer {
    fn score_text(&self, text: &str) -> TextAnalysis {
        let lowered = text.to_lowercase();
        let bands = &self.config.text;

        let (emotions, sentiment, risk_score) = self.with_rng(|rng| {
            let emotions: EmotionScores = bands
                .emotions
                .iter()
                .map(|(name, band)| (name.clone(), draw_unit(rng, band.band_for(&lowered))))
                .collect();

            let sentiment = Sentiment {
                positive: draw_unit(rng, bands.positive.band_for(&lowered)),
                negative: draw_unit(rng, bands.negative.band_for(&lowered)),
                neutral: draw_unit(rng, bands.neutral),
            };

            let risk = draw_risk(rng, bands.risk.band_for(&lowered));
            (emotions, sentiment, risk)
        });

        log_debug!(
            "Scored {} chars of text, risk {:.1}",
            text.chars().count(),
            risk_score
        );

        TextAnalysis {
            emotions,
            sentiment,
            risk_score,
            key_phrases: bands.key_phrases.clone(),
            word_count: word_count(text),
            timestamp: Utc::now(),
        }
    }

    fn score_voice(&self, sample: &VoiceSample) -> VoiceAnalysis {
        let bands = &self.config.voice;

        let (emotions, risk_score, features) = self.with_rng(|rng| {
            let emotions: EmotionScores = bands
                .emotions
                .iter()
                .map(|(name, band)| (name.clone(), draw_unit(rng, *band)))
                .collect();
            let risk = draw_risk(rng, bands.risk);
            let features = VoiceFeatures {
                pitch: draw(rng, bands.pitch),
                energy: draw(rng, bands.energy),
                speaking_rate: draw(rng, bands.speaking_rate),
            };
            (emotions, risk, features)
        });

        log_debug!("Scored voice sample {:?}, risk {:.1}", sample, risk_score);

        VoiceAnalysis {
            emotions,
            risk_score,
            features,
            timestamp: Utc::now(),
        }
    }
}
