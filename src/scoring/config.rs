use serde::{Deserialize, Serialize};

/// Uniform draw `base + U[0, span)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub base: f64,
    pub span: f64,
}

impl Band {
    pub const fn new(base: f64, span: f64) -> Self {
        Self { base, span }
    }

    pub fn max(&self) -> f64 {
        self.base + self.span
    }
}

/// A figure whose band shifts upward when any keyword appears in the
/// lower-cased input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordBand {
    pub keywords: Vec<String>,
    pub hit: Band,
    pub miss: Band,
}

impl KeywordBand {
    fn new(keywords: &[&str], hit: Band, miss: Band) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            hit,
            miss,
        }
    }

    pub fn band_for(&self, lowered: &str) -> Band {
        if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            self.hit
        } else {
            self.miss
        }
    }
}

/// Text scoring bands. Emotions are keyed by the name they get in the result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextBands {
    pub emotions: Vec<(String, KeywordBand)>,
    pub positive: KeywordBand,
    pub negative: KeywordBand,
    pub neutral: Band,
    pub risk: KeywordBand,
    pub key_phrases: Vec<String>,
}

impl Default for TextBands {
    fn default() -> Self {
        let always = |band: Band| KeywordBand {
            keywords: Vec::new(),
            hit: band,
            miss: band,
        };

        Self {
            emotions: vec![
                (
                    "happy".into(),
                    KeywordBand::new(&["happy", "joy"], Band::new(0.4, 0.4), Band::new(0.0, 0.2)),
                ),
                (
                    "sad".into(),
                    KeywordBand::new(&["sad", "depressed"], Band::new(0.4, 0.4), Band::new(0.0, 0.3)),
                ),
                (
                    "angry".into(),
                    KeywordBand::new(&["angry", "mad"], Band::new(0.4, 0.4), Band::new(0.0, 0.15)),
                ),
                (
                    "anxious".into(),
                    KeywordBand::new(&["anxious", "worry"], Band::new(0.4, 0.4), Band::new(0.0, 0.3)),
                ),
                ("neutral".into(), always(Band::new(0.2, 0.3))),
                (
                    "hopeful".into(),
                    KeywordBand::new(&["hope", "better"], Band::new(0.3, 0.4), Band::new(0.0, 0.2)),
                ),
            ],
            positive: KeywordBand::new(&["good", "great"], Band::new(0.3, 0.4), Band::new(0.1, 0.4)),
            negative: KeywordBand::new(&["bad", "terrible"], Band::new(0.3, 0.4), Band::new(0.2, 0.4)),
            neutral: Band::new(0.2, 0.3),
            risk: KeywordBand::new(
                &["depressed", "hopeless"],
                Band::new(30.0, 50.0),
                Band::new(10.0, 50.0),
            ),
            key_phrases: vec![
                "emotional expression".into(),
                "mood indicators".into(),
                "sentiment patterns".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceBands {
    pub emotions: Vec<(String, Band)>,
    pub risk: Band,
    pub pitch: Band,
    pub energy: Band,
    pub speaking_rate: Band,
}

impl Default for VoiceBands {
    fn default() -> Self {
        Self {
            emotions: vec![
                ("happy".into(), Band::new(0.1, 0.3)),
                ("sad".into(), Band::new(0.2, 0.4)),
                ("angry".into(), Band::new(0.05, 0.2)),
                ("anxious".into(), Band::new(0.3, 0.5)),
                ("neutral".into(), Band::new(0.1, 0.3)),
                ("calm".into(), Band::new(0.1, 0.4)),
            ],
            risk: Band::new(20.0, 40.0),
            pitch: Band::new(100.0, 200.0),
            energy: Band::new(0.1, 0.8),
            speaking_rate: Band::new(120.0, 150.0),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Fixed RNG seed; entropy when unset.
    pub seed: Option<u64>,
    pub text: TextBands,
    pub voice: VoiceBands,
}
