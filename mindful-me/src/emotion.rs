// Emotion labels returned by the classification endpoint.

use std::fmt;

/// One of the labels the classifier is known to produce.
///
/// Labels outside the known set are kept verbatim in [`Emotion::Other`] so
/// the presentation layer can decide how to display them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Love,
    Surprise,
    Neutral,
    Other(String),
}

impl Emotion {
    /// All known labels, in display order.
    pub const KNOWN: [Emotion; 7] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Love,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Map a raw label to an `Emotion`. Matching is exact; anything else
    /// (including differently-cased labels) becomes `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "joy" => Emotion::Joy,
            "sadness" => Emotion::Sadness,
            "anger" => Emotion::Anger,
            "fear" => Emotion::Fear,
            "love" => Emotion::Love,
            "surprise" => Emotion::Surprise,
            "neutral" => Emotion::Neutral,
            other => Emotion::Other(other.to_string()),
        }
    }

    /// The label exactly as the endpoint sent it.
    pub fn as_str(&self) -> &str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Love => "love",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
            Emotion::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Emotion::Other(_))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
