pub mod content;
pub mod cooccurrence;
pub mod diversity;
pub mod pipeline;
pub mod platform;
pub mod popularity;
pub mod reasons;
pub mod weighted;

pub use content::content_similarity;
pub use cooccurrence::CoOccurrenceIndex;
pub use diversity::PillarBalance;
pub use pipeline::{ScoredCandidate, ScoringContext, ScoringPipeline};
pub use platform::platform_relevance;
pub use popularity::{popularity_or_neutral, popularity_score, NEUTRAL_POPULARITY};
pub use reasons::reasons_for;
pub use weighted::{round2, ScoringWeights, SignalBreakdown, WeightedScorer};
