use std::cmp::Ordering;

use crate::model::{Post, Recommendation, Tag};
use crate::scoring::{
    content_similarity, platform_relevance, popularity_score, reasons_for, CoOccurrenceIndex,
    PillarBalance, ScoringWeights, SignalBreakdown, WeightedScorer,
};

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub tag: Tag,
    pub signals: SignalBreakdown,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            signals: SignalBreakdown::default(),
            score: 0.0,
        }
    }

    pub fn into_recommendation(self) -> Recommendation {
        Recommendation {
            reasons: reasons_for(&self.signals),
            tag: self.tag,
            score: self.score,
            signals: self.signals,
        }
    }
}

/// Per-request inputs shared by every candidate.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub post: &'a Post,
    pub current_tags: &'a [Tag],
    pub co_occurrence: &'a CoOccurrenceIndex,
    pub balance: &'a PillarBalance,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringPipeline {
    weighted_scorer: WeightedScorer,
}

impl ScoringPipeline {
    pub fn new(weighted_scorer: WeightedScorer) -> Self {
        Self { weighted_scorer }
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self::new(WeightedScorer::new(weights))
    }

    /// Derives all five signals. `popularity` arrives already resolved so a failed
    /// usage lookup can be substituted before scoring.
    pub fn signals(&self, ctx: &ScoringContext<'_>, tag: &Tag, popularity: f64) -> SignalBreakdown {
        SignalBreakdown {
            content: content_similarity(&ctx.post.content, tag),
            co_occurrence: ctx.co_occurrence.score(tag.id, ctx.current_tags),
            pillar_balance: ctx.balance.score(tag.pillar),
            popularity: popularity.clamp(0.0, 1.0),
            platform: platform_relevance(&ctx.post.platform, tag),
        }
    }

    pub fn score_candidate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &mut ScoredCandidate,
        popularity: f64,
    ) {
        candidate.signals = self.signals(ctx, &candidate.tag, popularity);
        candidate.score = self.weighted_scorer.score(&candidate.signals);
    }

    /// Convenience for callers holding a raw usage count.
    pub fn score_with_usage(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &mut ScoredCandidate,
        usage_count: u64,
    ) {
        self.score_candidate(ctx, candidate, popularity_score(usage_count));
    }

    /// Re-derives the signals for one candidate and maps them to reason strings.
    pub fn reasons(&self, ctx: &ScoringContext<'_>, tag: &Tag, popularity: f64) -> Vec<String> {
        reasons_for(&self.signals(ctx, tag, popularity))
    }

    /// Drops zero scores, orders by score descending then tag id ascending, and truncates.
    pub fn rank(&self, candidates: &mut Vec<ScoredCandidate>, limit: usize) {
        candidates.retain(|candidate| candidate.score > 0.0);
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.tag.id.cmp(&b.tag.id))
        });
        candidates.truncate(limit);
    }
}
