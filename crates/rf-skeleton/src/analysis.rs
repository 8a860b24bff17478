use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Classification, RamificationConfig, SkeletonError, SkeletonMask, classify,
    count_ramifications_with,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalyzeConfig {
    pub ramification: RamificationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonAnalysis {
    pub width: usize,
    pub height: usize,
    pub classification: Classification,
    pub ramifications: usize,
}

impl SkeletonAnalysis {
    pub fn num_end_points(&self) -> usize {
        self.classification.num_end_points()
    }

    pub fn num_junctions(&self) -> usize {
        self.classification.num_junctions()
    }

    pub fn num_slabs(&self) -> usize {
        self.classification.num_slabs()
    }
}

/// Classifies every skeleton pixel and counts ramifications.
///
/// An all-false mask is valid and yields empty sets with zero ramifications.
pub fn analyze(mask: &SkeletonMask, cfg: &AnalyzeConfig) -> Result<SkeletonAnalysis, SkeletonError> {
    let classification = classify(mask);
    let ramifications = count_ramifications_with(
        mask,
        &classification.end_points,
        &classification.junctions,
        &cfg.ramification,
    )?;

    debug!(
        width = mask.width(),
        height = mask.height(),
        end_points = classification.num_end_points(),
        junctions = classification.num_junctions(),
        slabs = classification.num_slabs(),
        ramifications,
        "skeleton analyzed"
    );

    Ok(SkeletonAnalysis {
        width: mask.width(),
        height: mask.height(),
        classification,
        ramifications,
    })
}
