use std::cmp::Ordering;

use crate::records::Progress;

/// Skills surfaced per list on the dashboard.
pub const RANKING_SIZE: usize = 3;

/// Top skills (strongest first) and the skills needing attention
/// (weakest first). With fewer than six records the lists overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRankings {
    pub strengths: Vec<Progress>,
    pub weaknesses: Vec<Progress>,
}

/// Ranks progress records by mastery. The sort is stable, so records
/// with equal mastery keep their input order.
pub fn rank_skills(progress: &[Progress]) -> SkillRankings {
    let mut sorted = progress.to_vec();
    sorted.sort_by(|a, b| {
        b.mastery_level
            .partial_cmp(&a.mastery_level)
            .unwrap_or(Ordering::Equal)
    });

    let strengths: Vec<Progress> = sorted.iter().take(RANKING_SIZE).cloned().collect();

    let tail_start = sorted.len().saturating_sub(RANKING_SIZE);
    let mut weaknesses: Vec<Progress> = sorted[tail_start..].to_vec();
    weaknesses.reverse();

    SkillRankings {
        strengths,
        weaknesses,
    }
}
