pub mod skills;
pub mod summary;
pub mod weekly;

pub use skills::{RANKING_SIZE, SkillRankings, rank_skills};
pub use summary::{ActivitySummary, TimeWindow, filter_by_window, summarize};
pub use weekly::{DayBucket, WEEK_WINDOW_DAYS, bucket_by_day};
