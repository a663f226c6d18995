mod engine;
mod schedule;
mod types;

pub use engine::{monthly_rate, project, summarize};
pub use schedule::{build_schedule, default_monthly};
pub use types::{
    MAX_HORIZON_YEARS, ProjectionError, ProjectionSummary, ScheduleEntry, SimulationConfig,
    YearResult,
};
