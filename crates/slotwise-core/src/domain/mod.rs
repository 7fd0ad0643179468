pub mod campaign;
pub mod ids;
pub mod schedule;
pub mod weekday;

pub use campaign::{Campaign, CampaignType};
pub use ids::CampaignId;
pub use schedule::ScheduleEntry;
pub use weekday::{parse_weekday, weekday_name, ScheduleDay};
