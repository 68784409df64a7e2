mod companies;
mod coral_updates;
mod reef_stars;
mod stats;
mod uploads;

pub use companies::CompaniesApi;
pub use coral_updates::CoralUpdatesApi;
pub use reef_stars::ReefStarsApi;
pub use stats::{StatsApi, StatsFilter};
pub use uploads::UploadsApi;
