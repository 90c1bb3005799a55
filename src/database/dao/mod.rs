pub mod measurements;
pub mod stations;

pub use measurements::{
    MeasurementsDao, ObservationRow, PrecipitationRow, StationActivity, TemperatureAggregate,
};
pub use stations::{StationSummary, StationsDao};
