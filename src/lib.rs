mod dataset;
mod error;
mod grid;
mod overview;
mod protocol;
mod record;
mod request;
mod schema;
mod time;

pub mod cache;
pub mod enums;
pub mod fetcher;

pub use dataset::craft_csv_dataset;
pub use error::{DataError, FetchError, GridcraftError, GridcraftResult, ValidationError};
pub use grid::{Cell, HEADER_ROWS, LABEL_COLUMNS, SparseGrid, normalize_chain};
pub use overview::{
    AdapterSummaries, ChartMap, OVERVIEW_RESPONSE_TTL, OverviewResponse, PROTOCOL_RESPONSE_TTL,
    RecordSummary, Summary, assemble_overview, format_chart_data, get_percentage,
    protocol_not_found,
};
pub use protocol::Protocol;
pub use record::{PartialRecord, Series, is_reserved_key};
pub use request::{OverviewRequest, RawOverviewRequest, sluggify};
pub use time::{closest_day_start, format_day};
