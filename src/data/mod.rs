//! Data module - fines loading, filtering and sorting

mod csv_line;
mod loader;
mod money;
mod processor;
pub(crate) mod record;
mod view;

pub use csv_line::split_csv_line;
pub use loader::{FineLoader, LoadedDataset, LoaderError, RejectReason, RejectedRow};
pub use money::{parse_fine, MoneyError, MoneyFormat};
pub use processor::{DataProcessor, FilterState, SortColumn, SortState};
pub use record::{FineRecord, GroupKey};
pub use view::ViewState;
