mod fetcher;
mod store;

pub use fetcher::ArtistOutcome;
pub use fetcher::BatchReport;
pub use fetcher::CatalogFetcher;
pub use store::TableStore;
pub use store::WriteMode;
