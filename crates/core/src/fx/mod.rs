//! FX (Foreign Exchange) module - snapshot model, service, and traits.

mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;

pub use fx_errors::FxError;
pub use fx_model::ExchangeRateSnapshot;
pub use fx_service::FxService;
pub use fx_traits::FxServiceTrait;
