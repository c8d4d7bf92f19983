//! Shanghai Metals Market (SMM) spot history endpoint.
//!
//! `GET {base_url}/ajax/spot/history/{product_id}/{start}/{end}` returns
//! `{status, data: {rows: [{date, avg_price?, low_price?, high_price?}]}}`.

pub mod params;
pub mod provider;
pub mod response;

pub use params::SmmClientOptions;
pub use provider::SmmProvider;
