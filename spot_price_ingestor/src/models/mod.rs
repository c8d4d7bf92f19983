pub mod data_set;
pub mod price;
pub mod product;
pub mod request_params;
