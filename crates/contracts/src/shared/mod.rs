pub mod api_error;
pub mod config;
pub mod natural_sort;
pub mod normalize;
pub mod request_generation;
