pub mod candle;
pub mod indicator_series;
pub mod interval;
pub mod request_params;
