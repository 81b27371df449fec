pub mod rolling_buffer;
