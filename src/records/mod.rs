pub mod frame;
pub mod result_set;
