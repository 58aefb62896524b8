pub mod history;
pub mod pool;
pub mod solved;
pub mod timer;
pub mod word;
