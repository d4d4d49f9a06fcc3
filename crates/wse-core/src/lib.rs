pub mod config;
pub mod logging;

pub mod archive;
pub mod correlate;
pub mod dedup;
pub mod fetch;
pub mod pipeline;
pub mod retry;
pub mod sticker;
pub mod storage;
pub mod timestamp;
