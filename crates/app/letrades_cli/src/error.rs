use letrades_client::ClientError;
use letrades_core::business::DirectoryError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Directory: {}", .0)]
    Directory(#[from] DirectoryError),

    #[error("Relay: {}", .0)]
    Relay(#[from] ClientError),
}
