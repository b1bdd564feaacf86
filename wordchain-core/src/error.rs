use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("worker failed while building the chain: {0}")]
	Worker(String),
}
