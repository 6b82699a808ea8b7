use crate::error::XstegError;

pub type Result<T> = std::result::Result<T, XstegError>;
