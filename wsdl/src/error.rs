use thiserror::Error;

use crate::types::MessageKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("An operation may contain only one {0} message")]
    DuplicateMessage(MessageKind),

    #[error("An operation may contain at most one input and one output message")]
    TooManyMessages,

    #[error("Message index {index} is out of bounds for {len} messages")]
    IndexOutOfBounds { index: usize, len: usize },
}
