use thiserror::Error;

use crate::render::ContainerId;
use crate::tree::VNodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DevtoolsError {
    #[error("descriptor {node:?} ({name}) has no backing instance and cannot be resolved")]
    Unresolvable { node: VNodeId, name: String },
    #[error("descriptor {0:?} is not part of the tree")]
    UnknownNode(VNodeId),
    #[error("container {0:?} was never created")]
    UnknownContainer(ContainerId),
    #[error("instance handle space exhausted")]
    HandlesExhausted,
}

pub type Result<T> = std::result::Result<T, DevtoolsError>;
