use thiserror::Error;

/// Reasons a `join-room` request is refused. The display text is what the
/// requesting client sees in its ack and `join-error` event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("{0}")]
    Validation(String),

    #[error("없는 방입니다.")]
    NotFound,

    #[error("이미 사용 중인 이름입니다.")]
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session hub has shut down")]
pub struct HubClosed;
