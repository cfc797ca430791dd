use crate::repository::error::DatabaseError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The sent-log could not be read or written. The notification for this
    /// (subscriber, listing) pair is aborted; sending without a record would
    /// break the at-most-once guarantee.
    #[error("Sent-log update failed: {0}")]
    StoreFailed(#[from] DatabaseError),
}
