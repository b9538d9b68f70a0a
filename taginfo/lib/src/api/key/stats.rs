use super::{KeyObjectCount, KeyParams};
use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::TaginfoError;
use crate::response::Response;

/// Database statistics for a key on one type of object.
pub type KeyStats = KeyObjectCount;

impl TaginfoClient {
    /// Shows database statistics for a key, one entry per object type.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_stats(&self, params: &KeyParams) -> Result<Response<Vec<KeyStats>>, TaginfoError> {
        self.execute(&catalog::KEY_STATS, params).await
    }
}
