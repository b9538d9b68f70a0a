use super::KeyParams;
use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::TaginfoError;
use crate::response::PngResponse;

impl TaginfoClient {
    /// Gets a map of where nodes with the key are located.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_distribution_nodes(&self, params: &KeyParams) -> Result<PngResponse, TaginfoError> {
        self.execute(&catalog::KEY_DISTRIBUTION_NODES, params).await
    }

    /// Gets a map of where ways with the key are located.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_distribution_ways(&self, params: &KeyParams) -> Result<PngResponse, TaginfoError> {
        self.execute(&catalog::KEY_DISTRIBUTION_WAYS, params).await
    }
}
