//! Pipeline-related API endpoints

use relay_core::domain::status::PipelineStatusRecord;
use relay_core::dto::submission::SubmissionAccepted;

use crate::RelayClient;
use crate::error::Result;

impl RelayClient {
    // =============================================================================
    // Pipelines
    // =============================================================================

    /// Submit a pipeline document
    ///
    /// # Arguments
    /// * `document` - The pipeline description, YAML or JSON
    ///
    /// # Returns
    /// The acknowledgement; the workflow run starts asynchronously
    pub async fn submit_pipeline(&self, document: Vec<u8>) -> Result<SubmissionAccepted> {
        let url = self.ingest_endpoint(&["api", "v1", "pipelines"])?;
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/yaml")
            .body(document)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the run status of a pipeline
    pub async fn pipeline_status(&self, pipeline_id: &str) -> Result<PipelineStatusRecord> {
        let url = self.ingest_endpoint(&["api", "v1", "pipelines", pipeline_id])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
