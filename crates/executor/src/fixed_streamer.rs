use tokio::sync::mpsc::Sender;

use super::error::Error;
use super::types::{InputBatch, InputStreamer};

/// Sends one literal input and finishes.
pub struct FixedStreamer {
    input: f64,
}

impl FixedStreamer {
    pub fn new(input: f64) -> Self {
        FixedStreamer { input }
    }
}

#[async_trait::async_trait]
impl InputStreamer for FixedStreamer {
    async fn run_stream(self, sender: Sender<InputBatch>) -> Result<(), Error> {
        sender
            .send(vec![self.input])
            .await
            .map_err(|_| Error::ChannelSendFailed)
    }
}
