use tokio::sync::mpsc::Sender;
use tracing::info;

use super::{
    error::Error,
    types::{InputBatch, InputStreamer},
};

pub struct Producer<S: InputStreamer> {
    streamer: S,
}

impl<S> Producer<S>
where
    S: InputStreamer,
{
    pub fn new(streamer: S) -> Self {
        Producer { streamer }
    }

    pub fn spawn(self, sender: Sender<InputBatch>) -> tokio::task::JoinHandle<Result<(), Error>> {
        info!("Producer ready.");
        tokio::spawn(async move { self.streamer.run_stream(sender).await })
    }
}
