use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use tokio::sync::mpsc::Sender;
use tracing::{error, info};

use super::error::Error;
use super::types::{InputBatch, InputStreamer};

// Helper struct for CSV parsing; extra columns are ignored.
#[derive(Debug, Deserialize, Default)]
pub struct CsvRecord {
    #[serde(rename = "x")]
    pub input: f64,
}

pub struct CsvStreamer {
    path: String,
    batch_size: usize,
}

impl CsvStreamer {
    pub fn new(path: String, batch_size: usize) -> Self {
        CsvStreamer {
            path,
            batch_size: batch_size.max(1),
        }
    }

    fn parse_csv_to_inputs(&self) -> Result<Vec<f64>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            error!(path = %self.path, "Failed to read file: {:?}", e);
            Error::IoError(e)
        })?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut inputs = Vec::new();

        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            inputs.push(record.input);
        }
        Ok(inputs)
    }
}

#[async_trait::async_trait]
impl InputStreamer for CsvStreamer {
    async fn run_stream(self, sender: Sender<InputBatch>) -> Result<(), Error> {
        let all_inputs = self.parse_csv_to_inputs()?;
        let mut inputs_sent = 0;

        info!(total = all_inputs.len(), "CsvStreamer: starting transfer");

        for chunk in all_inputs.chunks(self.batch_size) {
            if let Err(e) = sender.send(chunk.to_vec()).await {
                error!(
                    "CsvStreamer shutting down: evaluator receiver dropped during send. Error: {}",
                    e
                );
                return Err(Error::ChannelSendFailed);
            }

            inputs_sent += chunk.len();
        }

        info!(inputs_sent, "CsvStreamer: transfer complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio::sync::mpsc;

    const MOCK_CSV_CONTENT: &str = "\
id,x,label
1,100,hundred
2,2.5,small
3,0.125,fraction
4,255,edge
";

    const BATCH_SIZE: usize = 3;

    fn mock_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write mock content");
        temp_file
    }

    #[test]
    fn test_parse_csv_to_inputs_success() {
        let temp_file = mock_file(MOCK_CSV_CONTENT);
        let path = temp_file
            .path()
            .to_str()
            .expect("Failed to get path string");

        let streamer = CsvStreamer::new(path.to_string(), BATCH_SIZE);
        let result = streamer.parse_csv_to_inputs();

        assert!(
            result.is_ok(),
            "Parsing failed with error: {:?}",
            result.err()
        );
        assert_eq!(result.unwrap(), vec![100.0, 2.5, 0.125, 255.0]);
    }

    #[test]
    fn test_parse_csv_to_inputs_file_not_found() {
        let streamer = CsvStreamer::new("non_existent_file.csv".to_string(), BATCH_SIZE);
        let result = streamer.parse_csv_to_inputs();

        if let Err(Error::IoError(e)) = result {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("Expected IoError, got: {:?}", result);
        }
    }

    #[test]
    fn test_parse_csv_rejects_non_numeric_input() {
        let temp_file = mock_file("x\nabc\n");
        let path = temp_file.path().to_str().unwrap().to_string();

        let result = CsvStreamer::new(path, BATCH_SIZE).parse_csv_to_inputs();
        assert!(matches!(result, Err(Error::CsvError(_))));
    }

    #[tokio::test]
    async fn test_run_stream_batches_inputs() {
        let temp_file = mock_file(MOCK_CSV_CONTENT);
        let path = temp_file.path().to_str().unwrap().to_string();

        let (tx, mut rx) = mpsc::channel(4);
        CsvStreamer::new(path, BATCH_SIZE)
            .run_stream(tx)
            .await
            .expect("Stream should succeed");

        assert_eq!(rx.recv().await, Some(vec![100.0, 2.5, 0.125]));
        assert_eq!(rx.recv().await, Some(vec![255.0]));
        assert_eq!(rx.recv().await, None);
    }
}
