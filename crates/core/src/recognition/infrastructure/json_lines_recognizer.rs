use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::recognition::domain::face_observation::RawFaceRecord;
use crate::recognition::domain::face_recognizer::FaceRecognizer;

/// Replays recorded recognizer output, one frame per line.
///
/// Each line is a JSON array of face records; a blank line is a frame with
/// no faces. A line that is not a JSON array fails that frame only. An
/// array element that does not have the record shape is dropped with a
/// warning and the rest of the frame is kept.
pub struct JsonLinesRecognizer {
    lines: Box<dyn BufRead + Send>,
    line_number: usize,
}

impl JsonLinesRecognizer {
    pub fn new(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            lines: Box::new(reader),
            line_number: 0,
        }
    }

    pub fn open(path: &Path) -> Result<Self, std::io::Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }

    fn parse_line(&self, line: &str) -> Result<Vec<RawFaceRecord>, Box<dyn std::error::Error>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<serde_json::Value> = serde_json::from_str(trimmed)
            .map_err(|e| format!("line {}: {e}", self.line_number))?;

        let mut records = Vec::with_capacity(values.len());
        for (i, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<RawFaceRecord>(value) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!(
                    "line {}: dropping face {i} with unreadable shape: {e}",
                    self.line_number
                ),
            }
        }
        Ok(records)
    }
}

impl FaceRecognizer for JsonLinesRecognizer {
    fn next_frame(&mut self) -> Option<Result<Vec<RawFaceRecord>, Box<dyn std::error::Error>>> {
        let mut line = String::new();
        match self.lines.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(self.parse_line(&line))
            }
            Err(e) => {
                self.line_number += 1;
                Some(Err(e.into()))
            }
        }
    }
}
