//! Buffered reading of delimited rows, with a single row of lookahead
//! so that the end of the stream can be observed before reading.

use crate::column::Header;
use crate::config::DecodePolicy;
use crate::decode::Row;
use crate::error::{ConfigError, ReaderError};

use csv::{Position, ReaderBuilder, StringRecord};
use log::warn;
use std::io::{Read, Seek};

pub struct RowStream<R> {
    reader: csv::Reader<R>,
    header: Header,
    start: Position,

    peeked: Option<Result<Row, ReaderError>>,
    eof: bool,
}

impl<R> RowStream<R>
where
    R: Read,
{
    /// Reads the header row, leaving the stream at the first data row.
    pub fn new(source: R, delimiter: u8) -> Result<RowStream<R>, ConfigError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let header = Header::from(reader.headers()?);
        let start = reader.position().clone();

        Ok(RowStream {
            reader,
            header,
            start,
            peeked: None,
            eof: false,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    fn fill(&mut self) {
        if self.peeked.is_some() || self.eof {
            return;
        }

        let mut record = StringRecord::new();
        self.peeked = match self.reader.read_record(&mut record) {
            Ok(true) => {
                let line = record.position().map_or(0, |pos| pos.line());
                Some(Ok(Row::new(line, record)))
            }
            Ok(false) => {
                self.eof = true;
                None
            }
            Err(err) => Some(Err(ReaderError::from_csv(err))),
        };
    }

    /// Whether another row, or a failure to read one, is available.
    pub fn has_next(&mut self) -> bool {
        self.fill();
        self.peeked.is_some()
    }

    pub fn next_row(&mut self) -> Option<Result<Row, ReaderError>> {
        self.fill();
        self.peeked.take()
    }

    /// Reads rows until one decodes, following the given policy for
    /// rows which do not. Failures to read the stream are always returned.
    pub fn next_decoded<T, F>(
        &mut self,
        policy: DecodePolicy,
        decode: F,
    ) -> Option<Result<T, ReaderError>>
    where
        F: Fn(&Row) -> Result<T, ReaderError>,
    {
        loop {
            let result = self.next_row()?.and_then(|row| decode(&row));
            match result {
                Err(err) if err.is_decode() && policy == DecodePolicy::Skip => {
                    warn!("Skipping malformed row. {err}");
                }
                result => return Some(result),
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R> RowStream<R>
where
    R: Read + Seek,
{
    /// Returns to the first data row, past the header.
    pub fn rewind(&mut self) -> Result<(), ReaderError> {
        self.reader
            .seek(self.start.clone())
            .map_err(ReaderError::from_csv)?;

        self.peeked = None;
        self.eof = false;
        Ok(())
    }
}
