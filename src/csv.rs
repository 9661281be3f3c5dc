//! Flat CSV export of simulated outcomes.

use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::mc::OutcomeRecord;

pub const HEADER: [&str; 4] = ["sim_id", "winner", "method", "round"];

pub struct CsvWriter<W: Write> {
    writer: BufWriter<W>,
}
impl CsvWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub fn append<R>(&mut self, record: R) -> Result<(), io::Error>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut first = true;
        for datum in record.into_iter() {
            if first {
                first = false;
            } else {
                self.writer.write_all(b",")?;
            }
            self.writer.write_all(datum.as_ref().as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}

/// Writes a header row followed by one row per record, then flushes.
pub fn write_records<'a, W: Write>(
    writer: &mut CsvWriter<W>,
    records: impl IntoIterator<Item = &'a OutcomeRecord>,
) -> Result<usize, io::Error> {
    writer.append(HEADER)?;
    let mut rows = 0;
    for record in records {
        writer.append([
            record.sim_id.to_string(),
            record.winner.to_string(),
            record.method.to_string(),
            record.round.to_string(),
        ])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}
