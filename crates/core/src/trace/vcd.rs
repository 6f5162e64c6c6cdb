//! Value Change Dump writer.
//!
//! The header declares the seven bundle signals under one module scope. The
//! first record wraps every value in `$dumpvars`; later records emit only the
//! signals that changed since the previous timestamp.

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::common::{BenchError, Result, Signals};
use crate::config::TraceConfig;
use crate::trace::TraceSink;

/// Streams the signal bundle as a VCD file, emitting only changed values.
#[derive(Debug)]
pub struct VcdTrace<W: Write = BufWriter<File>> {
    writer: Option<W>,
    ids: Vec<String>,
    last_values: [Option<u8>; Signals::COUNT],
    last_time: Option<u64>,
}

impl VcdTrace<BufWriter<File>> {
    /// Creates the trace file named by the configuration and writes the header.
    pub fn create(config: &TraceConfig) -> Result<Self> {
        let path = Path::new(&config.path);
        let open_err = |source| BenchError::TraceOpen {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(open_err)?;
        Self::new(BufWriter::new(file), &config.timescale, &config.scope).map_err(open_err)
    }
}

impl<W: Write> VcdTrace<W> {
    /// Writes the VCD header to `writer` and returns a sink ready for records.
    pub fn new(mut writer: W, timescale: &str, scope: &str) -> io::Result<Self> {
        writeln!(writer, "$version")?;
        writeln!(writer, "  serial-bench {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(writer, "$end")?;
        writeln!(writer, "$timescale {timescale} $end")?;
        writeln!(writer, "$scope module {scope} $end")?;

        let mut ids = Vec::with_capacity(Signals::COUNT);
        for (num, (name, width, _)) in Signals::default().fields().into_iter().enumerate() {
            let id = Self::generate_vcd_id(num);
            if width == 1 {
                writeln!(writer, "$var wire 1 {id} {name} $end")?;
            } else {
                writeln!(writer, "$var wire {width} {id} {name} [{}:0] $end", width - 1)?;
            }
            ids.push(id);
        }

        writeln!(writer, "$upscope $end")?;
        writeln!(writer, "$enddefinitions $end")?;

        Ok(Self {
            writer: Some(writer),
            ids,
            last_values: [None; Signals::COUNT],
            last_time: None,
        })
    }

    /// Printable identifier code for the `num`-th variable.
    fn generate_vcd_id(num: usize) -> String {
        let mut id = String::new();
        let mut n = num;
        loop {
            id.push(char::from((n % 94) as u8 + 33));
            if n < 94 {
                break;
            }
            n = (n / 94) - 1;
        }
        id.chars().rev().collect()
    }

    /// Returns the destination if the trace has not been closed.
    pub fn into_inner(self) -> Option<W> {
        self.writer
    }

    /// Returns the destination if the trace has not been closed.
    pub const fn get_ref(&self) -> Option<&W> {
        self.writer.as_ref()
    }

    fn writer(&mut self) -> io::Result<&mut W> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::new(ErrorKind::BrokenPipe, "trace already closed"))
    }
}

impl<W: Write> TraceSink for VcdTrace<W> {
    fn record(&mut self, time: u64, signals: &Signals) -> io::Result<()> {
        if let Some(last) = self.last_time {
            if time <= last {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("trace time {time} does not follow {last}"),
                ));
            }
        }
        let first = self.last_time.is_none();
        self.last_time = Some(time);

        let mut changes = Vec::new();
        for (idx, (_, width, value)) in signals.fields().into_iter().enumerate() {
            if self.last_values[idx] == Some(value) {
                continue;
            }
            self.last_values[idx] = Some(value);
            let id = &self.ids[idx];
            if width == 1 {
                changes.push(format!("{value}{id}"));
            } else {
                changes.push(format!("b{value:b} {id}"));
            }
        }

        let writer = self.writer()?;
        writeln!(writer, "#{time}")?;
        if first {
            writeln!(writer, "$dumpvars")?;
        }
        for change in &changes {
            writeln!(writer, "{change}")?;
        }
        if first {
            writeln!(writer, "$end")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}
