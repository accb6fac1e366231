//! Functional coverage of exercised framing tuples.
//!
//! Every transmitted character is sampled as `(data, stop_field, parity_field, data_width)`
//! and binned into four coverpoints:
//! 1. **DATA:** 256 bins, one per byte value after width masking.
//! 2. **STOP:** 3 bins, one per stop-bit encoding.
//! 3. **PARITY:** 3 bins, one per encodable parity mode.
//! 4. **WIDTH:** 4 bins, widths 5 through 8.
//!
//! A coverpoint's score is the share of its bins hit at least once; the overall score is
//! the mean of the four. Persistence goes through [`CoverageSink`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::codec::{ControlFields, DataWidth, encode_parity, encode_stop};
use crate::common::constants::MIN_DATA_WIDTH;
use crate::common::error::Result;

const DATA_BINS: usize = 256;
const STOP_BINS: usize = 3;
const PARITY_BINS: usize = 3;
const WIDTH_BINS: usize = 4;

/// One sampled tuple, fields in their register encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageSample {
    /// Character data masked to the configured width.
    pub data: u8,
    /// Encoded stop-bit field.
    pub stop_field: u8,
    /// Encoded parity field.
    pub parity_field: u8,
    /// Configured character width.
    pub data_width: DataWidth,
}

impl CoverageSample {
    /// Builds the sample for `data` sent with `fields`.
    ///
    /// # Errors
    ///
    /// `UnsupportedField` if the parity mode has no register encoding.
    pub fn new(data: u32, fields: &ControlFields) -> Result<Self> {
        Ok(Self {
            data: (data & fields.width.mask()) as u8,
            stop_field: encode_stop(fields.stop),
            parity_field: encode_parity(fields.parity)?,
            data_width: fields.width,
        })
    }
}

/// Bin counters for the four coverpoints.
#[derive(Debug, Clone)]
pub struct CoverageSampler {
    data: [u32; DATA_BINS],
    stop: [u32; STOP_BINS],
    parity: [u32; PARITY_BINS],
    width: [u32; WIDTH_BINS],
    samples: u64,
}

impl Default for CoverageSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverageSampler {
    /// Creates a sampler with every bin empty.
    pub const fn new() -> Self {
        Self {
            data: [0; DATA_BINS],
            stop: [0; STOP_BINS],
            parity: [0; PARITY_BINS],
            width: [0; WIDTH_BINS],
            samples: 0,
        }
    }

    /// Records one tuple.
    ///
    /// Field values outside their coverpoint's bins are counted as samples but hit no bin.
    pub fn sample(&mut self, sample: CoverageSample) {
        bump(&mut self.data, usize::from(sample.data));
        bump(&mut self.stop, usize::from(sample.stop_field));
        bump(&mut self.parity, usize::from(sample.parity_field));
        bump(
            &mut self.width,
            usize::from(sample.data_width.bits() - MIN_DATA_WIDTH),
        );
        self.samples += 1;
        debug!(
            "coverage sample: data={:#04x} stop={} parity={} width={}",
            sample.data, sample.stop_field, sample.parity_field, sample.data_width
        );
    }

    /// Returns the number of tuples recorded.
    pub const fn samples(&self) -> u64 {
        self.samples
    }

    /// Clears every bin.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Summarizes the bins.
    pub fn report(&self) -> CoverageReport {
        let coverpoints = vec![
            CoverpointReport::from_bins("DATA", &self.data),
            CoverpointReport::from_bins("STOP", &self.stop),
            CoverpointReport::from_bins("PARITY", &self.parity),
            CoverpointReport::from_bins("WIDTH", &self.width),
        ];
        let overall = coverpoints.iter().map(|cp| cp.percent).sum::<f64>() / 4.0;
        CoverageReport {
            samples: self.samples,
            coverpoints,
            overall,
        }
    }
}

fn bump(bins: &mut [u32], index: usize) {
    if let Some(bin) = bins.get_mut(index) {
        *bin = bin.saturating_add(1);
    }
}

/// Hit counts and score of one coverpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverpointReport {
    /// Coverpoint name.
    pub name: &'static str,
    /// Number of bins.
    pub bins: u32,
    /// Number of bins hit at least once.
    pub covered: u32,
    /// `covered / bins` as a percentage.
    pub percent: f64,
    /// Hit count per bin.
    pub hits: Vec<u32>,
}

impl CoverpointReport {
    fn from_bins(name: &'static str, hits: &[u32]) -> Self {
        let bins = hits.len() as u32;
        let covered = hits.iter().filter(|&&h| h > 0).count() as u32;
        Self {
            name,
            bins,
            covered,
            percent: f64::from(covered) * 100.0 / f64::from(bins),
            hits: hits.to_vec(),
        }
    }
}

/// Coverage summary ready for printing or persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Number of tuples sampled.
    pub samples: u64,
    /// Per-coverpoint results, in DATA, STOP, PARITY, WIDTH order.
    pub coverpoints: Vec<CoverpointReport>,
    /// Mean coverpoint percentage.
    pub overall: f64,
}

impl CoverageReport {
    /// Returns the coverpoint with the given name.
    pub fn coverpoint(&self, name: &str) -> Option<&CoverpointReport> {
        self.coverpoints.iter().find(|cp| cp.name == name)
    }

    /// Prints the summary table to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("UART FRAMING COVERAGE");
        println!("==========================================================");
        println!("samples                  {}", self.samples);
        for cp in &self.coverpoints {
            println!(
                "  {:<22} {:>3}/{:<3} bins  {:>6.2}%",
                cp.name, cp.covered, cp.bins, cp.percent
            );
        }
        println!("----------------------------------------------------------");
        println!("overall                  {:.2}%", self.overall);
    }
}

/// External store for coverage reports.
pub trait CoverageSink {
    /// Persists one report.
    ///
    /// # Errors
    ///
    /// Implementation-specific; I/O failures surface as `Io`.
    fn persist(&mut self, report: &CoverageReport) -> Result<()>;
}

/// Writes reports as pretty-printed JSON, replacing the file each time.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Creates a sink targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CoverageSink for JsonFileSink {
    fn persist(&mut self, report: &CoverageReport) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, report).map_err(io::Error::from)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        info!(
            "Coverage report written to {} ({:.2}% overall)",
            self.path.display(),
            report.overall
        );
        Ok(())
    }
}
