use std::fs::File;
use std::io::Read;
use std::path::Path;
use ahash::AHashMap;
use log::debug;

use crate::AbundanceVector;
use crate::CommunityError;

/// A stations × OTUs count matrix, as produced by tabulating amplicon
/// reads of an environmental survey.
///
/// The expected CSV layout is one row per sampling station: the first
/// column holds the station name, the header row names the OTUs, and
/// every remaining cell is a non-negative integer read count.
#[derive(Debug, Clone)]
pub struct OtuTable {
    stations: Vec<String>,
    otus: Vec<String>,
    station_index: AHashMap<String, usize>,
    // row-major, stations.len() rows of otus.len() counts each
    counts: Vec<u32>,
}

impl OtuTable {
    /// Parse an OTU table from any CSV reader.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CommunityError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header = csv.headers()?.clone();
        if header.len() < 2 {
            return Err(CommunityError::MissingHeader);
        }
        let otus: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

        let mut stations = Vec::new();
        let mut station_index = AHashMap::new();
        let mut counts = Vec::new();

        for (row, record) in csv.records().enumerate() {
            let record = record?;
            if record.len() != otus.len() + 1 {
                return Err(CommunityError::ShapeMismatch {
                    row,
                    found: record.len().saturating_sub(1),
                    expected: otus.len(),
                });
            }
            let name = record[0].to_string();
            if station_index.contains_key(&name) {
                return Err(CommunityError::DuplicateStation(name));
            }
            for (column, cell) in record.iter().skip(1).enumerate() {
                let n: u32 = cell.parse().map_err(|_| CommunityError::InvalidCount {
                    row,
                    column,
                    token: cell.to_string(),
                })?;
                counts.push(n);
            }
            station_index.insert(name.clone(), stations.len());
            stations.push(name);
        }

        if stations.is_empty() {
            return Err(CommunityError::EmptyCommunity);
        }
        debug!("Parsed OTU table: {} stations x {} OTUs", stations.len(), otus.len());
        Ok(Self { stations, otus, station_index, counts })
    }

    /// Parse an OTU table from a CSV file.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, CommunityError> {
        Self::from_csv_reader(File::open(path)?)
    }

    pub fn n_stations(&self) -> usize {
        self.stations.len()
    }

    pub fn n_otus(&self) -> usize {
        self.otus.len()
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn otus(&self) -> &[String] {
        &self.otus
    }

    /// The counts of station `row` as a dense slice over all OTUs.
    pub fn row(&self, row: usize) -> &[u32] {
        let w = self.otus.len();
        &self.counts[row * w..(row + 1) * w]
    }

    /// The abundance vector of station `row`.
    pub fn station(&self, row: usize) -> AbundanceVector {
        AbundanceVector::from(self.row(row).to_vec())
    }

    /// Look up a station by name.
    pub fn station_by_name(&self, name: &str) -> Option<AbundanceVector> {
        self.station_index.get(name).map(|&row| self.station(row))
    }

    /// Iterate over (station name, abundance vector) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AbundanceVector)> + '_ {
        (0..self.n_stations()).map(|row| (self.stations[row].as_str(), self.station(row)))
    }

    /// Pool all stations into one aggregate sample.
    pub fn pooled(&self) -> AbundanceVector {
        let w = self.otus.len();
        let mut pooled = vec![0u32; w];
        for row in 0..self.n_stations() {
            for (i, &n) in self.row(row).iter().enumerate() {
                pooled[i] += n;
            }
        }
        AbundanceVector::from(pooled)
    }
}
