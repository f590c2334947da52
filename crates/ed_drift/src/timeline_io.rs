use std::fs;
use std::result;
use log::debug;
use serde::{Serialize, Deserialize};

use ed_community::SPIDX;

use crate::SampleSchedule;
use crate::timeline::Timeline;
use crate::timeline::TimelineError;

#[derive(Serialize, Deserialize)]
pub struct SerializableTimeline {
    species_pool: SPIDX,
    individuals: usize,
    points: Vec<SerializableTimepoint>,
}

#[derive(Serialize, Deserialize)]
pub struct SerializableTimepoint {
    step: u64,
    generation: f64,
    ensemble: Vec<(SPIDX, u64)>, // (species index, summed abundance)
    richness_sum: u64,
    replicates: usize,
}

impl Timeline {
    pub fn to_serializable(&self) -> SerializableTimeline {
        SerializableTimeline {
            species_pool: self.species_pool,
            individuals: self.individuals,
            points: self.points.iter().map(|tp| {
                let mut ensemble: Vec<(SPIDX, u64)> = tp.iter().collect();
                ensemble.sort_unstable_by_key(|&(sp, _)| sp);
                SerializableTimepoint {
                    step: tp.step,
                    generation: tp.generation,
                    ensemble,
                    richness_sum: tp.richness_sum,
                    replicates: tp.replicates,
                }
            }).collect(),
        }
    }

    /// Load a timeline from a JSON file, checking it against the
    /// schedule and species pool of the current experiment.
    pub fn from_file<P: AsRef<std::path::Path>>(
        path: P,
        schedule: &SampleSchedule,
        species_pool: SPIDX,
    ) -> result::Result<Self, TimelineError> {
        let data = fs::read_to_string(path)?;
        let serial: SerializableTimeline = serde_json::from_str(&data)?;

        if serial.species_pool != species_pool {
            return Err(TimelineError::SpeciesPoolMismatch {
                found: serial.species_pool,
                expected: species_pool,
            });
        }
        // Sanity check: number of sample points must match
        if serial.points.len() != schedule.len() {
            return Err(TimelineError::PointCountMismatch {
                found: serial.points.len(),
                expected: schedule.len(),
            });
        }

        let mut timeline = Timeline::new(schedule, species_pool);

        for (tp, serial_tp) in timeline.points.iter_mut().zip(serial.points) {
            if tp.step != serial_tp.step {
                return Err(TimelineError::StepMismatch {
                    file_step: serial_tp.step,
                    expected_step: tp.step,
                });
            }
            for (sp, count) in serial_tp.ensemble {
                *tp.ensemble.entry(sp).or_insert(0) += count;
            }
            tp.richness_sum += serial_tp.richness_sum;
            tp.replicates += serial_tp.replicates;
        }
        debug!("Loaded timeline: {} sample points, {} replicates at t=0",
            timeline.points.len(), timeline.points[0].replicates);
        Ok(timeline)
    }
}
