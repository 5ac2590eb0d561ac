use std::fmt;

use chrono::TimeDelta;
use itertools::Itertools;

use super::timing::{TimingContext, TimingFacts, format_duration};
use crate::model::{CityGraph, CityNode, EdgeKind, TransferKind};
use crate::routing::Path;
use crate::{Error, Meters};

/// One human-readable step of an itinerary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    WalkAlong(String),
    Board { line: String, stop: String },
    Alight { stop: String },
    Arrived { destination: String },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::WalkAlong(street) => write!(f, "Walk along {street}"),
            Instruction::Board { line, stop } => write!(f, "Board line {line} at stop {stop}"),
            Instruction::Alight { stop } => write!(f, "Alight at stop {stop}"),
            Instruction::Arrived { destination } => write!(f, "You have arrived at {destination}!"),
        }
    }
}

/// Step list, totals and optional timing facts of a computed path
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub instructions: Vec<Instruction>,
    pub distance: Meters,
    pub walking_distance: Meters,
    pub duration: TimeDelta,
    pub timing: Option<TimingFacts>,
}

impl Itinerary {
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Total distance: {:.0}m, walking distance: {:.0}m",
                self.distance, self.walking_distance
            ),
            format!("Total travel time: {}", format_duration(self.duration)),
        ]
    }

    pub fn text(&self) -> String {
        self.to_string()
    }

    pub fn count(&self, predicate: impl Fn(&Instruction) -> bool) -> usize {
        self.instructions.iter().filter(|i| predicate(i)).count()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        writeln!(f)?;
        for line in self.summary_lines() {
            writeln!(f, "{line}")?;
        }
        if let Some(timing) = &self.timing {
            writeln!(f)?;
            for line in timing.lines() {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Turns a path into instructions, totals and, when a context is given,
/// departure/arrival facts.
///
/// Consecutive segments of the same street yield a single walk instruction;
/// boarding or alighting starts a new run. Access walks and bus rides only
/// count towards the totals.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if two consecutive path nodes are not
/// connected, and [`Error::MissingTimingContext`] if `timing` lacks a field
/// its direction needs.
pub fn compose_itinerary(
    city: &CityGraph,
    path: &Path,
    destination: &str,
    timing: Option<&TimingContext>,
) -> Result<Itinerary, Error> {
    let mut instructions = Vec::new();
    let mut previous_street = "";

    for (from, to) in path.route.iter().copied().tuple_windows() {
        let edge = city.edge_between(from, to).ok_or_else(|| {
            Error::InvalidData(format!(
                "Path nodes {} and {} are not connected",
                from.index(),
                to.index()
            ))
        })?;

        match &edge.kind {
            EdgeKind::Street(street) => {
                if !street.name.is_empty() && street.name != previous_street {
                    instructions.push(Instruction::WalkAlong(street.name.clone()));
                    previous_street = &street.name;
                }
            }
            EdgeKind::Transfer(transfer) if transfer.kind == TransferKind::Board => {
                let line = match city.node(to) {
                    CityNode::LineStop(stop) => stop.line.clone(),
                    _ => String::new(),
                };
                instructions.push(Instruction::Board {
                    line,
                    stop: transfer.name.clone(),
                });
                previous_street = "";
            }
            EdgeKind::Transfer(transfer) if transfer.kind == TransferKind::Alight => {
                instructions.push(Instruction::Alight {
                    stop: transfer.name.clone(),
                });
                previous_street = "";
            }
            EdgeKind::Transfer(_) | EdgeKind::Bus(_) => {}
        }
    }

    instructions.push(Instruction::Arrived {
        destination: destination.to_string(),
    });

    let duration = path.duration();
    let timing = timing
        .map(|context| TimingFacts::compute(context, duration))
        .transpose()?;

    Ok(Itinerary {
        instructions,
        distance: path.distance,
        walking_distance: path.walking_distance,
        duration,
        timing,
    })
}
