//! Edge weight model shared by all graph builders

use serde::{Deserialize, Serialize};

use crate::{
    BUS_SPEED, BUS_STOP_TIME, BUS_WAITING_TIME, Error, MAX_SNAP_DISTANCE, Meters, Seconds,
    WALKING_SPEED,
};

/// Speeds and fixed penalties used to turn segment lengths into times.
///
/// Every field falls back to the crate constant of the same name, so a
/// partially filled configuration table stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Pedestrian speed in m/s
    pub walking_speed: f64,
    /// Bus cruising speed in m/s
    pub bus_speed: f64,
    /// Dwell time added to every bus segment
    pub bus_stop_time: Seconds,
    /// Weight of a board edge
    pub bus_waiting_time: Seconds,
    /// Bus stops snapping further than this to the road network are dropped
    pub max_snap_distance: Meters,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            walking_speed: WALKING_SPEED,
            bus_speed: BUS_SPEED,
            bus_stop_time: BUS_STOP_TIME,
            bus_waiting_time: BUS_WAITING_TIME,
            max_snap_distance: MAX_SNAP_DISTANCE,
        }
    }
}

impl CostModel {
    pub fn walking_time(&self, length: Meters) -> Seconds {
        length / self.walking_speed
    }

    pub fn bus_time(&self, length: Meters) -> Seconds {
        self.bus_stop_time + length / self.bus_speed
    }

    /// Checks that every derived edge weight is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a speed that is not strictly positive
    /// and finite, or a penalty or snap radius that is negative or not finite.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, speed) in [
            ("walking_speed", self.walking_speed),
            ("bus_speed", self.bus_speed),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "{name} must be a positive number, got {speed}"
                )));
            }
        }

        for (name, value) in [
            ("bus_stop_time", self.bus_stop_time),
            ("bus_waiting_time", self.bus_waiting_time),
            ("max_snap_distance", self.max_snap_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let costs = CostModel::default();
        assert!((costs.walking_time(150.0) - 100.0).abs() < 1e-9);
        assert!((costs.bus_time(1000.0) - 210.0).abs() < 1e-9);
        assert_eq!(costs.bus_waiting_time, 300.0);
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let costs: CostModel = serde_json::from_str(r#"{"walking_speed": 1.0}"#).unwrap();
        assert_eq!(costs.walking_speed, 1.0);
        assert_eq!(costs.bus_speed, BUS_SPEED);
        assert_eq!(costs.max_snap_distance, MAX_SNAP_DISTANCE);
    }

    #[test]
    fn default_is_valid() {
        assert!(CostModel::default().validate().is_ok());
    }

    #[test]
    fn rejects_weights_that_break_routing() {
        let invalid = [
            CostModel {
                walking_speed: 0.0,
                ..CostModel::default()
            },
            CostModel {
                bus_speed: -5.0,
                ..CostModel::default()
            },
            CostModel {
                walking_speed: f64::NAN,
                ..CostModel::default()
            },
            CostModel {
                bus_waiting_time: -1.0,
                ..CostModel::default()
            },
            CostModel {
                bus_stop_time: f64::INFINITY,
                ..CostModel::default()
            },
        ];
        for costs in invalid {
            assert!(
                matches!(costs.validate(), Err(Error::InvalidData(_))),
                "{costs:?} should be rejected"
            );
        }

        let free_boarding = CostModel {
            bus_waiting_time: 0.0,
            ..CostModel::default()
        };
        assert!(free_boarding.validate().is_ok());
    }
}
