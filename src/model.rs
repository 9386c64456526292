//! Patients, their observations and the doctors who care for them.

use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

/// Anything with a display name.
pub trait Person {
    fn name(&self) -> &str;
}

/// A single inflammation reading taken on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    day: usize,
    value: f64,
}

impl Observation {
    pub fn new(day: usize, value: f64) -> Self {
        Self { day, value }
    }

    pub fn day(&self) -> usize {
        self.day
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}: {}", self.day, self.value)
    }
}

/// A patient and the observations taken on them, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    name: String,
    observations: Vec<Observation>,
}

impl Patient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observations: Vec::new(),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Record a new observation and return it.
    ///
    /// Without an explicit `day`, the observation is taken the day after the
    /// last one, or on day 0 if there are none yet.
    pub fn add_observation(&mut self, value: f64, day: Option<usize>) -> Observation {
        let day = day.unwrap_or_else(|| match self.observations.last() {
            Some(last) => last.day + 1,
            None => 0,
        });

        let obs = Observation::new(day, value);
        self.observations.push(obs);
        obs
    }
}

impl Person for Patient {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} observations)", self.name, self.observations.len())
    }
}

/// Shared handle to a patient.
///
/// Doctors only hold handles, so a patient outlives any doctor referring to it.
pub type PatientHandle = Rc<RefCell<Patient>>;

/// A doctor and the patients they care for, keyed by patient name.
#[derive(Debug)]
pub struct Doctor {
    name: String,
    patients: BTreeMap<String, PatientHandle>,
}

impl Doctor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patients: BTreeMap::new(),
        }
    }

    /// Start caring for a patient.
    ///
    /// Does nothing if the doctor already has a patient with the same name.
    pub fn add_patient(&mut self, patient: PatientHandle) {
        let name = patient.borrow().name().to_owned();
        self.patients.entry(name).or_insert(patient);
    }

    pub fn patient(&self, name: &str) -> Option<&PatientHandle> {
        self.patients.get(name)
    }

    pub fn patients(&self) -> impl Iterator<Item = &PatientHandle> {
        self.patients.values()
    }

    pub fn n_patients(&self) -> usize {
        self.patients.len()
    }
}

impl Person for Doctor {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dr. {} ({} patients)", self.name, self.patients.len())
    }
}
