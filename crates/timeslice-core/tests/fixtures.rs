//! Shared domain fixtures for integration tests: musicians hosting
//! listeners at concerts (overlaps welcome) and gas pumps serving cars
//! (one car at a time).
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timeslice_core::{HasStableKey, RelationKind, Relationship, TimeSlice, codec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Musician {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPump {
    pub id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub plate: String,
}

impl HasStableKey for Musician {
    type Key = String;

    fn stable_key(&self) -> String {
        self.name.clone()
    }
}

impl HasStableKey for Listener {
    type Key = String;

    fn stable_key(&self) -> String {
        self.name.clone()
    }
}

/// A listener attending a musician's concert.
pub enum ConcertVisit {}

impl RelationKind for ConcertVisit {
    const TAG: &'static str = "music.ConcertVisit";
}

/// A listener meeting a musician backstage; same parent/child types as
/// [`ConcertVisit`], told apart by the discriminator.
pub enum BackstageMeeting {}

impl RelationKind for BackstageMeeting {
    const TAG: &'static str = "music.BackstageMeeting";
}

/// A car occupying a gas pump.
pub enum FillUp {}

impl RelationKind for FillUp {
    const TAG: &'static str = "gasstation.FillUp";
}

pub type ConcertVisitRelationship = Relationship<ConcertVisit, Musician, Listener>;
pub type BackstageMeetingRelationship = Relationship<BackstageMeeting, Musician, Listener>;
pub type FillUpRelationship = Relationship<FillUp, GasPump, Car>;

pub fn instant(text: &str) -> DateTime<Utc> {
    codec::parse_instant(text).expect("fixture instant")
}

pub fn slice(start: &str, end: Option<&str>) -> TimeSlice {
    TimeSlice::new(instant(start), end.map(instant))
}

pub fn musician(name: &str) -> Musician {
    Musician {
        name: name.to_string(),
    }
}

pub fn listener(name: &str) -> Listener {
    Listener {
        name: name.to_string(),
    }
}

pub fn concert_visit(
    musician: &Musician,
    listener_name: &str,
    start: &str,
    end: Option<&str>,
) -> ConcertVisitRelationship {
    Relationship::new(musician.clone(), listener(listener_name), slice(start, end))
}

pub fn fill_up(pump: &GasPump, plate: &str, start: &str, end: Option<&str>) -> FillUpRelationship {
    Relationship::new(
        pump.clone(),
        Car {
            plate: plate.to_string(),
        },
        slice(start, end),
    )
}
