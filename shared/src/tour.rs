use serde::Serialize;

use crate::Coordinate;

/// A fixed point of interest on the tour route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TourStop {
    pub id: &'static str,
    pub time: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub coordinate: Coordinate,
}

pub static ACROPOLIS_STOPS: [TourStop; 5] = [
    TourStop {
        id: "propylaia",
        time: "10:00 AM",
        title: "Propylaea & Beulé Gate",
        description: "The monumental gateway to the Acropolis. Prepare to be awestruck by the sheer scale of the entrance built by Mnesikles.",
        coordinate: Coordinate {
            lat: 37.9717,
            lon: 23.7250,
        },
    },
    TourStop {
        id: "athena-nike",
        time: "10:20 AM",
        title: "Temple of Athena Nike",
        description: "A small but elegant Ionic temple dedicated to Victory. It sits on a high bastion with views of the Saronic Gulf.",
        coordinate: Coordinate {
            lat: 37.9715,
            lon: 23.7249,
        },
    },
    TourStop {
        id: "parthenon",
        time: "10:40 AM",
        title: "The Parthenon",
        description: "The crown jewel of Athens. Dedicated to Athena Parthenos, this Doric temple is the peak of classical Greek architecture.",
        coordinate: Coordinate {
            lat: 37.9715,
            lon: 23.7266,
        },
    },
    TourStop {
        id: "erechtheion",
        time: "11:20 AM",
        title: "The Erechtheion",
        description: "Famous for the Porch of the Caryatids, where six female figures serve as columns. It marks the most sacred spot of the hill.",
        coordinate: Coordinate {
            lat: 37.9722,
            lon: 23.7265,
        },
    },
    TourStop {
        id: "viewpoints",
        time: "11:45 AM",
        title: "Eastern Viewpoint",
        description: "Look down upon the Theatre of Dionysus and the Odeon of Herodes Atticus before your 12 PM departure.",
        coordinate: Coordinate {
            lat: 37.9715,
            lon: 23.7285,
        },
    },
];

pub const ACROPOLIS_CENTER: Coordinate = Coordinate {
    lat: 37.9715,
    lon: 23.7257,
};

pub const TOUR_SLOT_LABEL: &str = "10:00 Slot";
pub const TOUR_DATE_LABEL: &str = "Feb 16";

pub const WINTER_TIPS: [&str; 2] = [
    "Expect a cool breeze at the summit (Propylaea). Keep your jacket zipped.",
    "The sun hits the Caryatids perfectly at 11:20 AM. Have your phone ready.",
];
