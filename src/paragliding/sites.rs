//! Flying sites around the Sussex Downs and the winds they work in
//!
//! The list is static reference data; its order is the order sites are shown.

use crate::Result;
use crate::models::CompassPoint;
use crate::models::CompassPoint::{E, ENE, N, NE, NNE, NNW, NW, S, SE, SSE, SSW, SW, WNW};

/// A named site with the wind directions it is flyable in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub name: &'static str,
    pub wind_directions: &'static [CompassPoint],
}

impl Site {
    #[must_use]
    pub fn is_flyable_in(&self, direction: CompassPoint) -> bool {
        self.wind_directions.contains(&direction)
    }
}

pub static SITES: [Site; 9] = [
    Site {
        name: "Beachy Head",
        wind_directions: &[SE],
    },
    Site {
        name: "Bo Peep",
        wind_directions: &[NNE, NE, ENE],
    },
    Site {
        name: "Caburn",
        wind_directions: &[S, SSW, SW],
    },
    Site {
        name: "Devils Dyke",
        wind_directions: &[N, WNW, NW, NNW],
    },
    Site {
        name: "Ditchling",
        wind_directions: &[N, NNE, NNW],
    },
    Site {
        name: "Firle",
        wind_directions: &[N, NNE, NW, NNW],
    },
    Site {
        name: "High & Over",
        wind_directions: &[E],
    },
    Site {
        name: "Newhaven Cliffs",
        wind_directions: &[SSE, S, SSW],
    },
    Site {
        name: "Truleigh",
        wind_directions: &[N, NNE, NNW],
    },
];

/// Sites that work in the given wind, in reference-list order
#[must_use]
pub fn recommend_sites(direction: CompassPoint) -> Vec<&'static Site> {
    SITES
        .iter()
        .filter(|site| site.is_flyable_in(direction))
        .collect()
}

/// Same as [`recommend_sites`] for a raw provider label such as `"NNE"`
pub fn recommend_sites_for_label(label: &str) -> Result<Vec<&'static Site>> {
    Ok(recommend_sites(label.parse()?))
}
