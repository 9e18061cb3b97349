//! Teams and the static per-team lookup tables.

use serde::{Deserialize, Serialize};

/// A team taking part in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Three-letter abbreviation (e.g. `TOR`).
    pub abbreviation: String,
    /// Location name (e.g. `Toronto`). Empty when the abbreviation is unknown.
    pub location: String,
    /// Common name (e.g. `Maple Leafs`).
    pub common_name: String,
}

impl Team {
    /// Builds a team from its abbreviation, resolving the location from the
    /// built-in table.
    pub fn from_abbreviation(abbreviation: impl Into<String>, common_name: impl Into<String>) -> Self {
        let abbreviation = abbreviation.into();
        let location = location_for(&abbreviation).unwrap_or_default().to_string();
        Self {
            abbreviation,
            location,
            common_name: common_name.into(),
        }
    }

    /// Location and common name, e.g. `Toronto Maple Leafs`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.location, self.common_name)
            .trim()
            .to_string()
    }

    /// The team's social-media hashtag, or an empty string when unknown.
    pub fn hashtag(&self) -> &'static str {
        hashtag_for(&self.abbreviation).unwrap_or_default()
    }
}

/// Location name for a team abbreviation.
pub fn location_for(abbreviation: &str) -> Option<&'static str> {
    let location = match abbreviation {
        "ANA" => "Anaheim",
        "ARI" => "Arizona",
        "BOS" => "Boston",
        "BUF" => "Buffalo",
        "CGY" => "Calgary",
        "CAR" => "Carolina",
        "CHI" => "Chicago",
        "COL" => "Colorado",
        "CBJ" => "Columbus",
        "DAL" => "Dallas",
        "DET" => "Detroit",
        "EDM" => "Edmonton",
        "FLA" => "Florida",
        "LAK" => "Los Angeles",
        "MIN" => "Minnesota",
        "MTL" => "Montreal",
        "NSH" => "Nashville",
        "NJD" => "New Jersey",
        "NYI" | "NYR" => "New York",
        "OTT" => "Ottawa",
        "PHI" => "Philadelphia",
        "PIT" => "Pittsburgh",
        "SJS" => "San Jose",
        "SEA" => "Seattle",
        "STL" => "St. Louis",
        "TBL" => "Tampa Bay",
        "TOR" => "Toronto",
        "UTA" => "Utah",
        "VAN" => "Vancouver",
        "VGK" => "Vegas",
        "WSH" => "Washington",
        "WPG" => "Winnipeg",
        "CAN" => "Canada",
        "USA" => "USA",
        "SWE" => "Sweden",
        "FIN" => "Finland",
        _ => return None,
    };
    Some(location)
}

/// Hashtag for a team abbreviation.
pub fn hashtag_for(abbreviation: &str) -> Option<&'static str> {
    let tag = match abbreviation {
        "ANA" => "#FlyTogether",
        "BOS" => "#NHLBruins",
        "BUF" => "#SabreHood",
        "CGY" => "#Flames",
        "CAR" => "#RaiseUp",
        "CHI" => "#Blackhawks",
        "COL" => "#GoAvsGo",
        "CBJ" => "#CBJ",
        "DAL" => "#TexasHockey",
        "DET" => "#LGRW",
        "EDM" => "#LetsGoOilers",
        "FLA" => "#TimeToHunt",
        "LAK" => "#GoKingsGo",
        "MIN" => "#mnwild",
        "MTL" => "#GoHabsGo",
        "NSH" => "#Smashville",
        "NJD" => "#NJDevils",
        "NYI" => "#Isles",
        "NYR" => "#NYR",
        "OTT" => "#GoSensGo",
        "PHI" => "#LetsGoFlyers",
        "PIT" => "#LetsGoPens",
        "SJS" => "#TheFutureIsTeal",
        "SEA" => "#SeaKraken",
        "STL" => "#stlblues",
        "TBL" => "#GoBolts",
        "TOR" => "#LeafsForever",
        "UTA" => "#UtahHC",
        "VAN" => "#Canucks",
        "VGK" => "#VegasBorn",
        "WSH" => "#ALLCAPS",
        "WPG" => "#GoJetsGo",
        "CAN" => "#TeamCanada",
        "USA" => "#TeamUSA",
        "SWE" => "#TeamSweden",
        "FIN" => "#TeamFinland",
        _ => return None,
    };
    Some(tag)
}
