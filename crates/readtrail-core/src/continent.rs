//! ISO-3166 alpha-2 country code → continent translation.
//!
//! The table is sorted by country code and searched with a binary search.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The seven continents, with their two-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Continent {
  Africa,
  Antarctica,
  Asia,
  Europe,
  NorthAmerica,
  Oceania,
  SouthAmerica,
}

impl Continent {
  pub const ALL: [Continent; 7] = [
    Self::Africa,
    Self::Antarctica,
    Self::Asia,
    Self::Europe,
    Self::NorthAmerica,
    Self::Oceania,
    Self::SouthAmerica,
  ];

  pub fn code(self) -> &'static str {
    match self {
      Self::Africa => "AF",
      Self::Antarctica => "AN",
      Self::Asia => "AS",
      Self::Europe => "EU",
      Self::NorthAmerica => "NA",
      Self::Oceania => "OC",
      Self::SouthAmerica => "SA",
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Self::Africa => "Africa",
      Self::Antarctica => "Antarctica",
      Self::Asia => "Asia",
      Self::Europe => "Europe",
      Self::NorthAmerica => "North America",
      Self::Oceania => "Oceania",
      Self::SouthAmerica => "South America",
    }
  }

  /// Parse a two-letter continent code such as `"EU"`.
  pub fn from_code(code: &str) -> Result<Self> {
    if !is_two_letter_code(code) {
      return Err(Error::InvalidContinentCode(code.to_owned()));
    }
    Self::ALL
      .into_iter()
      .find(|c| c.code() == code)
      .ok_or_else(|| Error::UnknownContinent(code.to_owned()))
  }
}

impl fmt::Display for Continent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Look up the continent of an uppercase alpha-2 country code.
pub fn continent_of(country: &str) -> Result<Continent> {
  if !is_two_letter_code(country) {
    return Err(Error::InvalidCountryCode(country.to_owned()));
  }
  COUNTRY_TO_CONTINENT
    .binary_search_by(|(code, _)| (*code).cmp(country))
    .map(|i| COUNTRY_TO_CONTINENT[i].1)
    .map_err(|_| Error::UnknownCountry(country.to_owned()))
}

fn is_two_letter_code(code: &str) -> bool {
  code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

use Continent::*;

static COUNTRY_TO_CONTINENT: &[(&str, Continent)] = &[
  ("AB", Asia),
  ("AD", Europe),
  ("AE", Asia),
  ("AF", Asia),
  ("AG", NorthAmerica),
  ("AI", NorthAmerica),
  ("AL", Europe),
  ("AM", Asia),
  ("AO", Africa),
  ("AR", SouthAmerica),
  ("AS", Oceania),
  ("AT", Europe),
  ("AU", Oceania),
  ("AW", NorthAmerica),
  ("AX", Europe),
  ("AZ", Asia),
  ("BA", Europe),
  ("BB", NorthAmerica),
  ("BD", Asia),
  ("BE", Europe),
  ("BF", Africa),
  ("BG", Europe),
  ("BH", Asia),
  ("BI", Africa),
  ("BJ", Africa),
  ("BL", NorthAmerica),
  ("BM", NorthAmerica),
  ("BN", Asia),
  ("BO", SouthAmerica),
  ("BQ", NorthAmerica),
  ("BR", SouthAmerica),
  ("BS", NorthAmerica),
  ("BT", Asia),
  ("BV", Antarctica),
  ("BW", Africa),
  ("BY", Europe),
  ("BZ", NorthAmerica),
  ("CA", NorthAmerica),
  ("CC", Asia),
  ("CD", Africa),
  ("CF", Africa),
  ("CG", Africa),
  ("CH", Europe),
  ("CI", Africa),
  ("CK", Oceania),
  ("CL", SouthAmerica),
  ("CM", Africa),
  ("CN", Asia),
  ("CO", SouthAmerica),
  ("CR", NorthAmerica),
  ("CU", NorthAmerica),
  ("CV", Africa),
  ("CW", NorthAmerica),
  ("CX", Asia),
  ("CY", Asia),
  ("CZ", Europe),
  ("DE", Europe),
  ("DJ", Africa),
  ("DK", Europe),
  ("DM", NorthAmerica),
  ("DO", NorthAmerica),
  ("DZ", Africa),
  ("EC", SouthAmerica),
  ("EE", Europe),
  ("EG", Africa),
  ("ER", Africa),
  ("ES", Europe),
  ("ET", Africa),
  ("FI", Europe),
  ("FJ", Oceania),
  ("FK", SouthAmerica),
  ("FM", Oceania),
  ("FO", Europe),
  ("FR", Europe),
  ("GA", Africa),
  ("GB", Europe),
  ("GD", NorthAmerica),
  ("GE", Asia),
  ("GF", SouthAmerica),
  ("GG", Europe),
  ("GH", Africa),
  ("GI", Europe),
  ("GL", NorthAmerica),
  ("GM", Africa),
  ("GN", Africa),
  ("GP", NorthAmerica),
  ("GQ", Africa),
  ("GR", Europe),
  ("GS", SouthAmerica),
  ("GT", NorthAmerica),
  ("GU", Oceania),
  ("GW", Africa),
  ("GY", SouthAmerica),
  ("HK", Asia),
  ("HM", Antarctica),
  ("HN", NorthAmerica),
  ("HR", Europe),
  ("HT", NorthAmerica),
  ("HU", Europe),
  ("ID", Asia),
  ("IE", Europe),
  ("IL", Asia),
  ("IM", Europe),
  ("IN", Asia),
  ("IO", Asia),
  ("IQ", Asia),
  ("IR", Asia),
  ("IS", Europe),
  ("IT", Europe),
  ("JE", Europe),
  ("JM", NorthAmerica),
  ("JO", Asia),
  ("JP", Asia),
  ("KE", Africa),
  ("KG", Asia),
  ("KH", Asia),
  ("KI", Oceania),
  ("KM", Africa),
  ("KN", NorthAmerica),
  ("KP", Asia),
  ("KR", Asia),
  ("KW", Asia),
  ("KY", NorthAmerica),
  ("KZ", Asia),
  ("LA", Asia),
  ("LB", Asia),
  ("LC", NorthAmerica),
  ("LI", Europe),
  ("LK", Asia),
  ("LR", Africa),
  ("LS", Africa),
  ("LT", Europe),
  ("LU", Europe),
  ("LV", Europe),
  ("LY", Africa),
  ("MA", Africa),
  ("MC", Europe),
  ("MD", Europe),
  ("ME", Europe),
  ("MF", NorthAmerica),
  ("MG", Africa),
  ("MH", Oceania),
  ("MK", Europe),
  ("ML", Africa),
  ("MM", Asia),
  ("MN", Asia),
  ("MO", Asia),
  ("MP", Oceania),
  ("MQ", NorthAmerica),
  ("MR", Africa),
  ("MS", NorthAmerica),
  ("MT", Europe),
  ("MU", Africa),
  ("MV", Asia),
  ("MW", Africa),
  ("MX", NorthAmerica),
  ("MY", Asia),
  ("MZ", Africa),
  ("NA", Africa),
  ("NC", Oceania),
  ("NE", Africa),
  ("NF", Oceania),
  ("NG", Africa),
  ("NI", NorthAmerica),
  ("NL", Europe),
  ("NO", Europe),
  ("NP", Asia),
  ("NR", Oceania),
  ("NU", Oceania),
  ("NZ", Oceania),
  ("OM", Asia),
  ("OS", Asia),
  ("PA", NorthAmerica),
  ("PE", SouthAmerica),
  ("PF", Oceania),
  ("PG", Oceania),
  ("PH", Asia),
  ("PK", Asia),
  ("PL", Europe),
  ("PM", NorthAmerica),
  ("PR", NorthAmerica),
  ("PS", Asia),
  ("PT", Europe),
  ("PW", Oceania),
  ("PY", SouthAmerica),
  ("QA", Asia),
  ("RE", Africa),
  ("RO", Europe),
  ("RS", Europe),
  ("RU", Europe),
  ("RW", Africa),
  ("SA", Asia),
  ("SB", Oceania),
  ("SC", Africa),
  ("SD", Africa),
  ("SE", Europe),
  ("SG", Asia),
  ("SH", Africa),
  ("SI", Europe),
  ("SJ", Europe),
  ("SK", Europe),
  ("SL", Africa),
  ("SM", Europe),
  ("SN", Africa),
  ("SO", Africa),
  ("SR", SouthAmerica),
  ("SS", Africa),
  ("ST", Africa),
  ("SV", NorthAmerica),
  ("SY", Asia),
  ("SZ", Africa),
  ("TC", NorthAmerica),
  ("TD", Africa),
  ("TG", Africa),
  ("TH", Asia),
  ("TJ", Asia),
  ("TK", Oceania),
  ("TM", Asia),
  ("TN", Africa),
  ("TO", Oceania),
  ("TP", Asia),
  ("TR", Asia),
  ("TT", NorthAmerica),
  ("TV", Oceania),
  ("TW", Asia),
  ("TZ", Africa),
  ("UA", Europe),
  ("UG", Africa),
  ("US", NorthAmerica),
  ("UY", SouthAmerica),
  ("UZ", Asia),
  ("VC", NorthAmerica),
  ("VE", SouthAmerica),
  ("VG", NorthAmerica),
  ("VI", NorthAmerica),
  ("VN", Asia),
  ("VU", Oceania),
  ("WF", Oceania),
  ("WS", Oceania),
  ("XK", Europe),
  ("YE", Asia),
  ("YT", Africa),
  ("ZA", Africa),
  ("ZM", Africa),
  ("ZW", Africa),
];
