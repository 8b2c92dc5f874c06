//! Closed scenario vocabulary and the validator registry. The table is built
//! once at startup and read-only afterwards; a lookup miss is a skip signal,
//! never an error.

use std::collections::HashMap;

use crate::model::GeoField;
use crate::validator::{
    ConflictingCountryAndCode, CoordinateRange, CountryCodeLength, EmptyIp, FieldNotEqual,
    FieldPresent, InvalidIp, Validate, ValidIp,
};

/// Normalize a catalog scenario key: trim and lowercase.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Every scenario the suite knows how to judge. `key()` is the canonical
/// catalog spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    ValidIp,
    ValidIpv6Address,
    ValidPostalExtended,
    EmptyIpInput,
    CountryMismatch,
    InvalidCountry,
    RegionMismatch,
    MaxLengthRegion,
    CityMismatch,
    MaxLengthCity,
    CountryCodeMismatch,
    LowercaseCountryCode,
    ContinentMismatch,
    InvalidContinent,
    PostalCodeMismatch,
    InvalidPostal,
    NonNumericPostal,
    NoDashInZipPlus4,
    MissingCity,
    MissingCountryCode,
    MissingContinent,
    MissingLatitude,
    MissingLongitude,
    MissingPostal,
    MissingRegionAndCity,
    TooLongCountryCode,
    LatitudeOutOfRange,
    InvalidLatitudeFormat,
    LongitudeOutOfRange,
    InvalidLongitudeFormat,
    InvalidIp,
    InvalidIpFormat,
    IpWithPortNumber,
    Ipv6LoopbackAddress,
    LoopbackIp,
    PrivateIpRange,
    BroadcastIpAddress,
    ConflictingCountryAndCode,
}

impl Scenario {
    pub const ALL: [Scenario; 38] = [
        Scenario::ValidIp,
        Scenario::ValidIpv6Address,
        Scenario::ValidPostalExtended,
        Scenario::EmptyIpInput,
        Scenario::CountryMismatch,
        Scenario::InvalidCountry,
        Scenario::RegionMismatch,
        Scenario::MaxLengthRegion,
        Scenario::CityMismatch,
        Scenario::MaxLengthCity,
        Scenario::CountryCodeMismatch,
        Scenario::LowercaseCountryCode,
        Scenario::ContinentMismatch,
        Scenario::InvalidContinent,
        Scenario::PostalCodeMismatch,
        Scenario::InvalidPostal,
        Scenario::NonNumericPostal,
        Scenario::NoDashInZipPlus4,
        Scenario::MissingCity,
        Scenario::MissingCountryCode,
        Scenario::MissingContinent,
        Scenario::MissingLatitude,
        Scenario::MissingLongitude,
        Scenario::MissingPostal,
        Scenario::MissingRegionAndCity,
        Scenario::TooLongCountryCode,
        Scenario::LatitudeOutOfRange,
        Scenario::InvalidLatitudeFormat,
        Scenario::LongitudeOutOfRange,
        Scenario::InvalidLongitudeFormat,
        Scenario::InvalidIp,
        Scenario::InvalidIpFormat,
        Scenario::IpWithPortNumber,
        Scenario::Ipv6LoopbackAddress,
        Scenario::LoopbackIp,
        Scenario::PrivateIpRange,
        Scenario::BroadcastIpAddress,
        Scenario::ConflictingCountryAndCode,
    ];

    /// Canonical catalog spelling (already normalized).
    pub fn key(&self) -> &'static str {
        match self {
            Self::ValidIp => "valid ip",
            Self::ValidIpv6Address => "valid ipv6 address",
            Self::ValidPostalExtended => "valid postal extended",
            Self::EmptyIpInput => "empty ip input",
            Self::CountryMismatch => "country mismatch",
            Self::InvalidCountry => "invalid country",
            Self::RegionMismatch => "region mismatch",
            Self::MaxLengthRegion => "max length region",
            Self::CityMismatch => "city mismatch",
            Self::MaxLengthCity => "max length city",
            Self::CountryCodeMismatch => "country code mismatch",
            Self::LowercaseCountryCode => "lowercase country code",
            Self::ContinentMismatch => "continent mismatch",
            Self::InvalidContinent => "invalid continent",
            Self::PostalCodeMismatch => "postal code mismatch",
            Self::InvalidPostal => "invalid postal",
            Self::NonNumericPostal => "non-numeric postal",
            Self::NoDashInZipPlus4 => "no dash in zip+4",
            Self::MissingCity => "missing city",
            Self::MissingCountryCode => "missing country code",
            Self::MissingContinent => "missing continent",
            Self::MissingLatitude => "missing latitude",
            Self::MissingLongitude => "missing longitude",
            Self::MissingPostal => "missing postal",
            Self::MissingRegionAndCity => "missing region and city",
            Self::TooLongCountryCode => "too long country code",
            Self::LatitudeOutOfRange => "latitude out of range",
            Self::InvalidLatitudeFormat => "invalid latitude format without decimal",
            Self::LongitudeOutOfRange => "longitude out of range",
            Self::InvalidLongitudeFormat => "invalid longitude format",
            Self::InvalidIp => "invalid ip",
            Self::InvalidIpFormat => "invalid ip format",
            Self::IpWithPortNumber => "ip with port number (should be rejected)",
            Self::Ipv6LoopbackAddress => "ipv6 loopback address",
            Self::LoopbackIp => "loopback ip",
            Self::PrivateIpRange => "private ip range",
            Self::BroadcastIpAddress => "broadcast ip address",
            Self::ConflictingCountryAndCode => "conflicting country and code",
        }
    }

    /// Parse a raw catalog key. Unknown spellings are `None`, which the
    /// orchestrator turns into a skip.
    pub fn parse(raw: &str) -> Option<Scenario> {
        let key = normalize_key(raw);
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

fn validator_for(scenario: Scenario) -> Box<dyn Validate> {
    use GeoField::*;

    match scenario {
        Scenario::ValidIp | Scenario::ValidIpv6Address | Scenario::ValidPostalExtended => {
            Box::new(ValidIp)
        }
        Scenario::EmptyIpInput => Box::new(EmptyIp),

        Scenario::CountryMismatch | Scenario::InvalidCountry => {
            Box::new(FieldNotEqual { field: Country })
        }
        Scenario::RegionMismatch | Scenario::MaxLengthRegion => {
            Box::new(FieldNotEqual { field: Region })
        }
        Scenario::CityMismatch | Scenario::MaxLengthCity => Box::new(FieldNotEqual { field: City }),
        Scenario::CountryCodeMismatch | Scenario::LowercaseCountryCode => {
            Box::new(FieldNotEqual { field: CountryCode })
        }
        Scenario::ContinentMismatch | Scenario::InvalidContinent => {
            Box::new(FieldNotEqual { field: Continent })
        }
        Scenario::PostalCodeMismatch
        | Scenario::InvalidPostal
        | Scenario::NonNumericPostal
        | Scenario::NoDashInZipPlus4 => Box::new(FieldNotEqual { field: Postal }),

        Scenario::MissingCity => Box::new(FieldPresent { fields: &[City] }),
        Scenario::MissingCountryCode => Box::new(FieldPresent {
            fields: &[CountryCode],
        }),
        Scenario::MissingContinent => Box::new(FieldPresent {
            fields: &[Continent],
        }),
        Scenario::MissingLatitude => Box::new(FieldPresent {
            fields: &[Latitude],
        }),
        Scenario::MissingLongitude => Box::new(FieldPresent {
            fields: &[Longitude],
        }),
        Scenario::MissingPostal => Box::new(FieldPresent { fields: &[Postal] }),
        Scenario::MissingRegionAndCity => Box::new(FieldPresent {
            fields: &[Region, City],
        }),

        Scenario::TooLongCountryCode => Box::new(CountryCodeLength { max: 2 }),

        Scenario::LatitudeOutOfRange | Scenario::InvalidLatitudeFormat => {
            Box::new(CoordinateRange::latitude())
        }
        Scenario::LongitudeOutOfRange | Scenario::InvalidLongitudeFormat => {
            Box::new(CoordinateRange::longitude())
        }

        Scenario::InvalidIp
        | Scenario::InvalidIpFormat
        | Scenario::IpWithPortNumber
        | Scenario::Ipv6LoopbackAddress
        | Scenario::LoopbackIp
        | Scenario::PrivateIpRange
        | Scenario::BroadcastIpAddress => Box::new(InvalidIp),

        Scenario::ConflictingCountryAndCode => Box::new(ConflictingCountryAndCode),
    }
}

/// Immutable scenario -> validator table.
pub struct ScenarioRegistry {
    table: HashMap<Scenario, Box<dyn Validate>>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        let table = Scenario::ALL
            .iter()
            .map(|&s| (s, validator_for(s)))
            .collect();
        Self { table }
    }

    /// Resolve a raw catalog key. Unknown scenarios are `None`, never an
    /// error.
    pub fn lookup(&self, raw_key: &str) -> Option<&dyn Validate> {
        let scenario = Scenario::parse(raw_key)?;
        self.table.get(&scenario).map(|v| v.as_ref())
    }

    pub fn contains(&self, raw_key: &str) -> bool {
        Scenario::parse(raw_key).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Known keys in canonical order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        Scenario::ALL.iter().map(|s| s.key())
    }
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self::new()
    }
}
