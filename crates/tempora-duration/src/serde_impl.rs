//! Serde support: durations are written as their ISO-8601 text.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::duration::Duration;
use crate::iso::IsoFormatUnit;

impl<U: IsoFormatUnit> Serialize for Duration<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.print().map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

struct DurationVisitor<U>(PhantomData<U>);

impl<'de, U: IsoFormatUnit> Visitor<'de> for DurationVisitor<U> {
    type Value = Duration<U>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an ISO-8601 duration string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Duration<U>, E> {
        Duration::parse(value).map_err(E::custom)
    }
}

impl<'de, U: IsoFormatUnit> Deserialize<'de> for Duration<U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DurationVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::Duration;
    use tempora_units::IsoUnit;

    #[test]
    fn json_uses_iso_text() {
        let d = Duration::of_positive().days(2).minutes(30).build().unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"P2DT30M\"");
        let back: Duration<IsoUnit> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<Duration<IsoUnit>>("\"P1M1Y\"").is_err());
    }
}
