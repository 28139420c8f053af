//! Serde support: plain entities are written as their ISO-8601 text.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::plain_date::PlainDate;
use crate::plain_time::PlainTime;
use crate::plain_timestamp::PlainTimestamp;

struct IsoVisitor<T> {
    expecting: &'static str,
    target: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for IsoVisitor<T>
where
    T: FromStr<Err = tempora_core::Error>,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        value.parse().map_err(E::custom)
    }
}

macro_rules! iso_text_serde {
    ($ty:ty, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_str(IsoVisitor {
                    expecting: $expecting,
                    target: PhantomData,
                })
            }
        }
    };
}

iso_text_serde!(PlainDate, "an ISO-8601 calendar date");
iso_text_serde!(PlainTime, "an ISO-8601 wall time");
iso_text_serde!(PlainTimestamp, "an ISO-8601 local timestamp");
