use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Sex {
    Male => "M",
    Female => "F",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sex_round_trip() {
        assert_eq!(Sex::from_str("M").unwrap(), Sex::Male);
        assert_eq!(Sex::from_str("F").unwrap(), Sex::Female);
        assert_eq!(Sex::Female.as_str(), "F");
    }

    #[test]
    fn sex_rejects_unknown_value() {
        let err = Sex::from_str("X").unwrap_err();
        assert!(matches!(
            err,
            crate::db::DatabaseError::InvalidEnum { ref field, ref value }
                if field == "Sex" && value == "X"
        ));
    }
}
