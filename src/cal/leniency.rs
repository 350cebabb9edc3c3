//! Chronologies that change how every field treats out-of-range values.

use std::sync::Arc;

use crate::cal::zone::ZoneRef;
use crate::cal::{Assembly, Chronology, ChronologyKey, ChronologyRef, Mode};
use crate::error::{Error, Result};
use crate::field::{DateTimeFieldRef, LenientDateTimeField, StrictDateTimeField};


/// Declares a chronology that wraps every field of a base in a leniency
/// adapter and otherwise behaves exactly like it.
macro_rules! wrapping_chronology {
    ($(#[$meta:meta])* $name:ident, $mode:expr, $field:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            key: ChronologyKey,
            zone: ZoneRef,
            assembly: Assembly,
        }

        impl $name {
            pub fn new(base: ChronologyRef) -> Result<$name> {
                let key = base.key();
                if key.mode != Mode::Standard {
                    return Err(Error::invalid(format!("Cannot wrap a {:?} chronology", key.mode)));
                }

                let key = ChronologyKey { mode: $mode, ..key };
                let zone = base.zone().clone();
                let assembly = Assembly::new(Some(base), |set| {
                    set.map_fields(|field| Arc::new($field::new(field)) as DateTimeFieldRef);
                    Ok(())
                })?;

                Ok($name { key, zone, assembly })
            }

            /// The chronology this one wraps.
            pub fn base(&self) -> Option<&ChronologyRef> {
                self.assembly.base()
            }
        }

        impl Chronology for $name {
            fn key(&self) -> ChronologyKey {
                self.key.clone()
            }

            fn zone(&self) -> &ZoneRef {
                &self.zone
            }

            fn assembly(&self) -> &Assembly {
                &self.assembly
            }
        }
    };
}

wrapping_chronology! {
    /// A chronology whose fields refuse every out-of-range value, and every
    /// set that would have to quietly adjust a smaller field.
    StrictChronology, Mode::Strict, StrictDateTimeField
}

wrapping_chronology! {
    /// A chronology whose fields clamp out-of-range values into range.
    LenientChronology, Mode::Lenient, LenientDateTimeField
}
