//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table. The candidacy lifecycle
//! lives in `vagas_core::candidatura` because it carries transition rules.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

pub use vagas_core::candidatura::CandidaturaStatus;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Name stored in the lookup table.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                let name = name.trim();
                $( if name.eq_ignore_ascii_case($label) { return Some($name::$variant); } )+
                None
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Job posting lifecycle status. Only `Aberta` postings accept applications.
    VagaStatus {
        Aberta = 1 => "aberta",
        Pausada = 2 => "pausada",
        Encerrada = 3 => "encerrada",
    }
}
