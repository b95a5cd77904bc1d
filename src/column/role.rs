use strum::{Display, EnumIter, EnumString};

/// The semantic role a column plays within a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Id,
    Geometry,
    X,
    Y,
    Time,
}

impl Role {
    /// Whether absence of this role makes a source unusable.
    /// A missing time column only disables timestamps.
    pub fn is_mandatory(&self) -> bool {
        !matches!(self, Role::Time)
    }
}
