use strum::{Display, EnumIter};

/// Which reference table a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ReferenceKind {
    Make,
    Color,
    Location,
}

impl ReferenceKind {
    /// Table name; also the route segment under `/api`
    pub fn table(self) -> &'static str {
        match self {
            ReferenceKind::Make => "make",
            ReferenceKind::Color => "color",
            ReferenceKind::Location => "location",
        }
    }

    /// Column and JSON field holding the value
    pub fn name_field(self) -> &'static str {
        match self {
            ReferenceKind::Make => "make_name",
            ReferenceKind::Color => "color_name",
            ReferenceKind::Location => "location_name",
        }
    }

    /// Capitalized name used in client-facing messages
    pub fn label(self) -> &'static str {
        match self {
            ReferenceKind::Make => "Make",
            ReferenceKind::Color => "Color",
            ReferenceKind::Location => "Location",
        }
    }

    pub fn route(self) -> String {
        format!("/{}", self.table())
    }
}
