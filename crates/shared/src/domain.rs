/// A closed set of human-facing choices with a fixed display order.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];
    /// Display labels, index-aligned with `ALL`.
    const LABELS: &'static [&'static str];

    /// Numeric code the prediction service expects for this choice.
    fn code(self) -> u8;

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];
    const LABELS: &'static [&'static str] = &["Masculino", "Femenino"];

    fn code(self) -> u8 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl Choice for YesNo {
    const ALL: &'static [Self] = &[Self::Yes, Self::No];
    const LABELS: &'static [&'static str] = &["Sí", "No"];

    fn code(self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }
}

/// Degree programmes offered by the form. The service identifies a course by
/// its position in this list, so the order is part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Course {
    ComputerEngineering,
    CivilEngineering,
    Medicine,
    Law,
    Psychology,
    BusinessAdministration,
    Architecture,
    Biology,
    Chemistry,
    Physics,
    Mathematics,
    Economics,
    Communication,
    GraphicDesign,
    Nursing,
}

impl Choice for Course {
    const ALL: &'static [Self] = &[
        Self::ComputerEngineering,
        Self::CivilEngineering,
        Self::Medicine,
        Self::Law,
        Self::Psychology,
        Self::BusinessAdministration,
        Self::Architecture,
        Self::Biology,
        Self::Chemistry,
        Self::Physics,
        Self::Mathematics,
        Self::Economics,
        Self::Communication,
        Self::GraphicDesign,
        Self::Nursing,
    ];
    const LABELS: &'static [&'static str] = &[
        "Ingeniería Informática",
        "Ingeniería Civil",
        "Medicina",
        "Derecho",
        "Psicología",
        "Administración de Empresas",
        "Arquitectura",
        "Biología",
        "Química",
        "Física",
        "Matemáticas",
        "Economía",
        "Comunicación",
        "Diseño Gráfico",
        "Enfermería",
    ];

    fn code(self) -> u8 {
        match self {
            Self::ComputerEngineering => 0,
            Self::CivilEngineering => 1,
            Self::Medicine => 2,
            Self::Law => 3,
            Self::Psychology => 4,
            Self::BusinessAdministration => 5,
            Self::Architecture => 6,
            Self::Biology => 7,
            Self::Chemistry => 8,
            Self::Physics => 9,
            Self::Mathematics => 10,
            Self::Economics => 11,
            Self::Communication => 12,
            Self::GraphicDesign => 13,
            Self::Nursing => 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position<T: Choice>(label: &str) -> Option<T> {
        T::LABELS
            .iter()
            .position(|candidate| *candidate == label)
            .and_then(T::from_index)
    }

    #[test]
    fn labels_line_up_with_variants() {
        assert_eq!(Gender::LABELS.len(), Gender::ALL.len());
        assert_eq!(YesNo::LABELS.len(), YesNo::ALL.len());
        assert_eq!(Course::LABELS.len(), Course::ALL.len());
        assert_eq!(Course::ALL.len(), 15);
    }

    #[test]
    fn course_codes_follow_display_order() {
        for (index, course) in Course::ALL.iter().enumerate() {
            assert_eq!(usize::from(course.code()), index, "{course:?}");
        }
    }

    #[test]
    fn labels_resolve_exactly() {
        assert_eq!(position::<Course>("Derecho"), Some(Course::Law));
        assert_eq!(position::<Course>("Enfermería"), Some(Course::Nursing));
        assert_eq!(position::<Gender>("Femenino"), Some(Gender::Female));
        assert_eq!(position::<YesNo>("Sí"), Some(YesNo::Yes));
        assert_eq!(position::<YesNo>("si"), None);
        assert_eq!(Course::from_index(15), None);
    }
}
