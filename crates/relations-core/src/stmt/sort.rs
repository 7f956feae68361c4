/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Sort {
        Sort {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Sort {
        Sort {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Parses `name` as ascending and `-name` as descending.
    pub fn parse(spec: &str) -> Sort {
        match spec.strip_prefix('-') {
            Some(field) => Sort::desc(field),
            None => Sort::asc(spec.strip_prefix('+').unwrap_or(spec)),
        }
    }
}
