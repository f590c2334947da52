use std::fmt;

#[derive(Debug)]
pub enum CommunityError {
    Io(std::io::Error),
    Csv(csv::Error),
    EmptyCommunity,
    LabelOutOfRange { individual: usize, label: u32, species_pool: u32 },
    ShapeMismatch { row: usize, found: usize, expected: usize },
    MissingHeader,
    DuplicateStation(String),
    InvalidCount { row: usize, column: usize, token: String },
}

impl fmt::Display for CommunityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunityError::Io(e) => write!(f, "I/O error: {}", e),
            CommunityError::Csv(e) => write!(f, "CSV parse error: {}", e),
            CommunityError::EmptyCommunity => {
                write!(f, "Community must contain at least one individual")
            }
            CommunityError::LabelOutOfRange { individual, label, species_pool } => {
                write!(f, "Label {} of individual {} exceeds species pool {}",
                    label, individual, species_pool)
            }
            CommunityError::ShapeMismatch { row, found, expected } => {
                write!(f, "Row {} has {} counts, expected {}", row, found, expected)
            }
            CommunityError::MissingHeader => {
                write!(f, "OTU table has no header row")
            }
            CommunityError::DuplicateStation(name) => {
                write!(f, "Duplicate station name '{}'", name)
            }
            CommunityError::InvalidCount { row, column, token } => {
                write!(f, "Invalid count '{}' at row {}, column {}", token, row, column)
            }
        }
    }
}

impl std::error::Error for CommunityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommunityError::Io(e) => Some(e),
            CommunityError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommunityError {
    fn from(e: std::io::Error) -> Self { Self::Io(e) }
}

impl From<csv::Error> for CommunityError {
    fn from(e: csv::Error) -> Self { Self::Csv(e) }
}
