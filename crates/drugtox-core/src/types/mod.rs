//! Request-scoped domain types.

mod message;
mod molecule;
mod narrative;
mod prediction;
mod vision;

pub use message::{ChatMessage, Role, last_user_content};
pub use molecule::MoleculeQuery;
pub use narrative::{AnalysisNarrative, NarrativeSource};
pub use prediction::{
    EndpointPrediction, EndpointScore, OverallAssessment, PredictedClass, PredictionResult,
    PredictionSummary,
};
pub use vision::{Confidence, VisionExtractionResult};

/// The twelve Tox21 assay endpoints most predictors are trained on.
pub const TOX21_ENDPOINTS: [&str; 12] = [
    "NR-AR",
    "NR-AR-LBD",
    "NR-AhR",
    "NR-Aromatase",
    "NR-ER",
    "NR-ER-LBD",
    "NR-PPAR-gamma",
    "SR-ARE",
    "SR-ATAD5",
    "SR-HSE",
    "SR-MMP",
    "SR-p53",
];
