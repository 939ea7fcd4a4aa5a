//! Stages reported while a package is exported

/// Export stages, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportStage {
    Scanning,
    Validating,
    Creating,
    Compressing,
    /// Terminal stage, reported once and only on success
    Complete,
}

impl ExportStage {
    pub const ALL: [ExportStage; 5] = [
        ExportStage::Scanning,
        ExportStage::Validating,
        ExportStage::Creating,
        ExportStage::Compressing,
        ExportStage::Complete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExportStage::Scanning => "scanning",
            ExportStage::Validating => "validating",
            ExportStage::Creating => "creating",
            ExportStage::Compressing => "compressing",
            ExportStage::Complete => "complete",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ExportStage::Scanning => "Scanning folder structure...",
            ExportStage::Validating => "Validating documentation...",
            ExportStage::Creating => "Creating manifest...",
            ExportStage::Compressing => "Compressing files...",
            ExportStage::Complete => "Complete!",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ExportStage::Complete
    }
}

impl std::fmt::Display for ExportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.name(), self.message())
    }
}
