//! Diagnostic codes and classification
//!
//! Single source of truth for every code tokdump logs or reports, together
//! with the metadata that classifies it.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Registry code such as `E005` or `I004`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
    pub const OUTPUT_FAILURE: Code = Code::new("ERR004");
}

/// Command-line argument error codes
pub mod arguments {
    use super::Code;

    pub const UNKNOWN_FLAG: Code = Code::new("E001");
    pub const INCOMPATIBLE_FLAGS: Code = Code::new("E002");
    pub const NO_INPUT_FILES: Code = Code::new("E003");
    pub const TOO_MANY_FILES: Code = Code::new("E004");
}

/// Path validation and read errors
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_PATH: Code = Code::new("E006");
    pub const PERMISSION_DENIED: Code = Code::new("E007");
    pub const IO_ERROR: Code = Code::new("E008");
}

/// Lexical warnings (scanning never fails)
pub mod lexical {
    use super::Code;

    pub const LINE_SPLIT: Code = Code::new("W021");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const ARGUMENTS_VALIDATED: Code = Code::new("I002");
    pub const FILE_VALIDATED: Code = Code::new("I003");
    pub const FILE_TOKENIZED: Code = Code::new("I004");
    pub const RUN_COMPLETED: Code = Code::new("I005");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging system failed to initialize",
        "Check that logging is initialized exactly once per process",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Fix or unset the file named by TOKDUMP_CONFIG",
    ),
    ErrorMetadata::new(
        "ERR004",
        "System",
        Severity::High,
        false,
        true,
        "Token output could not be written",
        "Check that stdout is writable and not a closed pipe",
    ),
    ErrorMetadata::new(
        "E001",
        "Arguments",
        Severity::High,
        false,
        true,
        "Unknown command-line flag",
        "Run with --help to list the supported flags",
    ),
    ErrorMetadata::new(
        "E002",
        "Arguments",
        Severity::High,
        false,
        true,
        "Mutually exclusive output modes were selected",
        "Pass at most one of --raw, --suppress-blank and --group-spaces",
    ),
    ErrorMetadata::new(
        "E003",
        "Arguments",
        Severity::High,
        false,
        true,
        "No input files were given",
        "Pass one or more file paths",
    ),
    ErrorMetadata::new(
        "E004",
        "Arguments",
        Severity::High,
        false,
        true,
        "Too many input files were given",
        "Split the file list across several invocations",
    ),
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Input path does not exist or cannot be inspected",
        "Check the path spelling and the parent directory permissions",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Input path is not a regular file or block device",
        "Pass files, not directories or sockets",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Permission denied while opening an input file",
        "Grant read permission on the file",
    ),
    ErrorMetadata::new(
        "E008",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading an input file",
        "Check the underlying device or file system",
    ),
    ErrorMetadata::new(
        "W021",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Line exceeded the configured length bound and was split",
        "Raise or unset TOKDUMP_MAX_LINE_LENGTH",
    ),
    ErrorMetadata::new(
        "I001",
        "System",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "Continue processing",
    ),
    ErrorMetadata::new(
        "I002",
        "Arguments",
        Severity::Low,
        true,
        false,
        "Arguments validated",
        "Continue to tokenization",
    ),
    ErrorMetadata::new(
        "I003",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "Input path validated",
        "Continue validating remaining paths",
    ),
    ErrorMetadata::new(
        "I004",
        "Lexical",
        Severity::Low,
        true,
        false,
        "File tokenized",
        "Continue with the next file",
    ),
    ErrorMetadata::new(
        "I005",
        "System",
        Severity::Low,
        true,
        false,
        "All files tokenized",
        "None",
    ),
];

/// Metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|entry| (entry.code, entry.clone()))
            .collect()
    })
}

// ============================================================================
// LOOKUPS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Registry halt flag; unknown codes do not halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
