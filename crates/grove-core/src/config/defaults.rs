//! Default values for Grove configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default on-disk location of the graph database.
pub const DEFAULT_DATA_DIR: &str = ".grove/graph.db";

// ============================================================================
// Indexing Defaults
// ============================================================================

/// Maximum concurrent graph writes within one indexing phase.
pub const DEFAULT_MAX_CONCURRENT_WRITES: usize = 16;

/// Default file extensions considered indexable source files.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // Rust
    "rs", "toml",
    // JavaScript/TypeScript
    "js", "ts", "jsx", "tsx", "mjs", "cjs",
    // Python
    "py", "pyi",
    // Go
    "go", "mod", "sum",
    // Java/Kotlin
    "java", "kt", "kts",
    // C/C++
    "c", "h", "cpp", "hpp", "cc", "hh",
    // C#
    "cs", "csproj",
    // Ruby
    "rb", "rake", "gemspec",
    // PHP
    "php",
    // Swift
    "swift",
    // Web
    "html", "css", "scss",
    // Config/Data
    "json", "yaml", "yml", "xml",
    // Shell
    "sh", "bash", "zsh",
    // Documentation
    "md", "txt", "rst",
];

/// Default directories excluded from workspace walking.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Dependencies
    "node_modules",
    "vendor",
    "venv",
    ".venv",
    "__pycache__",
    ".pytest_cache",
    // Build outputs
    "target",
    "build",
    "dist",
    "out",
    // IDE/Editor
    ".idea",
    ".vscode",
    // Grove's own data
    ".grove",
    // Other common excludes
    "coverage",
    ".cache",
];

// ============================================================================
// Identity Defaults
// ============================================================================

/// Hex length of FILE id hash suffixes.
pub const DEFAULT_FILE_HASH_LEN: usize = 16;

/// Hex length of ENTITY and RELATIONSHIP id hash suffixes.
pub const DEFAULT_ENTITY_HASH_LEN: usize = 12;
