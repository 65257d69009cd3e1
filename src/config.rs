//! Global Configuration Constants
//!
//! Every tunable used by tidydir lives here: the report defaults, the age
//! threshold for stale files, and the rule tables that drive classification.
//! Nothing is read from disk; per-invocation settings come from the CLI.

/// Application name used in banners and report headers
pub const APP_NAME: &str = "tidydir";

/// Report file written into the processed directory when no name is given
pub const DEFAULT_REPORT_NAME: &str = "file_organization_report.txt";

/// Files older than this many days are flagged as deletion candidates
pub const STALE_AGE_DAYS: f64 = 180.0;

/// Label used in reports for files that live directly in the root
pub const ROOT_LABEL: &str = "Root Directory";

/// Folder used for files whose extension has no entry in [`EXTENSION_MAP`]
pub const OTHER_FOLDER: &str = "Other";

/// Sub-folder of [`OTHER_FOLDER`] for files without any extension
pub const NO_EXTENSION_FOLDER: &str = "No_Extension";

/// Directory or file name fragments that mark a file as a deletion candidate
///
/// Matching is case-insensitive against both the relative directory and the
/// file name, so `Downloads/setup.exe` and `report_backupfiles.txt` both hit.
pub const DELETION_CATEGORIES: &[&str] = &["TemporaryFiles", "BackupFiles", "OldFiles", "Duplicates", "Downloads", "Cache"];

/// Patterns skipped by `scan` unless the user supplies their own
pub const EXCLUDED_PATTERNS: &[&str] = &[
    ".git",         // Git repository metadata
    "node_modules", // Node.js dependencies
    "target",       // Rust build artifacts
    "__pycache__",  // Python bytecode cache
];

/// Extension (lowercase, with dot) to destination folder
pub const EXTENSION_MAP: &[(&str, &str)] = &[
    // Documents
    (".doc", "Documents/Word"),
    (".docx", "Documents/Word"),
    (".pdf", "Documents/PDF"),
    (".txt", "Documents/Text"),
    (".rtf", "Documents/Text"),
    (".xlsx", "Documents/Excel"),
    (".xls", "Documents/Excel"),
    (".pptx", "Documents/PowerPoint"),
    (".ppt", "Documents/PowerPoint"),
    // Images
    (".jpg", "Images/JPEG"),
    (".jpeg", "Images/JPEG"),
    (".png", "Images/PNG"),
    (".gif", "Images/GIF"),
    (".bmp", "Images/BMP"),
    (".svg", "Images/SVG"),
    // Audio
    (".mp3", "Audio/MP3"),
    (".wav", "Audio/WAV"),
    (".flac", "Audio/FLAC"),
    (".aac", "Audio/AAC"),
    // Video
    (".mp4", "Video/MP4"),
    (".avi", "Video/AVI"),
    (".mkv", "Video/MKV"),
    (".mov", "Video/MOV"),
    // Archives
    (".zip", "Archives/ZIP"),
    (".rar", "Archives/RAR"),
    (".tar", "Archives/TAR"),
    (".gz", "Archives/GZ"),
    // Programming
    (".py", "Programming/Python"),
    (".java", "Programming/Java"),
    (".cpp", "Programming/C++"),
    (".c", "Programming/C"),
    // Web development shares one folder
    (".html", "WebDevelopment"),
    (".htm", "WebDevelopment"),
    (".css", "WebDevelopment"),
    (".js", "WebDevelopment"),
    (".php", "WebDevelopment"),
    (".jsx", "WebDevelopment"),
    (".ts", "WebDevelopment"),
    (".tsx", "WebDevelopment"),
];

/// Name pattern (regex, matched case-insensitively anywhere in the name) to folder
///
/// Order matters: the first matching pattern wins.
pub const NAME_PATTERNS: &[(&str, &str)] = &[
    (r"backup|bak", "BackupFiles"),
    (r"temp|tmp", "TemporaryFiles"),
    (r"draft|wip", "WorkInProgress"),
    (r"old|outdated|deprecated", "OldFiles"),
    (r"screenshot|screen|scrn", "Screenshots"),
    (r"report|review", "Reports"),
    (r"invoice|receipt|bill", "FinancialDocs"),
    (r"log|logs", "LogFiles"),
    (r"presentation|slides", "Presentations"),
    (r"project|prj", "ProjectFiles"),
    (r"data|dataset", "DataFiles"),
    (r"test|testing", "TestFiles"),
    (r"sample|example", "SampleFiles"),
    (r"config|cfg|settings", "ConfigFiles"),
    (r"note|notes", "Notes"),
    (r"download|dl", "Downloads"),
    (r"scan|scanned", "ScannedDocs"),
    (r"(20\d{2})[-_]?(0[1-9]|1[0-2])[-_]?(0[1-9]|[12][0-9]|3[01])", "DateFormattedFiles"),
    (r"website|site|web", "WebProjects"),
];
