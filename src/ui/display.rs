//! Display utilities for walk results, plans and reports.

use std::path::Path;

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{Cell, Table};
use console::style;
use hashbrown::HashMap;

use crate::types::{FileEntry, Placement};

/// Formats bytes the way reports print them: `512 bytes`, `1.5 KB`, `2.0 MB`, `1.0 GB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b < KB => format!("{b} bytes"),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.1} MB", b as f64 / MB as f64),
        b => format!("{:.1} GB", b as f64 / GB as f64),
    }
}

/// Builds the table printed by `scan`.
pub fn entries_table(entries: &[FileEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Kind", "Depth"]);

    for entry in entries {
        table.add_row(vec![Cell::new(entry.relative().display()), Cell::new(entry.kind()), Cell::new(entry.depth())]);
    }

    table
}

/// Builds the table printed by `plan`.
pub fn plan_table(placements: &[Placement]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["File", "Folder", "Matched by"]);

    for placement in placements {
        table.add_row(vec![Cell::new(placement.entry.file_name()), Cell::new(&placement.folder), Cell::new(placement.rule)]);
    }

    table
}

/// Number of files per destination folder, largest group first, ties by name.
pub fn folder_counts(placements: &[Placement]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for placement in placements {
        *counts.entry(placement.folder.as_str()).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().map(|(folder, n)| (folder.to_owned(), n)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Prints the entries found by a walk plus a one-line summary.
pub fn show_entries(root: &Path, entries: &[FileEntry], errors: usize) {
    if entries.is_empty() {
        println!("{}", style(format!("No entries found under {}", root.display())).yellow());
    } else {
        println!("{}", entries_table(entries));
    }

    let files = entries.iter().filter(|e| e.is_file()).count();
    let dirs = entries.iter().filter(|e| e.is_dir()).count();

    println!();
    println!("{} {}", style("✓").green(), style(format!("{}, {} under {}", count_noun(files, "file", "files"), count_noun(dirs, "directory", "directories"), root.display())).bold());

    if errors > 0 {
        show_warning(&format!("{} could not be read", count_noun(errors, "entry", "entries")));
    }
}

/// `1 file`, `3 files`.
pub fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

/// Prints the suggested placements and how many files land in each folder.
pub fn show_plan(root: &Path, placements: &[Placement]) {
    if placements.is_empty() {
        println!("{}", style(format!("No files to organize in {}", root.display())).yellow());
        return;
    }

    println!("{}", plan_table(placements));
    println!();

    for (folder, count) in folder_counts(placements) {
        println!("  {:>4}  {}", style(count).bold(), style(folder).cyan());
    }

    println!();
    println!("{} {}", style("✓").green(), style(format!("{} would be organized. Nothing was moved.", count_noun(placements.len(), "file", "files"))).bold());
}

/// Displays report success message.
pub fn show_report_written(path: &Path) {
    println!();
    println!("{} {}", style("✓").green(), style(format!("Report generated: {}", path.display())).bold());
}

pub fn show_warning(message: &str) {
    eprintln!("{} {}", style("!").yellow(), style(message).yellow());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryKind, MatchRule};

    fn placement(name: &str, folder: &str) -> Placement {
        Placement { entry: FileEntry::new(format!("/root/{name}"), name, EntryKind::File, 1), folder: folder.to_owned(), rule: MatchRule::Extension }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
    }

    #[test]
    fn test_count_noun() {
        assert_eq!(count_noun(0, "directory", "directories"), "0 directories");
        assert_eq!(count_noun(1, "directory", "directories"), "1 directory");
        assert_eq!(count_noun(2, "entry", "entries"), "2 entries");
    }

    #[test]
    fn test_folder_counts_sorted() {
        let placements = vec![placement("a.jpg", "Images/JPEG"), placement("b.txt", "Documents/Text"), placement("c.jpg", "Images/JPEG"), placement("d.mp3", "Audio/MP3")];

        assert_eq!(folder_counts(&placements), vec![("Images/JPEG".to_owned(), 2), ("Audio/MP3".to_owned(), 1), ("Documents/Text".to_owned(), 1)]);
    }

    #[test]
    fn test_plan_table_lists_rows() {
        let rendered = plan_table(&[placement("a.jpg", "Images/JPEG")]).to_string();
        assert!(rendered.contains("a.jpg"));
        assert!(rendered.contains("Images/JPEG"));
        assert!(rendered.contains("extension"));
    }

    #[test]
    fn test_entries_table_lists_kind() {
        let entries = vec![FileEntry::new("/root/docs", "docs", EntryKind::Directory, 1)];
        let rendered = entries_table(&entries).to_string();
        assert!(rendered.contains("docs"));
        assert!(rendered.contains("directory"));
    }
}
