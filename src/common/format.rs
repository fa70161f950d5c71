use bytesize::ByteSize;
use colored::*;

/// Format bytes into human-readable size string
pub fn format_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Format size with color based on magnitude
pub fn format_size_colored(bytes: u64) -> ColoredString {
    let s = format_size(bytes);
    const MB100: u64 = 100 * 1024 * 1024;

    if bytes >= MB100 {
        s.yellow()
    } else {
        s.white()
    }
}

/// Format a count with the right plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Format a path for display, replacing home directory with ~
pub fn format_path(path: &std::path::Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_zero() {
        assert_eq!(format_size(0), "0 B");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "file", "files"), "1 file");
        assert_eq!(format_count(0, "file", "files"), "0 files");
        assert_eq!(format_count(3, "directory", "directories"), "3 directories");
    }

    #[test]
    fn test_format_path_outside_home() {
        let path = std::path::Path::new("/tmp/dist/a.js");
        assert_eq!(format_path(path), "/tmp/dist/a.js");
    }
}
