//! Destination key construction.

/// Joins the destination prefix and a relative key with a single `/`.
///
/// Stray separators on either side of the join point are dropped, so
/// `backups/2024/` + `report.csv` and `backups/2024` + `/report.csv` both
/// produce `backups/2024/report.csv`. Object keys never start with `/`.
pub fn join_key(prefix: &str, relative: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let relative = relative.trim_start_matches('/');
    if prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{prefix}/{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_separator() {
        assert_eq!(join_key("backups/2024", "report.csv"), "backups/2024/report.csv");
    }

    #[test]
    fn trailing_prefix_slash_not_doubled() {
        assert_eq!(join_key("backups/2024/", "report.csv"), "backups/2024/report.csv");
    }

    #[test]
    fn leading_relative_slash_not_doubled() {
        assert_eq!(join_key("backups/2024/", "/report.csv"), "backups/2024/report.csv");
    }

    #[test]
    fn leading_prefix_slash_dropped() {
        assert_eq!(join_key("/backups", "report.csv"), "backups/report.csv");
    }

    #[test]
    fn empty_prefix_is_bare_key() {
        assert_eq!(join_key("", "report.csv"), "report.csv");
        assert_eq!(join_key("/", "report.csv"), "report.csv");
    }

    #[test]
    fn nested_relative_key_preserved() {
        assert_eq!(
            join_key("backups", "nested/deep/d.dat"),
            "backups/nested/deep/d.dat"
        );
    }
}
